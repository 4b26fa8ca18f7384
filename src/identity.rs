//! Server-side allocation of device identifiers.
//!
//! A candidate UUID is checked against the readings already stored and
//! regenerated on collision. Nothing is reserved: the id only becomes
//! "taken" once a reading carrying it is inserted, so two concurrent
//! allocations can in principle accept the same candidate. With v4 UUIDs the
//! odds are negligible.

use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{store::ReadingStore, AppError};

// ---

/// Upper bound on candidates tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 8;

/// Allocate a device id using random v4 UUIDs.
pub async fn allocate_device_id(
    store: &dyn ReadingStore,
    check_timeout: Duration,
) -> Result<Uuid, AppError> {
    allocate_device_id_with(store, check_timeout, Uuid::new_v4).await
}

/// Allocate a device id drawing candidates from `generate`.
///
/// A failed or timed-out existence check is logged and treated as "not
/// taken", so a struggling database never blocks first contact from a sensor.
pub async fn allocate_device_id_with<F>(
    store: &dyn ReadingStore,
    check_timeout: Duration,
    mut generate: F,
) -> Result<Uuid, AppError>
where
    F: FnMut() -> Uuid + Send,
{
    // ---
    for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
        let candidate = generate();

        let check = tokio::time::timeout(check_timeout, store.device_id_exists(candidate));
        let taken = match check.await {
            Ok(Ok(taken)) => taken,
            Ok(Err(e)) => {
                warn!("Failed to check device id existence: {}", e);
                false
            }
            Err(_) => {
                warn!("Device id existence check timed out after {:?}", check_timeout);
                false
            }
        };

        if !taken {
            debug!("Allocated device id {} on attempt {}", candidate, attempt);
            return Ok(candidate);
        }
        debug!("Device id {} already in use, retrying", candidate);
    }

    Err(AppError::AllocationExhausted {
        attempts: MAX_ALLOCATION_ATTEMPTS,
    })
}
