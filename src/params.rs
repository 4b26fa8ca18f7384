//! Parsing of the `GET /data` query parameters.
//!
//! Windows are restricted to the presets offered by the dashboard so that
//! history queries stay bounded; free-form durations are rejected.

use chrono::Duration;

use crate::AppError;

// ---

/// Hour counts accepted for `duration`.
pub const ALLOWED_WINDOW_HOURS: [i64; 6] = [1, 12, 24, 72, 120, 168];

/// Point count used when `limit` is not given.
pub const DEFAULT_LIMIT: usize = 100;

/// Parse the `duration` token into a look-back window.
///
/// An absent or empty token means one hour. A single trailing `h` is
/// accepted, so `"24"` and `"24h"` are equivalent.
pub fn parse_duration(token: Option<&str>) -> Result<Duration, AppError> {
    // ---
    let token = token.unwrap_or_default();
    if token.is_empty() {
        return Ok(Duration::hours(1));
    }

    let hours: i64 = token
        .strip_suffix('h')
        .unwrap_or(token)
        .parse()
        .map_err(|_| AppError::InvalidDuration(token.to_string()))?;

    if !ALLOWED_WINDOW_HOURS.contains(&hours) {
        return Err(AppError::InvalidDuration(token.to_string()));
    }
    Ok(Duration::hours(hours))
}

/// Parse the `limit` token into a positive number of points.
pub fn parse_limit(token: Option<&str>) -> Result<usize, AppError> {
    // ---
    let token = token.unwrap_or_default();
    if token.is_empty() {
        return Ok(DEFAULT_LIMIT);
    }

    match token.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(AppError::InvalidLimit(token.to_string())),
    }
}
