//! Even-stride downsampling of ordered history.
//!
//! Points are selected, never averaged: every output element is one of the
//! input elements, in input order. The first and last inputs are always kept
//! so a chart spans the whole window.

// ---

/// Reduce `items` to at most `limit` elements.
///
/// - `items.len() <= limit`: returned unchanged.
/// - `limit == 0`: empty.
/// - `limit == 1`: only the last (newest) element.
/// - otherwise: exactly `limit` elements, the `i`-th being
///   `items[floor(i * (len - 1) / (limit - 1))]` with the endpoints pinned.
pub fn downsample<T>(items: Vec<T>, limit: usize) -> Vec<T> {
    // ---
    let len = items.len();
    if len <= limit {
        return items;
    }

    match limit {
        0 => Vec::new(),
        1 => items.into_iter().last().into_iter().collect(),
        _ => {
            let step = (len - 1) as f64 / (limit - 1) as f64;
            let mut picks = Vec::with_capacity(limit);
            picks.push(0);
            picks.extend((1..limit - 1).map(|i| (i as f64 * step) as usize));
            picks.push(len - 1);

            // `picks` is non-decreasing and step > 1, so one forward pass suffices.
            let mut picks = picks.into_iter().peekable();
            let mut out = Vec::with_capacity(limit);
            for (idx, item) in items.into_iter().enumerate() {
                if picks.peek() == Some(&idx) {
                    picks.next();
                    out.push(item);
                }
            }
            out
        }
    }
}
