//! Timing and change detection between consecutive frames of one message.
//!
//! These are the pure computations behind [`MessageState::update`](crate::MessageState::update):
//! the inter-arrival delta and the per-byte change flags. They only ever compare a
//! frame with the one immediately before it.

/// Seconds between two receipts of the same message.
///
/// Timestamps are not validated: a source that goes backwards in time yields a
/// negative delta.
pub fn arrival_delta(previous: f64, current: f64) -> f64 {
    current - previous
}

/// Per-byte change flags of `current` relative to `previous`.
///
/// The result has one entry per byte of `current`. Indices present in both
/// payloads compare the byte values; bytes only present in a longer `current`
/// payload count as changed. Bytes only present in `previous` are not reported.
pub fn diff_payload(previous: &[u8], current: &[u8]) -> Vec<bool> {
    current
        .iter()
        .enumerate()
        .map(|(i, byte)| previous.get(i).is_none_or(|prev| prev != byte))
        .collect()
}

/// Change flags for the first frame ever seen for a message: nothing changed.
pub fn unchanged(len: usize) -> Vec<bool> {
    vec![false; len]
}
