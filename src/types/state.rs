//! Per-message tracked state

use super::Frame;
use crate::change;

/// Latest observed state of one (bus, identifier) slot.
///
/// Created by the first frame for a key and mutated in place by every later one.
/// Two flags follow a "set on write, cleared on read" pattern:
/// - `seen_since_last_render` is set by [`update`](Self::update) and cleared by
///   [`mark_rendered`](Self::mark_rendered)
/// - `byte_changed` always describes the last frame against the one before it
#[derive(Debug, Clone, PartialEq)]
pub struct MessageState {
    last_frame: Frame,
    last_delta: f64,
    byte_changed: Vec<bool>,
    seen_since_last_render: bool,
    count: u64,
}

impl MessageState {
    /// State for the first frame ever seen on a key
    pub fn first(frame: Frame) -> Self {
        Self {
            byte_changed: change::unchanged(frame.data.len()),
            last_frame: frame,
            last_delta: 0.0,
            seen_since_last_render: true,
            count: 1,
        }
    }

    /// Fold a newly received frame into the state
    pub fn update(&mut self, frame: Frame) {
        self.last_delta = change::arrival_delta(self.last_frame.timestamp, frame.timestamp);
        self.byte_changed = change::diff_payload(&self.last_frame.data, &frame.data);
        self.last_frame = frame;
        self.seen_since_last_render = true;
        self.count = self.count.saturating_add(1);
    }

    /// Clear the freshness flag after the state has been shown.
    ///
    /// Returns whether the state was fresh, i.e. had received a frame since the
    /// previous render.
    pub fn mark_rendered(&mut self) -> bool {
        std::mem::replace(&mut self.seen_since_last_render, false)
    }

    /// True if the last receipt is more than `timeout` seconds before `now`.
    /// A state exactly `timeout` seconds old is not stale.
    pub fn is_stale(&self, now: f64, timeout: f64) -> bool {
        now - self.last_frame.timestamp > timeout
    }

    /// Most recently received frame
    pub fn last_frame(&self) -> &Frame {
        &self.last_frame
    }

    /// Timestamp of the most recent frame
    pub fn last_received_at(&self) -> f64 {
        self.last_frame.timestamp
    }

    /// Seconds between the two most recent frames, 0 after the first
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Per-byte change flags of the last frame
    pub fn byte_changed(&self) -> &[bool] {
        &self.byte_changed
    }

    /// Whether a frame arrived since the last render
    pub fn seen_since_last_render(&self) -> bool {
        self.seen_since_last_render
    }

    /// Number of frames recorded for this key
    pub fn count(&self) -> u64 {
        self.count
    }
}
