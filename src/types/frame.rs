//! CAN frame type delivered by frame sources

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::MessageKey;

/// A single received CAN frame
///
/// This is the fundamental data unit that flows from frame sources into the
/// message store. Frames are immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Bus the frame was received on (e.g. "can0")
    pub bus: String,

    /// Arbitration identifier (11-bit or 29-bit)
    pub id: u32,

    /// Payload bytes, normally 0..=8 but not validated
    pub data: Vec<u8>,

    /// Receipt timestamp in fractional seconds
    pub timestamp: f64,

    /// True if the identifier is an extended (29-bit) one
    #[serde(default)]
    pub extended: bool,
}

impl Frame {
    /// Create a new standard-identifier frame
    pub fn new(bus: impl Into<String>, id: u32, data: impl Into<Vec<u8>>, timestamp: f64) -> Self {
        Self { bus: bus.into(), id, data: data.into(), timestamp, extended: false }
    }

    /// Mark the frame as carrying an extended (29-bit) identifier
    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    /// The slot this frame is tracked under
    pub fn key(&self) -> MessageKey {
        MessageKey::new(self.bus.clone(), self.id)
    }

    /// Data length code - number of payload bytes
    pub fn dlc(&self) -> usize {
        self.data.len()
    }
}

/// Current wall-clock time as fractional seconds since the Unix epoch.
///
/// Live sources stamp frames with this clock, so it is the matching "now" for
/// staleness checks. Returns 0.0 if the system clock is before the epoch.
pub fn wall_clock_seconds() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs_f64()).unwrap_or(0.0)
}
