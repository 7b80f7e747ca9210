//! Test utilities for building frames and populated stores
//!
//! Shared by unit tests and the benchmarks so both exercise the same traffic
//! shapes.

#![cfg(any(test, feature = "benchmark"))]

use crate::store::MessageStore;
use crate::types::Frame;

/// Build a standard frame
pub fn frame(bus: &str, id: u32, data: &[u8], timestamp: f64) -> Frame {
    Frame::new(bus, id, data.to_vec(), timestamp)
}

/// Synthetic periodic traffic: `ids` messages per bus on each of `buses`,
/// repeated `rounds` times at `period` seconds, starting at `start`.
///
/// Payloads are 8 bytes; byte 0 counts rounds and byte 7 carries the bus index,
/// so consecutive frames of one message differ in exactly one byte.
pub fn periodic_traffic(
    buses: &[&str],
    ids: u32,
    rounds: u32,
    period: f64,
    start: f64,
) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(buses.len() * ids as usize * rounds as usize);
    for round in 0..rounds {
        let t = start + f64::from(round) * period;
        for (b, bus) in buses.iter().enumerate() {
            for id in 0..ids {
                let data = [round as u8, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, b as u8];
                frames.push(frame(bus, 0x100 + id, &data, t));
            }
        }
    }
    frames
}

/// A store that has recorded every frame in order
pub fn populated_store(frames: &[Frame]) -> MessageStore {
    let store = MessageStore::new();
    for f in frames {
        store.record(f.clone());
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageKey;

    #[test]
    fn periodic_traffic_shape() {
        let frames = periodic_traffic(&["can0", "can1"], 3, 4, 0.1, 100.0);
        assert_eq!(frames.len(), 2 * 3 * 4);
        assert_eq!(frames[0].timestamp, 100.0);
        assert!((frames.last().unwrap().timestamp - 100.3).abs() < 1e-9);
    }

    #[test]
    fn consecutive_frames_differ_in_one_byte() {
        let store = populated_store(&periodic_traffic(&["can0"], 1, 2, 0.1, 0.0));
        let state = store.get(&MessageKey::new("can0", 0x100)).unwrap();

        assert_eq!(state.byte_changed().iter().filter(|c| **c).count(), 1);
        assert!(state.byte_changed()[0]);
    }
}
