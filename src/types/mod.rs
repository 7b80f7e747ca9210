//! Core types for tracking CAN traffic.
//!
//! ## Architecture
//!
//! - [`Frame`] is one received CAN frame, exactly as a source delivered it
//! - [`MessageKey`] names a tracked slot: a (bus, identifier) pair
//! - [`MessageState`] is the latest state of one slot, including the derived
//!   delta time and per-byte change flags
//! - [`DisplayConfig`] and its mode enums describe how views are rendered
//! - [`UpdateRate`] controls how often a live feed re-renders
//!
//! ## Usage Example
//!
//! ```rust
//! use canscope::types::{Frame, MessageState};
//!
//! let mut state = MessageState::first(Frame::new("can0", 0x100, [0x01, 0x02], 10.0));
//! state.update(Frame::new("can0", 0x100, [0x01, 0x03], 10.5));
//!
//! assert_eq!(state.byte_changed(), &[false, true]);
//! assert!((state.last_delta() - 0.5).abs() < 1e-9);
//! ```

mod display;
mod frame;
mod key;
mod state;
mod update_rate;

pub use display::{DEFAULT_STALENESS_TIMEOUT, DisplayConfig, Radix, SortMode, TimestampMode};
pub use frame::{Frame, wall_clock_seconds};
pub use key::MessageKey;
pub use state::MessageState;
pub use update_rate::UpdateRate;
