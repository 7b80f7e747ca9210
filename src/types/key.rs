//! Composite message key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one tracked message slot: the same arbitration identifier on two
/// buses is two different slots.
///
/// Ordering is bus name (lexicographic) first, then the identifier as a number,
/// so `("A", 2)` sorts before `("A", 10)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageKey {
    bus: String,
    id: u32,
}

impl MessageKey {
    /// Create a key for a bus/identifier pair
    pub fn new(bus: impl Into<String>, id: u32) -> Self {
        Self { bus: bus.into(), id }
    }

    /// Bus name
    pub fn bus(&self) -> &str {
        &self.bus
    }

    /// Arbitration identifier
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:#X}", self.bus, self.id)
    }
}
