//! Stream combinators for live feeds

mod throttle;

pub use throttle::{Throttle, ThrottleExt};
