//! Update rate control for live view feeds

use std::time::Duration;

/// How often a live feed re-renders the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateRate {
    /// Re-render on every store change
    OnChange,

    /// Re-render at most once per interval, latest change wins.
    /// A zero interval is treated as `OnChange`
    Every(Duration),
}

impl UpdateRate {
    /// Throttle to at most `hz` renders per second
    pub fn max_hz(hz: u32) -> Self {
        if hz == 0 {
            return UpdateRate::OnChange;
        }
        UpdateRate::Every(Duration::from_secs_f64(1.0 / hz as f64))
    }

    /// Check if throttling is needed
    pub fn needs_throttle(self) -> bool {
        self.throttle_interval().is_some()
    }

    /// Get throttle interval if needed
    pub fn throttle_interval(self) -> Option<Duration> {
        match self {
            UpdateRate::OnChange => None,
            UpdateRate::Every(interval) if interval.is_zero() => None,
            UpdateRate::Every(interval) => Some(interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_change_is_not_throttled() {
        assert!(!UpdateRate::OnChange.needs_throttle());
        assert!(!UpdateRate::Every(Duration::ZERO).needs_throttle());
        assert_eq!(UpdateRate::max_hz(0), UpdateRate::OnChange);
    }

    #[test]
    fn max_hz_gives_interval() {
        assert_eq!(UpdateRate::max_hz(2).throttle_interval(), Some(Duration::from_millis(500)));
        assert_eq!(
            UpdateRate::Every(Duration::from_secs(5)).throttle_interval(),
            Some(Duration::from_secs(5))
        );
    }
}
