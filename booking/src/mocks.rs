//! Deterministic environment implementations for tests and demos.

use crate::navigation::Navigator;
use crate::receipt::{BookingReference, ReferenceGenerator};
use chrono::{DateTime, Datelike, Utc};
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};

/// Counts scroll requests
///
/// # Example
///
/// ```
/// use event_place_booking::mocks::RecordingNavigator;
/// use event_place_booking::navigation::Navigator;
///
/// let navigator = RecordingNavigator::default();
/// navigator.scroll_to_top();
/// assert_eq!(navigator.scrolls(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    scrolls: AtomicUsize,
}

impl RecordingNavigator {
    /// Number of scroll requests so far
    #[must_use]
    pub fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn scroll_to_top(&self) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out `EVT-<year>-1000`, `EVT-<year>-1001`, ...
///
/// After 9999 the sequence starts over at 1000.
#[derive(Debug)]
pub struct SequentialReferenceGenerator {
    next: AtomicU16,
}

impl SequentialReferenceGenerator {
    /// First number of the sequence
    pub const FIRST: u16 = 1000;

    /// Starts at `first`, clamped into `1000..=9999`
    #[must_use]
    pub const fn starting_at(first: u16) -> Self {
        let first = if first < Self::FIRST || first > BookingReference::MAX_NUMBER {
            Self::FIRST
        } else {
            first
        };
        Self {
            next: AtomicU16::new(first),
        }
    }

    const fn successor(number: u16) -> u16 {
        if number >= BookingReference::MAX_NUMBER {
            Self::FIRST
        } else {
            number + 1
        }
    }
}

impl Default for SequentialReferenceGenerator {
    fn default() -> Self {
        Self::starting_at(Self::FIRST)
    }
}

impl ReferenceGenerator for SequentialReferenceGenerator {
    fn generate(&self, now: DateTime<Utc>) -> BookingReference {
        let number = match self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(Self::successor(n)))
        {
            Ok(previous) | Err(previous) => previous,
        };
        BookingReference::new(now.year(), number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_place_core::environment::Clock;
    use event_place_testing::test_clock;

    #[test]
    fn test_sequential_references() {
        let generator = SequentialReferenceGenerator::default();
        let now = test_clock().now();

        assert_eq!(generator.generate(now).as_str(), "EVT-2025-1000");
        assert_eq!(generator.generate(now).as_str(), "EVT-2025-1001");
    }

    #[test]
    fn test_sequence_wraps_after_9999() {
        let generator = SequentialReferenceGenerator::starting_at(9998);
        let now = test_clock().now();

        let drawn: Vec<String> = (0..3).map(|_| generator.generate(now).to_string()).collect();
        assert_eq!(drawn, vec!["EVT-2025-9998", "EVT-2025-9999", "EVT-2025-1000"]);
    }

    #[test]
    fn test_out_of_range_start_falls_back_to_first() {
        let now = test_clock().now();

        assert_eq!(SequentialReferenceGenerator::starting_at(42).generate(now).as_str(), "EVT-2025-1000");
        assert_eq!(
            SequentialReferenceGenerator::starting_at(20_000).generate(now).as_str(),
            "EVT-2025-1000"
        );
    }
}
