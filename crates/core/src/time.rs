//! Clock abstraction so timestamps can be pinned in tests.

use crate::Time;

/// Source of the current time.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Wall-clock time
    #[default]
    System,
    /// Always returns the given instant
    Fixed(Time),
}

impl Clock {
    /// A clock frozen at `at`.
    pub fn fixed(at: Time) -> Self {
        Self::Fixed(at)
    }

    /// Current time according to this clock.
    pub fn now(&self) -> Time {
        match self {
            Clock::System => chrono::Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: chrono::Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}
