//! Wall-clock display state: 12-hour time and time-of-day greeting.
//!
//! [`ClockState`] is derived, never stored. The display rules:
//! hour 0 maps to 12, hours above 12 wrap to 1-11, minutes are zero-padded,
//! and the greeting switches at noon and 5 PM.

use std::time::{Duration, Instant};

use chrono::Timelike;

/// How often the clock display is recomputed.
pub const CLOCK_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// AM/PM marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// Before noon.
    Am,
    /// Noon and after.
    Pm,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Am => write!(f, "AM"),
            Self::Pm => write!(f, "PM"),
        }
    }
}

/// Time-of-day greeting shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    /// Before noon.
    Morning,
    /// Noon until 5 PM.
    Afternoon,
    /// 5 PM onward.
    Evening,
}

impl std::fmt::Display for Greeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "Good Morning"),
            Self::Afternoon => write!(f, "Good Afternoon"),
            Self::Evening => write!(f, "Good Evening"),
        }
    }
}

/// Derived clock display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    /// Hour on the 12-hour dial (1-12).
    pub hour12: u32,
    /// Minute (0-59); zero-padded by [`ClockState::time_display`].
    pub minute: u32,
    /// AM/PM marker.
    pub meridiem: Meridiem,
    /// Time-of-day greeting.
    pub greeting: Greeting,
}

impl ClockState {
    /// Computes the display state for a given 24-hour time.
    #[must_use]
    pub const fn at(hour: u32, minute: u32) -> Self {
        let hour12 = if hour == 0 {
            12
        } else if hour > 12 {
            hour - 12
        } else {
            hour
        };

        let meridiem = if hour >= 12 { Meridiem::Pm } else { Meridiem::Am };

        let greeting = if hour < 12 {
            Greeting::Morning
        } else if hour < 17 {
            Greeting::Afternoon
        } else {
            Greeting::Evening
        };

        Self {
            hour12,
            minute,
            meridiem,
            greeting,
        }
    }

    /// Computes the display state for the current local time.
    #[must_use]
    pub fn now() -> Self {
        let now = chrono::Local::now();
        Self::at(now.hour(), now.minute())
    }

    /// Formats the time as e.g. `8:05 PM`.
    #[must_use]
    pub fn time_display(&self) -> String {
        format!("{}:{:02} {}", self.hour12, self.minute, self.meridiem)
    }
}

/// Recompute trigger for the clock, owned by the app and dropped with it.
///
/// The TUI loop calls [`ClockTimer::tick`] on every iteration; the timer
/// answers with a fresh [`ClockState`] only when the refresh interval has
/// elapsed.
#[derive(Debug)]
pub struct ClockTimer {
    last_refresh: Instant,
    interval: Duration,
}

impl ClockTimer {
    /// Creates a timer that fires after each `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            last_refresh: Instant::now(),
            interval,
        }
    }

    /// Returns a recomputed [`ClockState`] when the interval has elapsed.
    pub fn tick(&mut self) -> Option<ClockState> {
        if self.last_refresh.elapsed() >= self.interval {
            self.last_refresh = Instant::now();
            Some(ClockState::now())
        } else {
            None
        }
    }
}
