//! Countdown state machine.
//!
//! ```text
//! Running --tick (time > 1)--> Running
//! Running --tick (time = 1)--> Expired
//! Expired --reset-----------> Running   (new session)
//! ```
//!
//! A halted clock (game won or over) ignores ticks without changing state.

use serde::{Deserialize, Serialize};

/// Remaining time at or below which the display should warn.
pub const LOW_TIME_SECONDS: u32 = 10;

/// Clock state derived from the remaining time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    Running,
    Expired,
}

impl ClockState {
    /// State for a given remaining time.
    pub fn of(time_left_seconds: u32) -> Self {
        if time_left_seconds == 0 {
            ClockState::Expired
        } else {
            ClockState::Running
        }
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock was halted or already expired; nothing changed.
    Ignored,
    /// One second elapsed and time remains.
    Ticked { remaining: u32 },
    /// The last second elapsed.
    Expired,
}

/// Advance the countdown by one second.
///
/// `halted` is true once the game is won or over; the clock then never
/// decrements again.
pub fn tick(time_left_seconds: &mut u32, halted: bool) -> TickOutcome {
    if halted || *time_left_seconds == 0 {
        return TickOutcome::Ignored;
    }

    *time_left_seconds -= 1;
    match ClockState::of(*time_left_seconds) {
        ClockState::Expired => TickOutcome::Expired,
        ClockState::Running => TickOutcome::Ticked {
            remaining: *time_left_seconds,
        },
    }
}

/// Format seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Whether the remaining time is in the warning window.
pub fn is_low_time(seconds: u32) -> bool {
    seconds <= LOW_TIME_SECONDS
}
