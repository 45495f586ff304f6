//! Game clock: the countdown reducer and its cancelable tick schedule.

pub mod schedule;
pub mod timer;

pub use schedule::{TickHandle, TickScheduler};
pub use timer::{format_time, is_low_time, tick, ClockState, TickOutcome, LOW_TIME_SECONDS};
