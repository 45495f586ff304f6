//! Cancelable tick schedule.
//!
//! The host owns the actual timer (an interval, a thread, a frame loop). It
//! asks the scheduler for a [`TickHandle`] when it starts the timer and passes
//! that handle back with every tick. Cancelling bumps the epoch, so ticks
//! carrying an older handle are recognised as stale and dropped.

use serde::{Deserialize, Serialize};

/// Identifies one scheduled run of the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickHandle {
    epoch: u64,
}

impl TickHandle {
    /// The epoch this handle belongs to.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Tracks which tick schedule, if any, is live.
#[derive(Clone, Debug, Default)]
pub struct TickScheduler {
    epoch: u64,
    active: bool,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a schedule, returning its handle.
    ///
    /// Scheduling while already active returns the live handle.
    pub fn schedule(&mut self) -> TickHandle {
        if !self.active {
            self.epoch += 1;
            self.active = true;
        }
        TickHandle { epoch: self.epoch }
    }

    /// Cancel the live schedule. Outstanding handles become stale.
    pub fn cancel(&mut self) {
        if self.active {
            tracing::debug!(epoch = self.epoch, "tick schedule cancelled");
        }
        self.active = false;
        self.epoch += 1;
    }

    /// Whether a tick carrying `handle` should be processed.
    pub fn is_live(&self, handle: TickHandle) -> bool {
        self.active && handle.epoch == self.epoch
    }

    /// Whether any schedule is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The live handle, if any.
    pub fn current(&self) -> Option<TickHandle> {
        self.active.then_some(TickHandle { epoch: self.epoch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scheduler_is_idle() {
        let scheduler = TickScheduler::new();
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.current(), None);
    }

    #[test]
    fn test_scheduled_handle_is_live() {
        let mut scheduler = TickScheduler::new();
        let handle = scheduler.schedule();
        assert!(scheduler.is_live(handle));
        assert_eq!(scheduler.current(), Some(handle));
    }

    #[test]
    fn test_schedule_is_idempotent_while_active() {
        let mut scheduler = TickScheduler::new();
        let first = scheduler.schedule();
        let second = scheduler.schedule();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cancel_makes_handle_stale() {
        let mut scheduler = TickScheduler::new();
        let handle = scheduler.schedule();
        scheduler.cancel();
        assert!(!scheduler.is_live(handle));

        // A new schedule does not revive the old handle
        let fresh = scheduler.schedule();
        assert!(scheduler.is_live(fresh));
        assert!(!scheduler.is_live(handle));
        assert_ne!(fresh.epoch(), handle.epoch());
    }
}
