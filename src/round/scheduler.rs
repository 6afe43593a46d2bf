//! Per-round countdown timer.
//!
//! ## States
//!
//! ```text
//! Idle --start--> Running --remaining hits 0--> Expired
//!                    |
//!                    +------stop------> Stopped
//! ```
//!
//! The host polls the scheduler about every `TICK_INTERVAL`. Each poll
//! recomputes the remaining time from the clock and the captured start,
//! so late or skipped polls never drift the countdown.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::Clock;

/// How often the host is expected to poll a running scheduler.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Lifecycle of one round timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerState {
    /// Never started.
    Idle,
    /// Counting down.
    Running,
    /// Reached zero; expiry has been reported.
    Expired,
    /// Cancelled before reaching zero.
    Stopped,
}

/// Result of polling a running scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Whole seconds left, floor-truncated.
    pub remaining: u32,
    /// True on the single poll that observed the timer reach zero.
    pub expired: bool,
}

/// Countdown for a single player's round.
///
/// One scheduler owns at most one countdown: `start` cancels a running
/// one before beginning the next.
#[derive(Debug)]
pub struct RoundScheduler<C: Clock> {
    clock: C,
    state: SchedulerState,
    started_at: Duration,
    duration: u32,
    remaining: u32,
}

impl<C: Clock> RoundScheduler<C> {
    /// Create an idle scheduler reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: SchedulerState::Idle,
            started_at: Duration::ZERO,
            duration: 0,
            remaining: 0,
        }
    }

    /// Begin counting down `duration_secs` from now.
    ///
    /// Returns the initial remaining time.
    pub fn start(&mut self, duration_secs: u32) -> u32 {
        if self.stop() {
            debug!("previous countdown cancelled before restart");
        }
        self.started_at = self.clock.now();
        self.duration = duration_secs;
        self.remaining = duration_secs;
        self.state = SchedulerState::Running;
        debug!(duration_secs, "countdown started");
        duration_secs
    }

    /// Recompute the remaining time.
    ///
    /// Returns `None` unless the scheduler is running. The poll that sees
    /// the countdown reach zero moves to `Expired` and reports
    /// `expired: true`; later polls return `None`.
    pub fn poll(&mut self) -> Option<Tick> {
        if self.state != SchedulerState::Running {
            return None;
        }

        let elapsed = self.clock.now().saturating_sub(self.started_at).as_secs();
        let left = u64::from(self.duration).saturating_sub(elapsed);
        // A clock never runs backwards, but the countdown must not rise even if one does.
        self.remaining = self.remaining.min(left as u32);

        if self.remaining == 0 {
            self.state = SchedulerState::Expired;
            debug!("countdown expired");
            return Some(Tick {
                remaining: 0,
                expired: true,
            });
        }

        trace!(remaining = self.remaining, "tick");
        Some(Tick {
            remaining: self.remaining,
            expired: false,
        })
    }

    /// Cancel a running countdown.
    ///
    /// Safe to call in any state; returns whether a countdown was running.
    pub fn stop(&mut self) -> bool {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Stopped;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Remaining seconds as of the last poll.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The clock this scheduler reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
