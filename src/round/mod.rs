//! Round timing.
//!
//! `RoundScheduler` is the countdown behind each player's round. It is
//! driven cooperatively: the host polls it and reacts to the returned
//! `Tick`.

pub mod scheduler;

pub use scheduler::{RoundScheduler, SchedulerState, Tick, TICK_INTERVAL};
