//! Final result computation.
//!
//! `evaluate` is a pure function of both players' final states and the
//! session's money multiplier.

pub mod evaluator;

pub use evaluator::{evaluate, GameResult, SessionOutcome};
