//! # quiz-duel
//!
//! A two-player quiz game played against the clock.
//!
//! Each player gets their own timed round of multiple-choice questions,
//! drawn without repetition from a shared pool. Higher score wins; equal
//! scores go to whoever had more time left. The winner takes their
//! remaining seconds times a prize multiplier picked at the start of the
//! session.
//!
//! ## Architecture
//!
//! - **Cooperative timing**: round timers are polled by the host rather
//!   than firing callbacks, and read an injected `Clock`. Ticks and answers
//!   are serialized through `&mut GameSession`.
//!
//! - **Event output**: the session never renders. It queues
//!   `SessionEvent`s that a front end drains and draws.
//!
//! - **Seeded randomness**: question draws and the prize multiplier come
//!   from a ChaCha8 `GameRng`, so a seed replays a session exactly.
//!
//! ## Modules
//!
//! - `core`: players, configuration, clocks, RNG, errors
//! - `bank`: question records, sources and the sampling pool
//! - `round`: the per-round countdown
//! - `session`: two-round orchestration and events
//! - `result`: winner and prize computation

pub mod core;
pub mod bank;
pub mod round;
pub mod session;
pub mod result;

// Re-export commonly used types
pub use crate::core::{
    Clock, GameConfig, GameRng, ManualClock, PlayerId, PlayerMap, QuizError, QuizResult,
    Settings, SystemClock, MONEY_VALUES,
};

pub use crate::bank::{JsonFileSource, JsonStrSource, Question, QuestionBank, QuestionSet, QuestionSource};

pub use crate::round::{RoundScheduler, SchedulerState, Tick, TICK_INTERVAL};

pub use crate::session::{
    AnswerReceipt, Controls, GameSession, PlayerState, RoundEnd, SessionEvent, SessionPhase,
    SessionReport,
};

pub use crate::result::{evaluate, GameResult, SessionOutcome};
