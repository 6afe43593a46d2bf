//! Core building blocks: players, configuration, clocks, RNG and errors.
//!
//! Everything above this module (bank, round, session, result) is built
//! from these types.

pub mod player;
pub mod rng;
pub mod config;
pub mod clock;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{questions_needed, GameConfig, Settings, MONEY_VALUES, DEFAULT_TOTAL_TIME, DEFAULT_QUESTIONS_PER_PLAYER};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{QuizError, QuizResult};
