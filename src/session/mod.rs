//! Session orchestration.
//!
//! - `GameSession`: runs player one's round, then player two's, then the result
//! - `PlayerState`: score, timer and position for one player
//! - `SessionEvent`: everything the presentation layer needs to render

mod game;
pub mod events;
pub mod state;

pub use events::{SessionEvent, SessionReport};
pub use game::{AnswerReceipt, Controls, GameSession, SessionPhase};
pub use state::{PlayerState, RoundEnd};
