//! Per-player round state.

use serde::{Deserialize, Serialize};

use crate::core::GameConfig;

/// Score and timer for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Correct answers this round.
    pub score: u32,

    /// Whole seconds left on the round timer.
    pub remaining_time: u32,

    /// Index of the question currently shown.
    pub current_question_index: usize,
}

impl PlayerState {
    /// Fresh state for the start of a round.
    #[must_use]
    pub fn fresh(config: &GameConfig) -> Self {
        Self {
            score: 0,
            remaining_time: config.total_time_seconds,
            current_question_index: 0,
        }
    }

    /// Whether the round is over by answers alone.
    ///
    /// The score check never fires before the index check does.
    #[must_use]
    pub fn has_finished(&self, questions_per_player: usize) -> bool {
        self.score as usize >= questions_per_player
            || self.current_question_index >= questions_per_player
    }
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    /// Every question was answered.
    Completed,
    /// The timer reached zero first.
    TimedOut,
}
