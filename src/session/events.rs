//! Events emitted for the presentation layer.
//!
//! The session never renders anything. It queues `SessionEvent`s and the
//! host drains them with `GameSession::drain_events` after each command or
//! tick.

use serde::{Deserialize, Serialize};

use crate::bank::Answers;
use crate::core::{GameConfig, PlayerId, PlayerMap};
use crate::result::SessionOutcome;

use super::state::RoundEnd;

/// Final result ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Text to show, including any timeout notice.
    pub message: String,
    pub outcome: SessionOutcome,
    /// How each player's round ended.
    pub round_ends: PlayerMap<Option<RoundEnd>>,
}

impl SessionReport {
    /// Whether `player`'s round ended on the clock.
    #[must_use]
    pub fn timed_out(&self, player: PlayerId) -> bool {
        self.round_ends[player] == Some(RoundEnd::TimedOut)
    }
}

/// Something the presentation layer should reflect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum SessionEvent {
    /// Questions drawn, prize multiplier picked, player one may start.
    SessionStarted {
        money_chosen: u64,
        config: GameConfig,
    },
    RoundStarted {
        player: PlayerId,
        remaining: u32,
    },
    /// Emitted on every poll of a running round.
    Tick {
        player: PlayerId,
        remaining: u32,
    },
    QuestionShown {
        player: PlayerId,
        /// 1-based position in the player's set.
        number: usize,
        total: usize,
        text: String,
        answers: Answers,
    },
    AnswerScored {
        player: PlayerId,
        correct: bool,
        score: u32,
    },
    RoundEnded {
        player: PlayerId,
        reason: RoundEnd,
        /// Timeout notice, if the clock ended the round.
        message: Option<String>,
    },
    SessionFinished(SessionReport),
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = SessionEvent::AnswerScored {
            player: PlayerId::ONE,
            correct: true,
            score: 2,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "AnswerScored");
        assert_eq!(value["data"]["score"], 2);
    }
}
