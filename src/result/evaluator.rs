//! Winner and prize computation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::session::PlayerState;

/// Result of a completed session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Same score and same time left.
    Tie,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Winner plus the prize they take home.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub result: GameResult,
    /// Currency units; zero on a tie.
    pub prize: u64,
}

impl SessionOutcome {
    /// Player-facing summary, e.g. `"Player 1 wins! Winnings: €400"`.
    #[must_use]
    pub fn message(&self) -> String {
        match self.result {
            GameResult::Winner(player) => format!("{player} wins! Winnings: €{}", self.prize),
            GameResult::Tie => "No one, it's a tie!".to_string(),
        }
    }
}

/// Decide the session.
///
/// Higher score wins; equal scores fall back to more time left; equal on
/// both is a tie. The winner's prize is their remaining seconds times
/// `money_chosen`.
#[must_use]
pub fn evaluate(p1: &PlayerState, p2: &PlayerState, money_chosen: u64) -> SessionOutcome {
    let first = (p1.score, p1.remaining_time);
    let second = (p2.score, p2.remaining_time);

    let (result, winner_time) = match first.cmp(&second) {
        Ordering::Greater => (GameResult::Winner(PlayerId::ONE), p1.remaining_time),
        Ordering::Less => (GameResult::Winner(PlayerId::TWO), p2.remaining_time),
        Ordering::Equal => (GameResult::Tie, 0),
    };

    SessionOutcome {
        result,
        prize: u64::from(winner_time) * money_chosen,
    }
}
