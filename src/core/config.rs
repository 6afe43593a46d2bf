//! Game configuration.
//!
//! - `GameConfig`: round duration and questions per player
//! - `Settings`: the configuration provider behind the settings panel
//!
//! A config is read when a session is reset and never changes mid-round.
//! `Settings` holds the last valid config; bad input is rejected whole
//! and the previous values stay in effect.

use serde::{Deserialize, Serialize};

use super::error::{QuizError, QuizResult};
use super::player::PLAYER_COUNT;

/// Prize multipliers; one is picked per session.
pub const MONEY_VALUES: [u64; 4] = [10, 20, 50, 100];

/// Default seconds per round.
pub const DEFAULT_TOTAL_TIME: u32 = 60;

/// Default questions per player.
pub const DEFAULT_QUESTIONS_PER_PLAYER: usize = 5;

/// Round timing and length for one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seconds each player has for their whole round.
    pub total_time_seconds: u32,

    /// Questions drawn for each player.
    pub questions_per_player: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_time_seconds: DEFAULT_TOTAL_TIME,
            questions_per_player: DEFAULT_QUESTIONS_PER_PLAYER,
        }
    }
}

impl GameConfig {
    /// Create a validated configuration.
    pub fn new(total_time_seconds: u32, questions_per_player: usize) -> QuizResult<Self> {
        let config = Self {
            total_time_seconds,
            questions_per_player,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the round duration (builder pattern, unvalidated).
    #[must_use]
    pub fn with_total_time(mut self, seconds: u32) -> Self {
        self.total_time_seconds = seconds;
        self
    }

    /// Set the questions per player (builder pattern, unvalidated).
    #[must_use]
    pub fn with_questions_per_player(mut self, count: usize) -> Self {
        self.questions_per_player = count;
        self
    }

    /// Check that both values are positive.
    pub fn validate(&self) -> QuizResult<()> {
        if self.total_time_seconds == 0 {
            return Err(QuizError::InvalidConfig(
                "round duration must be positive".into(),
            ));
        }
        if self.questions_per_player == 0 {
            return Err(QuizError::InvalidConfig(
                "questions per player must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Pool size needed to give every player `per_player` questions.
///
/// Saturates at `usize::MAX`, which no pool can reach.
#[must_use]
pub fn questions_needed(per_player: usize) -> usize {
    per_player.saturating_mul(PLAYER_COUNT)
}

/// Configuration provider fed by raw settings input.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    current: GameConfig,
}

impl Settings {
    /// Start from an already validated config.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { current: config }
    }

    /// The last accepted configuration.
    #[must_use]
    pub fn current(&self) -> GameConfig {
        self.current
    }

    /// Replace the config if it is valid; otherwise keep the old one.
    pub fn apply(&mut self, config: GameConfig) -> QuizResult<GameConfig> {
        config.validate()?;
        self.current = config;
        Ok(config)
    }

    /// Parse text inputs from the settings panel into a candidate config.
    ///
    /// Nothing is stored; the caller applies the candidate once the session
    /// has accepted it.
    pub fn parse_inputs(time_input: &str, questions_input: &str) -> QuizResult<GameConfig> {
        let total_time_seconds = parse_positive(time_input, "round duration")?;
        let questions_per_player = parse_positive(questions_input, "questions per player")?;
        Ok(GameConfig {
            total_time_seconds,
            questions_per_player: questions_per_player as usize,
        })
    }
}

fn parse_positive(input: &str, what: &str) -> QuizResult<u32> {
    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| QuizError::InvalidConfig(format!("{what} must be a whole number, got {input:?}")))?;
    if value == 0 {
        return Err(QuizError::InvalidConfig(format!("{what} must be positive")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.total_time_seconds, 60);
        assert_eq!(config.questions_per_player, 5);
        assert_eq!(questions_needed(config.questions_per_player), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero() {
        assert!(matches!(GameConfig::new(0, 5), Err(QuizError::InvalidConfig(_))));
        assert!(matches!(GameConfig::new(30, 0), Err(QuizError::InvalidConfig(_))));
        assert!(GameConfig::new(30, 3).is_ok());
    }

    #[test]
    fn test_questions_needed_saturates() {
        assert_eq!(questions_needed(3), 6);
        assert_eq!(questions_needed(usize::MAX), usize::MAX);
        assert_eq!(questions_needed(usize::MAX / 2 + 1), usize::MAX);
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::default()
            .with_total_time(90)
            .with_questions_per_player(8);
        assert_eq!(config, GameConfig::new(90, 8).unwrap());
    }

    #[test]
    fn test_settings_parse_then_apply() {
        let mut settings = Settings::default();
        let candidate = Settings::parse_inputs(" 45 ", "3").unwrap();
        assert_eq!(settings.current(), GameConfig::default());

        let applied = settings.apply(candidate).unwrap();

        assert_eq!(applied.total_time_seconds, 45);
        assert_eq!(applied.questions_per_player, 3);
        assert_eq!(settings.current(), applied);
    }

    #[test]
    fn test_settings_rejects_bad_inputs() {
        // Valid duration, bad count: the whole input is rejected
        assert!(matches!(Settings::parse_inputs("90", "abc"), Err(QuizError::InvalidConfig(_))));
        assert!(Settings::parse_inputs("-5", "2").is_err());
        assert!(Settings::parse_inputs("0", "2").is_err());
        assert!(Settings::parse_inputs("", "2").is_err());

        let mut settings = Settings::new(GameConfig::new(30, 4).unwrap());
        assert!(settings.apply(GameConfig::new(30, 4).unwrap().with_total_time(0)).is_err());
        assert_eq!(settings.current(), GameConfig::new(30, 4).unwrap());
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new(75, 6).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
