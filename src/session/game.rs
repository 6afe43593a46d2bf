//! Two-round game orchestration.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bank::{Question, QuestionBank, QuestionSet, QuestionSource};
use crate::core::{
    Clock, GameConfig, GameRng, PlayerId, PlayerMap, QuizError, QuizResult, Settings, MONEY_VALUES,
};
use crate::result::{evaluate, SessionOutcome};
use crate::round::{RoundScheduler, SchedulerState};

use super::events::{SessionEvent, SessionReport};
use super::state::{PlayerState, RoundEnd};

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No question pool yet.
    Loading,
    /// Waiting for this player to start their round.
    AwaitingRound(PlayerId),
    /// This player is answering against the clock.
    InRound(PlayerId),
    /// Both rounds are over and the report is available.
    Finished,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Loading => write!(f, "the question pool is loading"),
            SessionPhase::AwaitingRound(player) => write!(f, "waiting for {player} to start"),
            SessionPhase::InRound(player) => write!(f, "{player} is answering"),
            SessionPhase::Finished => write!(f, "the session is finished"),
        }
    }
}

/// Which controls the presentation layer should enable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start_player_one: bool,
    pub start_player_two: bool,
    pub new_session: bool,
    pub reset: bool,
}

/// What happened to a submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerReceipt {
    pub player: PlayerId,
    pub correct: bool,
    /// Score after this answer.
    pub score: u32,
    /// Whether this answer ended the round.
    pub round_over: bool,
}

/// One two-player game: player one's round, then player two's, then the
/// result.
///
/// All commands take `&mut self`, so ticks and answers are handled one at
/// a time in arrival order.
///
/// ## Example
///
/// ```
/// use quiz_duel::bank::Question;
/// use quiz_duel::core::{GameConfig, GameRng, ManualClock, PlayerId};
/// use quiz_duel::session::{GameSession, SessionPhase};
///
/// let pool: Vec<Question> = (0..4)
///     .map(|i| Question::new(format!("Q{i}"), ["right", "wrong"], 0))
///     .collect();
/// let clock = ManualClock::new();
/// let config = GameConfig::new(30, 2).unwrap();
///
/// let mut session = GameSession::new(config, clock.clone(), GameRng::new(1)).unwrap();
/// session.load_questions(&pool).unwrap();
///
/// session.start_round(PlayerId::ONE).unwrap();
/// session.submit_answer(0).unwrap();
/// session.submit_answer(0).unwrap();
/// assert_eq!(session.phase(), SessionPhase::AwaitingRound(PlayerId::TWO));
/// ```
pub struct GameSession<C: Clock> {
    config: GameConfig,
    bank: Option<QuestionBank>,
    rng: GameRng,
    scheduler: RoundScheduler<C>,
    phase: SessionPhase,
    money_chosen: u64,
    players: PlayerMap<PlayerState>,
    question_sets: PlayerMap<QuestionSet>,
    round_ends: PlayerMap<Option<RoundEnd>>,
    report: Option<SessionReport>,
    events: Vec<SessionEvent>,
}

impl<C: Clock> GameSession<C> {
    /// Create a session that waits for its question pool.
    pub fn new(config: GameConfig, clock: C, rng: GameRng) -> QuizResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            bank: None,
            rng,
            scheduler: RoundScheduler::new(clock),
            phase: SessionPhase::Loading,
            money_chosen: 0,
            players: PlayerMap::new(|_| PlayerState::fresh(&config)),
            question_sets: PlayerMap::with_default(),
            round_ends: PlayerMap::with_value(None),
            report: None,
            events: Vec::new(),
        })
    }

    /// Load a question source and start the first session with it.
    ///
    /// On failure nothing changes and the session stays in its prior phase.
    pub fn load_questions<S: QuestionSource + ?Sized>(&mut self, source: &S) -> QuizResult<()> {
        let bank = QuestionBank::load(source)?;
        self.start_session(bank)
    }

    /// Attach a question pool and start a session.
    pub fn start_session(&mut self, bank: QuestionBank) -> QuizResult<()> {
        let (first, second) = bank.draw_sets(self.config.questions_per_player, &mut self.rng)?;
        self.scheduler.stop();
        self.bank = Some(bank);
        self.install(first, second);
        Ok(())
    }

    /// Cancel any round, apply `config` and start over with fresh draws.
    ///
    /// An invalid config or too small a pool leaves the session untouched.
    pub fn reset_session(&mut self, config: GameConfig) -> QuizResult<()> {
        config.validate()?;
        let bank = self.bank.as_ref().ok_or(QuizError::PoolNotReady)?;
        let (first, second) = bank.draw_sets(config.questions_per_player, &mut self.rng)?;

        if self.scheduler.stop() {
            debug!("active round cancelled by reset");
        }
        self.config = config;
        self.install(first, second);
        Ok(())
    }

    /// Parse settings input and reset with it.
    ///
    /// `settings` only takes the new config once the reset has succeeded,
    /// so a rejected change leaves both the settings and the session on
    /// their previous config.
    pub fn apply_settings(
        &mut self,
        settings: &mut Settings,
        time_input: &str,
        questions_input: &str,
    ) -> QuizResult<GameConfig> {
        let candidate = Settings::parse_inputs(time_input, questions_input)?;
        self.reset_session(candidate)?;
        settings.apply(candidate)
    }

    /// Start a new session with the current config.
    ///
    /// Only offered before the first round and after the result.
    pub fn new_session(&mut self) -> QuizResult<()> {
        if !self.controls().new_session {
            return Err(self.illegal("start a new session"));
        }
        self.reset_session(self.config)
    }

    fn install(&mut self, first: QuestionSet, second: QuestionSet) {
        self.money_chosen = self.rng.choose(&MONEY_VALUES).copied().unwrap_or(MONEY_VALUES[0]);
        self.question_sets = PlayerMap::from_pair(first, second);
        self.players = PlayerMap::with_value(PlayerState::fresh(&self.config));
        self.round_ends = PlayerMap::with_value(None);
        self.report = None;
        self.phase = SessionPhase::AwaitingRound(PlayerId::ONE);

        info!(
            money_chosen = self.money_chosen,
            total_time = self.config.total_time_seconds,
            questions_per_player = self.config.questions_per_player,
            "session started"
        );
        self.events.push(SessionEvent::SessionStarted {
            money_chosen: self.money_chosen,
            config: self.config,
        });
    }

    /// Begin `player`'s timed round and show their first question.
    pub fn start_round(&mut self, player: PlayerId) -> QuizResult<()> {
        match self.phase {
            SessionPhase::Loading => return Err(QuizError::PoolNotReady),
            SessionPhase::AwaitingRound(next) if next == player => {}
            _ => return Err(self.illegal("start a round")),
        }

        self.players[player] = PlayerState::fresh(&self.config);
        let remaining = self.scheduler.start(self.config.total_time_seconds);
        self.phase = SessionPhase::InRound(player);

        info!(%player, remaining, "round started");
        self.events.push(SessionEvent::RoundStarted { player, remaining });
        self.show_question(player);
        Ok(())
    }

    /// Poll the round timer.
    ///
    /// The host calls this about every `TICK_INTERVAL`. Updates the active
    /// player's remaining time and ends the round when it reaches zero.
    pub fn tick(&mut self) {
        let SessionPhase::InRound(player) = self.phase else {
            return;
        };
        let Some(tick) = self.scheduler.poll() else {
            return;
        };

        self.players[player].remaining_time = tick.remaining;
        self.events.push(SessionEvent::Tick {
            player,
            remaining: tick.remaining,
        });

        if tick.expired {
            self.on_round_expire(player);
        }
    }

    /// Answer the current question with the choice at `selected_index`.
    ///
    /// The clock is brought up to date first, so an answer that arrives
    /// after the round ran out is rejected. The timer keeps running.
    pub fn submit_answer(&mut self, selected_index: usize) -> QuizResult<AnswerReceipt> {
        self.tick();

        let SessionPhase::InRound(player) = self.phase else {
            return Err(self.illegal("submit an answer"));
        };

        let index = self.players[player].current_question_index;
        let (correct, available) = match self.question_sets[player].get(index) {
            Some(question) => (question.is_correct(selected_index), question.answers.len()),
            None => return Err(self.illegal("answer past the last question")),
        };
        if selected_index >= available {
            return Err(QuizError::InvalidAnswer {
                player,
                index: selected_index,
                available,
            });
        }

        let state = &mut self.players[player];
        if correct {
            state.score += 1;
        }
        state.current_question_index += 1;
        let score = state.score;
        let round_over = state.has_finished(self.config.questions_per_player);

        debug!(%player, question = index, correct, score, "answer scored");
        self.events.push(SessionEvent::AnswerScored {
            player,
            correct,
            score,
        });

        if round_over {
            self.end_round(player, RoundEnd::Completed);
        } else {
            self.show_question(player);
        }

        Ok(AnswerReceipt {
            player,
            correct,
            score,
            round_over,
        })
    }

    fn show_question(&mut self, player: PlayerId) {
        let set = &self.question_sets[player];
        let index = self.players[player].current_question_index;
        if let Some(question) = set.get(index) {
            self.events.push(SessionEvent::QuestionShown {
                player,
                number: index + 1,
                total: set.len(),
                text: question.text.clone(),
                answers: question.answers.clone(),
            });
        }
    }

    fn on_round_expire(&mut self, player: PlayerId) {
        self.players[player].remaining_time = 0;
        self.end_round(player, RoundEnd::TimedOut);
    }

    fn end_round(&mut self, player: PlayerId, reason: RoundEnd) {
        self.scheduler.stop();
        self.round_ends[player] = Some(reason);

        let message = match reason {
            RoundEnd::TimedOut => Some(format!("{player} ran out of time!")),
            RoundEnd::Completed => None,
        };
        let state = self.players[player];
        info!(
            %player,
            ?reason,
            score = state.score,
            remaining = state.remaining_time,
            "round ended"
        );
        self.events.push(SessionEvent::RoundEnded {
            player,
            reason,
            message,
        });

        if player == PlayerId::ONE {
            // Player two plays next whether player one finished or timed out.
            self.phase = SessionPhase::AwaitingRound(PlayerId::TWO);
        } else {
            self.finalize();
        }
    }

    fn finalize(&mut self) {
        let outcome = evaluate(&self.players[PlayerId::ONE], &self.players[PlayerId::TWO], self.money_chosen);

        let message = if self.round_ends[PlayerId::TWO] == Some(RoundEnd::TimedOut) {
            format!("{} ran out of time! {}", PlayerId::TWO, outcome.message())
        } else {
            outcome.message()
        };

        let report = SessionReport {
            message,
            outcome,
            round_ends: self.round_ends.clone(),
        };
        info!(result = ?outcome.result, prize = outcome.prize, "session finished");

        self.phase = SessionPhase::Finished;
        self.report = Some(report.clone());
        self.events.push(SessionEvent::SessionFinished(report));
    }

    fn illegal(&self, action: &'static str) -> QuizError {
        warn!(action, phase = %self.phase, "rejected command");
        QuizError::IllegalTransition {
            action,
            state: self.phase.to_string(),
        }
    }

    /// Controls the presentation layer should enable right now.
    #[must_use]
    pub fn controls(&self) -> Controls {
        let new_session = match self.phase {
            SessionPhase::AwaitingRound(PlayerId::ONE) | SessionPhase::Finished => true,
            // Hidden between rounds, including after a player one timeout,
            // until player two has played.
            SessionPhase::AwaitingRound(_) | SessionPhase::InRound(_) | SessionPhase::Loading => false,
        };
        Controls {
            start_player_one: self.phase == SessionPhase::AwaitingRound(PlayerId::ONE),
            start_player_two: self.phase == SessionPhase::AwaitingRound(PlayerId::TWO),
            new_session,
            reset: true,
        }
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Prize multiplier for this session.
    #[must_use]
    pub fn money_chosen(&self) -> u64 {
        self.money_chosen
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    #[must_use]
    pub fn question_set(&self, player: PlayerId) -> &QuestionSet {
        &self.question_sets[player]
    }

    /// The question on screen, if a round is running.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::InRound(player) => self.question_sets[player].get(self.players[player].current_question_index),
            _ => None,
        }
    }

    /// How `player`'s round ended, once it has.
    #[must_use]
    pub fn round_end(&self, player: PlayerId) -> Option<RoundEnd> {
        self.round_ends[player]
    }

    #[must_use]
    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.report.as_ref().map(|r| r.outcome)
    }

    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// The clock driving round timers.
    pub fn clock(&self) -> &C {
        self.scheduler.clock()
    }
}
