//! Property tests for question draws, the round timer and result evaluation.

use std::time::Duration;

use proptest::prelude::*;

use quiz_duel::bank::{Question, QuestionBank};
use quiz_duel::core::{GameRng, ManualClock, PlayerId, QuizError};
use quiz_duel::result::{evaluate, GameResult};
use quiz_duel::round::{RoundScheduler, SchedulerState};
use quiz_duel::session::PlayerState;

fn pool(size: usize) -> Vec<Question> {
    (0..size)
        .map(|i| Question::new(format!("Q{i}"), ["a", "b"], i % 2))
        .collect()
}

proptest! {
    /// Draws are disjoint, full-sized, and fail only when the pool is short.
    #[test]
    fn prop_draw_sets_disjoint(pool_size in 0usize..40, per_player in 1usize..12, seed in any::<u64>()) {
        let bank = QuestionBank::load(&pool(pool_size)).unwrap();
        let result = bank.draw_sets(per_player, &mut GameRng::new(seed));

        if pool_size >= 2 * per_player {
            let (first, second) = result.unwrap();
            prop_assert_eq!(first.len(), per_player);
            prop_assert_eq!(second.len(), per_player);

            let mut texts: Vec<_> = first.iter().chain(second.iter()).map(|q| q.text.clone()).collect();
            texts.sort();
            texts.dedup();
            prop_assert_eq!(texts.len(), 2 * per_player);
        } else {
            let is_insufficient = matches!(result, Err(QuizError::InsufficientQuestions { .. }));
            prop_assert!(is_insufficient);
        }
        prop_assert_eq!(bank.len(), pool_size);
    }

    /// Remaining time only goes down, floors elapsed seconds, and expires once.
    #[test]
    fn prop_remaining_time_monotonic(duration in 1u32..120, steps in prop::collection::vec(0u64..3_000, 1..200)) {
        let clock = ManualClock::new();
        let mut scheduler = RoundScheduler::new(clock.clone());
        scheduler.start(duration);

        let mut elapsed_ms = 0u64;
        let mut last = duration;
        let mut expiries = 0;

        for step in steps {
            clock.advance(Duration::from_millis(step));
            elapsed_ms += step;

            match scheduler.poll() {
                Some(tick) => {
                    prop_assert!(tick.remaining <= last);
                    let expected = u64::from(duration).saturating_sub(elapsed_ms / 1000) as u32;
                    prop_assert_eq!(tick.remaining, expected);
                    prop_assert_eq!(tick.expired, tick.remaining == 0);
                    if tick.expired {
                        expiries += 1;
                    }
                    last = tick.remaining;
                }
                None => {
                    prop_assert_eq!(scheduler.state(), SchedulerState::Expired);
                    prop_assert!(elapsed_ms / 1000 >= u64::from(duration));
                }
            }
        }

        prop_assert!(expiries <= 1);
        if elapsed_ms / 1000 >= u64::from(duration) {
            prop_assert_eq!(expiries, 1);
        }
    }

    /// Evaluation is a pure function of its inputs and follows score, then time.
    #[test]
    fn prop_evaluate_consistent(
        s1 in 0u32..10, t1 in 0u32..120,
        s2 in 0u32..10, t2 in 0u32..120,
        money in prop::sample::select(vec![10u64, 20, 50, 100]),
    ) {
        let p1 = PlayerState { score: s1, remaining_time: t1, current_question_index: s1 as usize };
        let p2 = PlayerState { score: s2, remaining_time: t2, current_question_index: s2 as usize };

        let outcome = evaluate(&p1, &p2, money);
        prop_assert_eq!(outcome, evaluate(&p1, &p2, money));

        match outcome.result {
            GameResult::Winner(PlayerId::ONE) => {
                prop_assert!(s1 > s2 || (s1 == s2 && t1 > t2));
                prop_assert_eq!(outcome.prize, u64::from(t1) * money);
            }
            GameResult::Winner(_) => {
                prop_assert!(s2 > s1 || (s1 == s2 && t2 > t1));
                prop_assert_eq!(outcome.prize, u64::from(t2) * money);
            }
            GameResult::Tie => {
                prop_assert!(s1 == s2 && t1 == t2);
                prop_assert_eq!(outcome.prize, 0);
            }
        }
    }
}
