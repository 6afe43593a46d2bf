//! The question pool and per-session draws.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{questions_needed, GameRng, QuizError, QuizResult};

use super::question::Question;
use super::source::QuestionSource;

/// The questions one player answers in a round, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Get the question at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

/// The full, immutable question pool.
///
/// Draws work on an O(1) clone of the pool, so the pool itself is the
/// same for every session.
///
/// ## Example
///
/// ```
/// use quiz_duel::bank::{Question, QuestionBank};
/// use quiz_duel::core::GameRng;
///
/// let pool: Vec<Question> = (0..6)
///     .map(|i| Question::new(format!("Q{i}"), ["yes", "no"], 0))
///     .collect();
/// let bank = QuestionBank::load(&pool).unwrap();
///
/// let (first, second) = bank.draw_sets(3, &mut GameRng::new(1)).unwrap();
/// assert_eq!(first.len(), 3);
/// assert_eq!(second.len(), 3);
/// assert_eq!(bank.len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct QuestionBank {
    pool: Vector<Question>,
}

impl QuestionBank {
    /// Load and validate every record from a source.
    ///
    /// One bad record rejects the whole source.
    pub fn load<S: QuestionSource + ?Sized>(source: &S) -> QuizResult<Self> {
        let origin = source.origin();
        let records = source.fetch()?;

        for (index, question) in records.iter().enumerate() {
            question
                .check()
                .map_err(|reason| QuizError::MalformedQuestion {
                    origin: origin.clone(),
                    index,
                    reason,
                })?;
        }

        info!(origin = %origin, count = records.len(), "question pool loaded");
        Ok(Self {
            pool: records.into_iter().collect(),
        })
    }

    /// Number of questions in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Iterate over the pool.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.pool.iter()
    }

    /// Draw two disjoint sets of `per_player` questions.
    ///
    /// Picks alternate between the first and second set, each taken
    /// uniformly from what is left of a working copy of the pool.
    pub fn draw_sets(
        &self,
        per_player: usize,
        rng: &mut GameRng,
    ) -> QuizResult<(QuestionSet, QuestionSet)> {
        let needed = questions_needed(per_player);
        if self.pool.len() < needed {
            return Err(QuizError::InsufficientQuestions {
                needed,
                available: self.pool.len(),
            });
        }

        let mut remaining = self.pool.clone();
        let mut first = Vec::with_capacity(per_player);
        let mut second = Vec::with_capacity(per_player);

        for _ in 0..per_player {
            let pick = rng.gen_range_usize(0..remaining.len());
            first.push(remaining.remove(pick));
            let pick = rng.gen_range_usize(0..remaining.len());
            second.push(remaining.remove(pick));
        }

        debug!(per_player, left_over = remaining.len(), "question sets drawn");
        Ok((
            QuestionSet { questions: first },
            QuestionSet { questions: second },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::JsonStrSource;

    fn pool(size: usize) -> Vec<Question> {
        (0..size)
            .map(|i| Question::new(format!("Question {i}"), ["a", "b", "c", "d"], i % 4))
            .collect()
    }

    #[test]
    fn test_load_from_json() {
        let source = JsonStrSource::new(
            r#"[
                {"question": "Sky colour?", "answers": ["Blue", "Green"], "correct": 0},
                {"question": "Grass colour?", "answers": ["Blue", "Green"], "correct": 1}
            ]"#,
        );
        let bank = QuestionBank::load(&source).unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_load_rejects_bad_record() {
        let source = JsonStrSource::new(
            r#"[
                {"question": "Fine", "answers": ["a", "b"], "correct": 0},
                {"question": "Broken", "answers": ["a", "b"], "correct": 5}
            ]"#,
        );
        match QuestionBank::load(&source) {
            Err(QuizError::MalformedQuestion { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected MalformedQuestion, got {other:?}"),
        }
    }

    #[test]
    fn test_draw_sets_disjoint() {
        let bank = QuestionBank::load(&pool(12)).unwrap();
        let (first, second) = bank.draw_sets(5, &mut GameRng::new(9)).unwrap();

        assert_eq!(first.len(), 5);
        assert_eq!(second.len(), 5);
        for q in first.iter() {
            assert!(second.iter().all(|other| other.text != q.text));
        }
    }

    #[test]
    fn test_draw_sets_uses_whole_pool_when_exact() {
        let bank = QuestionBank::load(&pool(6)).unwrap();
        let (first, second) = bank.draw_sets(3, &mut GameRng::new(3)).unwrap();

        let mut texts: Vec<_> = first.iter().chain(second.iter()).map(|q| q.text.clone()).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), 6);
    }

    #[test]
    fn test_draw_sets_insufficient() {
        let bank = QuestionBank::load(&pool(9)).unwrap();
        let err = bank.draw_sets(5, &mut GameRng::new(1)).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InsufficientQuestions { needed: 10, available: 9 }
        ));
    }

    #[test]
    fn test_draw_sets_huge_count_is_insufficient() {
        let bank = QuestionBank::load(&pool(4)).unwrap();
        let err = bank.draw_sets(usize::MAX, &mut GameRng::new(1)).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InsufficientQuestions { needed: usize::MAX, available: 4 }
        ));
    }

    #[test]
    fn test_draw_leaves_pool_untouched() {
        let bank = QuestionBank::load(&pool(10)).unwrap();
        let mut rng = GameRng::new(5);

        let _ = bank.draw_sets(5, &mut rng).unwrap();
        let _ = bank.draw_sets(5, &mut rng).unwrap();
        assert_eq!(bank.len(), 10);
    }

    #[test]
    fn test_draw_is_deterministic_per_seed() {
        let bank = QuestionBank::load(&pool(20)).unwrap();
        let a = bank.draw_sets(4, &mut GameRng::new(77)).unwrap();
        let b = bank.draw_sets(4, &mut GameRng::new(77)).unwrap();
        assert_eq!(a, b);
    }
}
