//! Question records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Most questions carry four answers; those stay inline.
pub type Answers = SmallVec<[String; 4]>;

/// A multiple-choice question.
///
/// Serialized with the field names used by question files:
/// `{"question": ..., "answers": [...], "correct": n}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the player.
    #[serde(rename = "question")]
    pub text: String,

    /// Answer choices in display order.
    pub answers: Answers,

    /// Index into `answers` of the right choice.
    #[serde(rename = "correct")]
    pub correct_index: usize,
}

impl Question {
    /// Create a question from text, answers and the correct index.
    ///
    /// Not validated; use `check` before handing it to a bank.
    pub fn new<I, S>(text: impl Into<String>, answers: I, correct_index: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            answers: answers.into_iter().map(Into::into).collect(),
            correct_index,
        }
    }

    /// Whether `selected` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }

    /// Return the reason this question is unusable, if any.
    pub fn check(&self) -> Result<(), String> {
        if self.answers.len() < 2 {
            return Err(format!(
                "needs at least 2 answers, has {}",
                self.answers.len()
            ));
        }
        if self.correct_index >= self.answers.len() {
            return Err(format!(
                "correct index {} is out of range for {} answers",
                self.correct_index,
                self.answers.len()
            ));
        }
        Ok(())
    }
}
