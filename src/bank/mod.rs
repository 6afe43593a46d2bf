//! Question storage and sampling.
//!
//! - `Question`: one multiple-choice record
//! - `QuestionSource`: where records come from (JSON file, string, list)
//! - `QuestionBank`: the validated pool, drawing disjoint per-player sets

mod pool;
pub mod question;
pub mod source;

pub use pool::{QuestionBank, QuestionSet};
pub use question::{Answers, Question};
pub use source::{JsonFileSource, JsonStrSource, QuestionSource};
