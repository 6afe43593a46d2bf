//! Question sources.
//!
//! The bank never reads storage itself; it asks a `QuestionSource` for the
//! raw records once, at bootstrap.

use std::path::PathBuf;

use crate::core::{QuizError, QuizResult};

use super::question::Question;

/// Something that can produce the raw question records.
pub trait QuestionSource {
    /// Human-readable origin used in error messages.
    fn origin(&self) -> String;

    /// Read every record. Validation happens in the bank.
    fn fetch(&self) -> QuizResult<Vec<Question>>;
}

/// A JSON array of questions stored on disk.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionSource for JsonFileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> QuizResult<Vec<Question>> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| QuizError::ReadFile {
            path: self.path.clone(),
            source,
        })?;
        parse_json(&text, &self.origin())
    }
}

/// A JSON array of questions held in memory.
#[derive(Clone, Debug)]
pub struct JsonStrSource {
    json: String,
}

impl JsonStrSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl QuestionSource for JsonStrSource {
    fn origin(&self) -> String {
        "inline JSON".to_string()
    }

    fn fetch(&self) -> QuizResult<Vec<Question>> {
        parse_json(&self.json, &self.origin())
    }
}

impl QuestionSource for Vec<Question> {
    fn origin(&self) -> String {
        "in-memory list".to_string()
    }

    fn fetch(&self) -> QuizResult<Vec<Question>> {
        Ok(self.clone())
    }
}

fn parse_json(text: &str, origin: &str) -> QuizResult<Vec<Question>> {
    serde_json::from_str(text).map_err(|source| QuizError::ParseJson {
        origin: origin.to_string(),
        source,
    })
}
