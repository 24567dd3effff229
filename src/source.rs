//! Result sources supply the outcome for each case while a suite runs.
//!
//! The suite only sees the [`ResultSource`] trait. How the outcome is obtained
//! (a scripted list, a line-oriented reader, a previous export, an interactive
//! terminal prompt) is up to the implementation.

use colored::*;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;

use crate::case::{CaseDescription, CaseRow};
use crate::status::Status;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("no scripted result left")]
    Exhausted,

    #[error("input closed before a result was supplied")]
    Closed,

    #[error("malformed result: {0}")]
    Malformed(String),

    #[error("no recorded result for case {case_id}")]
    Missing { case_id: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub trait ResultSource {
    fn next_result(&mut self, case: &CaseDescription) -> Result<Status, SourceError>;
}

impl<F> ResultSource for F
where
    F: FnMut(&CaseDescription) -> Result<Status, SourceError>,
{
    fn next_result(&mut self, case: &CaseDescription) -> Result<Status, SourceError> {
        self(case)
    }
}

/// Hands out a fixed sequence of statuses in order
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    results: std::collections::VecDeque<Status>,
}

impl ScriptedSource {
    pub fn new<I, S>(results: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Status>,
    {
        Self {
            results: results.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.results.len()
    }
}

impl ResultSource for ScriptedSource {
    fn next_result(&mut self, _case: &CaseDescription) -> Result<Status, SourceError> {
        self.results.pop_front().ok_or(SourceError::Exhausted)
    }
}

/// Reads one result per line, e.g. from piped stdin
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> ResultSource for LineSource<R> {
    fn next_result(&mut self, case: &CaseDescription) -> Result<Status, SourceError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(SourceError::Closed);
        }

        let result = line.trim();
        if result.is_empty() {
            return Err(SourceError::Malformed(format!(
                "empty result line for case {}",
                case.id
            )));
        }

        Ok(Status::parse(result))
    }
}

/// Replays statuses from a previous export, keyed by case id.
///
/// When an id occurs more than once in the record, the last row wins.
#[derive(Debug, Clone, Default)]
pub struct RecordedSource {
    results: HashMap<String, Status>,
}

impl RecordedSource {
    pub fn from_rows(rows: impl IntoIterator<Item = CaseRow>) -> Self {
        let results = rows
            .into_iter()
            .map(|row| (row.test_id, Status::from(row.status)))
            .collect();
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl ResultSource for RecordedSource {
    fn next_result(&mut self, case: &CaseDescription) -> Result<Status, SourceError> {
        self.results
            .get(&case.id)
            .cloned()
            .ok_or_else(|| SourceError::Missing {
                case_id: case.id.clone(),
            })
    }
}

/// Interactive terminal prompt
pub struct PromptSource {
    prompt: String,
}

impl PromptSource {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl ResultSource for PromptSource {
    fn next_result(&mut self, case: &CaseDescription) -> Result<Status, SourceError> {
        use dialoguer::{theme::ColorfulTheme, Input, Select};

        println!("{} {}", "🧪".bright_cyan(), case.to_string().bold());

        let choices = [
            crate::status::PASS,
            crate::status::FAIL,
            crate::status::NOT_EXECUTED,
            "Other...",
        ];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(&self.prompt)
            .items(&choices)
            .default(0)
            .interact_opt()?
            .ok_or(SourceError::Closed)?;

        if selection < 3 {
            return Ok(Status::parse(choices[selection]));
        }

        let text: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Status")
            .interact_text()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(SourceError::Malformed("empty status".to_string()));
        }
        Ok(Status::parse(text))
    }
}
