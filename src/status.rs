use serde::{Deserialize, Serialize};
use std::fmt;

/// Text written for a case that has not been executed yet.
pub const NOT_EXECUTED: &str = "Not Executed";
pub const PASS: &str = "Pass";
pub const FAIL: &str = "Fail";

/// Execution status of a test case.
///
/// The three canonical values are matched exactly (case-sensitive). Any other
/// text is kept verbatim in [`Status::Other`] so it survives export and
/// read-back, and is counted in the summary's `other` bucket.
///
/// `Other` can only be produced by [`Status::parse`] and the `From` impls, so
/// it never holds one of the canonical texts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    NotExecuted,
    Pass,
    Fail,
    Other(OtherStatus),
}

/// Status text outside the canonical set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OtherStatus(String);

impl OtherStatus {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Status {
    pub fn parse(text: &str) -> Self {
        match text {
            NOT_EXECUTED => Status::NotExecuted,
            PASS => Status::Pass,
            FAIL => Status::Fail,
            other => Status::Other(OtherStatus(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::NotExecuted => NOT_EXECUTED,
            Status::Pass => PASS,
            Status::Fail => FAIL,
            Status::Other(text) => text.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Status::Other(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Status {
    fn from(text: &str) -> Self {
        Status::parse(text)
    }
}

impl From<String> for Status {
    fn from(text: String) -> Self {
        match Status::parse(&text) {
            Status::Other(_) => Status::Other(OtherStatus(text)),
            known => known,
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(OtherStatus(text)) => text,
            known => known.as_str().to_string(),
        }
    }
}
