use std::io;
use thiserror::Error;

use crate::source::SourceError;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Result source failed for case {case_id}: {source}")]
    ResultSource {
        case_id: String,
        #[source]
        source: SourceError,
    },

    #[error("Failed to write results to {destination}: {source}")]
    SinkWrite {
        destination: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Unexpected results header: {found:?}")]
    UnexpectedHeader { found: Vec<String> },

    #[error("Malformed results row at line {line}: expected 5 fields, found {fields}")]
    MalformedRow { line: u64, fields: usize },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
