//! caseledger - Test Case Lifecycle Tracking
//!
//! Registers manual and automated test cases in ordered suites, records their
//! execution status from a pluggable result source, persists results as CSV
//! and derives summary counts.

pub mod case;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod recorder;
pub mod source;
pub mod status;
pub mod suite;
pub mod summary;

// Re-export commonly used types
pub use case::{AutomatedTestCase, Case, CaseDescription, CaseRow, TestCase};
pub use config::Config;
pub use error::LedgerError;
pub use manifest::SuiteManifest;
pub use recorder::{CsvFileSink, CsvStreamSink, ResultRecorder, ResultSink};
pub use source::{LineSource, PromptSource, RecordedSource, ResultSource, ScriptedSource, SourceError};
pub use status::{OtherStatus, Status};
pub use suite::{CancelToken, RunReport, TestSuite};
pub use summary::Summary;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Default results filename
    pub const DEFAULT_RESULTS_FILE: &str = "test_results.csv";

    /// Default config filename
    pub const DEFAULT_CONFIG_NAME: &str = "config.toml";

    /// Default suite manifest filename written by `init`
    pub const DEFAULT_MANIFEST_NAME: &str = "suite.toml";

    /// Default log filter
    pub const DEFAULT_LOG_LEVEL: &str = "warn";

    /// Default interactive prompt
    pub const DEFAULT_PROMPT: &str = "Enter result";

    /// Environment variable holding the log filter
    pub const LOG_ENV: &str = "CASELEDGER_LOG";
}
