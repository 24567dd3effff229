use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::case::{Case, CaseRow};
use crate::error::{LedgerError, Result};
use crate::recorder::{ResultRecorder, ResultSink};
use crate::source::ResultSource;
use crate::summary::Summary;

/// Cooperative cancellation for [`TestSuite::run_all_with_cancel`].
///
/// Clones share the same flag, so one can be handed to a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub suite: String,
    /// Cases whose result was recorded during this run
    pub recorded: usize,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// An ordered collection of test cases.
///
/// Insertion order is execution order and export row order. Ids are not
/// checked for uniqueness; duplicates are kept as separate cases.
#[derive(Debug, Default)]
pub struct TestSuite {
    name: String,
    cases: Vec<Box<dyn Case>>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Rebuild a suite from previously exported rows
    pub fn from_rows(name: impl Into<String>, rows: impl IntoIterator<Item = CaseRow>) -> Self {
        let mut suite = Self::new(name);
        for row in rows {
            suite.cases.push(row.into_case());
        }
        suite
    }

    pub fn load_csv(name: impl Into<String>, path: &Path) -> Result<Self> {
        let rows = ResultRecorder::read_path(path)?;
        Ok(Self::from_rows(name, rows))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn cases(&self) -> impl Iterator<Item = &dyn Case> {
        self.cases.iter().map(|case| case.as_ref())
    }

    pub fn add_case<C: Case + 'static>(&mut self, case: C) {
        self.cases.push(Box::new(case));
    }

    pub fn add_boxed(&mut self, case: Box<dyn Case>) {
        self.cases.push(case);
    }

    pub fn rows(&self) -> Vec<CaseRow> {
        self.cases.iter().map(|case| case.to_row()).collect()
    }

    /// Request a result for every case in order and record it.
    ///
    /// A source failure aborts the run; results recorded before the failing
    /// case are kept and later cases are left as they were.
    pub fn run_all<S: ResultSource + ?Sized>(&mut self, source: &mut S) -> Result<RunReport> {
        self.run_all_with_cancel(source, &CancelToken::new())
    }

    /// Like [`TestSuite::run_all`], but checks `cancel` before each request.
    /// Once cancelled no further results are requested.
    pub fn run_all_with_cancel<S: ResultSource + ?Sized>(
        &mut self,
        source: &mut S,
        cancel: &CancelToken,
    ) -> Result<RunReport> {
        let started_at = Utc::now();
        let mut recorded = 0;
        let mut cancelled = false;
        let total = self.cases.len();

        tracing::info!(suite = %self.name, cases = total, "executing test suite");

        for case in self.cases.iter_mut() {
            if cancel.is_cancelled() {
                tracing::warn!(
                    suite = %self.name,
                    recorded,
                    remaining = total - recorded,
                    "suite run cancelled"
                );
                cancelled = true;
                break;
            }

            let description = case.describe();
            tracing::info!(case = %description, "running case");

            let status = source
                .next_result(&description)
                .map_err(|source| LedgerError::ResultSource {
                    case_id: description.id.clone(),
                    source,
                })?;

            if !status.is_recognized() {
                tracing::warn!(case_id = %description.id, status = %status, "unrecognized status recorded");
            }
            case.set_result(status);
            recorded += 1;
        }

        Ok(RunReport {
            suite: self.name.clone(),
            recorded,
            cancelled,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Write the header and one row per case to `sink`
    pub fn export_results<K: ResultSink + ?Sized>(&self, sink: &mut K) -> Result<()> {
        let rows = self.rows();
        sink.write_table(&rows)
            .map_err(|source| LedgerError::SinkWrite {
                destination: sink.destination(),
                source,
            })?;

        tracing::debug!(suite = %self.name, rows = rows.len(), destination = %sink.destination(), "results exported");
        Ok(())
    }

    pub fn summarize(&self) -> Summary {
        Summary::from_statuses(self.cases.iter().map(|case| case.status()))
    }
}
