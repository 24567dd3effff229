use serde::{Deserialize, Serialize};

use crate::status::Status;

/// Counts of cases by status.
///
/// `other` holds every case whose status is not one of the three canonical
/// values, so `total` always equals the sum of the four buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_executed: usize,
    pub other: usize,
}

impl Summary {
    pub fn from_statuses<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a Status>,
    {
        statuses
            .into_iter()
            .fold(Summary::default(), |mut summary, status| {
                summary.total += 1;
                match status {
                    Status::Pass => summary.passed += 1,
                    Status::Fail => summary.failed += 1,
                    Status::NotExecuted => summary.not_executed += 1,
                    Status::Other(_) => summary.other += 1,
                }
                summary
            })
    }

    /// Share of passed cases among all cases, 0.0 for an empty suite
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }
}
