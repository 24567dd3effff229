//! Suite lifecycle: populate, execute through a result source, summarize.

mod common;

use caseledger::{
    CancelToken, Case, CaseDescription, LedgerError, ScriptedSource, SourceError, Status,
    Summary, TestCase, TestSuite,
};
use common::regression_suite;

#[test]
fn test_regression_suite_summary() {
    let mut suite = regression_suite();
    let mut source = ScriptedSource::new(["Pass", "Fail", "Pass", "Not Executed"]);

    let report = suite.run_all(&mut source).unwrap();
    assert_eq!(report.recorded, 4);
    assert_eq!(report.suite, "Regression Suite");

    assert_eq!(
        suite.summarize(),
        Summary {
            total: 4,
            passed: 2,
            failed: 1,
            not_executed: 1,
            other: 0,
        }
    );
}

#[test]
fn test_source_failure_on_second_case_aborts_run() {
    let mut suite = regression_suite();
    let mut calls = 0;
    let mut source = |case: &CaseDescription| -> Result<Status, SourceError> {
        calls += 1;
        if case.id == "TC002" {
            Err(SourceError::Closed)
        } else {
            Ok(Status::Pass)
        }
    };

    let err = suite.run_all(&mut source).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::ResultSource { ref case_id, source: SourceError::Closed } if case_id == "TC002"
    ));
    assert_eq!(calls, 2);

    let statuses: Vec<Status> = suite.cases().map(|c| c.status().clone()).collect();
    assert_eq!(
        statuses,
        vec![
            Status::Pass,
            Status::NotExecuted,
            Status::NotExecuted,
            Status::NotExecuted
        ]
    );
}

#[test]
fn test_unrecognized_status_lands_in_other_bucket() {
    let mut suite = TestSuite::new("Blocked");
    suite.add_case(TestCase::new("TC010", "Export report", "Reports"));
    suite.run_all(&mut ScriptedSource::new(["Blocked"])).unwrap();

    let summary = suite.summarize();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.passed + summary.failed + summary.not_executed, 0);
    assert_eq!(summary.other, 1);
}

#[test]
fn test_total_counts_every_add_including_duplicates() {
    for count in 0..6 {
        let mut suite = TestSuite::new("Dupes");
        for _ in 0..count {
            suite.add_case(TestCase::new("SAME", "Same case", "Core"));
        }
        let summary = suite.summarize();
        assert_eq!(summary.total, count);
        assert_eq!(summary.not_executed, count);
    }
}

#[test]
fn test_fresh_cases_sit_in_not_executed_bucket() {
    let suite = regression_suite();
    let summary = suite.summarize();
    assert_eq!(summary.not_executed, 4);
    assert_eq!(summary.passed + summary.failed + summary.other, 0);
}

#[test]
fn test_rerun_overwrites_previous_results() {
    let mut suite = regression_suite();
    suite
        .run_all(&mut ScriptedSource::new(["Fail", "Fail", "Fail", "Fail"]))
        .unwrap();
    suite
        .run_all(&mut ScriptedSource::new(["Pass", "Pass", "Pass", "Pass"]))
        .unwrap();

    assert_eq!(suite.summarize().passed, 4);
    assert_eq!(suite.summarize().failed, 0);
}

#[test]
fn test_cancel_between_cases_keeps_recorded_results() {
    let mut suite = regression_suite();
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    let mut source = move |case: &CaseDescription| -> Result<Status, SourceError> {
        if case.id == "TC002" {
            trigger.cancel();
        }
        Ok(Status::Pass)
    };

    let report = suite.run_all_with_cancel(&mut source, &cancel).unwrap();
    assert!(report.cancelled);
    assert_eq!(report.recorded, 2);
    assert!(report.finished_at >= report.started_at);

    let summary = suite.summarize();
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.not_executed, 2);
}

#[test]
fn test_rows_are_always_five_fields() {
    let suite = regression_suite();
    for case in suite.cases() {
        let row = case.to_row();
        assert_eq!(row.fields().len(), 5);
        assert_eq!(row.fields()[0], case.id());
    }
}
