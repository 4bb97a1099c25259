//! # Suite Report Module
//!
//! Serializable results of a [`Suite`](crate::suite::Suite) run, plus the
//! response envelope the command-line front end prints.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "1 of 3 checks did not pass.",
//!   "data": {
//!     "generated_at": "2026-03-02T10:15:04Z",
//!     "passed": 2,
//!     "failed": 1,
//!     "skipped": 0,
//!     "results": [
//!       { "name": "CalcTest", "description": "Inspect CalcTest", "status": "passed", "log": [] },
//!       {
//!         "name": "1:CalcTest.subtracts",
//!         "description": "CalcTest.subtracts",
//!         "status": "failed",
//!         "cause": { "rationale": "expected \"1\", not \"-1\"", "expected": "1", "actual": "-1" },
//!         "log": []
//!       }
//!     ]
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use common::CheckError;
use serde::Serialize;

/// Why a check failed, as shown to the person reading results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cause {
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Set when the failure came from the tooling rather than the code under test.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub environment: bool,
}

impl From<&CheckError> for Cause {
    fn from(err: &CheckError) -> Self {
        let (expected, actual) = match err {
            CheckError::Mismatch { expected, actual } => (Some(expected.clone()), Some(actual.clone())),
            _ => (None, None),
        };
        Self {
            rationale: err.to_string(),
            help: err.help().map(str::to_string),
            expected,
            actual,
            environment: err.is_environment_error(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed { cause: Cause },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
    #[serde(flatten)]
    pub status: CheckStatus,
    pub log: Vec<String>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        matches!(self.status, CheckStatus::Passed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub generated_at: DateTime<Utc>,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<CheckResult>,
}

impl SuiteReport {
    pub fn new(results: Vec<CheckResult>) -> Self {
        let count = |f: fn(&CheckStatus) -> bool| results.iter().filter(|r| f(&r.status)).count();
        Self {
            generated_at: Utc::now(),
            passed: count(|s| matches!(s, CheckStatus::Passed)),
            failed: count(|s| matches!(s, CheckStatus::Failed { .. })),
            skipped: count(|s| matches!(s, CheckStatus::Skipped { .. })),
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Envelope around a [`SuiteReport`] for printing.
#[derive(Debug, Serialize)]
pub struct SuiteReportResponse {
    success: bool,
    message: String,
    data: SuiteReport,
}

impl From<SuiteReport> for SuiteReportResponse {
    fn from(report: SuiteReport) -> Self {
        let total = report.results.len();
        let not_passed = total - report.passed;
        let message = if not_passed == 0 {
            format!("All {total} checks passed.")
        } else {
            format!("{not_passed} of {total} checks did not pass.")
        };
        SuiteReportResponse {
            success: not_passed == 0,
            message,
            data: report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn result(name: &str, status: CheckStatus) -> CheckResult {
        CheckResult {
            name: name.to_string(),
            description: format!("{name} description"),
            dependency: None,
            status,
            log: vec![],
        }
    }

    #[test]
    fn test_mismatch_cause_carries_values() {
        let cause = Cause::from(&CheckError::Mismatch {
            expected: "1".into(),
            actual: "2".into(),
        });
        assert_eq!(cause.rationale, "expected \"1\", not \"2\"");
        assert_eq!(cause.expected.as_deref(), Some("1"));
        assert_eq!(cause.actual.as_deref(), Some("2"));
        assert!(!cause.environment);
    }

    #[test]
    fn test_parse_errors_are_marked_as_environment() {
        let cause = Cause::from(&CheckError::ReportParse("no root".into()));
        assert!(cause.environment);
        let value = serde_json::to_value(&cause).unwrap();
        assert_eq!(value["environment"], true);
        assert!(value.get("expected").is_none());
    }

    #[test]
    fn test_report_counts_and_serialization() {
        let report = SuiteReport::new(vec![
            result("compiles", CheckStatus::Passed),
            result(
                "style",
                CheckStatus::Failed {
                    cause: Cause::from(&CheckError::StyleViolation { warnings: 3 }),
                },
            ),
            result(
                "tests",
                CheckStatus::Skipped {
                    reason: "can't check until a frown turns upside down".into(),
                },
            ),
        ]);
        assert_eq!((report.passed, report.failed, report.skipped), (1, 1, 1));
        assert!(!report.all_passed());
        assert!(report.get("style").is_some());

        let response: SuiteReportResponse = report.into();
        let value: Value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "2 of 3 checks did not pass.");
        assert_eq!(value["data"]["results"][0]["status"], "passed");
        assert_eq!(value["data"]["results"][1]["status"], "failed");
        assert_eq!(value["data"]["results"][1]["cause"]["rationale"], "stylistic issues found");
        assert_eq!(value["data"]["results"][2]["status"], "skipped");
        assert!(value["data"]["generated_at"].is_string());
    }

    #[test]
    fn test_all_passed_message() {
        let response: SuiteReportResponse =
            SuiteReport::new(vec![result("compiles", CheckStatus::Passed)]).into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "All 1 checks passed.");
    }
}
