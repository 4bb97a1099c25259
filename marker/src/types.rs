//! # Types Module
//!
//! Normalised forms of the reports produced by the external tools. These are
//! what the parsers build and what checks hand to each other.

use serde::Serialize;
use std::fmt;

/// One test case from a unit-test report.
///
/// When `pass` is true, `exception`, `message` and `trace` are all `None`.
/// When it is false, `exception` and `message` are set; `trace` is only set for
/// `failure` results, and only if the report was read with tracing enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testcase {
    /// Test method name, without a trailing `()`.
    pub name: String,
    pub pass: bool,
    /// Fully-qualified error or exception type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    /// Diagnostic text, possibly rewritten into something friendlier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Raw stack trace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl Testcase {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pass: true,
            exception: None,
            message: None,
            trace: None,
        }
    }

    pub fn failed(
        name: impl Into<String>,
        exception: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pass: false,
            exception: Some(exception.into()),
            message: Some(message.into()),
            trace: None,
        }
    }
}

/// A parsed unit-test report.
///
/// `testcases` is in file order, which is the order the runner executed them.
/// Checks address test cases by position, so this order must never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestReport {
    pub testcases: Vec<Testcase>,
    pub tests: u32,
    pub failures: u32,
    /// Always `tests - failures`.
    pub passed: u32,
}

/// One complaint from the style checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckstyleWarning {
    pub message: String,
    /// Base name of the offending file; never a full path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl CheckstyleWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            filename: None,
            line: None,
            column: None,
            severity: None,
            source: None,
        }
    }

    /// `Name.java(line 3, char 7)`; line and column are left out when unknown,
    /// and the column is only shown together with a line. Empty without a
    /// filename.
    pub fn location(&self) -> String {
        let Some(filename) = &self.filename else {
            return String::new();
        };
        match (self.line, self.column) {
            (Some(line), Some(column)) => format!("{filename}(line {line}, char {column})"),
            (Some(line), None) => format!("{filename}(line {line})"),
            (None, _) => filename.clone(),
        }
    }
}

impl fmt::Display for CheckstyleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "In {}: {}", self.location(), self.message)
    }
}
