//! Check Error Types
//!
//! [`CheckError`] is the single failure type raised from inside a check body. Each
//! variant corresponds to one way a check can fail, and carries what the harness
//! needs to render it: a rationale (the `Display` string), an optional remediation
//! hint ([`CheckError::help`]) and, for [`CheckError::Mismatch`], structured
//! expected/actual values.
//!
//! Some variants describe a broken environment rather than a broken submission
//! (a missing report file, a binary that could not be started). Use
//! [`CheckError::is_environment_error`] to tell them apart when presenting results.
//!
//! # Example
//!
//! ```rust
//! use common::error::CheckError;
//!
//! fn compile(files: &[&str]) -> Result<(), CheckError> {
//!     if files.is_empty() {
//!         return Err(CheckError::Configuration("no files given to compile".into()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(compile(&[]).unwrap_err().is_environment_error());
//! ```

use std::time::Duration;
use thiserror::Error;

/// Every way a check can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The caller misused an API (e.g. asked to compile zero files).
    #[error("{0}")]
    Configuration(String),
    /// The compiler exited with a non-zero status.
    #[error("code failed to compile")]
    CompilationFailure { help: Option<String> },
    /// The probed class has no runnable entry point.
    #[error("Main method not found in class {class}.")]
    EntryPoint { class: String, help: String },
    /// An external tool's XML report was missing or malformed.
    #[error("could not read report: {0}")]
    ReportParse(String),
    /// A test case failed with an opaque message.
    #[error("{0}")]
    TestFailure(String),
    /// A test case failed an equality assertion.
    #[error("expected \"{expected}\", not \"{actual}\"")]
    Mismatch { expected: String, actual: String },
    /// The style checker reported at least one warning.
    #[error("stylistic issues found")]
    StyleViolation { warnings: usize },
    /// An external program could not be started or waited for.
    #[error("failed to run {program}: {reason}")]
    Process { program: String, reason: String },
    /// An external program did not finish within its time limit.
    #[error("{program} timed out after {after:?}")]
    Timeout { program: String, after: Duration },
}

impl CheckError {
    /// Remediation hint shown alongside the rationale, if any.
    pub fn help(&self) -> Option<&str> {
        match self {
            CheckError::CompilationFailure { help } => help.as_deref(),
            CheckError::EntryPoint { help, .. } => Some(help),
            _ => None,
        }
    }

    /// True when the failure points at the tooling or the check author, not the
    /// submission under test.
    pub fn is_environment_error(&self) -> bool {
        matches!(
            self,
            CheckError::Configuration(_)
                | CheckError::ReportParse(_)
                | CheckError::Process { .. }
                | CheckError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_renders_expected_and_actual() {
        let err = CheckError::Mismatch {
            expected: "1".into(),
            actual: "2".into(),
        };
        assert_eq!(err.to_string(), "expected \"1\", not \"2\"");
        assert!(!err.is_environment_error());
    }

    #[test]
    fn help_is_exposed_for_compile_and_entry_point_failures() {
        let compile = CheckError::CompilationFailure {
            help: Some("check your signatures".into()),
        };
        assert_eq!(compile.help(), Some("check your signatures"));
        assert_eq!(compile.to_string(), "code failed to compile");

        let entry = CheckError::EntryPoint {
            class: "Hello".into(),
            help: "define main".into(),
        };
        assert_eq!(entry.to_string(), "Main method not found in class Hello.");
        assert_eq!(entry.help(), Some("define main"));

        assert_eq!(CheckError::TestFailure("boom".into()).help(), None);
    }

    #[test]
    fn tooling_failures_are_environment_errors() {
        assert!(CheckError::ReportParse("no file".into()).is_environment_error());
        assert!(
            CheckError::Timeout {
                program: "java".into(),
                after: Duration::from_secs(3),
            }
            .is_environment_error()
        );
        assert!(!CheckError::StyleViolation { warnings: 4 }.is_environment_error());
    }
}
