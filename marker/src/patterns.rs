//! Message patterns for the unit-test runner's diagnostics.
//!
//! The reader and the interpreter both classify failures by matching the free
//! text the runner and the runtime print. That wording belongs to a specific
//! runner version, so all of it is kept here in one [`MessagePatterns`] value.
//! Supporting a different version means building a different value, not
//! editing the parsers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Type name suffix of the runner's assertion error.
pub const ASSERTION_FAILED_ERROR: &str = "AssertionFailedError";
/// Error the runtime raises when a linked method or constructor is absent.
pub const NO_SUCH_METHOD_ERROR: &str = "java.lang.NoSuchMethodError";

static JUNIT5: Lazy<Arc<MessagePatterns>> = Lazy::new(|| {
    Arc::new(
        MessagePatterns::new(
            "junit5",
            ASSERTION_FAILED_ERROR,
            NO_SUCH_METHOD_ERROR,
            r"^expected: <(.+?)> but was: <(.+?)>",
            r"^(\w+?): method 'void <init>\(\)' not found",
            r"^'(\w+?) (\w+?)\.([a-zA-Z<>]+?)\((.*)\)'",
        )
        .expect("built-in junit5 patterns are valid"),
    )
});

/// A versioned set of patterns for reading diagnostics.
#[derive(Debug, Clone)]
pub struct MessagePatterns {
    version: String,
    assertion_type_suffix: String,
    missing_method_type: String,
    assertion: Regex,
    default_constructor: Regex,
    method_signature: Regex,
}

impl MessagePatterns {
    /// Builds a pattern set.
    ///
    /// - `assertion` must capture the expected and actual values.
    /// - `default_constructor` must capture the class name.
    /// - `method_signature` must capture return type, class, method and arguments.
    pub fn new(
        version: impl Into<String>,
        assertion_type_suffix: impl Into<String>,
        missing_method_type: impl Into<String>,
        assertion: &str,
        default_constructor: &str,
        method_signature: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            version: version.into(),
            assertion_type_suffix: assertion_type_suffix.into(),
            missing_method_type: missing_method_type.into(),
            assertion: Regex::new(assertion)?,
            default_constructor: Regex::new(default_constructor)?,
            method_signature: Regex::new(method_signature)?,
        })
    }

    /// Patterns for the bundled JUnit 5 console runner.
    pub fn junit5() -> Arc<Self> {
        Arc::clone(&JUNIT5)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_assertion_failure(&self, exception: &str) -> bool {
        exception.ends_with(&self.assertion_type_suffix)
    }

    pub fn is_missing_method(&self, exception: &str) -> bool {
        exception == self.missing_method_type
    }

    /// Extracts `(expected, actual)` from an assertion message.
    pub fn assertion_values(&self, message: &str) -> Option<(String, String)> {
        let caps = self.assertion.captures(message)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }

    /// Rewrites a "no such method" message into a short explanation, or returns
    /// `None` if neither pattern recognises it.
    ///
    /// The default-constructor pattern is tried first.
    pub fn rewrite_missing_method(&self, message: &str) -> Option<String> {
        if let Some(caps) = self.default_constructor.captures(message) {
            return Some(format!("no constructor: '{}()'.", &caps[1]));
        }

        let caps = self.method_signature.captures(message)?;
        let (return_type, class, method, args) = (&caps[1], &caps[2], &caps[3], &caps[4]);
        if method == "<init>" {
            Some(format!("no constructor: '{class}({args})'."))
        } else {
            Some(format!(
                "could not find method:  {return_type} {class}.{method}({args})"
            ))
        }
    }
}
