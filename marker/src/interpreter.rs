//! Turns a single [`Testcase`] into a check outcome.

use crate::patterns::MessagePatterns;
use crate::types::Testcase;
use common::CheckError;

/// Maps a test case onto pass or failure.
///
/// - A passing case is `Ok`.
/// - An assertion failure whose message matches the assertion pattern becomes
///   [`CheckError::Mismatch`] with the expected and actual values.
/// - Anything else becomes [`CheckError::TestFailure`] carrying the message
///   unchanged.
pub fn interpret_testcase(case: &Testcase, patterns: &MessagePatterns) -> Result<(), CheckError> {
    if case.pass {
        return Ok(());
    }

    let message = case.message.clone().unwrap_or_default();
    let exception = case.exception.as_deref().unwrap_or_default();

    if patterns.is_assertion_failure(exception) {
        if let Some((expected, actual)) = patterns.assertion_values(&message) {
            return Err(CheckError::Mismatch { expected, actual });
        }
    }

    Err(CheckError::TestFailure(message))
}
