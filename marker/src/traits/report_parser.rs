//! Report Parser Trait
//!
//! This module defines the [`ReportParser`] trait, the common interface of the
//! XML report readers. Implementations turn the raw text an external tool wrote
//! into a strongly-typed report, failing with [`CheckError::ReportParse`] on
//! anything they cannot make sense of.
//!
//! # Example
//!
//! ```rust
//! use common::CheckError;
//! use marker::traits::report_parser::ReportParser;
//!
//! struct LineCounter;
//!
//! impl ReportParser<usize> for LineCounter {
//!     fn parse(&self, raw: &str) -> Result<usize, CheckError> {
//!         Ok(raw.lines().count())
//!     }
//! }
//!
//! assert_eq!(LineCounter.parse("a\nb").unwrap(), 2);
//! ```

use common::CheckError;

/// A trait for parsing a tool's textual report into a strongly-typed structure.
///
/// # Type Parameters
///
/// * `T` - The output type produced by the parser.
pub trait ReportParser<T> {
    /// Parse the raw report text.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ReportParse`] if the input is malformed or lacks a
    /// required element or attribute. Reads are all-or-nothing: no partial
    /// report is ever returned.
    fn parse(&self, raw: &str) -> Result<T, CheckError>;
}
