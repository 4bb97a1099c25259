//! # Parsers
//!
//! Readers for the XML reports written by the external tools. Each one
//! implements the [`ReportParser`](crate::traits::report_parser::ReportParser)
//! trait.
//!
//! The available parsers are:
//! - [`junit_parser`]: For the unit-test runner's per-suite report.
//! - [`checkstyle_parser`]: For the style checker's XML output.

pub mod checkstyle_parser;
pub mod junit_parser;
mod xml;
