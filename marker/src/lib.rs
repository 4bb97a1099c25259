//! # Marker Library
//!
//! This crate turns the output of the external Java tools into pass/fail checks.
//! It drives the unit-test console runner and the style checker, reads the XML
//! reports they write, classifies failures into structured results and builds
//! checks that a [`Suite`](suite::Suite) runs in dependency order.
//!
//! ## Key Concepts
//! - **Checks**: independent pass/fail units implementing [`traits::check::Check`].
//!   [`checks::checks_from_test_class`] produces one per test class plus one per
//!   test case while starting the runner only once.
//! - **Parsers**: strict readers for the runner's and the style checker's XML.
//! - **Patterns**: the versioned regular expressions used to classify the
//!   runner's diagnostics, kept in [`patterns::MessagePatterns`].
//! - **Reports**: serializable results of a suite run.

pub mod checks;
pub mod checkstyle;
pub mod interpreter;
pub mod junit;
pub mod parsers;
pub mod patterns;
pub mod report;
pub mod suite;
pub mod traits;
pub mod types;

pub use checkstyle::CheckstyleRunner;
pub use junit::JunitRunner;
pub use patterns::MessagePatterns;
pub use report::{SuiteReport, SuiteReportResponse};
pub use suite::Suite;
