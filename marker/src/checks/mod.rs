//! # Checks
//!
//! Ready-made [`Check`](crate::traits::check::Check) implementations:
//!
//! - [`build::CompileCheck`]: compiles sources.
//! - [`build::ApplicationClassCheck`]: probes a class for a runnable `main`.
//! - [`style::StyleCheck`]: runs the style checker over a target.
//! - [`unit_tests::TestClassCheck`] and [`unit_tests::TestcaseCheck`]: one
//!   check per test class plus one per test case, built by
//!   [`unit_tests::checks_from_test_class`].

pub mod build;
pub mod style;

pub use build::{ApplicationClassCheck, CompileCheck};
pub use style::StyleCheck;
pub use unit_tests::{TestClassCheck, TestcaseCheck, checks_from_test_class};
