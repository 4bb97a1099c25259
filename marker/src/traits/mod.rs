//!
//! Traits Module
//!
//! Core traits of the checking pipeline.
//!
//! - [`check`]: the unit of work the harness schedules.
//! - [`report_parser`]: turns an external tool's report into Rust types.

pub mod check;
pub mod report_parser;
