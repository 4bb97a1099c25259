//! Shared plumbing for the checking crates: configuration, logger bootstrap,
//! the check error taxonomy and the per-check diagnostic log.

pub mod check_log;
pub mod config;
pub mod error;
pub mod logger;

pub use check_log::CheckLog;
pub use config::ToolchainConfig;
pub use error::CheckError;
