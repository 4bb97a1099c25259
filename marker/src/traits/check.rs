//! Check Trait
//!
//! A [`Check`] is one independent pass/fail unit. It may depend on exactly one
//! other check by name; the harness runs it only once that dependency has
//! passed, and hands it the dependency's output [`Artifact`].

use crate::types::TestReport;
use async_trait::async_trait;
use common::{CheckError, CheckLog};
use std::sync::Arc;

/// Output a check passes on to the checks that depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    TestReport(Arc<TestReport>),
}

#[async_trait]
pub trait Check: Send + Sync {
    /// Unique name within a suite; other checks refer to it by this.
    fn name(&self) -> &str;

    /// Human-readable one-liner.
    fn description(&self) -> &str;

    /// Name of the check that must pass first.
    fn dependency(&self) -> Option<&str> {
        None
    }

    /// Runs the check. `input` is the dependency's artifact, if it produced one.
    /// Lines meant for the person reading the result go into `log`.
    async fn run(
        &self,
        input: Option<Artifact>,
        log: &mut CheckLog,
    ) -> Result<Option<Artifact>, CheckError>;
}
