//! # Suite
//!
//! A [`Suite`] runs a list of [`Check`]s in the order they were added. Each check
//! gets the artifact its dependency produced. A check whose dependency did not
//! pass, or has not run before it, is skipped without being started.

use crate::report::{Cause, CheckResult, CheckStatus, SuiteReport};
use crate::traits::check::{Artifact, Check};
use common::CheckLog;
use std::collections::HashMap;

/// Reason recorded for checks skipped because of their dependency.
pub const SKIP_REASON: &str = "can't check until a frown turns upside down";

#[derive(Default)]
pub struct Suite {
    checks: Vec<Box<dyn Check>>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, check: impl Check + 'static) -> &mut Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn extend<I>(&mut self, checks: I) -> &mut Self
    where
        I: IntoIterator<Item = Box<dyn Check>>,
    {
        self.checks.extend(checks);
        self
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checks.iter().map(|c| c.name())
    }

    /// Runs every check once, in order.
    pub async fn run(&self) -> SuiteReport {
        // Name -> artifact of every check that passed so far.
        let mut passed: HashMap<String, Option<Artifact>> = HashMap::new();
        let mut results = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let input = match check.dependency() {
                None => Some(None),
                Some(dep) => passed.get(dep).cloned(),
            };

            let Some(input) = input else {
                tracing::info!("skipping {}: {:?} did not pass", check.name(), check.dependency());
                results.push(CheckResult {
                    name: check.name().to_string(),
                    description: check.description().to_string(),
                    dependency: check.dependency().map(str::to_string),
                    status: CheckStatus::Skipped {
                        reason: SKIP_REASON.to_string(),
                    },
                    log: Vec::new(),
                });
                continue;
            };

            let mut log = CheckLog::new();
            let status = match check.run(input, &mut log).await {
                Ok(artifact) => {
                    tracing::info!("{} passed", check.name());
                    passed.insert(check.name().to_string(), artifact);
                    CheckStatus::Passed
                }
                Err(err) => {
                    if err.is_environment_error() {
                        tracing::warn!("{} could not run: {err}", check.name());
                    } else {
                        tracing::info!("{} failed: {err}", check.name());
                    }
                    CheckStatus::Failed {
                        cause: Cause::from(&err),
                    }
                }
            };

            results.push(CheckResult {
                name: check.name().to_string(),
                description: check.description().to_string(),
                dependency: check.dependency().map(str::to_string),
                status,
                log: log.into_lines(),
            });
        }

        SuiteReport::new(results)
    }
}
