use crate::checkstyle::CheckstyleRunner;
use crate::traits::check::{Artifact, Check};
use async_trait::async_trait;
use common::{CheckError, CheckLog};
use std::path::PathBuf;

/// Fails with a single style violation when the style checker complains about
/// anything in `target`.
pub struct StyleCheck {
    name: String,
    description: String,
    dependency: Option<String>,
    runner: CheckstyleRunner,
    checks_file: PathBuf,
    target: PathBuf,
}

impl StyleCheck {
    /// `checks_file` is resolved against the check directory; `target` is
    /// passed to the checker unchanged.
    pub fn new(
        name: impl Into<String>,
        runner: CheckstyleRunner,
        checks_file: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
    ) -> Self {
        let target = target.into();
        let checks_file = runner.toolchain().resolve(checks_file.into());
        Self {
            name: name.into(),
            description: format!("{} is well styled", target.display()),
            dependency: None,
            runner,
            checks_file,
            target,
        }
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependency = Some(dependency.into());
        self
    }
}

#[async_trait]
impl Check for StyleCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn dependency(&self) -> Option<&str> {
        self.dependency.as_deref()
    }

    async fn run(
        &self,
        _input: Option<Artifact>,
        log: &mut CheckLog,
    ) -> Result<Option<Artifact>, CheckError> {
        self.runner
            .run_and_interpret_checkstyle(&self.checks_file, &self.target, log)
            .await?;
        Ok(None)
    }
}
