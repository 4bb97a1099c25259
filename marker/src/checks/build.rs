use crate::traits::check::{Artifact, Check};
use async_trait::async_trait;
use code_runner::program::{DEFAULT_PROBE_TIMEOUT, is_application_class};
use code_runner::{CompileJob, Toolchain};
use common::{CheckError, CheckLog};
use std::time::Duration;

/// Passes when every file of its [`CompileJob`] compiles.
pub struct CompileCheck {
    name: String,
    description: String,
    dependency: Option<String>,
    toolchain: Toolchain,
    job: CompileJob,
}

impl CompileCheck {
    pub fn new(name: impl Into<String>, toolchain: Toolchain, job: CompileJob) -> Self {
        Self {
            name: name.into(),
            description: "code compiles".to_string(),
            dependency: None,
            toolchain,
            job,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependency = Some(dependency.into());
        self
    }
}

#[async_trait]
impl Check for CompileCheck {
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
        self.job.clone().run(&self.toolchain, log).await?;
        Ok(None)
    }
}

/// Passes unless the class looks like it has no `main` method.
///
/// See [`is_application_class`] for the limits of the probe.
pub struct ApplicationClassCheck {
    name: String,
    description: String,
    dependency: Option<String>,
    toolchain: Toolchain,
    class_name: String,
    classpaths: Vec<String>,
    timeout: Duration,
}

impl ApplicationClassCheck {
    pub fn new(name: impl Into<String>, toolchain: Toolchain, class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        Self {
            name: name.into(),
            description: format!("{class_name} is runnable"),
            dependency: None,
            toolchain,
            class_name,
            classpaths: Vec::new(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_classpaths<I, S>(mut self, classpaths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classpaths.extend(classpaths.into_iter().map(Into::into));
        self
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependency = Some(dependency.into());
        self
    }
}

#[async_trait]
impl Check for ApplicationClassCheck {
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
        _log: &mut CheckLog,
    ) -> Result<Option<Artifact>, CheckError> {
        is_application_class(&self.toolchain, &self.class_name, &self.classpaths, self.timeout)
            .await?;
        Ok(None)
    }
}
