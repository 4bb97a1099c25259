//! Style Checker Driver
//!
//! Runs the style checker jar over a target and turns its XML output into
//! [`CheckstyleWarning`]s.

use crate::parsers::checkstyle_parser::read_checkstyle_xml;
use crate::types::CheckstyleWarning;
use code_runner::Toolchain;
use code_runner::process::Invocation;
use common::{CheckError, CheckLog, ToolchainConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_STYLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct CheckstyleRunner {
    toolchain: Toolchain,
    jar: PathBuf,
    timeout: Duration,
}

impl CheckstyleRunner {
    /// `jar` is resolved against the toolchain's check directory.
    pub fn new(toolchain: Toolchain, jar: impl AsRef<Path>) -> Self {
        let jar = toolchain.resolve(jar);
        Self {
            toolchain,
            jar,
            timeout: DEFAULT_STYLE_TIMEOUT,
        }
    }

    pub fn from_config(config: &ToolchainConfig, toolchain: Toolchain) -> Self {
        Self::new(toolchain, &config.checkstyle_jar).with_timeout(config.style_timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// `<java> -jar <jar> -c <checks_file> -f xml <target>`
    pub fn invocation(&self, checks_file: &Path, target: &Path) -> Invocation {
        Invocation::new(self.toolchain.java())
            .arg("-jar")
            .arg(self.jar.to_string_lossy())
            .arg("-c")
            .arg(checks_file.to_string_lossy())
            .arg("-f")
            .arg("xml")
            .arg(target.to_string_lossy())
            .with_timeout(Some(self.timeout))
    }

    /// Runs the checker and parses what it printed on stdout.
    ///
    /// The exit status is ignored; the checker exits non-zero whenever it has
    /// complaints.
    pub async fn run_checkstyle(
        &self,
        checks_file: &Path,
        target: &Path,
    ) -> Result<Vec<CheckstyleWarning>, CheckError> {
        let invocation = self.invocation(checks_file, target);
        let output = self.toolchain.invoke(&invocation).await?;
        read_checkstyle_xml(&output.stdout)
    }

    /// Runs the checker, logs every warning and fails with a single
    /// [`CheckError::StyleViolation`] if there were any.
    pub async fn run_and_interpret_checkstyle(
        &self,
        checks_file: &Path,
        target: &Path,
        log: &mut CheckLog,
    ) -> Result<(), CheckError> {
        let warnings = self.run_checkstyle(checks_file, target).await?;
        if warnings.is_empty() {
            return Ok(());
        }

        tracing::info!("style checker reported {} issue(s)", warnings.len());
        log.log("Issues found:");
        for warning in &warnings {
            log.log(format!("- {warning}"));
        }
        Err(CheckError::StyleViolation {
            warnings: warnings.len(),
        })
    }
}
