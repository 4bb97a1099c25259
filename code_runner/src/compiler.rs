//! Compiler Driver
//!
//! [`CompileJob`] compiles source files with the toolchain's compiler:
//!
//! ```text
//! <javac> -classpath <.:entries...> <--flags...> <files...>
//! ```
//!
//! A non-zero exit status becomes [`CheckError::CompilationFailure`]; every line
//! the compiler printed is copied into the check's log first so the author of
//! the submission can see what went wrong.

use crate::process::Invocation;
use crate::toolchain::Toolchain;
use common::{CheckError, CheckLog};
use std::path::PathBuf;
use std::time::Duration;

/// Time a compilation may take before it is abandoned.
pub const DEFAULT_COMPILE_TIMEOUT: Duration = Duration::from_secs(10);

/// Value of a compiler flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Flag is omitted.
    Off,
    /// Bare `--name`.
    On,
    /// `--name=value`; an empty value omits the flag.
    Value(String),
}

impl From<bool> for FlagValue {
    fn from(on: bool) -> Self {
        if on { FlagValue::On } else { FlagValue::Off }
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Value(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Value(value)
    }
}

/// Renders flags as command-line arguments, in the given order.
///
/// Underscores in names become hyphens; `Off` and empty values are dropped.
pub fn render_flags(flags: &[(String, FlagValue)]) -> Vec<String> {
    flags
        .iter()
        .filter_map(|(name, value)| {
            let name = name.replace('_', "-");
            match value {
                FlagValue::Off => None,
                FlagValue::On => Some(format!("--{name}")),
                FlagValue::Value(v) if v.is_empty() => None,
                FlagValue::Value(v) => Some(format!("--{name}={v}")),
            }
        })
        .collect()
}

/// A single compilation request.
#[derive(Debug, Clone)]
pub struct CompileJob {
    files: Vec<String>,
    classpaths: Vec<String>,
    extra_entries: Vec<PathBuf>,
    flags: Vec<(String, FlagValue)>,
    timeout: Duration,
    fail_help: Option<String>,
}

impl CompileJob {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            classpaths: Vec::new(),
            extra_entries: Vec::new(),
            flags: Vec::new(),
            timeout: DEFAULT_COMPILE_TIMEOUT,
            fail_help: None,
        }
    }

    /// Classpath fragments, relative to the check directory unless absolute.
    pub fn with_classpaths<I, S>(mut self, classpaths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classpaths.extend(classpaths.into_iter().map(Into::into));
        self
    }

    /// Appends an already resolved classpath entry after the fragments.
    pub fn with_classpath_entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.extra_entries.push(entry.into());
        self
    }

    /// Adds a flag. Setting the same name twice keeps the later value in the
    /// position of the first.
    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.flags.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.flags.push((name, value)),
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fail_help(mut self, help: impl Into<String>) -> Self {
        self.fail_help = Some(help.into());
        self
    }

    /// Builds the compiler command line.
    ///
    /// # Errors
    /// [`CheckError::Configuration`] if no files were given.
    pub fn invocation(&self, toolchain: &Toolchain) -> Result<Invocation, CheckError> {
        if self.files.is_empty() {
            return Err(CheckError::Configuration(
                "no source files given to compile".to_string(),
            ));
        }

        let mut classpath = toolchain.classpath(&self.classpaths);
        for entry in &self.extra_entries {
            classpath.push(entry.clone());
        }

        Ok(Invocation::new(toolchain.javac())
            .arg("-classpath")
            .arg(classpath.to_string())
            .args(render_flags(&self.flags))
            .args(self.files.iter().cloned())
            .with_timeout(Some(self.timeout)))
    }

    /// Runs the compiler.
    ///
    /// # Errors
    /// - [`CheckError::Configuration`] if no files were given.
    /// - [`CheckError::CompilationFailure`] if the compiler exits non-zero.
    /// - [`CheckError::Process`] / [`CheckError::Timeout`] if it could not run.
    pub async fn run(self, toolchain: &Toolchain, log: &mut CheckLog) -> Result<(), CheckError> {
        let invocation = self.invocation(toolchain)?;
        let output = toolchain.invoke(&invocation).await?;

        if !output.success() {
            tracing::info!(
                "compilation of {} file(s) failed with exit code {}",
                self.files.len(),
                output.exit_code
            );
            for line in output.combined().lines() {
                log.log(line);
            }
            return Err(CheckError::CompilationFailure {
                help: self.fail_help,
            });
        }

        Ok(())
    }
}
