//! Process Invoker
//!
//! Every external program (compiler, interpreter, test runner, style checker) is
//! started through a [`ProcessInvoker`]. Drivers hold an `Arc<dyn ProcessInvoker>`
//! instead of spawning processes themselves, so tests can substitute a fake that
//! records invocations and replies with canned output.
//!
//! Arguments are handed to the operating system as-is; no shell is involved, so
//! classpaths and class names never need quoting.

use async_trait::async_trait;
use common::CheckError;
use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

/// A fully rendered command line, consumed once by a [`ProcessInvoker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Value of the first `--name=value` argument, if present.
    pub fn long_option(&self, name: &str) -> Option<&str> {
        let prefix = format!("--{name}=");
        self.args.iter().find_map(|a| a.strip_prefix(prefix.as_str()))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit status; `-1` if the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Standard output followed by standard error.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) if self.stdout.ends_with('\n') => {
                format!("{}{}", self.stdout, self.stderr)
            }
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }
}

/// Why a process produced no [`ProcessOutput`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// The program could not be started or waited for.
    #[error("failed to run {program}: {reason}")]
    Spawn { program: String, reason: String },
    /// The program was still running when its time limit elapsed and was killed.
    #[error("{program} timed out after {after:?}")]
    TimedOut { program: String, after: Duration },
}

impl From<ProcessError> for CheckError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Spawn { program, reason } => CheckError::Process { program, reason },
            ProcessError::TimedOut { program, after } => CheckError::Timeout { program, after },
        }
    }
}

/// Runs an [`Invocation`] to completion.
#[async_trait]
pub trait ProcessInvoker: Send + Sync {
    async fn invoke(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError>;
}

/// Spawns real operating-system processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInvoker;

#[async_trait]
impl ProcessInvoker for SystemInvoker {
    async fn invoke(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError> {
        tracing::debug!("running `{invocation}`");

        let spawn_error = |e: std::io::Error| ProcessError::Spawn {
            program: invocation.program.clone(),
            reason: e.to_string(),
        };

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match invocation.timeout {
            Some(limit) => timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ProcessError::TimedOut {
                    program: invocation.program.clone(),
                    after: limit,
                })?
                .map_err(spawn_error)?,
            None => child.wait_with_output().await.map_err(spawn_error)?,
        };

        let result = ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!("`{}` exited with {}", invocation.program, result.exit_code);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_arguments() {
        let inv = Invocation::new("java").args(["-cp", ".", "Main"]);
        assert_eq!(inv.to_string(), "java -cp . Main");
    }

    #[test]
    fn long_option_finds_value() {
        let inv = Invocation::new("java").args(["-jar", "x.jar", "--reports-dir=/tmp/r"]);
        assert_eq!(inv.long_option("reports-dir"), Some("/tmp/r"));
        assert_eq!(inv.long_option("details"), None);
    }

    #[test]
    fn combined_puts_stdout_before_stderr() {
        let out = ProcessOutput::new(1, "out").with_stderr("err\n");
        assert_eq!(out.combined(), "out\nerr\n");
        assert_eq!(ProcessOutput::new(0, "a\n").with_stderr("b").combined(), "a\nb");
        assert_eq!(ProcessOutput::new(0, "").with_stderr("b").combined(), "b");
        assert!(!out.success());
    }

    #[test]
    fn process_errors_map_onto_check_errors() {
        let timed_out = ProcessError::TimedOut {
            program: "java".into(),
            after: Duration::from_secs(2),
        };
        assert_eq!(
            CheckError::from(timed_out),
            CheckError::Timeout {
                program: "java".into(),
                after: Duration::from_secs(2)
            }
        );
    }

    #[test]
    fn process_errors_render_like_their_check_errors() {
        let spawn = ProcessError::Spawn {
            program: "javac".into(),
            reason: "not found".into(),
        };
        assert_eq!(spawn.to_string(), "failed to run javac: not found");
        assert_eq!(spawn.to_string(), CheckError::from(spawn.clone()).to_string());

        let timed_out = ProcessError::TimedOut {
            program: "java".into(),
            after: Duration::from_millis(1500),
        };
        assert_eq!(timed_out.to_string(), "java timed out after 1.5s");
        let as_error: &dyn std::error::Error = &timed_out;
        assert!(as_error.source().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_invoker_captures_both_streams_and_exit_code() {
        let inv = Invocation::new("sh").args(["-c", "echo hello; echo oops >&2; exit 3"]);
        let out = SystemInvoker.invoke(&inv).await.unwrap();
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.stdout, "hello\n");
        assert_eq!(out.stderr, "oops\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_invoker_times_out() {
        let inv = Invocation::new("sh")
            .args(["-c", "sleep 5"])
            .with_timeout(Some(Duration::from_millis(100)));
        let err = SystemInvoker.invoke(&inv).await.unwrap_err();
        assert!(matches!(err, ProcessError::TimedOut { .. }));
    }

    #[tokio::test]
    async fn system_invoker_reports_missing_program() {
        let inv = Invocation::new("definitely-not-a-real-binary-4711");
        let err = SystemInvoker.invoke(&inv).await.unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }
}
