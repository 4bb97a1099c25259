//! Program Runner
//!
//! Starts the interpreter on an entry class and hands back the raw
//! [`ProcessOutput`]; interpreting it is up to the caller.
//!
//! [`is_application_class`] is a heuristic probe built on top of [`run`]. It
//! searches the interpreter's output for its "Main method not found" diagnostic,
//! so a program that prints that exact sentence itself will be misreported, and
//! a class that fails for some other reason first is not detected at all. The
//! probe starts the class's real `main`, so it runs under a time limit; a class
//! still running when the limit elapses evidently has one.

use crate::process::{Invocation, ProcessOutput};
use crate::toolchain::Toolchain;
use common::CheckError;
use std::path::Path;
use std::time::Duration;

/// Hint attached to [`CheckError::EntryPoint`].
pub const MAIN_METHOD_HELP: &str =
    "Make sure to define a main method as:\n\tpublic static void main(String[] args)";

/// Default limit for [`is_application_class`].
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Builds `<java> -cp <classpath> <main_class> <args...>`.
pub fn run_invocation<C, A>(
    toolchain: &Toolchain,
    main_class: &str,
    classpaths: &[C],
    args: &[A],
) -> Invocation
where
    C: AsRef<Path>,
    A: AsRef<str>,
{
    Invocation::new(toolchain.java())
        .arg("-cp")
        .arg(toolchain.classpath(classpaths).to_string())
        .arg(main_class)
        .args(args.iter().map(|a| a.as_ref().to_string()))
}

/// Runs `main_class` and returns whatever the process produced.
pub async fn run<C, A>(
    toolchain: &Toolchain,
    main_class: &str,
    classpaths: &[C],
    args: &[A],
    timeout: Option<Duration>,
) -> Result<ProcessOutput, CheckError>
where
    C: AsRef<Path>,
    A: AsRef<str>,
{
    let invocation = run_invocation(toolchain, main_class, classpaths, args).with_timeout(timeout);
    toolchain.invoke(&invocation).await
}

/// Fails with [`CheckError::EntryPoint`] if `class_name` looks like it has no
/// runnable `main` method. A run cut short by `timeout` counts as runnable.
pub async fn is_application_class<C: AsRef<Path>>(
    toolchain: &Toolchain,
    class_name: &str,
    classpaths: &[C],
    timeout: Duration,
) -> Result<(), CheckError> {
    let output = match run::<C, &str>(toolchain, class_name, classpaths, &[], Some(timeout)).await {
        Ok(output) => output,
        Err(CheckError::Timeout { .. }) => {
            tracing::info!("{class_name} was still running after {timeout:?}; assuming it has a main method");
            return Ok(());
        }
        Err(err) => return Err(err),
    };
    let diagnostic = format!("Main method not found in class {class_name}");

    if !output.success() && output.combined().contains(&diagnostic) {
        tracing::info!("{class_name} has no main method");
        return Err(CheckError::EntryPoint {
            class: class_name.to_string(),
            help: MAIN_METHOD_HELP.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessError;
    use crate::test_helpers::RecordingInvoker;
    use std::sync::Arc;

    const NO_MAIN: &str = "Error: Main method not found in class Hello, please define the main method as:\n   public static void main(String[] args)\n";

    #[tokio::test]
    async fn run_builds_interpreter_command_line() {
        let invoker = Arc::new(RecordingInvoker::replying(ProcessOutput::new(0, "hi\n")));
        let toolchain = Toolchain::new(invoker.clone(), "/psets/hello").with_java("/jdk/bin/java");

        let out = run(&toolchain, "Hello", &["lib"], &["a", "b c"], None)
            .await
            .unwrap();

        assert_eq!(out.stdout, "hi\n");
        let call = &invoker.calls()[0];
        assert_eq!(call.program, "/jdk/bin/java");
        assert_eq!(call.args[0], "-cp");
        assert!(call.args[1].starts_with('.'));
        assert!(call.args[1].ends_with("lib"));
        assert_eq!(call.args[2..], ["Hello", "a", "b c"]);
    }

    #[tokio::test]
    async fn missing_main_method_is_flagged() {
        let invoker = Arc::new(RecordingInvoker::replying(
            ProcessOutput::new(1, "").with_stderr(NO_MAIN),
        ));
        let toolchain = Toolchain::new(invoker, "/psets/hello");

        let err = is_application_class::<&str>(&toolchain, "Hello", &[], DEFAULT_PROBE_TIMEOUT)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Main method not found in class Hello.");
        assert_eq!(err.help(), Some(MAIN_METHOD_HELP));
    }

    #[tokio::test]
    async fn entry_point_check_runs_under_a_time_limit() {
        let invoker = Arc::new(RecordingInvoker::new(|inv| {
            Err(ProcessError::TimedOut {
                program: inv.program.clone(),
                after: inv.timeout.unwrap_or_default(),
            })
        }));
        let toolchain = Toolchain::new(invoker.clone(), "/psets/hello");

        let limit = Duration::from_millis(250);
        assert_eq!(
            is_application_class::<&str>(&toolchain, "Server", &[], limit).await,
            Ok(())
        );
        assert_eq!(invoker.calls()[0].timeout, Some(limit));
    }

    #[tokio::test]
    async fn entry_point_check_still_reports_spawn_failures() {
        let invoker = Arc::new(RecordingInvoker::new(|inv| {
            Err(ProcessError::Spawn {
                program: inv.program.clone(),
                reason: "No such file or directory".into(),
            })
        }));
        let toolchain = Toolchain::new(invoker, "/psets/hello");
        let err = is_application_class::<&str>(&toolchain, "Hello", &[], DEFAULT_PROBE_TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Process { .. }));
    }

    #[tokio::test]
    async fn entry_point_check_ignores_other_failures() {
        let invoker = Arc::new(RecordingInvoker::replying(
            ProcessOutput::new(1, "").with_stderr("Exception in thread \"main\" java.lang.NullPointerException\n"),
        ));
        let toolchain = Toolchain::new(invoker, "/psets/hello");
        assert!(is_application_class::<&str>(&toolchain, "Hello", &[], DEFAULT_PROBE_TIMEOUT).await.is_ok());
    }

    #[tokio::test]
    async fn entry_point_check_ignores_successful_runs_that_print_the_diagnostic() {
        let invoker = Arc::new(RecordingInvoker::replying(ProcessOutput::new(0, NO_MAIN)));
        let toolchain = Toolchain::new(invoker, "/psets/hello");
        assert!(is_application_class::<&str>(&toolchain, "Hello", &[], DEFAULT_PROBE_TIMEOUT).await.is_ok());
    }
}
