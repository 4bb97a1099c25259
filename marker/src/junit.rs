//! Unit-Test Runner Driver
//!
//! [`JunitRunner`] drives the standalone console runner jar: it compiles test
//! sources against the jar, runs the runner with a scoped report directory and
//! reads back the XML report it leaves there.

use crate::interpreter::interpret_testcase;
use crate::parsers::junit_parser::read_xml_report;
use crate::patterns::MessagePatterns;
use crate::types::TestReport;
use code_runner::process::Invocation;
use code_runner::{CompileJob, Toolchain};
use common::{CheckError, ToolchainConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Report file the runner writes into `--reports-dir`.
pub const XML_REPORT: &str = "TEST-junit-jupiter.xml";

/// Arguments passed to the runner before any caller-supplied ones.
pub const DEFAULT_ARGS: [&str; 3] = ["--disable-ansi-colors", "--disable-banner", "--details=none"];

/// Hint attached to failed test compilations.
pub const COMPILE_TEST_HELP: &str = "make sure your methods have correct signatures";

pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct JunitRunner {
    toolchain: Toolchain,
    jar: PathBuf,
    timeout: Duration,
    patterns: Arc<MessagePatterns>,
}

impl JunitRunner {
    /// `jar` is resolved against the toolchain's check directory.
    pub fn new(toolchain: Toolchain, jar: impl AsRef<Path>) -> Self {
        let jar = toolchain.resolve(jar);
        Self {
            toolchain,
            jar,
            timeout: DEFAULT_TEST_TIMEOUT,
            patterns: MessagePatterns::junit5(),
        }
    }

    pub fn from_config(config: &ToolchainConfig, toolchain: Toolchain) -> Self {
        Self::new(toolchain, &config.junit_jar).with_timeout(config.test_timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_patterns(mut self, patterns: Arc<MessagePatterns>) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn jar(&self) -> &Path {
        &self.jar
    }

    pub fn patterns(&self) -> &Arc<MessagePatterns> {
        &self.patterns
    }

    /// A compile job for test sources, with the runner jar on the classpath.
    pub fn compile_test<I, S>(&self, files: I) -> CompileJob
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CompileJob::new(files)
            .with_classpath_entry(self.jar.clone())
            .with_fail_help(COMPILE_TEST_HELP)
    }

    /// Builds the runner command line for a report directory.
    pub fn invocation<C, A>(&self, classpaths: &[C], reports_dir: &Path, args: &[A]) -> Invocation
    where
        C: AsRef<Path>,
        A: AsRef<str>,
    {
        Invocation::new(self.toolchain.java())
            .arg("-jar")
            .arg(self.jar.to_string_lossy())
            .arg("-cp")
            .arg(self.toolchain.classpath(classpaths).to_string())
            .arg(format!("--reports-dir={}", reports_dir.display()))
            .args(DEFAULT_ARGS)
            .args(args.iter().map(|a| a.as_ref().to_string()))
            .with_timeout(Some(self.timeout))
    }

    /// Runs the runner once and reads its report, traces included.
    ///
    /// The runner's exit status is not inspected: failing tests make it exit
    /// non-zero, and the report is what matters. The report directory is
    /// removed when this returns, whatever the outcome.
    ///
    /// # Errors
    /// - [`CheckError::Process`] / [`CheckError::Timeout`] if the runner could not run.
    /// - [`CheckError::ReportParse`] if no readable report was left behind.
    pub async fn run_test<C, A>(&self, classpaths: &[C], args: &[A]) -> Result<TestReport, CheckError>
    where
        C: AsRef<Path>,
        A: AsRef<str>,
    {
        let reports_dir = TempDir::new().map_err(|e| {
            CheckError::Configuration(format!("cannot create report directory: {e}"))
        })?;

        let invocation = self.invocation(classpaths, reports_dir.path(), args);
        let output = self.toolchain.invoke(&invocation).await?;
        tracing::debug!(
            "unit-test runner exited with {} ({} bytes of output)",
            output.exit_code,
            output.stdout.len() + output.stderr.len()
        );

        read_xml_report(
            &reports_dir.path().join(XML_REPORT),
            true,
            Arc::clone(&self.patterns),
        )
    }

    /// Runs only the tests in `test_class`.
    pub async fn run_test_class<C: AsRef<Path>>(
        &self,
        test_class: &str,
        classpaths: &[C],
    ) -> Result<TestReport, CheckError> {
        self.run_test(classpaths, &["--select-class", test_class])
            .await
    }

    /// Runs the runner and fails on the first test case that did not pass.
    pub async fn run_and_interpret_test<C, A>(
        &self,
        classpaths: &[C],
        args: &[A],
    ) -> Result<(), CheckError>
    where
        C: AsRef<Path>,
        A: AsRef<str>,
    {
        let report = self.run_test(classpaths, args).await?;
        report
            .testcases
            .iter()
            .try_for_each(|case| interpret_testcase(case, &self.patterns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_runner::process::{ProcessError, ProcessOutput};
    use code_runner::test_helpers::RecordingInvoker;
    use std::fs;

    const REPORT: &str = r#"<testsuite tests="2" failures="1">
        <testcase name="adds()"/>
        <testcase name="subtracts()"><failure type="org.opentest4j.AssertionFailedError" message="expected: &lt;1&gt; but was: &lt;3&gt;">trace</failure></testcase>
    </testsuite>"#;

    /// Answers like the runner: writes `report` into the requested directory.
    fn runner_writing(report: Option<&'static str>) -> Arc<RecordingInvoker> {
        Arc::new(RecordingInvoker::new(move |inv| {
            if let (Some(report), Some(dir)) = (report, inv.long_option("reports-dir")) {
                fs::write(Path::new(dir).join(XML_REPORT), report).unwrap();
            }
            Ok(ProcessOutput::new(1, ""))
        }))
    }

    fn junit(invoker: Arc<RecordingInvoker>) -> JunitRunner {
        JunitRunner::new(Toolchain::new(invoker, "/psets/calc"), "lib/junit.jar")
    }

    #[tokio::test]
    async fn runner_command_line_and_report() {
        let invoker = runner_writing(Some(REPORT));
        let report = junit(invoker.clone())
            .run_test_class("CalculatorTest", &["classes"])
            .await
            .unwrap();

        assert_eq!(report.tests, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.testcases[1].trace.as_deref(), Some("trace"));

        let call = &invoker.calls()[0];
        assert_eq!(call.program, "java");
        assert_eq!(call.args[0], "-jar");
        assert_eq!(call.args[1], "/psets/calc/lib/junit.jar");
        assert_eq!(call.args[2], "-cp");
        assert!(call.args[3].starts_with('.'));
        assert!(call.args[4].starts_with("--reports-dir="));
        assert_eq!(call.args[5..8], DEFAULT_ARGS);
        assert_eq!(call.args[8..], ["--select-class", "CalculatorTest"]);
        assert_eq!(call.timeout, Some(DEFAULT_TEST_TIMEOUT));
    }

    #[tokio::test]
    async fn report_directory_is_removed_afterwards() {
        let invoker = runner_writing(Some(REPORT));
        junit(invoker.clone())
            .run_test::<&str, &str>(&[], &[])
            .await
            .unwrap();

        let call = &invoker.calls()[0];
        let dir = call.long_option("reports-dir").unwrap();
        assert!(!Path::new(dir).exists());
    }

    #[tokio::test]
    async fn missing_report_is_a_parse_error() {
        let invoker = runner_writing(None);
        let err = junit(invoker.clone())
            .run_test::<&str, &str>(&[], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::ReportParse(_)));
        assert!(err.is_environment_error());

        let dir = invoker.calls()[0].long_option("reports-dir").unwrap().to_string();
        assert!(!Path::new(&dir).exists());
    }

    #[tokio::test]
    async fn report_directory_is_removed_when_the_runner_times_out_or_cannot_start() {
        let timed_out = Arc::new(RecordingInvoker::new(|inv| {
            Err(ProcessError::TimedOut {
                program: inv.program.clone(),
                after: inv.timeout.unwrap_or_default(),
            })
        }));
        let cannot_start = Arc::new(RecordingInvoker::new(|inv| {
            Err(ProcessError::Spawn {
                program: inv.program.clone(),
                reason: "No such file or directory".into(),
            })
        }));

        for invoker in [timed_out, cannot_start] {
            let err = junit(invoker.clone())
                .run_test::<&str, &str>(&[], &[])
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                CheckError::Timeout { .. } | CheckError::Process { .. }
            ));

            let dir = invoker.calls()[0].long_option("reports-dir").unwrap().to_string();
            assert!(!Path::new(&dir).exists(), "{dir} left behind after {err}");
        }
    }

    #[tokio::test]
    async fn run_and_interpret_fails_on_first_bad_case() {
        let invoker = runner_writing(Some(REPORT));
        let err = junit(invoker)
            .run_and_interpret_test::<&str, &str>(&[], &[])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckError::Mismatch {
                expected: "1".into(),
                actual: "3".into()
            }
        );
    }

    #[test]
    fn compile_test_puts_runner_jar_on_classpath() {
        let invoker = Arc::new(RecordingInvoker::replying(ProcessOutput::new(0, "")));
        let runner = junit(invoker);
        let inv = runner
            .compile_test(["CalculatorTest.java"])
            .invocation(runner.toolchain())
            .unwrap();
        assert!(inv.args[1].ends_with("/psets/calc/lib/junit.jar"));
        assert_eq!(inv.args.last().map(String::as_str), Some("CalculatorTest.java"));
    }

    #[tokio::test]
    async fn failed_test_compilation_carries_signature_hint() {
        let invoker = Arc::new(RecordingInvoker::replying(
            ProcessOutput::new(1, "").with_stderr("CalculatorTest.java:5: error: cannot find symbol"),
        ));
        let runner = junit(invoker);
        let mut log = common::CheckLog::new();
        let err = runner
            .compile_test(["CalculatorTest.java"])
            .run(runner.toolchain(), &mut log)
            .await
            .unwrap_err();
        assert_eq!(err.help(), Some(COMPILE_TEST_HELP));
        assert_eq!(log.lines().len(), 1);
    }
}
