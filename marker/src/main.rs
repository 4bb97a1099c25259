use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use code_runner::{CompileJob, FlagValue, SystemInvoker, Toolchain};
use common::ToolchainConfig;
use common::logger::init_logger;
use marker::checks::{ApplicationClassCheck, CompileCheck, StyleCheck, checks_from_test_class};
use marker::report::{Cause, CheckResult, CheckStatus};
use marker::suite::SKIP_REASON;
use marker::{CheckstyleRunner, JunitRunner, Suite, SuiteReport, SuiteReportResponse};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about = "Runs Java checks and prints the results as JSON")]
struct Cli {
    /// Dotenv file to load configuration from, if it exists
    #[arg(long, global = true, default_value = ".env")]
    env_file: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile source files
    Compile {
        #[arg(required = true)]
        files: Vec<String>,
        /// Classpath entry, relative to the check directory unless absolute
        #[arg(long = "cp")]
        classpaths: Vec<String>,
        /// Compiler flag as NAME or NAME=VALUE
        #[arg(long = "flag", value_parser = parse_flag)]
        flags: Vec<(String, FlagValue)>,
        /// Put the unit-test runner jar on the classpath
        #[arg(long)]
        tests: bool,
    },
    /// Check that a class has a runnable main method
    Probe {
        class: String,
        #[arg(long = "cp")]
        classpaths: Vec<String>,
    },
    /// Run a test class, one check per test case
    Test {
        test_class: String,
        #[arg(long = "cp")]
        classpaths: Vec<String>,
        /// Test sources to compile first
        #[arg(long = "compile")]
        compile: Vec<String>,
    },
    /// Run the style checker over a file or directory
    Style {
        target: PathBuf,
        /// Style checker configuration, relative to the check directory unless absolute
        #[arg(long)]
        checks: PathBuf,
    },
}

fn parse_flag(raw: &str) -> Result<(String, FlagValue), String> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name, FlagValue::from(value)),
        None => (raw, FlagValue::On),
    };
    if name.is_empty() {
        return Err(format!("flag has no name: {raw:?}"));
    }
    Ok((name.to_string(), value))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = ToolchainConfig::init(&cli.env_file);
    if let Err(e) = init_logger(&config.log_level, &config.log_file, config.log_to_stdout) {
        eprintln!("logging disabled: {e}");
    }

    let toolchain = Toolchain::from_config(config, Arc::new(SystemInvoker));
    tracing::info!("checking in {}", toolchain.check_dir().display());

    let report = match cli.command {
        Command::Compile {
            files,
            classpaths,
            flags,
            tests,
        } => {
            let mut job = if tests {
                JunitRunner::from_config(config, toolchain.clone()).compile_test(files)
            } else {
                CompileJob::new(files)
            };
            job = job
                .with_classpaths(classpaths)
                .with_timeout(config.compile_timeout);
            for (name, value) in flags {
                job = job.with_flag(name, value);
            }

            let mut suite = Suite::new();
            suite.add(CompileCheck::new("compile", toolchain, job));
            suite.run().await
        }
        Command::Probe { class, classpaths } => {
            let mut suite = Suite::new();
            suite.add(
                ApplicationClassCheck::new("probe", toolchain, class)
                    .with_classpaths(classpaths)
                    .with_timeout(config.probe_timeout),
            );
            suite.run().await
        }
        Command::Test {
            test_class,
            classpaths,
            compile,
        } => run_tests(config, toolchain, &test_class, &classpaths, compile).await,
        Command::Style { target, checks } => {
            let runner = CheckstyleRunner::from_config(config, toolchain);
            let mut suite = Suite::new();
            suite.add(StyleCheck::new("style", runner, checks, target));
            suite.run().await
        }
    };

    let all_passed = report.all_passed();
    let response: SuiteReportResponse = report.into();
    let json = serde_json::to_string_pretty(&response).context("serializing report")?;
    println!("{json}");

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Compiles the test sources, if any, and only then discovers and runs the
/// test class, since discovery already needs the compiled classes.
async fn run_tests(
    config: &ToolchainConfig,
    toolchain: Toolchain,
    test_class: &str,
    classpaths: &[String],
    compile: Vec<String>,
) -> SuiteReport {
    let runner = Arc::new(JunitRunner::from_config(config, toolchain.clone()));
    let mut results = Vec::new();

    if !compile.is_empty() {
        let job = runner
            .compile_test(compile)
            .with_classpaths(classpaths.iter().cloned())
            .with_timeout(config.compile_timeout);
        let mut suite = Suite::new();
        suite.add(CompileCheck::new("compile", toolchain, job));
        let compiled = suite.run().await;
        let passed = compiled.all_passed();
        results.extend(compiled.results);

        if !passed {
            results.push(CheckResult {
                name: test_class.to_string(),
                description: format!("Inspect {test_class}"),
                dependency: Some("compile".to_string()),
                status: CheckStatus::Skipped {
                    reason: SKIP_REASON.to_string(),
                },
                log: Vec::new(),
            });
            return SuiteReport::new(results);
        }
    }

    match checks_from_test_class(Arc::clone(&runner), test_class, None, classpaths).await {
        Ok(checks) => {
            let mut suite = Suite::new();
            suite.extend(checks);
            results.extend(suite.run().await.results);
        }
        Err(err) => {
            tracing::error!("could not discover tests in {test_class}: {err}");
            results.push(CheckResult {
                name: test_class.to_string(),
                description: format!("Inspect {test_class}"),
                dependency: None,
                status: CheckStatus::Failed {
                    cause: Cause::from(&err),
                },
                log: Vec::new(),
            });
        }
    }

    SuiteReport::new(results)
}
