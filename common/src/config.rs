//! Toolchain configuration.
//!
//! `ToolchainConfig` names the external binaries and jars the checks drive, the
//! directory relative paths are resolved against, the per-tool timeouts and the
//! logger settings. Values come from environment variables, optionally seeded
//! from a dotenv file.
//!
//! Libraries never read the global instance themselves; it exists for binaries
//! that want to load the configuration once at start-up.

use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_JUNIT_JAR: &str = "lib/junit-platform-console-standalone-1.6.2.jar";
pub const DEFAULT_CHECKSTYLE_JAR: &str = "lib/checkstyle-8.33-all.jar";

#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    pub java: String,
    pub javac: String,
    pub junit_jar: PathBuf,
    pub checkstyle_jar: PathBuf,
    /// Directory that relative classpath entries and jars are resolved against.
    pub check_dir: PathBuf,
    pub compile_timeout: Duration,
    pub test_timeout: Duration,
    pub style_timeout: Duration,
    /// Limit for running a class just to see whether it has a `main` method.
    pub probe_timeout: Duration,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
}

static CONFIG: OnceCell<ToolchainConfig> = OnceCell::new();

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            java: "java".into(),
            javac: "javac".into(),
            junit_jar: PathBuf::from(DEFAULT_JUNIT_JAR),
            checkstyle_jar: PathBuf::from(DEFAULT_CHECKSTYLE_JAR),
            check_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            compile_timeout: Duration::from_secs(10),
            test_timeout: Duration::from_secs(60),
            style_timeout: Duration::from_secs(60),
            probe_timeout: Duration::from_secs(3),
            log_level: "info".into(),
            log_file: "logs/marker.log".into(),
            log_to_stdout: false,
        }
    }
}

impl ToolchainConfig {
    /// Builds a config from the current process environment.
    ///
    /// Variables that are unset keep their default. Numeric variables that do
    /// not parse also keep their default, with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            java: env::var("JAVA").unwrap_or(defaults.java),
            javac: env::var("JAVAC").unwrap_or(defaults.javac),
            junit_jar: env::var("JUNIT_JAR")
                .map(PathBuf::from)
                .unwrap_or(defaults.junit_jar),
            checkstyle_jar: env::var("CHECKSTYLE_JAR")
                .map(PathBuf::from)
                .unwrap_or(defaults.checkstyle_jar),
            check_dir: env::var("CHECK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.check_dir),
            compile_timeout: secs_var("COMPILE_TIMEOUT_SECS", defaults.compile_timeout),
            test_timeout: secs_var("TEST_TIMEOUT_SECS", defaults.test_timeout),
            style_timeout: secs_var("STYLE_TIMEOUT_SECS", defaults.style_timeout),
            probe_timeout: secs_var("PROBE_TIMEOUT_SECS", defaults.probe_timeout),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_file: env::var("LOG_FILE").unwrap_or(defaults.log_file),
            log_to_stdout: parsed_var("LOG_TO_STDOUT", defaults.log_to_stdout),
        }
    }

    /// Loads `env_path` (if it exists) into the environment and initialises the
    /// process-wide config. Later calls return the first instance.
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_init(Self::from_env)
    }

    /// Returns the process-wide config, if [`ToolchainConfig::init`] has run.
    pub fn global() -> Option<&'static Self> {
        CONFIG.get()
    }
}

fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring {key}={raw:?}: not a valid value");
            default
        }),
        Err(_) => default,
    }
}

fn secs_var(key: &str, default: Duration) -> Duration {
    Duration::from_secs(parsed_var(key, default.as_secs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "JAVA",
        "JAVAC",
        "JUNIT_JAR",
        "CHECKSTYLE_JAR",
        "CHECK_DIR",
        "COMPILE_TIMEOUT_SECS",
        "TEST_TIMEOUT_SECS",
        "STYLE_TIMEOUT_SECS",
        "PROBE_TIMEOUT_SECS",
        "LOG_LEVEL",
        "LOG_FILE",
        "LOG_TO_STDOUT",
    ];

    fn clear_vars() {
        for k in VARS {
            unsafe { env::remove_var(k) };
        }
    }

    #[test]
    #[serial]
    fn defaults_when_environment_is_empty() {
        clear_vars();
        let cfg = ToolchainConfig::from_env();
        assert_eq!(cfg.java, "java");
        assert_eq!(cfg.javac, "javac");
        assert_eq!(cfg.junit_jar, PathBuf::from(DEFAULT_JUNIT_JAR));
        assert_eq!(cfg.compile_timeout, Duration::from_secs(10));
        assert_eq!(cfg.test_timeout, Duration::from_secs(60));
        assert_eq!(cfg.probe_timeout, Duration::from_secs(3));
        assert!(!cfg.log_to_stdout);
    }

    #[test]
    #[serial]
    fn reads_overrides_from_environment() {
        clear_vars();
        unsafe {
            env::set_var("JAVA", "/opt/jdk/bin/java");
            env::set_var("CHECK_DIR", "/srv/pset");
            env::set_var("TEST_TIMEOUT_SECS", "5");
            env::set_var("PROBE_TIMEOUT_SECS", "7");
            env::set_var("LOG_TO_STDOUT", "true");
        }

        let cfg = ToolchainConfig::from_env();
        assert_eq!(cfg.java, "/opt/jdk/bin/java");
        assert_eq!(cfg.check_dir, PathBuf::from("/srv/pset"));
        assert_eq!(cfg.test_timeout, Duration::from_secs(5));
        assert_eq!(cfg.probe_timeout, Duration::from_secs(7));
        assert!(cfg.log_to_stdout);
        clear_vars();
    }

    #[test]
    #[serial]
    fn bad_numbers_fall_back_to_defaults() {
        clear_vars();
        unsafe { env::set_var("COMPILE_TIMEOUT_SECS", "soon") };

        let cfg = ToolchainConfig::from_env();
        assert_eq!(cfg.compile_timeout, Duration::from_secs(10));
        clear_vars();
    }
}
