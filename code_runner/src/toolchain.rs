use crate::classpath::{Classpath, full_path};
use crate::process::{Invocation, ProcessInvoker, ProcessOutput};
use common::{CheckError, ToolchainConfig};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The managed-runtime tools a check drives, plus the invoker that starts them.
///
/// `check_dir` is the problem set's directory: relative classpath entries and
/// jar paths are resolved against it.
#[derive(Clone)]
pub struct Toolchain {
    java: String,
    javac: String,
    check_dir: PathBuf,
    invoker: Arc<dyn ProcessInvoker>,
}

impl Toolchain {
    pub fn new(invoker: Arc<dyn ProcessInvoker>, check_dir: impl Into<PathBuf>) -> Self {
        Self {
            java: "java".into(),
            javac: "javac".into(),
            check_dir: check_dir.into(),
            invoker,
        }
    }

    pub fn from_config(config: &ToolchainConfig, invoker: Arc<dyn ProcessInvoker>) -> Self {
        Self::new(invoker, config.check_dir.clone())
            .with_java(config.java.clone())
            .with_javac(config.javac.clone())
    }

    pub fn with_java(mut self, java: impl Into<String>) -> Self {
        self.java = java.into();
        self
    }

    pub fn with_javac(mut self, javac: impl Into<String>) -> Self {
        self.javac = javac.into();
        self
    }

    pub fn java(&self) -> &str {
        &self.java
    }

    pub fn javac(&self) -> &str {
        &self.javac
    }

    pub fn check_dir(&self) -> &Path {
        &self.check_dir
    }

    /// Assembles a classpath from fragments relative to the check directory.
    pub fn classpath<S: AsRef<Path>>(&self, entries: &[S]) -> Classpath {
        Classpath::new(entries, &self.check_dir)
    }

    /// Resolves a single path against the check directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        full_path(path, &self.check_dir)
    }

    pub async fn invoke(&self, invocation: &Invocation) -> Result<ProcessOutput, CheckError> {
        Ok(self.invoker.invoke(invocation).await?)
    }
}

impl fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolchain")
            .field("java", &self.java)
            .field("javac", &self.javac)
            .field("check_dir", &self.check_dir)
            .finish_non_exhaustive()
    }
}
