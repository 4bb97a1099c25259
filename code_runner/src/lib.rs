//! # Code Runner
//!
//! Drives the managed-runtime toolchain as external processes: assembling
//! classpaths, compiling sources, and running entry classes.
//!
//! - [`process`]: the [`ProcessInvoker`] seam and its OS-backed implementation.
//! - [`classpath`]: turns path fragments into a classpath string.
//! - [`compiler`]: [`CompileJob`], the compiler driver.
//! - [`program`]: runs classes and probes for a runnable entry point.
//! - [`toolchain`]: the tool names, check directory and invoker, bundled.
//!
//! The `test-helpers` feature adds `test_helpers::RecordingInvoker`, a fake
//! invoker for tests in dependent crates.

pub mod classpath;
pub mod compiler;
pub mod process;
pub mod program;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod toolchain;

pub use classpath::Classpath;
pub use compiler::{CompileJob, FlagValue};
pub use process::{Invocation, ProcessError, ProcessInvoker, ProcessOutput, SystemInvoker};
pub use toolchain::Toolchain;
