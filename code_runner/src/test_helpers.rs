//! Fakes for exercising drivers without starting real processes.

use crate::process::{Invocation, ProcessError, ProcessInvoker, ProcessOutput};
use async_trait::async_trait;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&Invocation) -> Result<ProcessOutput, ProcessError> + Send + Sync>;

/// A [`ProcessInvoker`] that records every invocation and answers it with a
/// caller-supplied function.
pub struct RecordingInvoker {
    calls: Mutex<Vec<Invocation>>,
    responder: Responder,
}

impl RecordingInvoker {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Invocation) -> Result<ProcessOutput, ProcessError> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Answers every invocation with a copy of `output`.
    pub fn replying(output: ProcessOutput) -> Self {
        Self::new(move |_| Ok(output.clone()))
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl ProcessInvoker for RecordingInvoker {
    async fn invoke(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(invocation.clone());
        (self.responder)(invocation)
    }
}
