//! Per-check diagnostic log.
//!
//! A [`CheckLog`] collects the lines a check wants shown next to its result
//! (compiler output, style warnings). Each appended line is also traced at
//! `debug` level so operators see it in the process log.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckLog {
    lines: Vec<String>,
}

impl CheckLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!("{line}");
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
