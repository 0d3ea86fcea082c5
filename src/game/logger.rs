//! Decision logger with in-memory capture
//!
//! Decisions and consistency warnings go through one logger so tests can
//! capture them and the CLI can print them. Decision lines are formatted in a
//! bump arena that is reset after each line.

use bumpalo::Bump;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for engine output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum VerbosityLevel {
    /// No output
    Silent = 0,
    /// Warnings only
    Minimal = 1,
    /// Committed decisions (default)
    #[default]
    Normal = 2,
    /// Every scored candidate and matchup
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    Both,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// e.g. "controller_choice", "warning"
    pub category: Option<String>,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

pub struct AiLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    format_bump: RefCell<Bump>,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl AiLogger {
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        AiLogger {
            verbosity,
            output_mode: OutputMode::default(),
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory and suppress stdout
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&self) {
        self.log_buffer.borrow_mut().clear();
        self.format_bump.borrow_mut().reset();
    }

    /// Number of captured consistency warnings
    pub fn warning_count(&self) -> usize {
        self.log_buffer
            .borrow()
            .iter()
            .filter(|e| e.category.as_deref() == Some("warning"))
            .count()
    }

    fn emit(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);

        if level > self.verbosity && !should_capture {
            return;
        }

        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        }

        if should_output && level <= self.verbosity {
            if level == VerbosityLevel::Minimal {
                println!("{}", message);
            } else {
                println!("  {}", message);
            }
        }
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, None, message);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, None, message);
    }

    /// Log at Verbose level. Compiled out without the `verbose-logging` feature.
    #[inline]
    pub fn verbose(&self, message: &str) {
        #[cfg(feature = "verbose-logging")]
        self.emit(VerbosityLevel::Verbose, None, message);
        #[cfg(not(feature = "verbose-logging"))]
        let _ = message;
    }

    /// Consistency warning; never aborts the decision
    pub fn warn(&self, message: &str) {
        let mut bump = self.format_bump.borrow_mut();
        {
            let line = bumpalo::format!(in &bump, "WARNING: {}", message);
            self.emit(VerbosityLevel::Minimal, Some("warning"), &line);
        }
        bump.reset();
    }

    /// Log a committed decision as "<controller>: <message>"
    pub fn controller_choice(&self, controller_name: &str, message: &str) {
        let mut bump = self.format_bump.borrow_mut();
        {
            let line = bumpalo::format!(in &bump, "{}: {}", controller_name, message);
            self.emit(VerbosityLevel::Normal, Some("controller_choice"), &line);
        }
        bump.reset();
    }
}

impl Default for AiLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AiLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = AiLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = AiLogger::new();
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].message, "minimal message");
    }

    #[test]
    fn test_controller_choice_format() {
        let mut logger = AiLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();

        logger.controller_choice("BLOCK", "unit 4 blocks unit 2");

        let logs = logger.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "BLOCK: unit 4 blocks unit 2");
        assert_eq!(logs[0].category.as_deref(), Some("controller_choice"));
    }

    #[test]
    fn test_warning_count_and_clear() {
        let mut logger = AiLogger::new();
        logger.enable_capture();

        logger.warn("picked 3 of [1, 2]");
        logger.normal("fine");
        assert_eq!(logger.warning_count(), 1);
        assert_eq!(logger.logs()[0].message, "WARNING: picked 3 of [1, 2]");

        logger.clear_logs();
        assert!(logger.logs().is_empty());
    }
}
