//! Seed run logger
//!
//! Every message is tagged with a verbosity level and a severity. Messages can
//! go to stdout/stderr, to an in-memory buffer, or both. Tests run the logger
//! in `Memory` mode and inspect the captured entries.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for seed output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - nothing except fatal errors
    Silent = 0,
    /// Minimal - warnings, errors and the final summary
    Minimal = 1,
    /// Normal - one line per card (default)
    #[default]
    Normal = 2,
    /// Verbose - every effect and link row
    Verbose = 3,
}

impl std::str::FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// How serious a log entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout/stderr (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer
    Memory,
    /// Both terminal and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub severity: Severity,
    pub message: String,
    /// Optional category (e.g., "effect", "card", "upload")
    pub category: Option<String>,
}

/// Guard type that provides read-only access to log entries
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

/// Logs with detail only when the `verbose-logging` feature is on
///
/// With the feature off the format arguments are never evaluated.
#[macro_export]
macro_rules! log_if_verbose {
    ($logger:expr, $category:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.verbose($category, &format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

/// Logger shared by the builder, the source adapters and the CLI
///
/// Logging takes `&self`; the buffer lives in a `RefCell` so the logger can be
/// handed out by shared reference while the store is borrowed mutably.
pub struct SeedLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl SeedLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        SeedLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Logger that captures everything and prints nothing
    pub fn capturing() -> Self {
        let mut logger = Self::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Sets output_mode to Memory (suppresses terminal output)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Get access to captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// Captured warnings, in order
    pub fn warnings(&self) -> Vec<LogEntry> {
        self.entries_with(Severity::Warning)
    }

    pub fn errors(&self) -> Vec<LogEntry> {
        self.entries_with(Severity::Error)
    }

    fn entries_with(&self, severity: Severity) -> Vec<LogEntry> {
        self.log_buffer
            .borrow()
            .iter()
            .filter(|entry| entry.severity == severity)
            .cloned()
            .collect()
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Log at Minimal level
    pub fn minimal(&self, category: &str, message: &str) {
        self.record(VerbosityLevel::Minimal, Severity::Info, category, message);
    }

    /// Log at Normal level
    pub fn normal(&self, category: &str, message: &str) {
        self.record(VerbosityLevel::Normal, Severity::Info, category, message);
    }

    /// Log at Verbose level
    pub fn verbose(&self, category: &str, message: &str) {
        self.record(VerbosityLevel::Verbose, Severity::Info, category, message);
    }

    /// Warnings print from Minimal up and go to stderr
    pub fn warn(&self, category: &str, message: &str) {
        self.record(
            VerbosityLevel::Minimal,
            Severity::Warning,
            category,
            message,
        );
    }

    /// Errors print at every verbosity and go to stderr
    pub fn error(&self, category: &str, message: &str) {
        self.record(VerbosityLevel::Silent, Severity::Error, category, message);
    }

    fn record(&self, level: VerbosityLevel, severity: Severity, category: &str, message: &str) {
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
            && level <= self.verbosity;

        if !should_capture && !should_output {
            return;
        }

        let entry = LogEntry {
            level,
            severity,
            message: message.to_string(),
            category: (!category.is_empty()).then(|| category.to_string()),
        };

        if should_output {
            self.write_terminal(&entry);
        }
        if should_capture {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    fn write_terminal(&self, entry: &LogEntry) {
        let line = match self.output_format {
            OutputFormat::Text => match entry.severity {
                Severity::Info => entry.message.clone(),
                Severity::Warning => format!("warning: {}", entry.message),
                Severity::Error => format!("error: {}", entry.message),
            },
            OutputFormat::Json => serde_json::json!({
                "severity": entry.severity,
                "category": entry.category,
                "message": entry.message,
            })
            .to_string(),
        };

        match entry.severity {
            Severity::Info => println!("{line}"),
            Severity::Warning | Severity::Error => eprintln!("{line}"),
        }
    }
}

impl Default for SeedLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SeedLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedLogger")
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
        let logger = SeedLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let logger = SeedLogger::capturing();

        logger.normal("card", "Warg Rider inserted");
        logger.warn("effect", "not handled");
        logger.error("store", "write failed");

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "Warg Rider inserted");
        assert_eq!(logs[0].category.as_deref(), Some("card"));
        assert_eq!(logs[1].severity, Severity::Warning);
        assert_eq!(logs[2].severity, Severity::Error);
    }

    #[test]
    fn test_warning_filter() {
        let logger = SeedLogger::capturing();
        logger.normal("card", "a");
        logger.warn("effect", "b");
        logger.warn("effect", "c");

        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].message, "c");
        assert!(logger.errors().is_empty());
    }

    #[test]
    fn test_empty_category_is_none() {
        let logger = SeedLogger::capturing();
        logger.verbose("", "detail");
        assert_eq!(logger.logs()[0].category, None);
    }

    #[test]
    fn test_clear_and_disable_capture() {
        let mut logger = SeedLogger::capturing();
        logger.normal("card", "one");
        logger.clear_logs();
        assert!(logger.logs().is_empty());

        logger.disable_capture();
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_verbosity_parse() {
        assert_eq!(
            "3".parse::<VerbosityLevel>().unwrap(),
            VerbosityLevel::Verbose
        );
        assert_eq!(
            "Minimal".parse::<VerbosityLevel>().unwrap(),
            VerbosityLevel::Minimal
        );
        assert!("loud".parse::<VerbosityLevel>().is_err());
    }
}
