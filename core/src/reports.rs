// Core module for reporting errors raised while lowering an instance graph.
// This module provides structures and functions to create detailed reports
// including error messages, severities, and locations within the markup.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::error::Error;
use std::fmt;

use crate::location::Location;

/// Severity levels for reports
/// Used to categorize the importance of reports.
///
/// # Examples
/// ```
/// use rigging_core::reports::Severity;
/// let severity = Severity::Error;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// A contract breach between the resolution phase and the lowering pass.
    /// Traversal halts once one of these is recorded.
    Fatal,
    /// A recoverable problem; traversal of sibling nodes continues.
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        };
        write!(f, "{}", s)
    }
}

/// Optional stable error code for programmatic handling
/// Used to provide a machine-readable identifier for specific error types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u32);

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorCode {
    /// Create a new error code
    pub fn new(code: u32) -> Self {
        ErrorCode(code)
    }
    /// Get the code as a string
    pub fn as_str(&self) -> String {
        format!("E_{}", self.0)
    }
}

pub const E_NONE: ErrorCode = ErrorCode(0);
/// A resolution entry the pass depends on is missing or inconsistent.
pub const E_PRECONDITION: ErrorCode = ErrorCode(1);
/// A strategy object returned nothing and reported nothing.
pub const E_INTERNAL: ErrorCode = ErrorCode(2);
/// A named collaborator (binder) could not be found in the registry.
pub const E_MISSING_COLLABORATOR: ErrorCode = ErrorCode(3);

/// Report structure containing message, severity, and location
/// This structure represents a single diagnostic produced while lowering.
/// It includes the error message, severity level, optional location
/// information and an optional stable error code.
///
/// # Examples
/// ```
/// use rigging_core::reports::{Report, Severity};
/// let report = Report::error("something went wrong", None, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub message: String,
    pub severity: Severity,
    pub location: Option<Location>,
    pub code: Option<ErrorCode>,
}

impl Report {
    /// Create a new report
    pub fn new(
        message: &str,
        severity: Severity,
        location: Option<Location>,
        code: Option<ErrorCode>,
    ) -> Self {
        Report {
            message: message.to_string(),
            severity,
            location,
            code,
        }
    }

    pub fn info(message: &str, location: Option<Location>, code: Option<ErrorCode>) -> Self {
        Report::new(message, Severity::Info, location, code)
    }
    pub fn warning(message: &str, location: Option<Location>, code: Option<ErrorCode>) -> Self {
        Report::new(message, Severity::Warning, location, code)
    }
    pub fn error(message: &str, location: Option<Location>, code: Option<ErrorCode>) -> Self {
        Report::new(message, Severity::Error, location, code)
    }
    pub fn fatal(message: &str, location: Option<Location>, code: Option<ErrorCode>) -> Self {
        Report::new(message, Severity::Fatal, location, code)
    }

    // convenience conversion to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    // convert to a minimal LSP-like diagnostic (map structure)
    pub fn to_lsp_diagnostic(&self) -> serde_json::Value {
        let range = if let Some(loc) = &self.location {
            json!({
                "start": { "line": loc.line.saturating_sub(1), "character": loc.column.saturating_sub(1) },
                "end": { "line": loc.line.saturating_sub(1), "character": loc.column.saturating_sub(1) }
            })
        } else {
            json!(null)
        };
        json!({
            "severity": match self.severity {
                Severity::Fatal | Severity::Error => 1,
                Severity::Warning => 2,
                Severity::Info => 3,
            },
            "code": self.code.map(|c| c.0),
            "source": "rigging",
            "message": self.message,
            "range": range,
        })
    }

    /// Print with a source snippet and caret under the reported column.
    /// `source` should be the markup contents the location refers to.
    pub fn pretty_with_source(&self, source: &str) {
        println!("[{}] {}", self.severity, self.message);

        if let Some(loc) = &self.location {
            println!(" --> {}:{}:{}", loc.file, loc.line, loc.column);

            // extract line content (1-based lines)
            if let Some(line_str) = source.lines().nth(loc.line.saturating_sub(1)) {
                println!(" {:4} | {}", loc.line, line_str);
                let col = loc.column.saturating_sub(1);
                let mut caret_line = String::new();
                caret_line.push_str("      | ");
                caret_line.push_str(&" ".repeat(col));
                caret_line.push('^');
                println!("{}", caret_line);
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = if let Some(l) = &self.location {
            format!(" at {}:{}:{}", l.file, l.line, l.column)
        } else {
            "".to_string()
        };
        if let Some(code) = &self.code {
            write!(f, "[{}]{} ({}): {}", self.severity, loc, code, self.message)
        } else {
            write!(f, "[{}]{}: {}", self.severity, loc, self.message)
        }
    }
}

impl Error for Report {}

/// Collector that aggregates reports in the order they were recorded.
/// The collector is strictly append-only: callers snapshot `len()` before
/// invoking a strategy object and compare afterwards to learn whether the
/// callee reported anything, so reports are never deduplicated or removed.
///
/// # Examples
/// ```
/// use rigging_core::reports::{Report, ReportCollector, Severity};
/// let mut collector = ReportCollector::new();
/// collector.push(Report::error("an error", None, None));
/// assert_eq!(collector.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportCollector {
    pub reports: Vec<Report>,
}

impl ReportCollector {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    pub fn push(&mut self, r: Report) {
        self.reports.push(r);
    }

    pub fn extend(&mut self, others: impl IntoIterator<Item = Report>) {
        for r in others {
            self.push(r);
        }
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn has_fatal(&self) -> bool {
        self.reports.iter().any(|r| r.severity == Severity::Fatal)
    }

    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(|r| r.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.reports.iter().any(|r| r.severity == Severity::Warning)
    }

    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let mut f = 0;
        let mut e = 0;
        let mut w = 0;
        let mut i = 0;
        for r in &self.reports {
            match r.severity {
                Severity::Fatal => f += 1,
                Severity::Error => e += 1,
                Severity::Warning => w += 1,
                Severity::Info => i += 1,
            }
        }
        (f, e, w, i)
    }

    pub fn print_all_pretty(&self, source_map: &impl Fn(&str) -> Option<&str>) {
        for r in &self.reports {
            if let Some(loc) = &r.location {
                let source = source_map(&loc.file).unwrap_or("");
                r.pretty_with_source(source);
            } else {
                println!("{}", r);
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.reports)
    }

    pub fn to_lsp_array(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        // group by file
        for r in &self.reports {
            let file = r
                .location
                .as_ref()
                .map(|l| l.file.clone())
                .unwrap_or_else(|| "<unknown>".to_string());
            let entry = map.entry(file).or_insert_with(|| json!([]));
            if let serde_json::Value::Array(arr) = entry {
                arr.push(r.to_lsp_diagnostic());
            }
        }
        serde_json::Value::Object(map)
    }
}
