//! Tool diagnostics and captured stage failures.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Severity of a grammar-tool diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic emitted by the grammar tool during generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub severity: Severity,
    /// Tool-defined diagnostic code, when the tool reports one.
    pub code: Option<u32>,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl ToolError {
    /// Creates an error diagnostic without a tool code or position.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            line: 0,
            column: 0,
            message: message.into(),
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "{}({}): {}:{}: {}",
                self.severity, code, self.line, self.column, self.message
            ),
            None => write!(
                f,
                "{}: {}:{}: {}",
                self.severity, self.line, self.column, self.message
            ),
        }
    }
}

/// Ordered collection of diagnostics from one grammar-tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorQueue {
    entries: Vec<ToolError>,
}

impl ErrorQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic, preserving emission order.
    pub fn push(&mut self, entry: ToolError) {
        self.entries.push(entry);
    }

    /// Returns true if any entry has error severity.
    pub fn contains_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.severity == Severity::Error)
    }

    /// All diagnostics in emission order.
    pub fn entries(&self) -> &[ToolError] {
        &self.entries
    }

    /// Error-severity diagnostics in emission order.
    pub fn errors(&self) -> impl Iterator<Item = &ToolError> {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for ErrorQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// A captured failure attached to a pipeline state.
///
/// Failures are stored as messages rather than source errors so that the
/// state chain stays cloneable and serializable for run reports.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct StageError {
    pub message: String,
}

impl StageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StageError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}
