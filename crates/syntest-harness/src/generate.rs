//! Grammar-tool collaborator boundary.
//!
//! The pipeline only consumes an [`ErrorQueue`]; how artifacts actually get
//! generated is behind the [`GrammarTool`] trait so tests can substitute a
//! double that writes canned files or fails on demand.

use crate::fs;
use crate::process::ProcessRunner;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use syntest_core::{ErrorQueue, Severity, ToolError};

/// Default grammar-tool executable name looked up on PATH.
pub const DEFAULT_TOOL_NAME: &str = "antlr4";

/// Environment variable overriding the grammar-tool executable.
pub const TOOL_PATH_ENV: &str = "SYNTEST_TOOL";

/// One generation request: everything the tool needs to produce artifacts
/// into the run's work directory.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    /// Directory the grammar is written into and artifacts land in.
    pub work_dir: &'a Path,
    /// Target backend identifier, passed to the tool's language option.
    pub backend_id: &'a str,
    /// File name the grammar source is written under.
    pub grammar_file_name: &'a str,
    /// Grammar source text.
    pub grammar_str: &'a str,
    /// Extra CLI-style options (e.g. `-visitor`, `-DsuperClass=Base`).
    pub options: &'a [String],
}

/// Invokes artifact generation and reports the tool's diagnostics.
pub trait GrammarTool: Send + Sync {
    /// Runs generation for `request`, returning the diagnostics the tool
    /// emitted. Infrastructure failures (tool missing, spawn error) are
    /// reported as error entries in the queue, never panics or raw errors.
    fn generate(&self, request: &GenerateRequest<'_>) -> ErrorQueue;
}

/// Runs the real grammar tool as a subprocess and parses its stderr.
#[derive(Debug, Clone, Default)]
pub struct CommandGrammarTool {
    tool_path: Option<PathBuf>,
    runner: ProcessRunner,
}

impl CommandGrammarTool {
    pub fn new() -> Self {
        Self {
            tool_path: None,
            runner: ProcessRunner::new(),
        }
    }

    /// Uses an explicit tool executable instead of PATH discovery.
    pub fn with_tool_path(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: Some(tool_path.into()),
            runner: ProcessRunner::new(),
        }
    }

    fn resolve_tool(&self) -> Result<PathBuf, ToolError> {
        if let Some(path) = &self.tool_path {
            return Ok(path.clone());
        }
        if let Some(path) = std::env::var_os(TOOL_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        which::which(DEFAULT_TOOL_NAME).map_err(|e| {
            ToolError::error(format!(
                "grammar tool '{}' not found: {} (set {} to override)",
                DEFAULT_TOOL_NAME, e, TOOL_PATH_ENV
            ))
        })
    }
}

impl GrammarTool for CommandGrammarTool {
    fn generate(&self, request: &GenerateRequest<'_>) -> ErrorQueue {
        let mut queue = ErrorQueue::new();

        let tool = match self.resolve_tool() {
            Ok(tool) => tool,
            Err(entry) => {
                queue.push(entry);
                return queue;
            }
        };

        if let Err(e) = fs::write_file(
            request.work_dir,
            request.grammar_file_name,
            request.grammar_str,
        ) {
            queue.push(ToolError::error(format!(
                "failed to write grammar file: {}",
                e
            )));
            return queue;
        }

        let mut args = vec![
            tool.to_string_lossy().into_owned(),
            format!("-Dlanguage={}", request.backend_id),
        ];
        args.extend(request.options.iter().cloned());
        args.push(request.grammar_file_name.to_string());

        match self.runner.run(&args, request.work_dir, &HashMap::new()) {
            Ok(result) => {
                parse_tool_output(&result.errors, &mut queue);
                if !result.success && !queue.contains_errors() {
                    queue.push(ToolError::error(format!(
                        "grammar tool exited with status {}: {}",
                        result.exit_code,
                        result.errors.trim()
                    )));
                }
            }
            Err(e) => {
                queue.push(ToolError::error(e.to_string()));
            }
        }

        queue
    }
}

/// Parses tool stderr lines of the form
/// `error(50): Expr.g4:2:10: message` into queue entries.
pub fn parse_tool_output(stderr: &str, queue: &mut ErrorQueue) {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    let re = LINE_RE.get_or_init(|| {
        Regex::new(r"^(error|warning)\((\d+)\):\s*(?:\S+:)?(\d+):(\d+):\s*(.*)$")
            .expect("diagnostic regex is valid")
    });

    for line in stderr.lines() {
        if let Some(caps) = re.captures(line.trim_end()) {
            let severity = if &caps[1] == "error" {
                Severity::Error
            } else {
                Severity::Warning
            };
            queue.push(ToolError {
                severity,
                code: caps[2].parse().ok(),
                line: caps[3].parse().unwrap_or(0),
                column: caps[4].parse().unwrap_or(0),
                message: caps[5].to_string(),
            });
        }
    }
}
