//! The staged pipeline orchestrator.
//!
//! `Harness::run` drives generate → compile → execute for one backend,
//! threading the immutable state chain through the stages and stopping at
//! the first error or at the caller's requested end stage. Guards are
//! evaluated after state construction, so callers always receive a typed,
//! inspectable terminal state — never a bare error.

use crate::fs;
use crate::generate::{CommandGrammarTool, GenerateRequest, GrammarTool};
use crate::init::InitRegistry;
use crate::process::ProcessRunner;
use crate::runner::{Backend, RunContext};
use crate::scaffold;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use syntest_core::{CompiledState, ExecutedState, GeneratedState, RunOptions, Stage, StageError, State};

/// File name the run's input text is written under.
pub const INPUT_FILE_NAME: &str = "input";

/// Drives the three-stage pipeline for one backend.
///
/// Each harness owns its temp test directory exclusively; concurrent runs
/// use distinct harness instances. The directory is removed when the
/// harness is dropped unless [`Harness::keep_temp_dir`] was set.
pub struct Harness {
    backend: Arc<dyn Backend>,
    tool: Box<dyn GrammarTool>,
    runner: ProcessRunner,
    registry: Arc<InitRegistry>,
    temp_dir: PathBuf,
    keep_temp_dir: bool,
}

impl Harness {
    /// Creates a harness with a derived temp directory, the command grammar
    /// tool, and the process-wide initialization registry.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let temp_dir = derive_temp_dir(backend.identifier());
        Self::with_temp_dir(backend, temp_dir)
    }

    /// Creates a harness owning the given temp directory.
    pub fn with_temp_dir(backend: Arc<dyn Backend>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            tool: Box::new(CommandGrammarTool::new()),
            runner: ProcessRunner::new(),
            registry: InitRegistry::global(),
            temp_dir: temp_dir.into(),
            keep_temp_dir: false,
        }
    }

    /// Preserves the temp directory on disposal for post-mortem inspection.
    pub fn keep_temp_dir(&mut self, keep: bool) {
        self.keep_temp_dir = keep;
    }

    /// Substitutes the grammar-tool collaborator (tests use a double).
    pub fn set_grammar_tool(&mut self, tool: Box<dyn GrammarTool>) {
        self.tool = tool;
    }

    /// Substitutes the initialization registry (tests use a fresh one so
    /// memoized failures don't leak between cases).
    pub fn set_init_registry(&mut self, registry: Arc<InitRegistry>) {
        self.registry = registry;
    }

    /// Substitutes the process runner (e.g. to shorten timeouts).
    pub fn set_process_runner(&mut self, runner: ProcessRunner) {
        self.runner = runner;
    }

    /// The temp test directory this harness owns.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Runs the pipeline for `options`, returning the terminal state.
    pub fn run(&self, options: &RunOptions) -> State {
        let mut tool_options = Vec::new();
        if options.use_visitor {
            tool_options.push("-visitor".to_string());
        }
        if let Some(super_class) = options.super_class.as_deref() {
            if !super_class.is_empty() {
                tool_options.push(format!("-DsuperClass={}", super_class));
            }
        }

        let error_queue = self.tool.generate(&GenerateRequest {
            work_dir: &self.temp_dir,
            backend_id: self.backend.identifier(),
            grammar_file_name: &options.grammar_file_name,
            grammar_str: &options.grammar_str,
            options: &tool_options,
        });

        let artifacts = self.backend.generated_artifacts(options);
        let generated = GeneratedState::new(error_queue, artifacts, None);

        if generated.contains_errors() || options.end_stage == Stage::Generate {
            return State::Generated(generated);
        }

        let backend = Arc::clone(&self.backend);
        if !self
            .registry
            .ensure_initialized(self.backend.identifier(), || backend.initialize())
        {
            // Do not repeat a failed runtime initialization.
            return State::Compiled(CompiledState::new(
                generated,
                Some(StageError::new(format!(
                    "{} runtime is not initialized",
                    self.backend.title()
                ))),
            ));
        }

        if let Err(e) = self.write_scaffold(options) {
            return State::Compiled(CompiledState::new(generated, Some(e.into())));
        }

        let ctx = RunContext {
            temp_dir: &self.temp_dir,
            runner: &self.runner,
        };

        let compiled = self.backend.compile(options, generated, &ctx);

        if compiled.contains_errors() || options.end_stage == Stage::Compile {
            return State::Compiled(compiled);
        }

        if let Err(e) = fs::write_file(&self.temp_dir, INPUT_FILE_NAME, &options.input) {
            return State::Executed(ExecutedState::new(
                compiled,
                String::new(),
                String::new(),
                Some(e.into()),
            ));
        }

        State::Executed(self.backend.execute(options, compiled, &ctx))
    }

    /// Renders the backend's driver template and writes it into the temp
    /// directory as `Test.<ext>`.
    fn write_scaffold(&self, options: &RunOptions) -> io::Result<()> {
        let entry_point = self
            .backend
            .start_rule_to_entry_point(&options.start_rule_name);
        let mut params = scaffold::scaffold_params(options, &entry_point);
        self.backend.extra_scaffold_params(&mut params);
        let rendered = scaffold::render(self.backend.scaffold_template(), &params);
        fs::write_file(&self.temp_dir, &self.backend.test_file_with_ext(), &rendered)
    }

    /// Removes the temp directory (unless preserved) and consumes the
    /// harness, surfacing removal failures that `Drop` would swallow.
    pub fn close(mut self) -> io::Result<()> {
        self.remove_temp_dir()
    }

    fn remove_temp_dir(&mut self) -> io::Result<()> {
        if self.keep_temp_dir {
            return Ok(());
        }
        self.keep_temp_dir = true; // do not remove twice from Drop
        if self.temp_dir.exists() {
            std::fs::remove_dir_all(&self.temp_dir)?;
        }
        Ok(())
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = self.remove_temp_dir();
    }
}

/// Derives a unique temp test directory path for one harness instance:
/// `<system temp>/syntest-<backend>-<pid>-<nanos>`.
fn derive_temp_dir(backend_id: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!(
        "syntest-{}-{}-{}",
        backend_id,
        std::process::id(),
        nanos
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_temp_dirs_are_unique() {
        let a = derive_temp_dir("python");
        let b = derive_temp_dir("python");
        assert_ne!(a, b);
        assert!(a.starts_with(std::env::temp_dir()));
    }

    #[test]
    fn test_close_reports_success_for_missing_dir() {
        struct NullBackend;
        impl Backend for NullBackend {
            fn identifier(&self) -> &str {
                "null"
            }
            fn scaffold_template(&self) -> &str {
                ""
            }
        }

        // Never written into, so nothing exists to remove.
        let harness = Harness::new(Arc::new(NullBackend));
        harness.close().unwrap();
    }
}
