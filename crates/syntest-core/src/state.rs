//! The immutable state chain produced by a pipeline run.
//!
//! Each stage wraps its predecessor, so the value returned by the harness is
//! the full audit trail of the run: an [`ExecutedState`] owns the
//! [`CompiledState`] it was built from, which owns the [`GeneratedState`].
//! States are never mutated after construction; the "did anything fail"
//! query walks the chain.

use crate::artifact::GeneratedArtifact;
use crate::error::{ErrorQueue, StageError};
use crate::stage::Stage;
use serde::{Deserialize, Serialize};

/// Result of the Generate stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedState {
    /// Diagnostics collected from the grammar tool.
    pub error_queue: ErrorQueue,
    /// Artifacts the backend expects the tool to have produced, in order.
    pub artifacts: Vec<GeneratedArtifact>,
    /// Failure outside the tool's own diagnostics (e.g. tool spawn failure
    /// surfaced by a collaborator).
    pub error: Option<StageError>,
}

impl GeneratedState {
    pub fn new(
        error_queue: ErrorQueue,
        artifacts: Vec<GeneratedArtifact>,
        error: Option<StageError>,
    ) -> Self {
        Self {
            error_queue,
            artifacts,
            error,
        }
    }

    /// True if this stage failed.
    pub fn contains_errors(&self) -> bool {
        self.error.is_some() || self.error_queue.contains_errors()
    }
}

/// Result of the Compile stage, wrapping the generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledState {
    pub generated: GeneratedState,
    pub error: Option<StageError>,
}

impl CompiledState {
    pub fn new(generated: GeneratedState, error: Option<StageError>) -> Self {
        Self { generated, error }
    }

    /// The default compile step for backends with nothing to compile.
    pub fn passthrough(generated: GeneratedState) -> Self {
        Self {
            generated,
            error: None,
        }
    }

    /// True if this stage or any earlier stage failed.
    pub fn contains_errors(&self) -> bool {
        self.error.is_some() || self.generated.contains_errors()
    }
}

/// Result of the Execute stage, wrapping the compilation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedState {
    pub compiled: CompiledState,
    /// Captured stdout of the executed program.
    pub output: String,
    /// Captured stderr of the executed program.
    pub errors: String,
    pub error: Option<StageError>,
}

impl ExecutedState {
    pub fn new(
        compiled: CompiledState,
        output: String,
        errors: String,
        error: Option<StageError>,
    ) -> Self {
        Self {
            compiled,
            output,
            errors,
            error,
        }
    }

    /// True if this stage or any earlier stage failed.
    pub fn contains_errors(&self) -> bool {
        self.error.is_some() || self.compiled.contains_errors()
    }
}

/// Terminal state of a pipeline run.
///
/// The concrete variant tells the caller where the pipeline stopped; the
/// uniform queries below answer "did it fail" and "why" without matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum State {
    #[serde(rename = "generate")]
    Generated(GeneratedState),
    #[serde(rename = "compile")]
    Compiled(CompiledState),
    #[serde(rename = "execute")]
    Executed(ExecutedState),
}

impl State {
    /// The stage this state was produced by.
    pub fn stage(&self) -> Stage {
        match self {
            State::Generated(_) => Stage::Generate,
            State::Compiled(_) => Stage::Compile,
            State::Executed(_) => Stage::Execute,
        }
    }

    /// True if this state or any wrapped predecessor failed.
    pub fn contains_errors(&self) -> bool {
        match self {
            State::Generated(s) => s.contains_errors(),
            State::Compiled(s) => s.contains_errors(),
            State::Executed(s) => s.contains_errors(),
        }
    }

    /// Human-readable description of the earliest failure, if any.
    pub fn error_summary(&self) -> Option<String> {
        let generated = self.generated();
        if generated.error_queue.contains_errors() {
            return Some(generated.error_queue.to_string());
        }
        if let Some(err) = &generated.error {
            return Some(err.message.clone());
        }
        if let Some(compiled) = self.compiled() {
            if let Some(err) = &compiled.error {
                return Some(err.message.clone());
            }
        }
        if let State::Executed(executed) = self {
            if let Some(err) = &executed.error {
                return Some(err.message.clone());
            }
        }
        None
    }

    /// The generation result every state chain bottoms out in.
    pub fn generated(&self) -> &GeneratedState {
        match self {
            State::Generated(s) => s,
            State::Compiled(s) => &s.generated,
            State::Executed(s) => &s.compiled.generated,
        }
    }

    /// The compilation result, when the run got that far.
    pub fn compiled(&self) -> Option<&CompiledState> {
        match self {
            State::Generated(_) => None,
            State::Compiled(s) => Some(s),
            State::Executed(s) => Some(&s.compiled),
        }
    }

    /// The execution result, when the run completed.
    pub fn executed(&self) -> Option<&ExecutedState> {
        match self {
            State::Executed(s) => Some(s),
            _ => None,
        }
    }
}
