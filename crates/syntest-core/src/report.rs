//! Machine-readable summaries of a finished run.

use crate::artifact::GeneratedArtifact;
use crate::error::ToolError;
use crate::stage::Stage;
use crate::state::State;
use serde::{Deserialize, Serialize};

/// Flattened view of a terminal [`State`] for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Backend identifier the run targeted.
    pub backend: String,
    /// Stage the pipeline stopped at.
    pub stage: Stage,
    /// False when the terminal state (or any predecessor) failed.
    pub success: bool,
    /// Artifacts the backend enumerated for the run.
    pub artifacts: Vec<GeneratedArtifact>,
    /// Grammar-tool diagnostics, in emission order.
    pub tool_diagnostics: Vec<ToolError>,
    /// Description of the earliest failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    /// Captured stdout, when the run executed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Captured stderr, when the run executed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl Report {
    /// Builds a report from a terminal state.
    pub fn from_state(backend: impl Into<String>, state: &State) -> Self {
        let generated = state.generated();
        let executed = state.executed();
        Self {
            backend: backend.into(),
            stage: state.stage(),
            success: !state.contains_errors(),
            artifacts: generated.artifacts.clone(),
            tool_diagnostics: generated.error_queue.entries().to_vec(),
            failure: state.error_summary(),
            output: executed.map(|e| e.output.clone()),
            errors: executed.map(|e| e.errors.clone()),
        }
    }
}
