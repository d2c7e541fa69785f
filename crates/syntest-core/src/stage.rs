//! Pipeline stage checkpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A checkpoint in the generate/compile/execute pipeline.
///
/// Stages are ordered by pipeline position: a run requested with
/// `end_stage = Stage::Compile` stops after compilation even when it
/// could have executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Generate recognizer artifacts from the grammar.
    Generate,
    /// Compile the generated artifacts (a no-op for interpreted backends).
    Compile,
    /// Execute the compiled program against the run's input.
    Execute,
}

impl Stage {
    /// Returns the lowercase string identifier for this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Generate => "generate",
            Stage::Compile => "compile",
            Stage::Execute => "execute",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generate" => Ok(Stage::Generate),
            "compile" => Ok(Stage::Compile),
            "execute" => Ok(Stage::Execute),
            other => Err(format!(
                "unknown stage '{}' (expected generate, compile, or execute)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_ordering() {
        assert!(Stage::Generate < Stage::Compile);
        assert!(Stage::Compile < Stage::Execute);
    }

    #[test]
    fn test_stage_from_str() {
        assert_eq!("generate".parse::<Stage>().unwrap(), Stage::Generate);
        assert_eq!("Compile".parse::<Stage>().unwrap(), Stage::Compile);
        assert_eq!("EXECUTE".parse::<Stage>().unwrap(), Stage::Execute);
        assert!("link".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_serde_roundtrip() {
        let json = serde_json::to_string(&Stage::Compile).unwrap();
        assert_eq!(json, "\"compile\"");
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stage::Compile);
    }
}
