//! Generated artifact descriptors and per-backend naming conventions.

use serde::{Deserialize, Serialize};

/// A single generated source file produced by the grammar tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// File name within the run's temp directory.
    pub name: String,
    /// True for the parser-side artifacts (parser, listener, visitor and
    /// their base classes); false only for a standalone lexer file.
    pub is_parser: bool,
}

impl GeneratedArtifact {
    /// Creates a new artifact descriptor.
    pub fn new(name: impl Into<String>, is_parser: bool) -> Self {
        Self {
            name: name.into(),
            is_parser,
        }
    }
}

/// File-name suffixes a backend appends to the grammar name.
///
/// The base-class suffixes are optional: a backend that folds the base
/// listener/visitor into the listener/visitor file returns `None` and no
/// separate base artifact is enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSuffixes {
    pub lexer: String,
    pub parser: String,
    pub listener: String,
    pub visitor: String,
    pub base_listener: Option<String>,
    pub base_visitor: Option<String>,
}

impl Default for ArtifactSuffixes {
    fn default() -> Self {
        Self {
            lexer: "Lexer".to_string(),
            parser: "Parser".to_string(),
            listener: "Listener".to_string(),
            visitor: "Visitor".to_string(),
            base_listener: Some("BaseListener".to_string()),
            base_visitor: Some("BaseVisitor".to_string()),
        }
    }
}

impl ArtifactSuffixes {
    /// Standard suffixes without separate base-class files.
    pub fn without_base_classes() -> Self {
        Self {
            base_listener: None,
            base_visitor: None,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_suffixes() {
        let suffixes = ArtifactSuffixes::default();
        assert_eq!(suffixes.lexer, "Lexer");
        assert_eq!(suffixes.parser, "Parser");
        assert_eq!(suffixes.base_listener.as_deref(), Some("BaseListener"));
        assert_eq!(suffixes.base_visitor.as_deref(), Some("BaseVisitor"));
    }

    #[test]
    fn test_without_base_classes() {
        let suffixes = ArtifactSuffixes::without_base_classes();
        assert_eq!(suffixes.listener, "Listener");
        assert_eq!(suffixes.base_listener, None);
        assert_eq!(suffixes.base_visitor, None);
    }
}
