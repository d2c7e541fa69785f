//! JavaScript backend: interpreted via node.

use crate::runner::Backend;
use syntest_core::ArtifactSuffixes;

const TEMPLATE: &str = include_str!("../../templates/Test.js.tmpl");

#[derive(Debug, Default)]
pub struct JavaScriptBackend;

impl Backend for JavaScriptBackend {
    fn identifier(&self) -> &str {
        "javascript"
    }

    fn extension(&self) -> String {
        "js".to_string()
    }

    fn title(&self) -> String {
        "JavaScript".to_string()
    }

    fn runtime_tool_name(&self) -> Option<String> {
        Some("node".to_string())
    }

    fn suffixes(&self) -> ArtifactSuffixes {
        ArtifactSuffixes::without_base_classes()
    }

    fn scaffold_template(&self) -> &str {
        TEMPLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming() {
        let backend = JavaScriptBackend;
        assert_eq!(backend.identifier(), "javascript");
        assert_eq!(backend.extension(), "js");
        assert_eq!(backend.exec_file_name(), "Test.js");
        assert_eq!(backend.runtime_tool_name().as_deref(), Some("node"));
    }
}
