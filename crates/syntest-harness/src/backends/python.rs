//! Python backend: interpreted, no separate base listener/visitor files.

use crate::runner::Backend;
use syntest_core::ArtifactSuffixes;

const TEMPLATE: &str = include_str!("../../templates/Test.py.tmpl");

#[derive(Debug, Default)]
pub struct PythonBackend;

impl Backend for PythonBackend {
    fn identifier(&self) -> &str {
        "python"
    }

    fn extension(&self) -> String {
        "py".to_string()
    }

    fn title(&self) -> String {
        "Python".to_string()
    }

    fn runtime_tool_name(&self) -> Option<String> {
        Some("python3".to_string())
    }

    fn suffixes(&self) -> ArtifactSuffixes {
        // The generated listener/visitor files double as their own base
        // classes; no separate base file exists.
        ArtifactSuffixes::without_base_classes()
    }

    fn scaffold_template(&self) -> &str {
        TEMPLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syntest_core::RunOptions;

    #[test]
    fn test_naming() {
        let backend = PythonBackend;
        assert_eq!(backend.identifier(), "python");
        assert_eq!(backend.extension(), "py");
        assert_eq!(backend.test_file_with_ext(), "Test.py");
        assert_eq!(backend.runtime_tool_name().as_deref(), Some("python3"));
    }

    #[test]
    fn test_no_base_listener_artifact() {
        let options = RunOptions::builder("G", "grammar G;")
            .lexer_name("GLexer")
            .parser_name("GParser")
            .use_listener(true)
            .build();

        let names: Vec<String> = PythonBackend
            .generated_artifacts(&options)
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["GLexer.py", "GParser.py", "GListener.py"]);
    }

    #[test]
    fn test_template_mentions_runtime_imports() {
        assert!(PythonBackend.scaffold_template().contains("{lexerName}"));
        assert!(PythonBackend.scaffold_template().contains("antlr4"));
    }
}
