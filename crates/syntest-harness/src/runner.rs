//! The per-backend capability contract.
//!
//! A backend parameterizes file naming, artifact enumeration, driver
//! scaffolding, compilation, and execution without touching the pipeline
//! itself. Most operations have default bodies; a minimal interpreted
//! backend overrides nothing beyond [`Backend::identifier`] and
//! [`Backend::scaffold_template`].

use crate::process::ProcessRunner;
use crate::scaffold::TemplateParams;
use std::collections::HashMap;
use std::path::Path;
use syntest_core::{
    ArtifactSuffixes, CompiledState, ExecutedState, GeneratedArtifact, GeneratedState, RunOptions,
    StageError,
};

/// Per-run context handed to the compile and execute steps: the temp
/// directory the run owns and the process runner to spawn tools with.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    pub temp_dir: &'a Path,
    pub runner: &'a ProcessRunner,
}

/// Capability set a backend implements.
///
/// Backends are stateless and shared across concurrent runs; anything
/// run-specific arrives through [`RunOptions`] or [`RunContext`].
pub trait Backend: Send + Sync {
    /// Unique backend key, used for cache lookup and path derivation.
    fn identifier(&self) -> &str;

    /// Template for the `Test.<ext>` driver file, rendered with the
    /// standard scaffold parameters.
    fn scaffold_template(&self) -> &str;

    /// Source-file extension, without the dot.
    fn extension(&self) -> String {
        self.identifier().to_lowercase()
    }

    /// Display name used in synthesized error messages.
    fn title(&self) -> String {
        self.identifier().to_string()
    }

    /// Base name of the driver file.
    fn test_file_name(&self) -> String {
        "Test".to_string()
    }

    /// Driver file name with the backend extension.
    fn test_file_with_ext(&self) -> String {
        format!("{}.{}", self.test_file_name(), self.extension())
    }

    /// File (or binary) name handed to the runtime tool for execution.
    fn exec_file_name(&self) -> String {
        self.test_file_with_ext()
    }

    /// Artifact-name suffixes for this backend.
    fn suffixes(&self) -> ArtifactSuffixes {
        ArtifactSuffixes::default()
    }

    /// Maps a grammar name to the file-name stem the tool generates.
    fn map_grammar_name(&self, grammar_name: &str) -> String {
        grammar_name.to_string()
    }

    /// True when the backend generates split lexer/parser files even for a
    /// grammar that only declares one of them.
    fn always_split_artifacts(&self) -> bool {
        false
    }

    /// Interpreter or launcher executable; `None` when the exec file is run
    /// directly (compiled backends producing a binary).
    fn runtime_tool_name(&self) -> Option<String> {
        Some(self.identifier().to_lowercase())
    }

    /// Extra arguments inserted between the tool and the exec file.
    fn extra_run_args(&self) -> Vec<String> {
        Vec::new()
    }

    /// Environment overrides for the executed program.
    fn exec_environment(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Maps a grammar parse-rule name to the driver's entry-point name
    /// (e.g. case folding for backends that capitalize rule methods).
    fn start_rule_to_entry_point(&self, start_rule_name: &str) -> String {
        start_rule_name.to_string()
    }

    /// Extension point for backend-specific template parameters.
    fn extra_scaffold_params(&self, _params: &mut TemplateParams) {}

    /// One-time expensive setup (e.g. staging a runtime library).
    ///
    /// Runs at most once per process via the initialization cache. Must be
    /// side-effect-free on failure: a later process must not mistake a
    /// partial setup for a completed one.
    fn initialize(&self) -> Result<(), StageError> {
        Ok(())
    }

    /// Enumerates the artifacts generation is expected to produce for
    /// `options`, in order. Pure function of the options.
    ///
    /// A combined grammar (both lexer and parser names present) or an
    /// always-split backend appends the lexer/parser suffixes; otherwise the
    /// bare grammar file name serves as the recognizer artifact.
    /// Listener/visitor artifacts are appended only when requested, each
    /// followed by its base-class artifact if the backend declares one.
    fn generated_artifacts(&self, options: &RunOptions) -> Vec<GeneratedArtifact> {
        let mut artifacts = Vec::new();
        let ext = format!(".{}", self.extension());
        let stem = self.map_grammar_name(&options.grammar_name);
        let suffixes = self.suffixes();
        let split = (options.lexer_name.is_some() && options.parser_name.is_some())
            || self.always_split_artifacts();

        if options.lexer_name.is_some() {
            let suffix = if split { suffixes.lexer.as_str() } else { "" };
            artifacts.push(GeneratedArtifact::new(
                format!("{}{}{}", stem, suffix, ext),
                false,
            ));
        }
        if options.parser_name.is_some() {
            let suffix = if split { suffixes.parser.as_str() } else { "" };
            artifacts.push(GeneratedArtifact::new(
                format!("{}{}{}", stem, suffix, ext),
                true,
            ));
            if options.use_listener {
                artifacts.push(GeneratedArtifact::new(
                    format!("{}{}{}", stem, suffixes.listener, ext),
                    true,
                ));
                if let Some(base) = &suffixes.base_listener {
                    artifacts.push(GeneratedArtifact::new(
                        format!("{}{}{}", stem, base, ext),
                        true,
                    ));
                }
            }
            if options.use_visitor {
                artifacts.push(GeneratedArtifact::new(
                    format!("{}{}{}", stem, suffixes.visitor, ext),
                    true,
                ));
                if let Some(base) = &suffixes.base_visitor {
                    artifacts.push(GeneratedArtifact::new(
                        format!("{}{}{}", stem, base, ext),
                        true,
                    ));
                }
            }
        }
        artifacts
    }

    /// Compiles the generated artifacts. The default is a pass-through for
    /// interpreted backends.
    fn compile(
        &self,
        _options: &RunOptions,
        generated: GeneratedState,
        _ctx: &RunContext<'_>,
    ) -> CompiledState {
        CompiledState::passthrough(generated)
    }

    /// Executes the compiled program against the run's `input` file.
    ///
    /// The default invocation is `[tool, extra args.., exec file, "input"]`
    /// in the run's temp directory with the backend's environment; captured
    /// stdout/stderr or the spawn failure land in the returned state.
    fn execute(
        &self,
        _options: &RunOptions,
        compiled: CompiledState,
        ctx: &RunContext<'_>,
    ) -> ExecutedState {
        let mut args = Vec::new();
        if let Some(tool) = self.runtime_tool_name() {
            args.push(tool);
        }
        args.extend(self.extra_run_args());
        args.push(self.exec_file_name());
        args.push("input".to_string());

        match ctx.runner.run(&args, ctx.temp_dir, &self.exec_environment()) {
            Ok(result) => ExecutedState::new(compiled, result.output, result.errors, None),
            Err(e) => ExecutedState::new(
                compiled,
                String::new(),
                String::new(),
                Some(StageError::new(e.to_string())),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Minimal backend: extension "x", no base listener/visitor files.
    struct XBackend;

    impl Backend for XBackend {
        fn identifier(&self) -> &str {
            "X"
        }

        fn scaffold_template(&self) -> &str {
            ""
        }

        fn suffixes(&self) -> ArtifactSuffixes {
            ArtifactSuffixes::without_base_classes()
        }
    }

    fn names(artifacts: &[GeneratedArtifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_combined_grammar_with_listener() {
        let options = RunOptions::builder("G", "grammar G;")
            .lexer_name("GLexer")
            .parser_name("GParser")
            .use_listener(true)
            .build();

        let artifacts = XBackend.generated_artifacts(&options);
        assert_eq!(names(&artifacts), vec!["GLexer.x", "GParser.x", "GListener.x"]);
        assert!(!artifacts[0].is_parser);
        assert!(artifacts[1].is_parser);
        assert!(artifacts[2].is_parser);
    }

    #[test]
    fn test_lexer_only_grammar_uses_bare_name() {
        let options = RunOptions::builder("L", "lexer grammar L;")
            .lexer_name("L")
            .build();

        let artifacts = XBackend.generated_artifacts(&options);
        assert_eq!(names(&artifacts), vec!["L.x"]);
        assert!(!artifacts[0].is_parser);
    }

    #[test]
    fn test_parser_only_grammar_uses_bare_name() {
        let options = RunOptions::builder("P", "parser grammar P;")
            .parser_name("P")
            .build();

        let artifacts = XBackend.generated_artifacts(&options);
        assert_eq!(names(&artifacts), vec!["P.x"]);
    }

    #[test]
    fn test_base_class_artifacts_follow_their_owner() {
        struct DefaultSuffixBackend;
        impl Backend for DefaultSuffixBackend {
            fn identifier(&self) -> &str {
                "Y"
            }
            fn scaffold_template(&self) -> &str {
                ""
            }
        }

        let options = RunOptions::builder("G", "grammar G;")
            .lexer_name("GLexer")
            .parser_name("GParser")
            .use_listener(true)
            .use_visitor(true)
            .build();

        let artifacts = DefaultSuffixBackend.generated_artifacts(&options);
        assert_eq!(
            names(&artifacts),
            vec![
                "GLexer.y",
                "GParser.y",
                "GListener.y",
                "GBaseListener.y",
                "GVisitor.y",
                "GBaseVisitor.y",
            ]
        );
    }

    #[test]
    fn test_always_split_backend_suffixes_single_lexer() {
        struct SplitBackend;
        impl Backend for SplitBackend {
            fn identifier(&self) -> &str {
                "Z"
            }
            fn scaffold_template(&self) -> &str {
                ""
            }
            fn always_split_artifacts(&self) -> bool {
                true
            }
            fn map_grammar_name(&self, grammar_name: &str) -> String {
                grammar_name.to_lowercase()
            }
        }

        let options = RunOptions::builder("L", "lexer grammar L;")
            .lexer_name("L")
            .build();

        let artifacts = SplitBackend.generated_artifacts(&options);
        assert_eq!(names(&artifacts), vec!["lLexer.z"]);
    }

    #[test]
    fn test_listener_without_parser_enumerates_nothing() {
        // A lexer-only grammar with use_listener set: listener artifacts
        // hang off the parser, so none are enumerated.
        let options = RunOptions::builder("L", "lexer grammar L;")
            .lexer_name("L")
            .use_listener(true)
            .build();

        let artifacts = XBackend.generated_artifacts(&options);
        assert_eq!(names(&artifacts), vec!["L.x"]);
    }

    #[test]
    fn test_default_naming_conventions() {
        let backend = XBackend;
        assert_eq!(backend.extension(), "x");
        assert_eq!(backend.test_file_with_ext(), "Test.x");
        assert_eq!(backend.exec_file_name(), "Test.x");
        assert_eq!(backend.runtime_tool_name().as_deref(), Some("x"));
        assert_eq!(backend.map_grammar_name("Expr"), "Expr");
        assert_eq!(backend.start_rule_to_entry_point("program"), "program");
    }
}
