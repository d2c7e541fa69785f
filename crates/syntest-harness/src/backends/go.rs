//! Go backend: split artifact naming, staged runtime module, real compile.

use crate::paths;
use crate::runner::{Backend, RunContext};
use crate::{fs as harness_fs, scaffold::TemplateParams};
use std::fs;
use std::path::Path;
use syntest_core::{CompiledState, GeneratedState, RunOptions, StageError};

const TEMPLATE: &str = include_str!("../../templates/Test.go.tmpl");

/// Module path the generated driver imports the runtime under.
const RUNTIME_MODULE: &str = "github.com/antlr4-go/antlr/v4";

#[derive(Debug, Default)]
pub struct GoBackend;

impl GoBackend {
    /// `go.mod` for a run directory, pointing the runtime requirement at the
    /// staged cache copy.
    fn go_mod_source(cache_dir: &Path) -> String {
        format!(
            "module test\n\ngo 1.21\n\nrequire {module} v4.0.0\n\nreplace {module} => {path}\n",
            module = RUNTIME_MODULE,
            path = cache_dir.display(),
        )
    }
}

impl Backend for GoBackend {
    fn identifier(&self) -> &str {
        "go"
    }

    fn title(&self) -> String {
        "Go".to_string()
    }

    fn always_split_artifacts(&self) -> bool {
        true
    }

    fn map_grammar_name(&self, grammar_name: &str) -> String {
        grammar_name.to_lowercase()
    }

    fn runtime_tool_name(&self) -> Option<String> {
        // The built binary is executed directly.
        None
    }

    fn exec_file_name(&self) -> String {
        "./test".to_string()
    }

    fn start_rule_to_entry_point(&self, start_rule_name: &str) -> String {
        // Go recognizer methods are exported: rule `program` -> `Program()`.
        let mut chars = start_rule_name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    fn scaffold_template(&self) -> &str {
        TEMPLATE
    }

    fn extra_scaffold_params(&self, params: &mut TemplateParams) {
        params.set("runtimeModule", RUNTIME_MODULE);
    }

    /// Stages the runtime module sources into the per-backend cache.
    ///
    /// The copy lands in a staging directory first and is renamed into
    /// place, so a failed copy leaves no partial cache a later process
    /// could mistake for a completed one.
    fn initialize(&self) -> Result<(), StageError> {
        let cache = paths::cache_dir(self.identifier());
        if cache.exists() {
            return Ok(());
        }

        let source = paths::runtime_dir(self.identifier());
        if !source.exists() {
            return Err(StageError::new(format!(
                "go runtime sources not found at {} (set {})",
                source.display(),
                paths::RUNTIME_ROOT_ENV,
            )));
        }

        stage_runtime(&source, &cache)
    }

    fn compile(
        &self,
        _options: &RunOptions,
        generated: GeneratedState,
        ctx: &RunContext<'_>,
    ) -> CompiledState {
        let go_mod = Self::go_mod_source(&paths::cache_dir(self.identifier()));
        if let Err(e) = harness_fs::write_file(ctx.temp_dir, "go.mod", &go_mod) {
            return CompiledState::new(generated, Some(e.into()));
        }

        let args = vec![
            "go".to_string(),
            "build".to_string(),
            "-o".to_string(),
            "test".to_string(),
            ".".to_string(),
        ];
        let mut env = self.exec_environment();
        env.insert("GOWORK".to_string(), "off".to_string());

        match ctx.runner.run(&args, ctx.temp_dir, &env) {
            Ok(result) if result.success => CompiledState::new(generated, None),
            Ok(result) => CompiledState::new(
                generated,
                Some(StageError::new(format!(
                    "go build exited with status {}: {}",
                    result.exit_code,
                    result.errors.trim()
                ))),
            ),
            Err(e) => CompiledState::new(generated, Some(StageError::new(e.to_string()))),
        }
    }
}

/// Copies `source` into `cache` via a process-unique staging directory and
/// an atomic rename.
///
/// Two processes can race to populate the same cache; the loser's rename
/// fails against the winner's directory, so a rename failure with the cache
/// present is success, not an error to memoize.
fn stage_runtime(source: &Path, cache: &Path) -> Result<(), StageError> {
    let staging = cache.with_extension(format!("staging-{}", std::process::id()));
    let staged = harness_fs::copy_directory(source, &staging)
        .and_then(|_| fs::rename(&staging, cache));
    if let Err(e) = staged {
        let _ = fs::remove_dir_all(&staging);
        if cache.exists() {
            return Ok(());
        }
        return Err(StageError::new(format!(
            "failed to stage go runtime into {}: {}",
            cache.display(),
            e
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lowercased_artifacts() {
        let options = RunOptions::builder("Expr", "grammar Expr;")
            .lexer_name("ExprLexer")
            .parser_name("ExprParser")
            .use_listener(true)
            .build();

        let names: Vec<String> = GoBackend
            .generated_artifacts(&options)
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "exprLexer.go",
                "exprParser.go",
                "exprListener.go",
                "exprBaseListener.go",
            ]
        );
    }

    #[test]
    fn test_start_rule_is_exported() {
        assert_eq!(GoBackend.start_rule_to_entry_point("program"), "Program");
        assert_eq!(GoBackend.start_rule_to_entry_point(""), "");
    }

    #[test]
    fn test_binary_executed_directly() {
        assert_eq!(GoBackend.runtime_tool_name(), None);
        assert_eq!(GoBackend.exec_file_name(), "./test");
    }

    #[test]
    fn test_go_mod_points_at_cache() {
        let go_mod = GoBackend::go_mod_source(Path::new("/tmp/syntest-cache/go"));
        assert!(go_mod.starts_with("module test\n"));
        assert!(go_mod.contains("replace github.com/antlr4-go/antlr/v4 => /tmp/syntest-cache/go"));
    }

    #[test]
    fn test_stage_runtime_copies_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("runtime");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("antlr.go"), "package antlr\n").unwrap();
        let cache = tmp.path().join("cache").join("go");
        std::fs::create_dir_all(cache.parent().unwrap()).unwrap();

        stage_runtime(&source, &cache).unwrap();

        assert_eq!(
            std::fs::read_to_string(cache.join("antlr.go")).unwrap(),
            "package antlr\n"
        );
    }

    #[test]
    fn test_stage_runtime_losing_a_race_is_not_a_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("runtime");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("antlr.go"), "package antlr\n").unwrap();

        // Another process already staged a populated cache; the rename onto
        // a non-empty directory fails, but the cache is valid.
        let cache = tmp.path().join("cache").join("go");
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(cache.join("antlr.go"), "package antlr\n").unwrap();

        stage_runtime(&source, &cache).unwrap();
        assert!(cache.join("antlr.go").exists());
    }

    #[test]
    fn test_initialize_fails_without_runtime_sources() {
        // Point the runtime root at a directory that cannot exist; the
        // failure must name the override variable.
        std::env::set_var(paths::RUNTIME_ROOT_ENV, "/nonexistent/syntest-runtimes");
        let cache = paths::cache_dir("go");
        if cache.exists() {
            std::env::remove_var(paths::RUNTIME_ROOT_ENV);
            return; // another process already staged the cache; nothing to assert
        }

        let err = GoBackend.initialize().unwrap_err();
        std::env::remove_var(paths::RUNTIME_ROOT_ENV);
        assert!(err.message.contains("runtime sources not found"));
        assert!(err.message.contains(paths::RUNTIME_ROOT_ENV));
    }
}
