//! Immutable run descriptors.

use crate::stage::Stage;
use serde::{Deserialize, Serialize};

/// Input descriptor for one harness run.
///
/// Created once per test invocation via [`RunOptions::builder`] and never
/// mutated afterwards; the pipeline threads a reference through every stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Grammar identifier (e.g. "Expr").
    pub grammar_name: String,
    /// File name the grammar source is written under (e.g. "Expr.g4").
    pub grammar_file_name: String,
    /// Full grammar source text.
    pub grammar_str: String,
    /// Lexer recognizer name, when the grammar produces one.
    pub lexer_name: Option<String>,
    /// Parser recognizer name, when the grammar produces one.
    pub parser_name: Option<String>,
    /// Parser rule the driver starts from.
    pub start_rule_name: String,
    /// Text fed to the executed program.
    pub input: String,
    /// Generate and attach a parse-tree listener.
    pub use_listener: bool,
    /// Generate and attach a parse-tree visitor.
    pub use_visitor: bool,
    /// Recognizer superclass override passed to the grammar tool.
    pub super_class: Option<String>,
    /// Enable diagnostic error listeners in the driver.
    pub show_diagnostic_errors: bool,
    /// Enable parser profiling in the driver.
    pub profile: bool,
    /// Print DFA state from the driver.
    pub show_dfa: bool,
    /// Last stage the pipeline should run.
    pub end_stage: Stage,
}

impl RunOptions {
    /// Starts building run options for the given grammar.
    ///
    /// The grammar file name defaults to `<grammar_name>.g4`, the start rule
    /// to the empty string (lexer-only grammars have none), and the end stage
    /// to [`Stage::Execute`].
    pub fn builder(grammar_name: impl Into<String>, grammar_str: impl Into<String>) -> RunOptionsBuilder {
        let grammar_name = grammar_name.into();
        RunOptionsBuilder {
            options: RunOptions {
                grammar_file_name: format!("{}.g4", grammar_name),
                grammar_name,
                grammar_str: grammar_str.into(),
                lexer_name: None,
                parser_name: None,
                start_rule_name: String::new(),
                input: String::new(),
                use_listener: false,
                use_visitor: false,
                super_class: None,
                show_diagnostic_errors: false,
                profile: false,
                show_dfa: false,
                end_stage: Stage::Execute,
            },
        }
    }
}

/// Builder for [`RunOptions`].
#[derive(Debug, Clone)]
pub struct RunOptionsBuilder {
    options: RunOptions,
}

impl RunOptionsBuilder {
    pub fn grammar_file_name(mut self, name: impl Into<String>) -> Self {
        self.options.grammar_file_name = name.into();
        self
    }

    pub fn lexer_name(mut self, name: impl Into<String>) -> Self {
        self.options.lexer_name = Some(name.into());
        self
    }

    pub fn parser_name(mut self, name: impl Into<String>) -> Self {
        self.options.parser_name = Some(name.into());
        self
    }

    pub fn start_rule(mut self, name: impl Into<String>) -> Self {
        self.options.start_rule_name = name.into();
        self
    }

    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.options.input = input.into();
        self
    }

    pub fn use_listener(mut self, value: bool) -> Self {
        self.options.use_listener = value;
        self
    }

    pub fn use_visitor(mut self, value: bool) -> Self {
        self.options.use_visitor = value;
        self
    }

    pub fn super_class(mut self, name: impl Into<String>) -> Self {
        self.options.super_class = Some(name.into());
        self
    }

    pub fn show_diagnostic_errors(mut self, value: bool) -> Self {
        self.options.show_diagnostic_errors = value;
        self
    }

    pub fn profile(mut self, value: bool) -> Self {
        self.options.profile = value;
        self
    }

    pub fn show_dfa(mut self, value: bool) -> Self {
        self.options.show_dfa = value;
        self
    }

    pub fn end_stage(mut self, stage: Stage) -> Self {
        self.options.end_stage = stage;
        self
    }

    pub fn build(self) -> RunOptions {
        self.options
    }
}
