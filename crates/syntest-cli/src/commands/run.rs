//! Run command implementation
//!
//! Drives the full pipeline for one grammar against one backend and prints
//! the resulting report.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use syntest_core::{Report, RunOptions, Stage, State};
use syntest_harness::backends::BackendRegistry;
use syntest_harness::Harness;

use crate::grammar;

/// Everything the run command needs, collected from the CLI flags.
pub struct RunArgs {
    pub grammar: String,
    pub backend: String,
    pub start_rule: Option<String>,
    pub input: Option<String>,
    pub listener: bool,
    pub visitor: bool,
    pub super_class: Option<String>,
    pub diagnostics: bool,
    pub profile: bool,
    pub show_dfa: bool,
    pub end_stage: String,
    pub keep_temp_dir: bool,
    pub json: bool,
}

/// Run the run command
///
/// # Returns
/// Exit code: 0 when the run reached its end stage cleanly, 1 otherwise
pub fn run(args: &RunArgs) -> Result<ExitCode> {
    let grammar_path = Path::new(&args.grammar);
    let grammar_str = std::fs::read_to_string(grammar_path)
        .with_context(|| format!("failed to read grammar file: {}", grammar_path.display()))?;

    let header = grammar::parse_header(&grammar_str)
        .with_context(|| format!("invalid grammar file: {}", grammar_path.display()))?;

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path))?,
        None => String::new(),
    };

    let end_stage = args
        .end_stage
        .parse::<Stage>()
        .map_err(|e| anyhow!(e))?;

    let options = build_options(&header, &grammar_str, grammar_path, &input, end_stage, args);

    let registry = BackendRegistry::with_builtins();
    let backend = registry.create(&args.backend).map_err(|e| anyhow!(e))?;

    let mut harness = Harness::new(Arc::clone(&backend));
    harness.keep_temp_dir(args.keep_temp_dir);
    if args.keep_temp_dir && !args.json {
        eprintln!(
            "{} keeping test directory: {}",
            "note:".cyan().bold(),
            harness.temp_dir().display()
        );
    }

    let state = harness.run(&options);
    let report = Report::from_state(backend.identifier(), &state);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &state);
    }

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn build_options(
    header: &grammar::GrammarHeader,
    grammar_str: &str,
    grammar_path: &Path,
    input: &str,
    end_stage: Stage,
    args: &RunArgs,
) -> RunOptions {
    let mut builder = RunOptions::builder(&header.name, grammar_str)
        .input(input)
        .use_listener(args.listener)
        .use_visitor(args.visitor)
        .show_diagnostic_errors(args.diagnostics)
        .profile(args.profile)
        .show_dfa(args.show_dfa)
        .end_stage(end_stage);

    if let Some(file_name) = grammar_path.file_name().and_then(|n| n.to_str()) {
        builder = builder.grammar_file_name(file_name);
    }
    if let Some(lexer) = header.lexer_name() {
        builder = builder.lexer_name(lexer);
    }
    if let Some(parser) = header.parser_name() {
        builder = builder.parser_name(parser);
    }
    if let Some(rule) = &args.start_rule {
        builder = builder.start_rule(rule);
    }
    if let Some(super_class) = &args.super_class {
        builder = builder.super_class(super_class);
    }

    builder.build()
}

fn print_report(report: &Report, state: &State) {
    let status = if report.success {
        "ok".green().bold()
    } else {
        "failed".red().bold()
    };
    println!(
        "{} {} (stopped after {})",
        status, report.backend, report.stage
    );

    for diagnostic in &report.tool_diagnostics {
        eprintln!("  {}", diagnostic.to_string().yellow());
    }
    if let Some(failure) = &report.failure {
        eprintln!("  {} {}", "error:".red().bold(), failure);
    }

    if let Some(executed) = state.executed() {
        if !executed.output.is_empty() {
            print!("{}", executed.output);
        }
        if !executed.errors.is_empty() {
            eprint!("{}", executed.errors);
        }
    }
}
