//! Syntest CLI - grammar test runs across language backends
//!
//! This binary generates recognizers from a grammar, compiles them with the
//! selected backend's toolchain, and executes a driver against an input
//! file, reporting the stage the run stopped at.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use syntest_cli::commands;
use syntest_cli::commands::run::RunArgs;

/// Syntest - multi-backend grammar test harness
#[derive(Parser)]
#[command(name = "syntest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, compile, and execute a grammar against an input
    Run {
        /// Path to the grammar file (.g4)
        #[arg(short, long)]
        grammar: String,

        /// Backend to run against (see `syntest backends`)
        #[arg(short, long)]
        backend: String,

        /// Parser rule to start from
        #[arg(short, long)]
        start_rule: Option<String>,

        /// Path to the input file fed to the recognizer
        #[arg(short, long)]
        input: Option<String>,

        /// Walk the parse tree with the generated listener
        #[arg(long)]
        listener: bool,

        /// Generate and use a visitor
        #[arg(long)]
        visitor: bool,

        /// Base class for the generated recognizer
        #[arg(long)]
        super_class: Option<String>,

        /// Report ambiguities and sensitivity issues during the parse
        #[arg(long)]
        diagnostics: bool,

        /// Collect parse profiling data
        #[arg(long)]
        profile: bool,

        /// Print DFA state during lexing
        #[arg(long)]
        show_dfa: bool,

        /// Stop after this stage (generate, compile, execute)
        #[arg(long, default_value = "execute", value_parser = ["generate", "compile", "execute"])]
        end_stage: String,

        /// Preserve the temp test directory for inspection
        #[arg(long)]
        keep_temp_dir: bool,

        /// Output a machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the built-in backends
    Backends {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            grammar,
            backend,
            start_rule,
            input,
            listener,
            visitor,
            super_class,
            diagnostics,
            profile,
            show_dfa,
            end_stage,
            keep_temp_dir,
            json,
        } => commands::run::run(&RunArgs {
            grammar,
            backend,
            start_rule,
            input,
            listener,
            visitor,
            super_class,
            diagnostics,
            profile,
            show_dfa,
            end_stage,
            keep_temp_dir,
            json,
        }),
        Commands::Backends { json } => commands::backends::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
