//! Syntest Core Types
//!
//! This crate provides the shared data model for the syntest grammar
//! test-execution harness: immutable run descriptors, pipeline stages,
//! generated-artifact naming, the stage-result state chain, and run reports.
//!
//! # Overview
//!
//! A run is described once by [`RunOptions`] and driven through three
//! stages — generate, compile, execute. Each stage produces an immutable
//! result that wraps its predecessor, so the terminal [`State`] returned to
//! the caller is the full audit trail of the run.
//!
//! # Example
//!
//! ```
//! use syntest_core::{RunOptions, Stage};
//!
//! let options = RunOptions::builder("Expr", "grammar Expr;\nprogram: 'x';")
//!     .lexer_name("ExprLexer")
//!     .parser_name("ExprParser")
//!     .start_rule("program")
//!     .input("x")
//!     .use_listener(true)
//!     .end_stage(Stage::Compile)
//!     .build();
//!
//! assert_eq!(options.grammar_file_name, "Expr.g4");
//! ```
//!
//! # Modules
//!
//! - [`artifact`]: Generated file descriptors and suffix conventions
//! - [`error`]: Tool diagnostics and captured stage failures
//! - [`options`]: Run descriptor and builder
//! - [`report`]: Flattened run summaries for JSON output
//! - [`stage`]: Pipeline stage enum
//! - [`state`]: The immutable Generated/Compiled/Executed state chain

pub mod artifact;
pub mod error;
pub mod options;
pub mod report;
pub mod stage;
pub mod state;

// Re-export commonly used types at the crate root
pub use artifact::{ArtifactSuffixes, GeneratedArtifact};
pub use error::{ErrorQueue, Severity, StageError, ToolError};
pub use options::{RunOptions, RunOptionsBuilder};
pub use report::Report;
pub use stage::Stage;
pub use state::{CompiledState, ExecutedState, GeneratedState, State};
