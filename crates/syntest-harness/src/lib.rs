//! Syntest Harness
//!
//! Pipeline orchestration for the syntest grammar test-execution harness:
//! a [`Harness`] drives generate → compile → execute for one backend,
//! stopping at the first failing stage or the caller's requested end stage
//! and returning the immutable state chain from `syntest-core`.
//!
//! # Overview
//!
//! - [`runner::Backend`] is the per-backend capability contract: naming
//!   conventions, artifact enumeration, driver scaffolding, compile, and
//!   execute, all with default bodies so a backend overrides only what
//!   differs.
//! - [`pipeline::Harness`] owns one run's temp directory and threads the
//!   state chain through the stages.
//! - [`init::InitRegistry`] memoizes each backend's one-time expensive
//!   setup, including failures, under concurrent first use.
//! - [`generate::GrammarTool`] and [`process::ProcessRunner`] are the
//!   collaborator boundaries for artifact generation and subprocesses.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use syntest_core::{RunOptions, Stage};
//! use syntest_harness::backends::PythonBackend;
//! use syntest_harness::Harness;
//!
//! let harness = Harness::new(Arc::new(PythonBackend));
//! let options = RunOptions::builder("Expr", "grammar Expr;\nprogram: 'x';")
//!     .lexer_name("ExprLexer")
//!     .parser_name("ExprParser")
//!     .start_rule("program")
//!     .input("x")
//!     .end_stage(Stage::Execute)
//!     .build();
//!
//! let state = harness.run(&options);
//! assert!(!state.contains_errors());
//! ```

pub mod backends;
pub mod fs;
pub mod generate;
pub mod init;
pub mod paths;
pub mod pipeline;
pub mod process;
pub mod runner;
pub mod scaffold;

// Re-export commonly used types at the crate root
pub use generate::{CommandGrammarTool, GenerateRequest, GrammarTool};
pub use init::{InitRegistry, InitStatus};
pub use pipeline::{Harness, INPUT_FILE_NAME};
pub use process::{ProcessError, ProcessOutput, ProcessRunner};
pub use runner::{Backend, RunContext};
pub use scaffold::TemplateParams;
