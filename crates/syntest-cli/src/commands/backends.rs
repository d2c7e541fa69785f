//! Backends command implementation
//!
//! Lists the built-in backends and their readiness status.

use colored::Colorize;
use std::process::ExitCode;

use syntest_harness::backends::BackendRegistry;
use syntest_harness::{InitRegistry, InitStatus};

/// Run the backends command
pub fn run(json: bool) -> anyhow::Result<ExitCode> {
    let registry = BackendRegistry::with_builtins();
    let init = InitRegistry::global();

    if json {
        let names: Vec<&str> = registry.names();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(ExitCode::SUCCESS);
    }

    for name in registry.names() {
        let status = match init.status(name) {
            InitStatus::Pending => "not initialized".normal(),
            InitStatus::Ready => "ready".green(),
            InitStatus::Failed(cause) => format!("failed: {}", cause.message).red(),
        };
        println!("{:<12} {}", name.bold(), status);
    }

    Ok(ExitCode::SUCCESS)
}
