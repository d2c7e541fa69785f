//! Process-wide derived paths for cached and staged runtimes.

use std::env;
use std::path::PathBuf;

/// Directory name under the system temp dir holding per-backend caches.
pub const CACHE_DIR_NAME: &str = "syntest-cache";

/// Environment variable overriding the runtime-sources root.
pub const RUNTIME_ROOT_ENV: &str = "SYNTEST_RUNTIME_ROOT";

/// Per-backend cache directory: `<system temp>/syntest-cache/<backend_id>`.
///
/// Pure function of the backend identifier; backends stage expensive
/// one-time setup output (e.g. a compiled runtime library) here.
pub fn cache_dir(backend_id: &str) -> PathBuf {
    env::temp_dir().join(CACHE_DIR_NAME).join(backend_id)
}

/// Root directory holding per-backend runtime sources.
///
/// Defaults to `runtimes/` under the current directory; override with
/// `SYNTEST_RUNTIME_ROOT`.
pub fn runtime_root() -> PathBuf {
    match env::var_os(RUNTIME_ROOT_ENV) {
        Some(root) => PathBuf::from(root),
        None => PathBuf::from("runtimes"),
    }
}

/// Per-backend runtime-sources directory: `<runtime root>/<backend_id>`.
pub fn runtime_dir(backend_id: &str) -> PathBuf {
    runtime_root().join(backend_id)
}
