//! Built-in backends and the identifier → constructor registry.
//!
//! Each backend overrides only what differs from the [`Backend`] defaults:
//! `python` and `javascript` are interpreted and override naming plus the
//! runtime tool; `go` additionally overrides artifact splitting, one-time
//! runtime staging, and the compile step.
//!
//! [`Backend`]: crate::runner::Backend

mod go;
mod javascript;
mod python;
mod registry;

pub use go::GoBackend;
pub use javascript::JavaScriptBackend;
pub use python::PythonBackend;
pub use registry::{BackendFactory, BackendRegistry, RegistryError};
