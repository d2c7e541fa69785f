//! Registry mapping backend identifiers to constructors.

use crate::runner::Backend;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Constructor for one backend.
pub type BackendFactory = fn() -> Arc<dyn Backend>;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("backend already registered: {0}")]
    AlreadyRegistered(String),

    #[error("unknown backend '{id}' (available: {available})")]
    UnknownBackend { id: String, available: String },
}

/// Backend identifier → constructor table.
///
/// Keys are ordered so listings and error messages are deterministic.
#[derive(Debug, Default)]
pub struct BackendRegistry {
    factories: BTreeMap<String, BackendFactory>,
}

impl BackendRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in backends registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register("go", || Arc::new(super::GoBackend))
            .expect("empty registry accepts builtin");
        registry
            .register("javascript", || Arc::new(super::JavaScriptBackend))
            .expect("empty registry accepts builtin");
        registry
            .register("python", || Arc::new(super::PythonBackend))
            .expect("empty registry accepts builtin");
        registry
    }

    /// Registers a backend constructor under `id`.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        factory: BackendFactory,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.factories.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        self.factories.insert(id, factory);
        Ok(())
    }

    /// Constructs the backend registered under `id`.
    pub fn create(&self, id: &str) -> Result<Arc<dyn Backend>, RegistryError> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::UnknownBackend {
                id: id.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered identifiers in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
