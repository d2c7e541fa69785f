//! Per-backend one-time initialization cache.
//!
//! Parallel test threads may hit the same backend's expensive setup (e.g.
//! staging a runtime library) at the same time. The registry guarantees the
//! setup closure runs at most once per backend per process, and that a
//! failure is remembered rather than retried on every subsequent run.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use syntest_core::StageError;

/// Terminal readiness of one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStatus {
    /// Initialization has not been attempted yet.
    Pending,
    /// Initialization completed successfully.
    Ready,
    /// Initialization failed with the recorded cause.
    Failed(StageError),
}

/// One backend's slot: a write-once terminal status plus the lock that
/// serializes same-backend initializers. Different backends never share a
/// slot, so their initializations proceed in parallel.
#[derive(Debug, Default)]
struct InitSlot {
    status: OnceLock<Result<(), StageError>>,
    lock: Mutex<()>,
}

/// Registry of per-backend initialization results.
///
/// Process-wide callers share [`InitRegistry::global`]; tests construct
/// their own registry so memoized failures don't leak between cases.
#[derive(Debug, Default)]
pub struct InitRegistry {
    slots: Mutex<HashMap<String, Arc<InitSlot>>>,
}

impl InitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide registry.
    pub fn global() -> Arc<InitRegistry> {
        static GLOBAL: OnceLock<Arc<InitRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(InitRegistry::new())).clone()
    }

    /// Ensures `init` has run for `backend_id`, returning true when the
    /// backend is ready to use.
    ///
    /// The global map lock is held only while locating the slot; `init`
    /// itself runs under the slot's own lock, so concurrent initializers for
    /// different backends never block each other. Once a slot reaches a
    /// terminal status, callers return from the lock-free fast path and
    /// `init` is never invoked again for that backend.
    pub fn ensure_initialized<F>(&self, backend_id: &str, init: F) -> bool
    where
        F: FnOnce() -> Result<(), StageError>,
    {
        let slot = self.slot(backend_id);

        if let Some(result) = slot.status.get() {
            return result.is_ok();
        }

        let _guard = slot.lock.lock().expect("init slot lock poisoned");
        // Another thread may have finished while this one waited on the lock.
        if slot.status.get().is_none() {
            let result = init();
            let _ = slot.status.set(result);
        }
        slot.status
            .get()
            .map(|result| result.is_ok())
            .unwrap_or(false)
    }

    /// The current status for `backend_id`.
    pub fn status(&self, backend_id: &str) -> InitStatus {
        let slots = self.slots.lock().expect("init registry lock poisoned");
        match slots.get(backend_id).and_then(|slot| slot.status.get()) {
            None => InitStatus::Pending,
            Some(Ok(())) => InitStatus::Ready,
            Some(Err(cause)) => InitStatus::Failed(cause.clone()),
        }
    }

    /// The recorded failure cause for `backend_id`, if initialization failed.
    pub fn failure(&self, backend_id: &str) -> Option<StageError> {
        match self.status(backend_id) {
            InitStatus::Failed(cause) => Some(cause),
            _ => None,
        }
    }

    fn slot(&self, backend_id: &str) -> Arc<InitSlot> {
        let mut slots = self.slots.lock().expect("init registry lock poisoned");
        slots
            .entry(backend_id.to_string())
            .or_insert_with(|| Arc::new(InitSlot::default()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_success_is_memoized() {
        let registry = InitRegistry::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let ready = registry.ensure_initialized("python", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            assert!(ready);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.status("python"), InitStatus::Ready);
    }

    #[test]
    fn test_failure_is_memoized_and_not_retried() {
        let registry = InitRegistry::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let ready = registry.ensure_initialized("go", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(StageError::new("runtime sources not found"))
            });
            assert!(!ready);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let failure = registry.failure("go").unwrap();
        assert!(failure.message.contains("runtime sources not found"));
    }

    #[test]
    fn test_backends_are_independent() {
        let registry = InitRegistry::new();

        assert!(!registry.ensure_initialized("go", || Err(StageError::new("boom"))));
        assert!(registry.ensure_initialized("python", || Ok(())));

        assert_eq!(registry.status("python"), InitStatus::Ready);
        assert!(matches!(registry.status("go"), InitStatus::Failed(_)));
        assert_eq!(registry.status("javascript"), InitStatus::Pending);
    }

    #[test]
    fn test_concurrent_callers_invoke_init_once() {
        let registry = Arc::new(InitRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    registry.ensure_initialized("cpp", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        // Widen the race window so contending threads pile up
                        // on the per-backend lock.
                        std::thread::sleep(std::time::Duration::from_millis(20));
                        Ok(())
                    })
                })
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.into_iter().all(|ready| ready));
    }

    #[test]
    fn test_concurrent_failure_observed_consistently() {
        let registry = Arc::new(InitRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    registry.ensure_initialized("swift", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err(StageError::new("toolchain missing"))
                    })
                })
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.into_iter().all(|ready| !ready));
    }
}
