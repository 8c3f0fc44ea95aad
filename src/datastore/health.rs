//! Health gate: the datastore's one-way circuit breaker.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::error;

use crate::error::StorageError;

// == Health Gate ==
/// Tracks whether storage may still be used.
///
/// Starts enabled and can only be disabled. Once disabled, the datastore
/// stays disabled until the process is restarted.
#[derive(Debug)]
pub struct HealthGate {
    enabled: AtomicBool,
}

impl HealthGate {
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }

    /// Returns true while storage access is allowed.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Disables storage access because of `cause`.
    ///
    /// Every call logs the cause. Returns true only for the call that
    /// performed the transition.
    pub fn disable(&self, cause: &StorageError) -> bool {
        let was_enabled = self.enabled.swap(false, Ordering::AcqRel);
        if was_enabled {
            error!(
                cause = %cause,
                "##### CRITICAL ERROR ##### : Datastore has been disabled due to a storage failure"
            );
        } else {
            error!(cause = %cause, "Storage failure reported on an already disabled datastore");
        }
        was_enabled
    }
}

impl Default for HealthGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn outage() -> StorageError {
        StorageError::Unavailable("connection refused".to_string())
    }

    #[test]
    fn test_starts_enabled() {
        assert!(HealthGate::new().is_enabled());
    }

    #[test]
    fn test_disable_is_one_way() {
        let gate = HealthGate::new();

        assert!(gate.disable(&outage()));
        assert!(!gate.is_enabled());

        assert!(!gate.disable(&outage()));
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_concurrent_disable_transitions_once() {
        let gate = Arc::new(HealthGate::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || gate.disable(&outage()))
            })
            .collect();

        let transitions = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&transitioned| transitioned)
            .count();

        assert_eq!(transitions, 1);
        assert!(!gate.is_enabled());
    }
}
