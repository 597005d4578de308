use std::sync::{Mutex, PoisonError};

use crate::errors::RecipeError;
use crate::watch::WatchSpec;

// ============================================================================
// Supervisor Boundary
// ============================================================================
//
// The external process supervisor consumes finished watch definitions. The
// runtime behind this trait owns all scheduling, polling, and state
// transitions; submission is the only interaction this crate has with it.
//
// ============================================================================

pub trait Supervisor {
    /// Hand a finished watch definition to the supervisor.
    fn submit(&self, watch: &WatchSpec) -> Result<(), RecipeError>;
}

/// Emits every accepted watch through tracing. The default sink for
/// operation, where the actual supervisor picks up the definitions out of
/// band.
#[derive(Debug, Default)]
pub struct LoggingSupervisor;

impl Supervisor for LoggingSupervisor {
    fn submit(&self, watch: &WatchSpec) -> Result<(), RecipeError> {
        tracing::info!(
            name = %watch.name,
            group = %watch.group,
            start = %watch.start,
            pid_file = ?watch.pid_file,
            interval_secs = watch.interval.as_secs(),
            "Accepted watch definition"
        );
        Ok(())
    }
}

/// Accumulates every submitted watch for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingSupervisor {
    watches: Mutex<Vec<WatchSpec>>,
}

impl RecordingSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watches(&self) -> Vec<WatchSpec> {
        self.watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Supervisor for RecordingSupervisor {
    fn submit(&self, watch: &WatchSpec) -> Result<(), RecipeError> {
        self.watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(watch.clone());
        Ok(())
    }
}
