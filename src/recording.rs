//! Profiler host seam and the capture controller.
//!
//! The host profiling facility is an ambient service that owns named
//! recordings and their binary format. This module only defines the
//! capability surface the handler needs (`find`, `stop`, `dump`) and the
//! controller that drives a capture around a workload. The in-process
//! implementation lives in [`crate::registry`].

use crate::error::RecordingError;
use std::path::Path;
use tracing::info;

/// Opaque handle to a host-managed recording, obtained by name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    name: String,
}

impl Recording {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Capability surface of the host profiling facility.
pub trait RecordingService: Send + Sync {
    /// Look up an active recording by name.
    fn find(&self, name: &str) -> Option<Recording>;

    /// Stop a running recording.
    fn stop(&self, recording: &Recording) -> Result<(), RecordingError>;

    /// Write the recording's full contents to `path`, overwriting any
    /// existing file.
    fn dump(&self, recording: &Recording, path: &Path) -> Result<(), RecordingError>;
}

/// Drives one capture: resolves the named recording, runs the workload while
/// it is (assumed to be) active, then stops and dumps it.
pub struct RecordingController<S> {
    service: S,
    name: String,
}

impl<S: RecordingService> RecordingController<S> {
    pub fn new(service: S, name: impl Into<String>) -> Self {
        Self {
            service,
            name: name.into(),
        }
    }

    /// Run `workload` while the named recording captures samples, then stop
    /// the recording and dump it to `local_path`.
    ///
    /// The workload runs whether or not the recording exists; the lookup
    /// failure only surfaces afterwards, at the stop/dump step. Nothing here
    /// starts a recording: the host must have started one before the handler
    /// is invoked, and a missing recording is reported as
    /// [`RecordingError::Unavailable`].
    ///
    /// Returns the workload's output together with the capture outcome, so
    /// the caller keeps the workload result even when the capture fails.
    pub fn capture_during<T>(
        &self,
        workload: impl FnOnce() -> T,
        local_path: &Path,
    ) -> (T, Result<(), RecordingError>) {
        let recording = self.service.find(&self.name);

        let output = workload();

        let outcome = match recording {
            None => Err(RecordingError::Unavailable(self.name.clone())),
            Some(recording) => self
                .service
                .stop(&recording)
                .and_then(|()| self.service.dump(&recording, local_path))
                .inspect(|_| info!("JFR written to {}", local_path.display())),
        };

        (output, outcome)
    }
}
