//! In-process profiler registry.
//!
//! Stand-in for the host profiling facility: a process-wide set of named
//! recordings that the embedding host starts before the handler runs and
//! feeds with opaque profile bytes. The handler itself only ever looks up,
//! stops, and dumps recordings through the [`RecordingService`] trait; it
//! never starts one.

use crate::error::RecordingError;
use crate::recording::{Recording, RecordingService};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

struct RecordingState {
    running: bool,
    buf: Vec<u8>,
}

/// Registry of named in-process recordings.
///
/// Cloning is cheap and all clones share the same underlying set, so one
/// registry can be handed to both the bootstrap code that starts recordings
/// and the controller that consumes them.
#[derive(Clone, Default)]
pub struct ProfilerRegistry {
    inner: Arc<Mutex<HashMap<String, RecordingState>>>,
}

impl ProfilerRegistry {
    /// Start a recording under `name`, replacing any previous one with the
    /// same name.
    pub fn start(&self, name: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        inner.insert(
            name.into(),
            RecordingState {
                running: true,
                buf: Vec::new(),
            },
        );
    }

    /// Append opaque profile bytes to a recording. Ignored when no recording
    /// with that name exists.
    pub fn append(&self, name: &str, bytes: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(state) = inner.get_mut(name) {
            state.buf.extend_from_slice(bytes);
        }
    }

    /// Whether a recording with `name` exists and is still running.
    pub fn is_running(&self, name: &str) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.get(name).map(|s| s.running).unwrap_or(false)
    }
}

impl RecordingService for ProfilerRegistry {
    fn find(&self, name: &str) -> Option<Recording> {
        let inner = self.inner.lock().unwrap();
        inner.contains_key(name).then(|| Recording::new(name))
    }

    fn stop(&self, recording: &Recording) -> Result<(), RecordingError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.get_mut(recording.name()) {
            Some(state) => {
                state.running = false;
                Ok(())
            }
            None => Err(RecordingError::Unavailable(recording.name().to_string())),
        }
    }

    fn dump(&self, recording: &Recording, path: &Path) -> Result<(), RecordingError> {
        let inner = self.inner.lock().unwrap();
        let state = inner
            .get(recording.name())
            .ok_or_else(|| RecordingError::Unavailable(recording.name().to_string()))?;

        std::fs::write(path, &state.buf).map_err(|source| RecordingError::DumpFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}
