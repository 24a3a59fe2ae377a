//! Error types for the capture-and-ship pipeline.
//!
//! Each component reports its failures as explicit values; whether a failure
//! aborts the invocation is decided by the handler's
//! [`FailurePolicy`](crate::handler::FailurePolicy), not at the error site.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the JSON serialization workload.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from the buffered writer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the recording controller and profiler host.
#[derive(Error, Debug)]
pub enum RecordingError {
    /// No recording with the expected name is active on the host. The
    /// handler never starts one itself; it must already be running.
    #[error("no active recording named '{0}'")]
    Unavailable(String),

    /// The recording dump could not be written to the local filesystem.
    #[error("failed to dump recording to {path}: {source}")]
    DumpFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the artifact uploader.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The local artifact is missing; no store call is attempted.
    #[error("local artifact does not exist: {0}")]
    FileNotFound(PathBuf),

    /// The object store rejected or failed the put.
    #[error("failed to upload to s3://{bucket}/{key}: {message}")]
    UploadFailed {
        bucket: String,
        key: String,
        message: String,
    },

    /// The local artifact could not be removed after a successful put.
    /// Callers handle this through the same channel as a failed upload.
    #[error("failed to remove local artifact {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Union of component errors, returned by the pipeline under
/// [`FailurePolicy::FailFast`](crate::handler::FailurePolicy::FailFast).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Workload(#[from] WorkloadError),

    #[error(transparent)]
    Recording(#[from] RecordingError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}
