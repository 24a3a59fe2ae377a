//! jfr-shipper
//!
//! A single-purpose cloud function that captures a named JFR recording while
//! a synthetic JSON serialization workload runs, dumps the recording to a
//! local file, and uploads the dump to S3 under a timestamped key.
//!
//! The pipeline is strictly sequential per invocation:
//!
//! 1. [`generator::OrderGenerator`] produces a deterministic batch of orders
//! 2. [`workload::run_json_workload`] serializes the batch and measures it
//! 3. [`recording::RecordingController`] stops and dumps the recording that
//!    was active while the workload ran
//! 4. [`upload::ArtifactUploader`] puts the dump into the configured bucket
//!    and removes the local copy
//!
//! Components take their collaborators (profiler host, object store, clock)
//! as injected capabilities so each step can be exercised in isolation.

pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod handler;
pub mod orders;
pub mod recording;
pub mod registry;
pub mod testing;
pub mod upload;
pub mod workload;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use error::{PipelineError, RecordingError, UploadError, WorkloadError};
pub use generator::OrderGenerator;
pub use handler::{FailurePolicy, InvocationSummary, Pipeline};
pub use orders::{Order, OrderLine, OrderStatus};
pub use recording::{Recording, RecordingController, RecordingService};
pub use registry::ProfilerRegistry;
pub use upload::{ArtifactUploader, ObjectStore, S3ObjectStore};
pub use workload::{run_json_workload, WorkloadResult};
