//! Invocation pipeline.
//!
//! Wires generator, workload, recording controller, and uploader into one
//! strictly sequential run per invocation, and owns the policy that decides
//! what a component failure means for the invocation as a whole.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{PipelineError, RecordingError, UploadError};
use crate::generator::OrderGenerator;
use crate::recording::{RecordingController, RecordingService};
use crate::upload::{ArtifactUploader, ObjectStore};
use crate::workload::{run_json_workload, WorkloadResult};
use tracing::warn;

/// What a component failure means for the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and keep going. This reproduces the original
    /// function's observable behavior: even after a failed capture the
    /// upload of a possibly missing dump is still attempted, and the
    /// invocation reports success either way.
    #[default]
    LogAndContinue,
    /// Abort on the first component failure and surface it.
    FailFast,
}

/// What actually happened during one invocation.
///
/// The function response stays empty regardless of outcome, so this is the
/// only place success and failure are distinguishable.
#[derive(Debug)]
pub struct InvocationSummary {
    /// Workload measurement, when serialization succeeded.
    pub workload: Option<WorkloadResult>,
    /// Capture failure, if any, under [`FailurePolicy::LogAndContinue`].
    pub recording_error: Option<RecordingError>,
    /// Storage key the artifact was uploaded under, on success.
    pub uploaded_key: Option<String>,
    /// Upload failure, if any, under [`FailurePolicy::LogAndContinue`].
    pub upload_error: Option<UploadError>,
}

impl InvocationSummary {
    /// Whether every step of the pipeline completed.
    pub fn fully_succeeded(&self) -> bool {
        self.workload.is_some()
            && self.recording_error.is_none()
            && self.uploaded_key.is_some()
            && self.upload_error.is_none()
    }
}

/// The capture-and-ship pipeline, generic over its injected collaborators.
pub struct Pipeline<R, S, C = SystemClock> {
    config: Config,
    recorder: RecordingController<R>,
    uploader: ArtifactUploader<S, C>,
    clock: C,
    policy: FailurePolicy,
}

impl<R: RecordingService, S: ObjectStore> Pipeline<R, S, SystemClock> {
    /// Assemble a pipeline from config and production collaborators.
    pub fn new(config: Config, recording_service: R, store: S) -> Self {
        Self::with_clock(config, recording_service, store, SystemClock)
    }
}

impl<R: RecordingService, S: ObjectStore, C: Clock + Clone> Pipeline<R, S, C> {
    /// Assemble a pipeline with an explicit clock, for reproducible tests.
    pub fn with_clock(config: Config, recording_service: R, store: S, clock: C) -> Self {
        let recorder = RecordingController::new(recording_service, config.recording_name.clone());
        let uploader = ArtifactUploader::with_clock(store, config.bucket.clone(), clock.clone());
        Self {
            config,
            recorder,
            uploader,
            clock,
            policy: FailurePolicy::default(),
        }
    }

    /// Set the failure policy. The default is
    /// [`FailurePolicy::LogAndContinue`].
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run one invocation: generate, serialize under the recording, dump,
    /// upload.
    pub async fn run(&self) -> Result<InvocationSummary, PipelineError> {
        let mut generator = OrderGenerator::with_clock(self.config.seed, self.clock.clone());
        let orders = generator.generate(self.config.order_count, self.config.lines_per_order);

        let (workload_outcome, capture_outcome) = self
            .recorder
            .capture_during(|| run_json_workload(&orders), &self.config.dump_path);

        let workload = match workload_outcome {
            Ok(result) => Some(result),
            Err(e) => {
                if self.policy == FailurePolicy::FailFast {
                    return Err(e.into());
                }
                warn!("workload failed: {e}");
                None
            }
        };

        let recording_error = match capture_outcome {
            Ok(()) => None,
            Err(e) => {
                if self.policy == FailurePolicy::FailFast {
                    return Err(e.into());
                }
                warn!("capture failed: {e}");
                Some(e)
            }
        };

        // The upload is attempted even after a failed capture; a missing
        // dump then reports FileNotFound.
        let (uploaded_key, upload_error) = match self.uploader.upload(&self.config.dump_path).await
        {
            Ok(key) => (Some(key), None),
            Err(e) => {
                if self.policy == FailurePolicy::FailFast {
                    return Err(e.into());
                }
                warn!("upload failed: {e}");
                (None, Some(e))
            }
        };

        Ok(InvocationSummary {
            workload,
            recording_error,
            uploaded_key,
            upload_error,
        })
    }
}
