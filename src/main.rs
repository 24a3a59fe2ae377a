//! Lambda entrypoint for the capture-and-ship function.
//!
//! The request payload and context are accepted and ignored, and the
//! response is empty regardless of internal outcome; success and failure are
//! only visible in the logs.

use jfr_shipper::{Config, FailurePolicy, Pipeline, ProfilerRegistry, S3ObjectStore};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();

    // Built once at cold start and reused across invocations.
    let store = S3ObjectStore::new(&config.region).await;

    // The registry starts empty: the handler expects the embedding host to
    // have started the "app" recording before the first invocation, and
    // reports the lookup failure otherwise rather than starting one itself.
    let registry = ProfilerRegistry::default();

    let pipeline = Arc::new(
        Pipeline::new(config, registry, store).with_policy(FailurePolicy::LogAndContinue),
    );

    run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let pipeline = Arc::clone(&pipeline);
        async move {
            let _ = event;
            match pipeline.run().await {
                Ok(summary) => tracing::debug!("invocation finished: {summary:?}"),
                Err(e) => tracing::error!("pipeline failed: {e:#}"),
            }
            Ok::<serde_json::Value, Error>(serde_json::Value::Null)
        }
    }))
    .await
}
