//! Artifact upload to object storage.
//!
//! A single whole-file put of the recording dump under a timestamped key,
//! followed by best-effort removal of the local copy. No retry, no
//! multipart, no content-type or metadata.

use crate::clock::{Clock, SystemClock};
use crate::error::UploadError;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;
use tracing::info;

/// Capability surface of the object store: one blocking whole-file put.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, path: &Path) -> Result<(), UploadError>;
}

/// Object store backed by the AWS S3 SDK.
///
/// Creating an S3 client is relatively expensive, so the client is built
/// once (at cold start) and reused across invocations.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    /// Create a client pinned to the given region.
    pub async fn new(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, path: &Path) -> Result<(), UploadError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| UploadError::UploadFailed {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| UploadError::UploadFailed {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Storage key for a dump taken at `now`: the ISO 8601 timestamp with `:`
/// replaced by `-` so the key stays path-friendly.
pub fn artifact_key(now: DateTime<Utc>) -> String {
    format!(
        "jfr/gson-{}.jfr",
        now.to_rfc3339_opts(SecondsFormat::Millis, true).replace(':', "-")
    )
}

/// Uploads the local recording dump and removes it afterwards.
pub struct ArtifactUploader<S, C = SystemClock> {
    store: S,
    bucket: String,
    clock: C,
}

impl<S: ObjectStore> ArtifactUploader<S, SystemClock> {
    pub fn new(store: S, bucket: impl Into<String>) -> Self {
        Self::with_clock(store, bucket, SystemClock)
    }
}

impl<S: ObjectStore, C: Clock> ArtifactUploader<S, C> {
    pub fn with_clock(store: S, bucket: impl Into<String>, clock: C) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            clock,
        }
    }

    /// Upload `local_path` under a timestamped key, then delete the local
    /// file. Returns the key the artifact was stored under.
    ///
    /// Fails with [`UploadError::FileNotFound`] before any store call when
    /// the file is missing. Keys are second-resolution timestamps, so two
    /// captures within the same instant could in principle collide; no
    /// idempotency key is added.
    pub async fn upload(&self, local_path: &Path) -> Result<String, UploadError> {
        if !local_path.exists() {
            return Err(UploadError::FileNotFound(local_path.to_path_buf()));
        }

        let key = artifact_key(self.clock.now());
        info!("Uploading JFR to s3://{}/{} ...", self.bucket, key);

        self.store.put_object(&self.bucket, &key, local_path).await?;

        tokio::fs::remove_file(local_path)
            .await
            .map_err(|source| UploadError::Cleanup {
                path: local_path.to_path_buf(),
                source,
            })?;

        info!("Upload finished.");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedClock, MockObjectStore};
    use tempfile::TempDir;

    #[test]
    fn test_artifact_key_replaces_colons() {
        let now = DateTime::parse_from_rfc3339("2024-06-01T12:34:56.789Z")
            .unwrap()
            .with_timezone(&Utc);

        let key = artifact_key(now);

        assert_eq!(key, "jfr/gson-2024-06-01T12-34-56.789Z.jfr");
        assert!(!key.contains(':'));
    }

    #[tokio::test]
    async fn test_missing_file_fails_without_store_call() {
        let store = MockObjectStore::default();
        let uploader = ArtifactUploader::new(store.clone(), "bucket");

        let result = uploader.upload(Path::new("/tmp/does-not-exist.jfr")).await;

        assert!(matches!(result, Err(UploadError::FileNotFound(_))));
        assert!(store.puts().is_empty());
    }

    #[tokio::test]
    async fn test_upload_puts_contents_and_deletes_local_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.jfr");
        std::fs::write(&path, b"profile-bytes").unwrap();

        let store = MockObjectStore::default();
        let clock = FixedClock::at("2024-06-01T12:00:00Z");
        let uploader = ArtifactUploader::with_clock(store.clone(), "bucket", clock);

        let key = uploader.upload(&path).await.unwrap();

        assert_eq!(key, "jfr/gson-2024-06-01T12-00-00.000Z.jfr");
        let puts = store.puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].bucket, "bucket");
        assert_eq!(puts[0].key, key);
        assert_eq!(puts[0].bytes, b"profile-bytes");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_put_leaves_local_file_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.jfr");
        std::fs::write(&path, b"profile-bytes").unwrap();

        let store = MockObjectStore::failing();
        let uploader = ArtifactUploader::new(store, "bucket");

        let result = uploader.upload(&path).await;

        assert!(matches!(result, Err(UploadError::UploadFailed { .. })));
        assert!(path.exists());
    }
}
