//! Test doubles shared by unit and integration tests.

use crate::clock::Clock;
use crate::error::UploadError;
use crate::upload::ObjectStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Clock that always reports the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Fixed clock parsed from an RFC 3339 timestamp.
    ///
    /// Panics on malformed input; this is test-only construction.
    pub fn at(rfc3339: &str) -> Self {
        Self {
            now: DateTime::parse_from_rfc3339(rfc3339)
                .expect("valid RFC 3339 timestamp")
                .with_timezone(&Utc),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// One recorded `put_object` call.
#[derive(Debug, Clone)]
pub struct PutRecord {
    pub bucket: String,
    pub key: String,
    /// File contents captured at put time, since the uploader deletes the
    /// local file right after a successful put.
    pub bytes: Vec<u8>,
}

/// Object store double that records every put instead of talking to S3.
#[derive(Clone, Default)]
pub struct MockObjectStore {
    puts: Arc<Mutex<Vec<PutRecord>>>,
    fail: bool,
}

impl MockObjectStore {
    /// A store whose every put fails with [`UploadError::UploadFailed`].
    pub fn failing() -> Self {
        Self {
            puts: Arc::default(),
            fail: true,
        }
    }

    /// All puts recorded so far.
    pub fn puts(&self) -> Vec<PutRecord> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, path: &Path) -> Result<(), UploadError> {
        if self.fail {
            return Err(UploadError::UploadFailed {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "mock store configured to fail".to_string(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| UploadError::UploadFailed {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: e.to_string(),
        })?;

        self.puts.lock().unwrap().push(PutRecord {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
        });
        Ok(())
    }
}
