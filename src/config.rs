//! Pipeline configuration.
//!
//! All previously hardcoded literals (bucket, region, dump path, recording
//! name, workload shape) live here, with defaults equal to those literals.
//! The deployment can override the destination bucket through `JFR_BUCKET`.

use std::path::PathBuf;

/// Configuration for one capture-and-ship pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Destination bucket for uploaded recordings.
    pub bucket: String,
    /// AWS region the bucket lives in.
    pub region: String,
    /// Local path the recording is dumped to before upload.
    pub dump_path: PathBuf,
    /// Name of the recording the handler looks up on the profiler host.
    pub recording_name: String,
    /// Number of orders in the synthetic workload batch.
    pub order_count: usize,
    /// Line items per order.
    pub lines_per_order: usize,
    /// Seed for the workload's random source.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket: "tun-chan-love".to_string(),
            region: "ap-northeast-1".to_string(),
            dump_path: PathBuf::from("/tmp/app.jfr"),
            recording_name: "app".to_string(),
            order_count: 3000,
            lines_per_order: 5,
            seed: 0,
        }
    }
}

impl Config {
    /// Defaults overlaid with deployment environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(bucket) = std::env::var("JFR_BUCKET") {
            if !bucket.is_empty() {
                config.bucket = bucket;
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_deployment_literals() {
        let config = Config::default();

        assert_eq!(config.region, "ap-northeast-1");
        assert_eq!(config.dump_path, PathBuf::from("/tmp/app.jfr"));
        assert_eq!(config.recording_name, "app");
        assert_eq!(config.order_count, 3000);
        assert_eq!(config.lines_per_order, 5);
        assert_eq!(config.seed, 0);
    }
}
