//! JSON serialization workload.
//!
//! Serializes a batch of orders to a JSON array through a buffered writer,
//! timing the serialization pass only. This is the unit of work a recording
//! captures profiling samples from.

use crate::error::WorkloadError;
use crate::orders::Order;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};
use tracing::info;

/// Buffer size for the serialization writer.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Outcome of one workload run.
#[derive(Debug, Clone)]
pub struct WorkloadResult {
    /// Length of the encoded JSON output in bytes.
    pub byte_length: u64,
    /// Wall time spent serializing, excluding generation.
    pub elapsed: Duration,
}

/// Serialize the batch to a JSON array of order objects.
pub fn serialize_orders(orders: &[Order]) -> Result<Vec<u8>, WorkloadError> {
    let mut buf = Vec::new();
    let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, &mut buf);
    serde_json::to_writer(&mut writer, orders)?;
    writer.flush()?;
    drop(writer);
    Ok(buf)
}

/// Run the serialization workload over `orders`, measuring elapsed time and
/// output size. The encoded bytes themselves are discarded; only their
/// length is reported.
pub fn run_json_workload(orders: &[Order]) -> Result<WorkloadResult, WorkloadError> {
    let start = Instant::now();
    let encoded = serialize_orders(orders)?;
    let elapsed = start.elapsed();

    let result = WorkloadResult {
        byte_length: encoded.len() as u64,
        elapsed,
    };

    info!(
        "JSON length = {} bytes, elapsed = {} ms",
        result.byte_length,
        result.elapsed.as_millis()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::OrderGenerator;

    #[test]
    fn test_empty_batch_serializes_to_empty_array() {
        let result = run_json_workload(&[]).unwrap();
        assert_eq!(result.byte_length, 2);
        assert_eq!(serialize_orders(&[]).unwrap(), b"[]");
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let mut generator = OrderGenerator::new(42);
        let orders = generator.generate(25, 5);

        let encoded = serialize_orders(&orders).unwrap();
        let decoded: Vec<Order> = serde_json::from_slice(&encoded).unwrap();

        // Timestamp strings compare as exact strings, not parsed times;
        // Order's PartialEq covers that.
        assert_eq!(decoded, orders);
    }

    #[test]
    fn test_reported_length_matches_encoding() {
        let mut generator = OrderGenerator::new(1);
        let orders = generator.generate(10, 2);

        let encoded = serialize_orders(&orders).unwrap();
        let result = run_json_workload(&orders).unwrap();

        assert_eq!(result.byte_length, encoded.len() as u64);
    }

    #[test]
    fn test_full_size_batch_produces_expected_volume() {
        let mut generator = OrderGenerator::new(0);
        let orders = generator.generate(3000, 5);

        let result = run_json_workload(&orders).unwrap();

        // 3000 orders x 5 lines is comfortably above half a megabyte.
        assert!(
            result.byte_length > 500_000,
            "unexpectedly small output: {} bytes",
            result.byte_length
        );
    }
}
