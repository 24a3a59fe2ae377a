//! Order and line-item records that make up the synthetic workload batch.
//!
//! The serialized field names (`orderId`, `lineNo`, ...) are part of the
//! workload's shape and must not change: the point of the workload is to
//! produce a JSON document of a known, stable structure.

use serde::{Deserialize, Serialize};

/// Processing state of an order, assigned round-robin by batch index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    New,
    Processing,
    Done,
}

impl OrderStatus {
    /// Status for the order at `index` within a batch. Pure function of the
    /// index, independent of the random source.
    pub fn for_index(index: usize) -> Self {
        match index % 3 {
            0 => OrderStatus::New,
            1 => OrderStatus::Processing,
            _ => OrderStatus::Done,
        }
    }
}

/// One customer order with nested line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `ORD-<sequential number starting at 100000>`, unique per batch.
    pub order_id: String,
    /// `CUST-<number>`, cycling through 100 distinct values.
    pub customer_id: String,
    /// ISO 8601 timestamp, now minus a random offset of up to 24 hours.
    pub created_at: String,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
}

/// One line item within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// 1-based position within the parent order.
    pub line_no: u32,
    /// `SKU-<random number in [1000, 1500)>`.
    pub sku: String,
    /// Quantity in `[1, 10]`.
    pub quantity: u32,
    /// Unit price in `[100, 1000)`.
    pub unit_price: u32,
}
