//! Deterministic sample order generator.
//!
//! The generator uses a seeded random number generator so that, for a fixed
//! `(count, lines_per_order, seed)`, every numeric field is reproducible
//! across runs. `createdAt` mixes in the actual wall-clock "now", so the
//! rendered string differs between runs unless the clock is fixed too.

use crate::clock::{Clock, SystemClock};
use crate::orders::{Order, OrderLine, OrderStatus};
use chrono::{Duration, SecondsFormat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// First order number in every batch; orders are numbered sequentially
/// from here.
const ORDER_ID_BASE: u32 = 100_000;

/// Base customer number; customers cycle through 100 distinct values.
const CUSTOMER_ID_BASE: u32 = 1_000;

/// Maximum backdating of `createdAt`, in seconds (24 hours).
const MAX_CREATED_AT_OFFSET_SECS: i64 = 3600 * 24;

/// Produces deterministic batches of sample orders.
///
/// The random source and the time source are separate injectable
/// dependencies: the seed fixes all numeric fields, the clock fixes the
/// `createdAt` strings.
pub struct OrderGenerator<C = SystemClock> {
    rng: StdRng,
    clock: C,
}

impl OrderGenerator<SystemClock> {
    /// Create a generator seeded with `seed`, using the system clock.
    pub fn new(seed: u64) -> Self {
        Self::with_clock(seed, SystemClock)
    }
}

impl<C: Clock> OrderGenerator<C> {
    /// Create a generator with an explicit clock, for reproducible tests.
    pub fn with_clock(seed: u64, clock: C) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock,
        }
    }

    /// Generate `count` orders with exactly `lines_per_order` lines each.
    ///
    /// `orderId` values are strictly increasing, `status` and `customerId`
    /// are pure functions of the order index, and `lineNo` runs contiguously
    /// from 1 within each order. A `count` of zero yields an empty batch.
    pub fn generate(&mut self, count: usize, lines_per_order: usize) -> Vec<Order> {
        let mut orders = Vec::with_capacity(count);

        for i in 0..count {
            let offset_secs = self.rng.random_range(0..MAX_CREATED_AT_OFFSET_SECS);
            let created_at = (self.clock.now() - Duration::seconds(offset_secs))
                .to_rfc3339_opts(SecondsFormat::Millis, true);

            let mut lines = Vec::with_capacity(lines_per_order);
            for j in 0..lines_per_order {
                lines.push(OrderLine {
                    line_no: j as u32 + 1,
                    sku: format!("SKU-{}", 1000 + self.rng.random_range(0..500u32)),
                    quantity: 1 + self.rng.random_range(0..10u32),
                    unit_price: 100 + self.rng.random_range(0..900u32),
                });
            }

            orders.push(Order {
                order_id: format!("ORD-{}", ORDER_ID_BASE + i as u32),
                customer_id: format!("CUST-{}", CUSTOMER_ID_BASE + (i % 100) as u32),
                created_at,
                status: OrderStatus::for_index(i),
                lines,
            });
        }

        orders
    }
}
