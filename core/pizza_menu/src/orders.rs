//! # Order table
//!
//! The process-lifetime store of placed orders, keyed by id.
//!
//! ## Id allocation
//!
//! A new order gets one more than the largest numeric id already present
//! (ids that do not parse as integers are skipped), or `"1"` when the table
//! holds no numeric id. Reading the maximum, computing the next id and
//! inserting happen under one lock, so concurrent creates never collide and
//! ids stay contiguous.
//!
//! Orders are never updated or removed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::{OrderError, Result};
use crate::types::{ClientData, Order, ProductQuantity};

#[derive(Debug, Default)]
pub struct OrderTable {
    orders: Mutex<HashMap<String, Order>>,
}

impl OrderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new order under a freshly allocated id and return it.
    pub fn create(
        &self,
        products: Vec<ProductQuantity>,
        status: impl Into<String>,
        service: impl Into<String>,
        promise_time: Option<DateTime<Utc>>,
        client_data: ClientData,
    ) -> Order {
        let mut orders = self.lock();
        let id = next_id(orders.keys().map(String::as_str));
        let order = Order {
            id: id.clone(),
            products,
            status: status.into(),
            service: service.into(),
            promise_time,
            client_data,
        };
        orders.insert(id, order.clone());
        drop(orders);

        info!(
            order_id = %order.id,
            lines = order.products.len(),
            status = %order.status,
            "Order created"
        );
        order
    }

    pub fn get(&self, id: &str) -> Result<Order, OrderError> {
        self.lock()
            .get(id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Order>> {
        // No code path panics while holding the lock; a poisoned map is still consistent.
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn next_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.filter_map(|id| id.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
        .to_string()
}
