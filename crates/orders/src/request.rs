use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfloor_core::Price;

/// Identifier of a submitted order (UUIDv7, time-ordered).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A pending order, consumed exactly once by the processor.
///
/// `quantity` must be positive; the channel refuses anything else before
/// it is queued, and deduction checks it again when the order is applied.
/// `submitted_price` is carried for audit only; deduction ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub id: OrderId,
    pub item_name: String,
    pub quantity: i64,
    pub submitted_price: Option<Price>,
    pub submitted_at: DateTime<Utc>,
}

impl OrderRequest {
    pub fn new(item_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: OrderId::new(),
            item_name: item_name.into(),
            quantity,
            submitted_price: None,
            submitted_at: Utc::now(),
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.submitted_price = Some(price);
        self
    }
}
