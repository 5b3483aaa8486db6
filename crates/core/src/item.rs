//! Item record: one slot's worth of stock.

use serde::{Deserialize, Serialize};

use crate::value_object::{ItemName, Price};

/// A named, counted, priced unit of stock.
///
/// `count` is unsigned, so stock can never be represented as negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: ItemName,
    pub count: u64,
    pub price: Price,
}

impl ItemRecord {
    pub fn new(name: ItemName, count: u64, price: Price) -> Self {
        Self { name, count, price }
    }

    pub fn in_stock(&self) -> bool {
        self.count > 0
    }
}
