//! Manager-facing surface.

use tracing::info;

use shopfloor_core::{ItemRecord, Price, ShopResult};
use shopfloor_inventory::Inventory;

#[derive(Debug, Clone)]
pub struct ManagerDesk<I> {
    inventory: I,
}

impl<I> ManagerDesk<I>
where
    I: Inventory,
{
    pub fn new(inventory: I) -> Self {
        Self { inventory }
    }

    /// Add units to an item. Returns the new stock level.
    pub fn restock(&self, name: &str, delta: i64) -> ShopResult<u64> {
        let count = self.inventory.restock(name, delta)?;
        info!(item = name, delta, count, "item restocked");
        Ok(count)
    }

    /// Set a new unit price. Returns the previous one.
    pub fn reprice(&self, name: &str, price: Price) -> ShopResult<Price> {
        let previous = self.inventory.reprice(name, price)?;
        info!(item = name, %previous, %price, "item repriced");
        Ok(previous)
    }

    /// Every populated slot, including sold-out items.
    pub fn status(&self) -> Vec<ItemRecord> {
        self.inventory.list()
    }
}
