//! Inventory operations: the only mutation path into the store.
//!
//! Each operation validates its arguments first, then holds the store lock
//! for exactly one lookup-check-write sequence.

use std::sync::Arc;

use tracing::debug;

use shopfloor_core::{ItemRecord, Price, ShopError, ShopResult};

use crate::store::{InventoryStore, Slot};

/// Operations available on a shared inventory.
///
/// Implementations must make every method atomic with respect to every other:
/// no caller can observe a partially applied update.
pub trait Inventory: Send + Sync {
    /// Snapshot of every populated slot, in slot order.
    fn list(&self) -> Vec<ItemRecord>;

    fn find(&self, name: &str) -> ShopResult<Slot>;

    /// Add `delta` units. Returns the new count.
    fn restock(&self, name: &str, delta: i64) -> ShopResult<u64>;

    /// Replace the unit price. Returns the previous price.
    fn reprice(&self, name: &str, price: Price) -> ShopResult<Price>;

    /// Take `quantity` units if, and only if, that many are on hand.
    ///
    /// On [`ShopError::InsufficientStock`] nothing is deducted. Returns the
    /// new count on success.
    fn reserve_and_deduct(&self, name: &str, quantity: i64) -> ShopResult<u64>;
}

impl Inventory for InventoryStore {
    fn list(&self) -> Vec<ItemRecord> {
        InventoryStore::list(self)
    }

    fn find(&self, name: &str) -> ShopResult<Slot> {
        InventoryStore::find(self, name)
    }

    fn restock(&self, name: &str, delta: i64) -> ShopResult<u64> {
        let delta = u64::try_from(delta)
            .map_err(|_| ShopError::invalid(format!("restock delta cannot be negative ({delta})")))?;

        let mut slots = self.lock();
        let item = slots.record_mut(name)?;
        let count = item
            .count
            .checked_add(delta)
            .ok_or_else(|| ShopError::invalid(format!("restocking {name} by {delta} overflows")))?;
        item.count = count;
        drop(slots);

        debug!(item = name, delta, count, "restocked");
        Ok(count)
    }

    fn reprice(&self, name: &str, price: Price) -> ShopResult<Price> {
        let mut slots = self.lock();
        let item = slots.record_mut(name)?;
        let previous = core::mem::replace(&mut item.price, price);
        drop(slots);

        debug!(item = name, %previous, %price, "repriced");
        Ok(previous)
    }

    fn reserve_and_deduct(&self, name: &str, quantity: i64) -> ShopResult<u64> {
        let requested = match u64::try_from(quantity) {
            Ok(q) if q > 0 => q,
            _ => {
                return Err(ShopError::invalid(format!(
                    "order quantity must be positive ({quantity})"
                )));
            }
        };

        // Check and subtract under the same guard.
        let mut slots = self.lock();
        let item = slots.record_mut(name)?;
        if requested > item.count {
            return Err(ShopError::insufficient(name, requested, item.count));
        }
        item.count -= requested;
        let remaining = item.count;
        drop(slots);

        debug!(item = name, quantity = requested, remaining, "deducted");
        Ok(remaining)
    }
}

impl<T> Inventory for Arc<T>
where
    T: Inventory + ?Sized,
{
    fn list(&self) -> Vec<ItemRecord> {
        (**self).list()
    }

    fn find(&self, name: &str) -> ShopResult<Slot> {
        (**self).find(name)
    }

    fn restock(&self, name: &str, delta: i64) -> ShopResult<u64> {
        (**self).restock(name, delta)
    }

    fn reprice(&self, name: &str, price: Price) -> ShopResult<Price> {
        (**self).reprice(name, price)
    }

    fn reserve_and_deduct(&self, name: &str, quantity: i64) -> ShopResult<u64> {
        (**self).reserve_and_deduct(name, quantity)
    }
}
