use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use shopfloor_core::{ItemName, ItemRecord, ShopError, ShopResult};

use crate::bootstrap::BootstrapError;

/// Point-in-time copy of one populated slot, as returned by [`InventoryStore::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub record: ItemRecord,
}

/// Slot table plus name index. Only reachable through the store's lock.
#[derive(Debug, Default)]
pub(crate) struct Slots {
    items: Vec<ItemRecord>,
    index: HashMap<ItemName, usize>,
}

impl Slots {
    pub(crate) fn record_mut(&mut self, name: &str) -> ShopResult<&mut ItemRecord> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| ShopError::not_found(name))?;
        Ok(&mut self.items[idx])
    }

    fn push(&mut self, record: ItemRecord) -> Result<(), BootstrapError> {
        if self.index.contains_key(&record.name) {
            return Err(BootstrapError::DuplicateItem {
                name: record.name.to_string(),
            });
        }
        self.index.insert(record.name.clone(), self.items.len());
        self.items.push(record);
        Ok(())
    }
}

/// Fixed-capacity table of item records guarded by one exclusive lock.
///
/// Slots are filled once, at construction, and keep their position for the
/// life of the store; nothing is ever removed. Share it between threads with
/// `Arc<InventoryStore>`.
#[derive(Debug)]
pub struct InventoryStore {
    capacity: usize,
    slots: Mutex<Slots>,
}

impl InventoryStore {
    /// Default number of slots.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// An empty store. Nothing can be found in it until it is populated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Mutex::new(Slots::default()),
        }
    }

    /// Populate slots in order from `records`.
    ///
    /// Duplicate names are rejected. Records past `capacity` are ignored.
    pub fn from_records(
        capacity: usize,
        records: impl IntoIterator<Item = ItemRecord>,
    ) -> Result<Self, BootstrapError> {
        let mut slots = Slots::default();
        let mut ignored = 0usize;

        for record in records {
            if slots.items.len() == capacity {
                ignored += 1;
                continue;
            }
            slots.push(record)?;
        }

        if ignored > 0 {
            warn!(capacity, ignored, "bootstrap source exceeds store capacity; extra items ignored");
        }

        Ok(Self {
            capacity,
            slots: Mutex::new(slots),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every populated slot, in slot order.
    pub fn list(&self) -> Vec<ItemRecord> {
        self.lock().items.clone()
    }

    /// Snapshot of the slots that still have stock.
    pub fn available(&self) -> Vec<ItemRecord> {
        self.lock()
            .items
            .iter()
            .filter(|r| r.in_stock())
            .cloned()
            .collect()
    }

    /// Exact, case-sensitive lookup by name.
    pub fn find(&self, name: &str) -> ShopResult<Slot> {
        let slots = self.lock();
        let index = *slots
            .index
            .get(name)
            .ok_or_else(|| ShopError::not_found(name))?;
        Ok(Slot {
            index,
            record: slots.items[index].clone(),
        })
    }

    /// Acquire the store lock.
    ///
    /// Mutations validate everything before a single in-place write, so a
    /// holder that panicked cannot have left a torn record behind. A poisoned
    /// lock is therefore recovered rather than propagated.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(|poisoned| {
            warn!("inventory lock poisoned by a panicking holder; recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
