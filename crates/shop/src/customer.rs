//! Customer-facing surface.

use tracing::info;

use shopfloor_core::{ItemRecord, ShopResult};
use shopfloor_inventory::Inventory;
use shopfloor_orders::{OrderId, OrderRequest, OrderSubmitter};

/// What a customer can do: browse, buy now, or queue an order for the shop.
#[derive(Debug, Clone)]
pub struct CustomerDesk<I> {
    inventory: I,
    orders: OrderSubmitter,
}

impl<I> CustomerDesk<I>
where
    I: Inventory,
{
    pub fn new(inventory: I, orders: OrderSubmitter) -> Self {
        Self { inventory, orders }
    }

    /// Items with at least one unit on hand, in slot order.
    pub fn available_items(&self) -> Vec<ItemRecord> {
        self.inventory
            .list()
            .into_iter()
            .filter(ItemRecord::in_stock)
            .collect()
    }

    /// Buy synchronously. Returns the stock left after the purchase.
    pub fn place_order(&self, name: &str, quantity: i64) -> ShopResult<u64> {
        let remaining = self.inventory.reserve_and_deduct(name, quantity)?;
        info!(item = name, quantity, remaining, "order placed");
        Ok(remaining)
    }

    /// Queue an order for the shop to apply on its next cycle.
    ///
    /// The currently listed price is stamped on the request for the record.
    /// Whether the order succeeds is only known once the shop processes it;
    /// a non-positive quantity is refused immediately.
    pub fn submit_order(&self, name: &str, quantity: i64) -> ShopResult<OrderId> {
        let mut request = OrderRequest::new(name, quantity);
        if let Ok(slot) = self.inventory.find(name) {
            request = request.with_price(slot.record.price);
        }
        let id = request.id;
        self.orders.submit(request)?;
        info!(order_id = %id, item = name, quantity, "order queued");
        Ok(id)
    }
}
