//! Order processor: drains the channel and applies each order in turn.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use shopfloor_core::ShopError;
use shopfloor_inventory::Inventory;

use crate::channel::OrderChannel;
use crate::request::OrderRequest;

/// Where the processor is within a cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ProcessorState {
    #[default]
    Idle,
    Draining,
    Applying { index: usize, total: usize },
}

/// Result of applying one drained order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderResult {
    Applied { remaining: u64 },
    Rejected(ShopError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOutcome {
    pub request: OrderRequest,
    pub result: OrderResult,
}

impl OrderOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.result, OrderResult::Applied { .. })
    }
}

/// Per-order outcomes of one cycle, in drain order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub outcomes: Vec<OrderOutcome>,
}

impl CycleReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn rejected(&self) -> usize {
        self.outcomes.len() - self.applied()
    }
}

/// Applies queued orders against an inventory, one at a time.
///
/// - One drain per cycle; an empty channel makes the cycle a no-op.
/// - Orders are applied in FIFO order through `reserve_and_deduct`, the same
///   path synchronous customers use.
/// - A rejected order never stops the rest of the batch.
/// - Cycles never overlap, even when `run_cycle` is called from several threads.
#[derive(Debug)]
pub struct OrderProcessor<I, C> {
    inventory: I,
    channel: C,
    cycle: Mutex<()>,
    state: Mutex<ProcessorState>,
}

impl<I, C> OrderProcessor<I, C>
where
    I: Inventory,
    C: OrderChannel,
{
    pub fn new(inventory: I, channel: C) -> Self {
        Self {
            inventory,
            channel,
            cycle: Mutex::new(()),
            state: Mutex::new(ProcessorState::Idle),
        }
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn state(&self) -> ProcessorState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one drain-and-apply cycle.
    pub fn run_cycle(&self) -> CycleReport {
        let _cycle = self.cycle.lock().unwrap_or_else(PoisonError::into_inner);

        self.set_state(ProcessorState::Draining);
        let batch = self.channel.try_drain_all();
        if batch.is_empty() {
            self.set_state(ProcessorState::Idle);
            return CycleReport::default();
        }

        let total = batch.len();
        debug!(orders = total, "applying drained orders");

        let mut outcomes = Vec::with_capacity(total);
        for (index, request) in batch.into_iter().enumerate() {
            self.set_state(ProcessorState::Applying { index, total });
            let result = self.apply(&request);
            outcomes.push(OrderOutcome { request, result });
        }

        self.set_state(ProcessorState::Idle);
        CycleReport { outcomes }
    }

    fn apply(&self, request: &OrderRequest) -> OrderResult {
        match self
            .inventory
            .reserve_and_deduct(&request.item_name, request.quantity)
        {
            Ok(remaining) => {
                info!(
                    order_id = %request.id,
                    item = %request.item_name,
                    quantity = request.quantity,
                    remaining,
                    "order processed"
                );
                OrderResult::Applied { remaining }
            }
            Err(err) => {
                warn!(
                    order_id = %request.id,
                    item = %request.item_name,
                    quantity = request.quantity,
                    reason = err.kind(),
                    error = %err,
                    "order rejected"
                );
                OrderResult::Rejected(err)
            }
        }
    }

    fn set_state(&self, state: ProcessorState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}
