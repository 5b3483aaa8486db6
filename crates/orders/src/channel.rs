//! Order channel: bounded multi-producer / single-consumer queue of requests.
//!
//! The channel has its own synchronisation and is never locked together with
//! the inventory store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use std::sync::{Arc, Mutex, PoisonError};

use shopfloor_core::{ShopError, ShopResult};

use crate::request::OrderRequest;

/// Queue through which order requests reach the shop.
///
/// ## Delivery
///
/// - A submitted request is delivered at most once.
/// - Requests from one producer are drained in submission order. There is no
///   ordering guarantee across producers.
///
/// ## Blocking
///
/// Neither side waits for the other: `submit` fails fast when the queue is at
/// capacity, and `try_drain_all` returns whatever is there right now.
pub trait OrderChannel: Send + Sync {
    /// Enqueue a request without waiting for the consumer.
    fn submit(&self, request: OrderRequest) -> ShopResult<()>;

    /// Take every request currently queued, in FIFO order.
    ///
    /// Returns an empty vector when nothing is pending.
    fn try_drain_all(&self) -> Vec<OrderRequest>;
}

impl<C> OrderChannel for Arc<C>
where
    C: OrderChannel + ?Sized,
{
    fn submit(&self, request: OrderRequest) -> ShopResult<()> {
        (**self).submit(request)
    }

    fn try_drain_all(&self) -> Vec<OrderRequest> {
        (**self).try_drain_all()
    }
}

/// Producer handle. Clone one per submitting thread.
#[derive(Debug, Clone)]
pub struct OrderSubmitter {
    sender: SyncSender<OrderRequest>,
    capacity: usize,
    pending: Arc<AtomicUsize>,
}

impl OrderSubmitter {
    /// Enqueue `request`. A non-positive quantity is rejected here and never
    /// takes a queue slot.
    pub fn submit(&self, request: OrderRequest) -> ShopResult<()> {
        if request.quantity <= 0 {
            return Err(ShopError::invalid(format!(
                "order quantity must be positive ({})",
                request.quantity
            )));
        }

        self.pending.fetch_add(1, Ordering::AcqRel);
        match self.sender.try_send(request) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                match err {
                    TrySendError::Full(_) => Err(ShopError::ChannelFull {
                        capacity: self.capacity,
                    }),
                    TrySendError::Disconnected(_) => Err(ShopError::ChannelClosed),
                }
            }
        }
    }
}

/// In-process order channel backed by `std::sync::mpsc::sync_channel`.
#[derive(Debug)]
pub struct InMemoryOrderChannel {
    submitter: OrderSubmitter,
    receiver: Mutex<Receiver<OrderRequest>>,
}

impl InMemoryOrderChannel {
    pub const DEFAULT_CAPACITY: usize = 256;

    /// A channel holding at most `capacity` undrained requests (minimum 1).
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::sync_channel(capacity);
        Self {
            submitter: OrderSubmitter {
                sender,
                capacity,
                pending: Arc::new(AtomicUsize::new(0)),
            },
            receiver: Mutex::new(receiver),
        }
    }

    /// A producer handle that can be moved to another thread.
    pub fn submitter(&self) -> OrderSubmitter {
        self.submitter.clone()
    }

    pub fn capacity(&self) -> usize {
        self.submitter.capacity
    }

    /// Approximate number of requests waiting to be drained.
    pub fn pending(&self) -> usize {
        self.submitter.pending.load(Ordering::Acquire)
    }
}

impl Default for InMemoryOrderChannel {
    fn default() -> Self {
        Self::bounded(Self::DEFAULT_CAPACITY)
    }
}

impl OrderChannel for InMemoryOrderChannel {
    fn submit(&self, request: OrderRequest) -> ShopResult<()> {
        self.submitter.submit(request)
    }

    fn try_drain_all(&self) -> Vec<OrderRequest> {
        // The receiver holds no invariant of its own; a poisoned guard is still usable.
        let receiver = self.receiver.lock().unwrap_or_else(PoisonError::into_inner);

        let mut drained = Vec::new();
        loop {
            match receiver.try_recv() {
                Ok(request) => drained.push(request),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        drop(receiver);

        self.submitter
            .pending
            .fetch_sub(drained.len(), Ordering::AcqRel);
        drained
    }
}
