//! Asynchronous order intake.
//!
//! Customers submit [`OrderRequest`]s into an [`OrderChannel`] without waiting
//! for the shop. The [`OrderProcessor`] drains the channel on the shop's own
//! schedule (usually from an [`OrderWorker`]) and applies each request through
//! the same reserve-and-deduct operation the synchronous path uses.

pub mod channel;
pub mod processor;
pub mod request;
pub mod worker;

pub use channel::{InMemoryOrderChannel, OrderChannel, OrderSubmitter};
pub use processor::{CycleReport, OrderOutcome, OrderProcessor, OrderResult, ProcessorState};
pub use request::{OrderId, OrderRequest};
pub use worker::{OrderWorker, WorkerConfig, WorkerHandle, WorkerStats};
