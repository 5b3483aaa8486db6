//! Periodic order worker.
//!
//! Drives an [`OrderProcessor`] on a fixed interval in a background thread:
//! each tick takes a full status read of the inventory, then runs one cycle.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use shopfloor_core::ItemRecord;
use shopfloor_inventory::Inventory;

use crate::channel::OrderChannel;
use crate::processor::{CycleReport, OrderProcessor};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Thread name, also used in log lines.
    pub name: String,
    /// Time between two cycles.
    pub interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: "order-processor".to_string(),
            interval: Duration::from_secs(5),
        }
    }
}

impl WorkerConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Running totals since the worker started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    pub cycles: u64,
    pub orders_applied: u64,
    pub orders_rejected: u64,
}

/// Handle to control and join a background worker.
///
/// Dropping the handle without calling [`WorkerHandle::shutdown`] also stops
/// the worker: the closed shutdown channel wakes it at once, even mid-interval.
/// The drop does not wait for the thread to finish.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
    stats: Arc<Mutex<WorkerStats>>,
}

impl WorkerHandle {
    /// Request shutdown and wait for the worker to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }

    pub fn stats(&self) -> WorkerStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Debug)]
pub struct OrderWorker;

impl OrderWorker {
    /// Spawn the worker thread.
    ///
    /// `on_cycle` receives the status snapshot taken at the start of the tick
    /// and the report of the cycle that followed it.
    pub fn spawn<I, C, F>(
        config: WorkerConfig,
        processor: OrderProcessor<I, C>,
        mut on_cycle: F,
    ) -> io::Result<WorkerHandle>
    where
        I: Inventory + 'static,
        C: OrderChannel + 'static,
        F: FnMut(&[ItemRecord], &CycleReport) + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let stats = Arc::new(Mutex::new(WorkerStats::default()));
        let worker_stats = Arc::clone(&stats);

        let join = thread::Builder::new()
            .name(config.name.clone())
            .spawn(move || {
                worker_loop(&config, &processor, &shutdown_rx, &worker_stats, &mut on_cycle)
            })?;

        Ok(WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
            stats,
        })
    }
}

fn worker_loop<I, C, F>(
    config: &WorkerConfig,
    processor: &OrderProcessor<I, C>,
    shutdown_rx: &mpsc::Receiver<()>,
    stats: &Mutex<WorkerStats>,
    on_cycle: &mut F,
) where
    I: Inventory,
    C: OrderChannel,
    F: FnMut(&[ItemRecord], &CycleReport),
{
    let name = config.name.as_str();
    info!(worker = name, interval_ms = config.interval.as_millis() as u64, "order worker started");

    loop {
        // The shutdown channel doubles as the timer.
        match shutdown_rx.recv_timeout(config.interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        let status = processor.inventory().list();
        debug!(worker = name, items = status.len(), "inventory status read");

        let report = processor.run_cycle();
        {
            let mut s = stats.lock().unwrap_or_else(PoisonError::into_inner);
            s.cycles += 1;
            s.orders_applied += report.applied() as u64;
            s.orders_rejected += report.rejected() as u64;
        }
        if !report.is_empty() {
            info!(
                worker = name,
                applied = report.applied(),
                rejected = report.rejected(),
                "order batch processed"
            );
        }

        on_cycle(&status, &report);
    }

    info!(worker = name, "order worker stopped");
}
