use std::io;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use shopfloor::status::write_tick;
use shopfloor::{CustomerDesk, ManagerDesk, ShopConfig, menu};
use shopfloor_core::ItemRecord;
use shopfloor_inventory::load_file;
use shopfloor_orders::{CycleReport, InMemoryOrderChannel, OrderProcessor, OrderWorker, WorkerConfig};

fn main() -> anyhow::Result<()> {
    shopfloor_observability::init();

    let config = ShopConfig::from_env().context("invalid shop configuration")?;

    let store = Arc::new(
        load_file(&config.inventory_file, config.capacity).with_context(|| {
            format!("failed to load inventory from {}", config.inventory_file.display())
        })?,
    );
    let channel = Arc::new(InMemoryOrderChannel::bounded(config.order_queue_capacity));

    let customer = CustomerDesk::new(Arc::clone(&store), channel.submitter());
    let manager = ManagerDesk::new(Arc::clone(&store));

    let format = config.status_format;
    let worker = OrderWorker::spawn(
        WorkerConfig::default().with_interval(config.process_interval),
        OrderProcessor::new(Arc::clone(&store), Arc::clone(&channel)),
        move |status: &[ItemRecord], report: &CycleReport| {
            if let Err(err) = write_tick(&mut io::stdout().lock(), format, status, report) {
                warn!(error = %err, "failed to print inventory status");
            }
        },
    )
    .context("failed to start order worker")?;

    info!(
        items = store.len(),
        capacity = store.capacity(),
        interval_secs = config.process_interval.as_secs(),
        "shop open"
    );

    // Stdout is not held locked here so the worker can print between prompts.
    let result = menu::main_menu(
        &customer,
        &manager,
        format,
        io::stdin().lock(),
        &mut io::stdout(),
    );

    let stats = worker.stats();
    worker.shutdown();
    info!(
        cycles = stats.cycles,
        applied = stats.orders_applied,
        rejected = stats.orders_rejected,
        "shop closed"
    );

    result.context("terminal session failed")
}
