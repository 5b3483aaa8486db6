//! End-to-end flow: bootstrap → desks → queued orders → processor → status.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;

use shopfloor::status::render_status;
use shopfloor::{CustomerDesk, ManagerDesk};
use shopfloor_core::{Price, ShopError};
use shopfloor_inventory::{Inventory, InventoryStore, load_file};
use shopfloor_orders::{InMemoryOrderChannel, OrderProcessor, OrderResult};

const INVENTORY: &str = "\
# name count price
apple 10 0.50
bread 4 2.25
milk 0 1.10
";

fn write_inventory(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shopfloor-flow-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("inventory.txt");
    fs::write(&path, INVENTORY).unwrap();
    path
}

fn open_shop(tag: &str) -> Arc<InventoryStore> {
    let path = write_inventory(tag);
    let store = load_file(&path, 10).unwrap();
    fs::remove_dir_all(path.parent().unwrap()).unwrap();
    Arc::new(store)
}

#[test]
fn queued_and_direct_orders_converge_on_one_store() {
    let store = open_shop("converge");
    let channel = Arc::new(InMemoryOrderChannel::bounded(16));
    let customer = CustomerDesk::new(Arc::clone(&store), channel.submitter());
    let manager = ManagerDesk::new(Arc::clone(&store));
    let processor = OrderProcessor::new(Arc::clone(&store), Arc::clone(&channel));

    // Manager restocks milk, customer buys bread directly.
    assert_eq!(manager.restock("milk", 3).unwrap(), 3);
    assert_eq!(customer.place_order("bread", 1).unwrap(), 3);

    // Three queued orders; the middle one cannot be filled.
    customer.submit_order("apple", 4).unwrap();
    customer.submit_order("bread", 50).unwrap();
    customer.submit_order("milk", 3).unwrap();

    let report = processor.run_cycle();
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.outcomes[0].result, OrderResult::Applied { remaining: 6 });
    assert_eq!(
        report.outcomes[1].result,
        OrderResult::Rejected(ShopError::insufficient("bread", 50, 3))
    );
    assert_eq!(report.outcomes[2].result, OrderResult::Applied { remaining: 0 });

    let names: Vec<_> = customer
        .available_items()
        .into_iter()
        .map(|r| r.name.to_string())
        .collect();
    assert_eq!(names, ["apple", "bread"]);

    let board = render_status(&manager.status());
    assert!(board.contains("apple: 6 units, $0.50 each"));
    assert!(board.contains("bread: 3 units, $2.25 each"));
    assert!(board.contains("milk: 0 units, $1.10 each"));

    assert!(processor.run_cycle().is_empty());
}

#[test]
fn reprice_does_not_change_queued_deductions() {
    let store = open_shop("reprice");
    let channel = Arc::new(InMemoryOrderChannel::bounded(4));
    let customer = CustomerDesk::new(Arc::clone(&store), channel.submitter());
    let manager = ManagerDesk::new(Arc::clone(&store));
    let processor = OrderProcessor::new(Arc::clone(&store), Arc::clone(&channel));

    customer.submit_order("apple", 2).unwrap();
    manager.reprice("apple", Price::from_cents(99).unwrap()).unwrap();

    let report = processor.run_cycle();
    assert_eq!(report.outcomes[0].request.submitted_price, Some(Price::from_cents(50).unwrap()));
    assert_eq!(report.outcomes[0].result, OrderResult::Applied { remaining: 8 });
    assert_eq!(store.find("apple").unwrap().record.price.cents(), 99);
}

#[test]
fn racing_customers_and_processor_never_oversell() {
    let store = open_shop("race");
    let channel = Arc::new(InMemoryOrderChannel::bounded(1_000));
    let processor = Arc::new(OrderProcessor::new(Arc::clone(&store), Arc::clone(&channel)));
    let barrier = Arc::new(Barrier::new(5));

    let buyers: Vec<_> = (0..4)
        .map(|i| {
            let customer = CustomerDesk::new(Arc::clone(&store), channel.submitter());
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut bought = 0u64;
                for _ in 0..10 {
                    if i % 2 == 0 {
                        if customer.place_order("apple", 1).is_ok() {
                            bought += 1;
                        }
                    } else {
                        customer.submit_order("apple", 1).unwrap();
                    }
                }
                bought
            })
        })
        .collect();

    let drainer = {
        let processor = Arc::clone(&processor);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            (0..50).map(|_| processor.run_cycle().applied() as u64).sum::<u64>()
        })
    };

    let direct: u64 = buyers.into_iter().map(|b| b.join().unwrap()).sum();
    let mut queued = drainer.join().unwrap();
    queued += processor.run_cycle().applied() as u64;

    let left = store.find("apple").unwrap().record.count;
    assert_eq!(direct + queued + left, 10);
    assert_eq!(left, 0);
}
