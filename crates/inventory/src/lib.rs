//! Inventory store: the single shared table of item records and the
//! operations that mutate it.
//!
//! Every read and write goes through one exclusive lock. Operations are
//! linearizable with respect to that lock; a check-then-act step such as
//! reserve-and-deduct happens inside a single critical section.

pub mod bootstrap;
pub mod operations;
pub mod store;

pub use bootstrap::{BootstrapError, load_file, parse_records};
pub use operations::Inventory;
pub use store::{InventoryStore, Slot};
