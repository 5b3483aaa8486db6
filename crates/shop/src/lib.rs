//! `shopfloor`: the shop application.
//!
//! Wires the inventory store, the order channel and the order worker together
//! and exposes the customer and manager surfaces as plain library calls plus
//! text menus over any `BufRead`/`Write` pair.

pub mod config;
pub mod customer;
pub mod manager;
pub mod menu;
pub mod status;

pub use config::{ConfigError, ShopConfig, StatusFormat};
pub use customer::CustomerDesk;
pub use manager::ManagerDesk;
