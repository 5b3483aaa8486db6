//! `shopfloor-core`: shared vocabulary of the shop.
//!
//! This crate contains **pure domain** primitives (no locking, no IO): the
//! error taxonomy, validated value objects, and the item record itself.

pub mod error;
pub mod item;
pub mod value_object;

pub use error::{ShopError, ShopResult};
pub use item::ItemRecord;
pub use value_object::{ItemName, Price};
