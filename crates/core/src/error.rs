//! Shop error model.

use thiserror::Error;

/// Result type used across the shop layers.
pub type ShopResult<T> = Result<T, ShopError>;

/// Caller-visible failure of an inventory or order-intake operation.
///
/// Every variant is recoverable: it is returned to the immediate caller (a
/// desk, a menu, or the order processor loop) and never aborts the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    /// No populated slot carries this name.
    #[error("item not found: {name}")]
    ItemNotFound { name: String },

    /// The requested quantity exceeds the stock on hand. Nothing was deducted.
    #[error("insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: u64,
        available: u64,
    },

    /// The bounded order channel is at capacity.
    #[error("order channel is full (capacity {capacity})")]
    ChannelFull { capacity: usize },

    /// The consuming side of the order channel is gone.
    #[error("order channel is closed")]
    ChannelClosed,

    /// An argument was out of range (non-positive quantity, negative price or delta).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ShopError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ItemNotFound { name: name.into() }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn insufficient(name: impl Into<String>, requested: u64, available: u64) -> Self {
        Self::InsufficientStock {
            name: name.into(),
            requested,
            available,
        }
    }

    /// Short machine-friendly label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ShopError::ItemNotFound { .. } => "item_not_found",
            ShopError::InsufficientStock { .. } => "insufficient_stock",
            ShopError::ChannelFull { .. } => "channel_full",
            ShopError::ChannelClosed => "channel_closed",
            ShopError::InvalidArgument(_) => "invalid_argument",
        }
    }
}
