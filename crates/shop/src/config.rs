//! Configuration loading and representation.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const INVENTORY_FILE_VAR: &str = "SHOPFLOOR_INVENTORY_FILE";
pub const CAPACITY_VAR: &str = "SHOPFLOOR_CAPACITY";
pub const ORDER_QUEUE_CAPACITY_VAR: &str = "SHOPFLOOR_ORDER_QUEUE_CAPACITY";
pub const PROCESS_INTERVAL_VAR: &str = "SHOPFLOOR_PROCESS_INTERVAL_SECS";
pub const STATUS_FORMAT_VAR: &str = "SHOPFLOOR_STATUS_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// How the shop prints its periodic status board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StatusFormat {
    #[default]
    Text,
    Json,
    /// No status board on ticks; order outcomes are still printed.
    Off,
}

impl FromStr for StatusFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(StatusFormat::Text),
            "json" => Ok(StatusFormat::Json),
            "off" => Ok(StatusFormat::Off),
            _ => Err("expected one of: text, json, off".to_string()),
        }
    }
}

/// Shop process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Bootstrap source for the inventory.
    pub inventory_file: PathBuf,
    /// Number of inventory slots.
    pub capacity: usize,
    /// Maximum number of undrained queued orders.
    pub order_queue_capacity: usize,
    /// Time between two order-processing ticks.
    pub process_interval: Duration,
    pub status_format: StatusFormat,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            inventory_file: PathBuf::from("inventory.txt"),
            capacity: 10,
            order_queue_capacity: 256,
            process_interval: Duration::from_secs(5),
            status_format: StatusFormat::Text,
        }
    }
}

impl ShopConfig {
    /// Defaults overridden by `SHOPFLOOR_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(INVENTORY_FILE_VAR) {
            config.inventory_file = PathBuf::from(path);
        }
        if let Some(v) = lookup(CAPACITY_VAR) {
            config.capacity = parse_positive(CAPACITY_VAR, &v)?;
        }
        if let Some(v) = lookup(ORDER_QUEUE_CAPACITY_VAR) {
            config.order_queue_capacity = parse_positive(ORDER_QUEUE_CAPACITY_VAR, &v)?;
        }
        if let Some(v) = lookup(PROCESS_INTERVAL_VAR) {
            config.process_interval =
                Duration::from_secs(parse_positive::<u64>(PROCESS_INTERVAL_VAR, &v)?);
        }
        if let Some(v) = lookup(STATUS_FORMAT_VAR) {
            config.status_format = v.parse::<StatusFormat>().map_err(|reason| ConfigError::Invalid {
                var: STATUS_FORMAT_VAR,
                value: v.clone(),
                reason,
            })?;
        }

        Ok(config)
    }

    pub fn with_inventory_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.inventory_file = path.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_order_queue_capacity(mut self, capacity: usize) -> Self {
        self.order_queue_capacity = capacity;
        self
    }

    pub fn with_process_interval(mut self, interval: Duration) -> Self {
        self.process_interval = interval;
        self
    }

    pub fn with_status_format(mut self, format: StatusFormat) -> Self {
        self.status_format = format;
        self
    }
}

/// Parse a whole number of at least 1 straight into the target type, so
/// out-of-range values are rejected rather than truncated.
fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + From<u8>,
{
    let invalid = |reason: &str| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    };
    match value.trim().parse::<T>() {
        Ok(n) if n == T::from(0) => Err(invalid("must be at least 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(invalid("not a whole number in range")),
    }
}
