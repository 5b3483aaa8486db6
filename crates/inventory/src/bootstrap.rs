//! Inventory bootstrap from a flat text source.
//!
//! One item per line: `name count price`, whitespace separated. Blank lines
//! and `#` comments are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use shopfloor_core::{ItemName, ItemRecord, Price};

use crate::store::InventoryStore;

/// Startup failure while populating the store. Always fatal.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to read inventory source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed inventory line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("duplicate item name in inventory source: {name}")]
    DuplicateItem { name: String },
}

/// Parse every record in `input`, in order.
pub fn parse_records(input: &str) -> Result<Vec<ItemRecord>, BootstrapError> {
    let mut records = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let malformed = |reason: String| BootstrapError::Malformed { line, reason };

        let fields: Vec<&str> = text.split_whitespace().collect();
        let [name, count, price] = fields.as_slice() else {
            return Err(malformed(format!(
                "expected 3 fields (name count price), found {}",
                fields.len()
            )));
        };

        let name = ItemName::new(*name).map_err(|e| malformed(e.to_string()))?;
        let count = count
            .parse::<u64>()
            .map_err(|_| malformed(format!("invalid count '{count}'")))?;
        let price = price
            .parse::<Price>()
            .map_err(|e| malformed(e.to_string()))?;

        records.push(ItemRecord::new(name, count, price));
    }

    Ok(records)
}

/// Read `path` and build a store with `capacity` slots from it.
pub fn load_file(path: impl AsRef<Path>, capacity: usize) -> Result<InventoryStore, BootstrapError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| BootstrapError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let store = InventoryStore::from_records(capacity, parse_records(&input)?)?;
    info!(path = %path.display(), items = store.len(), capacity, "inventory loaded");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triples_and_skips_comments() {
        let input = "# name count price\napple 10 0.50\n\nbread 3 2.25\n";
        let records = parse_records(input).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_str(), "apple");
        assert_eq!(records[0].count, 10);
        assert_eq!(records[0].price.cents(), 50);
        assert_eq!(records[1].price.cents(), 225);
    }

    #[test]
    fn malformed_lines_report_their_line_number() {
        let err = parse_records("apple 10 0.50\nbread three 1.00\n").unwrap_err();
        assert!(matches!(err, BootstrapError::Malformed { line: 2, .. }));

        let err = parse_records("apple 10\n").unwrap_err();
        assert!(matches!(err, BootstrapError::Malformed { line: 1, .. }));

        let err = parse_records("apple -1 0.50\n").unwrap_err();
        assert!(matches!(err, BootstrapError::Malformed { line: 1, .. }));

        let err = parse_records("apple 1 -0.50\n").unwrap_err();
        assert!(matches!(err, BootstrapError::Malformed { line: 1, .. }));
    }

    #[test]
    fn short_input_leaves_slots_unpopulated() {
        let dir = std::env::temp_dir().join(format!("shopfloor-bootstrap-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("inventory.txt");
        fs::write(&path, "apple 10 0.50\nbread 3 2.25\n").unwrap();

        let store = load_file(&path, 10).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.capacity(), 10);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file("/definitely/not/here/inventory.txt", 10).unwrap_err();
        assert!(matches!(err, BootstrapError::Io { .. }));
    }

    #[test]
    fn duplicate_names_fail_the_load() {
        let records = parse_records("apple 1 1\napple 2 2\n").unwrap();
        let err = InventoryStore::from_records(10, records).unwrap_err();
        assert!(matches!(err, BootstrapError::DuplicateItem { .. }));
    }
}
