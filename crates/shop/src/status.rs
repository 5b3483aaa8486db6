//! Human-readable rendering of inventory state and order outcomes.

use std::fmt::Write as _;
use std::io::{self, Write};

use shopfloor_core::{ItemRecord, ShopError};
use shopfloor_orders::{CycleReport, OrderOutcome, OrderResult};

use crate::config::StatusFormat;

const RULE: &str = "-----------------------------";

/// Full status board: every populated slot, sold-out items included.
pub fn render_status(records: &[ItemRecord]) -> String {
    let mut out = String::from("--- Inventory Status ---\n");
    for r in records {
        let _ = writeln!(out, "{}: {} units, {} each", r.name, r.count, r.price);
    }
    out
}

/// Customer listing: items that can be bought right now.
pub fn render_available(records: &[ItemRecord]) -> String {
    let mut out = format!("Available Items:\n{RULE}\n");
    for r in records.iter().filter(|r| r.in_stock()) {
        let _ = writeln!(out, "{} - {} in stock ({} each)", r.name, r.count, r.price);
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

pub fn render_json(records: &[ItemRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

pub fn render_outcome(outcome: &OrderOutcome) -> String {
    let request = &outcome.request;
    match &outcome.result {
        OrderResult::Applied { .. } => {
            format!("Order processed: {} {} sold", request.quantity, request.item_name)
        }
        OrderResult::Rejected(ShopError::InsufficientStock { name, .. }) => {
            format!("Insufficient stock for {name}")
        }
        OrderResult::Rejected(err) => {
            format!("Order for {} rejected: {err}", request.item_name)
        }
    }
}

/// Write one worker tick: the status board (unless disabled) followed by the
/// outcome of every order processed in that tick.
pub fn write_tick<W: Write>(
    out: &mut W,
    format: StatusFormat,
    status: &[ItemRecord],
    report: &CycleReport,
) -> io::Result<()> {
    match format {
        StatusFormat::Text => write!(out, "\n{}", render_status(status))?,
        StatusFormat::Json => {
            let json = render_json(status).map_err(io::Error::other)?;
            writeln!(out, "{json}")?;
        }
        StatusFormat::Off => {}
    }
    for outcome in &report.outcomes {
        writeln!(out, "{}", render_outcome(outcome))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    use shopfloor_core::{ItemName, Price};
    use shopfloor_orders::OrderRequest;

    fn records() -> Vec<ItemRecord> {
        vec![
            ItemRecord::new(ItemName::new("apple").unwrap(), 3, Price::from_cents(50).unwrap()),
            ItemRecord::new(ItemName::new("bread").unwrap(), 0, Price::from_cents(225).unwrap()),
        ]
    }

    #[test]
    fn status_board_lists_every_slot() {
        let board = render_status(&records());
        assert!(board.contains("apple: 3 units, $0.50 each"));
        assert!(board.contains("bread: 0 units, $2.25 each"));
    }

    #[test]
    fn available_listing_hides_sold_out_items() {
        let listing = render_available(&records());
        assert!(listing.contains("apple - 3 in stock ($0.50 each)"));
        assert!(!listing.contains("bread"));
    }

    #[test]
    fn json_status_carries_price_in_cents() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&records()).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "apple");
        assert_eq!(json[0]["count"], 3);
        assert_eq!(json[1]["price"], 225);
    }

    #[test]
    fn tick_prints_status_then_outcomes() {
        let report = CycleReport {
            outcomes: vec![
                OrderOutcome {
                    request: OrderRequest::new("apple", 2),
                    result: OrderResult::Applied { remaining: 1 },
                },
                OrderOutcome {
                    request: OrderRequest::new("apple", 9),
                    result: OrderResult::Rejected(ShopError::insufficient("apple", 9, 1)),
                },
                OrderOutcome {
                    request: OrderRequest::new("kiwi", 1),
                    result: OrderResult::Rejected(ShopError::not_found("kiwi")),
                },
            ],
        };

        let mut out = Vec::new();
        write_tick(&mut out, StatusFormat::Text, &records(), &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        let status_at = text.find("--- Inventory Status ---").unwrap();
        let order_at = text.find("Order processed: 2 apple sold").unwrap();
        assert!(status_at < order_at);
        assert!(text.contains("Insufficient stock for apple"));
        assert!(text.contains("Order for kiwi rejected: item not found: kiwi"));
    }

    #[test]
    fn tick_without_board_prints_only_outcomes() {
        let mut out = Vec::new();
        write_tick(&mut out, StatusFormat::Off, &records(), &CycleReport::default()).unwrap();
        assert!(out.is_empty());
    }
}
