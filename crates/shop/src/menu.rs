//! Numbered text menus for the customer and manager roles.
//!
//! Input is read as whitespace-separated tokens, so answers may be typed one
//! per line or several on one line. End of input leaves the current menu.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use shopfloor_core::{Price, ShopError};
use shopfloor_inventory::Inventory;

use crate::config::StatusFormat;
use crate::customer::CustomerDesk;
use crate::manager::ManagerDesk;
use crate::status::{render_available, render_json, render_status};

/// Whitespace-token reader over a line-oriented input.
#[derive(Debug)]
pub struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn ask<W: Write>(&mut self, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;
        self.next_token()
    }
}

/// User-facing wording for an operation failure.
pub fn describe(err: &ShopError) -> String {
    match err {
        ShopError::ItemNotFound { .. } => "Item not found in inventory.".to_string(),
        ShopError::InsufficientStock {
            name, available, ..
        } => format!("Not enough stock available for {name}. Only {available} left."),
        ShopError::ChannelFull { .. } => {
            "The shop is busy; too many queued orders. Try again later.".to_string()
        }
        ShopError::ChannelClosed => "The shop is not accepting queued orders.".to_string(),
        ShopError::InvalidArgument(msg) => format!("Invalid input: {msg}."),
    }
}

/// Ask for a whole number. `Ok(None)` means end of input; an unparseable
/// answer is reported and yields `Ok(Some(None))`.
fn ask_number<R: BufRead, W: Write>(
    tokens: &mut Tokens<R>,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<Option<i64>>> {
    let Some(raw) = tokens.ask(out, prompt)? else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(n) => Ok(Some(Some(n))),
        Err(_) => {
            writeln!(out, "'{raw}' is not a whole number.")?;
            Ok(Some(None))
        }
    }
}

/// Customer loop: view, order now, queue an order, exit.
pub fn customer_menu<I, R, W>(
    desk: &CustomerDesk<I>,
    tokens: &mut Tokens<R>,
    out: &mut W,
) -> io::Result<()>
where
    I: Inventory,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out, "\n--- Customer Menu ---")?;
        writeln!(out, "1. View available items")?;
        writeln!(out, "2. Place an order")?;
        writeln!(out, "3. Queue an order for the shop")?;
        writeln!(out, "4. Exit")?;
        let Some(choice) = tokens.ask(out, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => write!(out, "\n{}", render_available(&desk.available_items()))?,
            "2" | "3" => {
                let Some(name) = tokens.ask(out, "Enter item name: ")? else {
                    return Ok(());
                };
                let Some(quantity) = ask_number(tokens, out, "Enter quantity: ")? else {
                    return Ok(());
                };
                let Some(quantity) = quantity else {
                    continue;
                };

                if choice == "2" {
                    match desk.place_order(&name, quantity) {
                        Ok(_) => writeln!(out, "Order placed: {quantity} {name}")?,
                        Err(err) => writeln!(out, "{}", describe(&err))?,
                    }
                } else {
                    match desk.submit_order(&name, quantity) {
                        Ok(id) => writeln!(out, "Order {id} queued: {quantity} {name}")?,
                        Err(err) => writeln!(out, "{}", describe(&err))?,
                    }
                }
            }
            "4" => return Ok(()),
            other => writeln!(out, "Unknown choice '{other}'.")?,
        }
    }
}

/// Manager loop: restock, reprice, exit.
pub fn manager_menu<I, R, W>(
    desk: &ManagerDesk<I>,
    tokens: &mut Tokens<R>,
    out: &mut W,
) -> io::Result<()>
where
    I: Inventory,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out, "\n--- Manager Menu ---")?;
        writeln!(out, "1. Restock an item")?;
        writeln!(out, "2. Update item price")?;
        writeln!(out, "3. Exit")?;
        let Some(choice) = tokens.ask(out, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(name) = tokens.ask(out, "Enter item name: ")? else {
                    return Ok(());
                };
                let Some(delta) = ask_number(tokens, out, "Enter quantity to add: ")? else {
                    return Ok(());
                };
                let Some(delta) = delta else {
                    continue;
                };
                match desk.restock(&name, delta) {
                    Ok(count) => {
                        writeln!(out, "Restocked {name} by {delta} units. New stock: {count}")?
                    }
                    Err(err) => writeln!(out, "{}", describe(&err))?,
                }
            }
            "2" => {
                let Some(name) = tokens.ask(out, "Enter item name: ")? else {
                    return Ok(());
                };
                let Some(raw) = tokens.ask(out, "Enter new price: ")? else {
                    return Ok(());
                };
                let result = raw
                    .parse::<Price>()
                    .and_then(|price| desk.reprice(&name, price).map(|_| price));
                match result {
                    Ok(price) => writeln!(out, "Updated {name} price to {price}")?,
                    Err(err) => writeln!(out, "{}", describe(&err))?,
                }
            }
            "3" => return Ok(()),
            other => writeln!(out, "Unknown choice '{other}'.")?,
        }
    }
}

/// Top-level role picker for a single-terminal session.
pub fn main_menu<I, R, W>(
    customer: &CustomerDesk<I>,
    manager: &ManagerDesk<I>,
    format: StatusFormat,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    I: Inventory,
    R: BufRead,
    W: Write,
{
    let mut tokens = Tokens::new(input);
    loop {
        writeln!(out, "\n--- Shop ---")?;
        writeln!(out, "1. Customer")?;
        writeln!(out, "2. Manager")?;
        writeln!(out, "3. Inventory status")?;
        writeln!(out, "4. Exit")?;
        let Some(choice) = tokens.ask(out, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => customer_menu(customer, &mut tokens, out)?,
            "2" => manager_menu(manager, &mut tokens, out)?,
            "3" => {
                let status = manager.status();
                match format {
                    StatusFormat::Json => {
                        let json = render_json(&status).map_err(io::Error::other)?;
                        writeln!(out, "{json}")?;
                    }
                    StatusFormat::Text | StatusFormat::Off => {
                        write!(out, "\n{}", render_status(&status))?
                    }
                }
            }
            "4" => return Ok(()),
            other => writeln!(out, "Unknown choice '{other}'.")?,
        }
    }
}
