//! Inventory commands.

use chrono::Utc;
use clap::Subcommand;
use hearth_core::inventory::{critical_items, low_stock};
use hearth_core::{Config, HouseholdDb, InventoryItem, ItemCategory};

use super::{active_household, active_user, CliResult};

#[derive(Subcommand)]
pub enum InventoryAction {
    /// Track a new item
    Add {
        /// Item name
        name: String,
        /// Category: groceries, cleaning, personal or other
        #[arg(long, default_value = "other")]
        category: String,
        /// Current quantity
        #[arg(long)]
        quantity: Option<u32>,
        /// Low-stock threshold
        #[arg(long)]
        min: Option<u32>,
        /// Unit label (e.g. "rolls", "bottles")
        #[arg(long)]
        unit: Option<String>,
    },
    /// List items
    List {
        /// Only low or out-of-stock items
        #[arg(long)]
        low: bool,
    },
    /// Consume one unit of an item
    Use {
        /// Item ID
        id: String,
    },
    /// Restock an item
    Restock {
        /// Item ID
        id: String,
        /// Units added
        #[arg(long, default_value = "1")]
        amount: u32,
    },
    /// Set an item's quantity directly
    Set {
        /// Item ID
        id: String,
        /// New quantity
        quantity: u32,
    },
    /// Delete an item
    Delete {
        /// Item ID
        id: String,
    },
    /// Track the starter set of common household items
    Seed,
}

pub fn run(action: InventoryAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;

    match action {
        InventoryAction::Add {
            name,
            category,
            quantity,
            min,
            unit,
        } => {
            let user = active_user(&config)?;
            let mut item = InventoryItem::new(
                &household_id,
                name,
                ItemCategory::parse(&category),
                quantity,
                min,
                user,
            );
            item.unit = unit;
            db.create_inventory_item(&item)?;
            println!("Item tracked: {}", item.id);
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        InventoryAction::List { low } => {
            let items = db.list_inventory(&household_id)?;
            if low {
                println!("{}", serde_json::to_string_pretty(&low_stock(&items))?);
            } else {
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
        }
        InventoryAction::Use { id } => {
            let mut item = db
                .get_inventory_item(&id)?
                .ok_or(format!("Item not found: {id}"))?;
            item.consume_one(Utc::now());
            db.update_inventory_item(&item)?;
            println!("{}: {} left ({})", item.name, fmt_quantity(&item), item.status);
        }
        InventoryAction::Restock { id, amount } => {
            let mut item = db
                .get_inventory_item(&id)?
                .ok_or(format!("Item not found: {id}"))?;
            item.restock(amount, Utc::now());
            db.update_inventory_item(&item)?;
            println!("{}: {} in stock ({})", item.name, fmt_quantity(&item), item.status);
        }
        InventoryAction::Set { id, quantity } => {
            let mut item = db
                .get_inventory_item(&id)?
                .ok_or(format!("Item not found: {id}"))?;
            item.set_quantity(Some(quantity), Utc::now());
            db.update_inventory_item(&item)?;
            println!("{}: {} in stock ({})", item.name, fmt_quantity(&item), item.status);
        }
        InventoryAction::Delete { id } => {
            if db.delete_inventory_item(&id)? {
                println!("Item deleted: {id}");
            } else {
                println!("Item not found: {id}");
            }
        }
        InventoryAction::Seed => {
            let user = active_user(&config)?;
            let starters = critical_items();
            for (name, category, min) in &starters {
                let item = InventoryItem::new(&household_id, *name, *category, None, Some(*min), &user);
                db.create_inventory_item(&item)?;
            }
            println!("Tracking {} starter items", starters.len());
        }
    }
    Ok(())
}

fn fmt_quantity(item: &InventoryItem) -> String {
    match item.quantity {
        Some(q) => q.to_string(),
        None => "?".to_string(),
    }
}
