//! Shopping list commands.

use chrono::Utc;
use clap::Subcommand;
use hearth_core::inventory::low_stock;
use hearth_core::shopping::{frequent_items, purchase_suggestions};
use hearth_core::{Config, HouseholdDb, ShoppingItem};

use super::{active_household, active_user, CliResult};

#[derive(Subcommand)]
pub enum ShoppingAction {
    /// Add an item to the list
    Add {
        /// Item name
        name: String,
        /// Quantity
        #[arg(long)]
        quantity: Option<u32>,
    },
    /// Show the list
    List,
    /// Check or uncheck an item
    Toggle {
        /// Item ID
        id: String,
    },
    /// Remove an item
    Remove {
        /// Item ID
        id: String,
    },
    /// Remove every checked item
    ClearChecked,
    /// Add every low or out-of-stock inventory item to the list
    AddLow,
    /// Suggest items from grocery expense history
    Suggest,
    /// Most frequently bought items
    Frequent,
}

pub fn run(action: ShoppingAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;

    match action {
        ShoppingAction::Add { name, quantity } => {
            let user = active_user(&config)?;
            let mut item = ShoppingItem::new(name, user);
            item.quantity = quantity;
            db.add_shopping_item(&household_id, &item)?;
            println!("Added: {} ({})", item.name, item.id);
        }
        ShoppingAction::List => {
            let list = db.get_shopping_list(&household_id)?;
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        ShoppingAction::Toggle { id } => {
            let user = active_user(&config)?;
            match db.toggle_shopping_item(&id, &user, Utc::now())? {
                Some(true) => println!("Checked: {id}"),
                Some(false) => println!("Unchecked: {id}"),
                None => println!("Item not found: {id}"),
            }
        }
        ShoppingAction::Remove { id } => {
            if db.remove_shopping_item(&id)? {
                println!("Removed: {id}");
            } else {
                println!("Item not found: {id}");
            }
        }
        ShoppingAction::ClearChecked => {
            let removed = db.clear_checked_items(&household_id)?;
            println!("Removed {removed} checked items");
        }
        ShoppingAction::AddLow => {
            let user = active_user(&config)?;
            let list = db.get_shopping_list(&household_id)?;
            let mut added = 0;
            for low in low_stock(&db.list_inventory(&household_id)?) {
                // Skip items already on the list.
                if list.items.iter().any(|i| i.name.eq_ignore_ascii_case(&low.name)) {
                    continue;
                }
                let item = ShoppingItem::new(&low.name, &user);
                db.add_shopping_item(&household_id, &item)?;
                added += 1;
            }
            println!("Added {added} low-stock items");
        }
        ShoppingAction::Suggest => {
            let expenses = db.list_expenses(&household_id, None, None, None)?;
            for suggestion in purchase_suggestions(&expenses) {
                println!("{suggestion}");
            }
        }
        ShoppingAction::Frequent => {
            let expenses = db.list_expenses(&household_id, None, None, None)?;
            for (name, count) in frequent_items(&expenses) {
                println!("{name} ({count})");
            }
        }
    }
    Ok(())
}
