//! Cross-collection search.

use hearth_core::search::{search_all, SearchIndex};
use hearth_core::storage::db::TaskFilter;
use hearth_core::{Config, HouseholdDb};

use super::{active_household, CliResult};

pub fn run(query: &str) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;

    let expenses = db.list_expenses(&household_id, None, None, None)?;
    let tasks = db.list_tasks(&household_id, &TaskFilter::default())?;
    let inventory = db.list_inventory(&household_id)?;
    let plants = db.list_plants(&household_id)?;
    let vendors = db.list_vendors(&household_id)?;
    let shopping_list = db.get_shopping_list(&household_id)?;

    let index = SearchIndex {
        expenses: &expenses,
        tasks: &tasks,
        inventory: &inventory,
        plants: &plants,
        vendors: &vendors,
        shopping_list: Some(&shopping_list),
    };

    let results = search_all(&index, query);
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
