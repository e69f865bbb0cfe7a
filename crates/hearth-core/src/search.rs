//! Case-insensitive substring search across every household collection.

use serde::Serialize;

use crate::expense::Expense;
use crate::inventory::InventoryItem;
use crate::plants::Plant;
use crate::shopping::ShoppingList;
use crate::task::Task;
use crate::vendor::Vendor;

/// Which collection a result came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Expense,
    Task,
    Inventory,
    Plant,
    Vendor,
    Shopping,
}

/// One search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub kind: ResultKind,
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

/// Everything searchable, already fetched by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchIndex<'a> {
    pub expenses: &'a [Expense],
    pub tasks: &'a [Task],
    pub inventory: &'a [InventoryItem],
    pub plants: &'a [Plant],
    pub vendors: &'a [Vendor],
    pub shopping_list: Option<&'a ShoppingList>,
}

/// Search every collection for `query`. Matching is case-insensitive
/// substring containment; an empty or whitespace-only query returns
/// nothing rather than everything.
pub fn search_all(index: &SearchIndex<'_>, query: &str) -> Vec<SearchResult> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    let matches = |field: &str| field.to_lowercase().contains(&term);
    let mut results = Vec::new();

    for expense in index.expenses {
        if matches(&expense.description)
            || matches(expense.category.as_str())
            || expense.amount.to_string().contains(&term)
        {
            results.push(SearchResult {
                kind: ResultKind::Expense,
                id: expense.id.clone(),
                title: expense.description.clone(),
                description: Some(format!("{:.2} {} - {}", expense.amount, expense.currency, expense.category)),
            });
        }
    }

    for task in index.tasks {
        let in_description = task.description.as_deref().map_or(false, matches);
        if matches(&task.title) || in_description || matches(task.room.as_str()) {
            results.push(SearchResult {
                kind: ResultKind::Task,
                id: task.id.clone(),
                title: task.title.clone(),
                description: task
                    .description
                    .clone()
                    .or_else(|| Some(format!("{} - {}", task.room, task.frequency))),
            });
        }
    }

    for item in index.inventory {
        if matches(&item.name) || matches(item.category.as_str()) || matches(item.status.as_str()) {
            results.push(SearchResult {
                kind: ResultKind::Inventory,
                id: item.id.clone(),
                title: item.name.clone(),
                description: Some(format!("{} - {}", item.category.as_str(), item.status)),
            });
        }
    }

    for plant in index.plants {
        if matches(&plant.name) || matches(&plant.location) {
            results.push(SearchResult {
                kind: ResultKind::Plant,
                id: plant.id.clone(),
                title: plant.name.clone(),
                description: Some(plant.location.clone()),
            });
        }
    }

    for vendor in index.vendors {
        if matches(&vendor.name) || matches(vendor.vendor_type.as_str()) {
            results.push(SearchResult {
                kind: ResultKind::Vendor,
                id: vendor.id.clone(),
                title: vendor.name.clone(),
                description: Some(vendor.vendor_type.to_string()),
            });
        }
    }

    if let Some(list) = index.shopping_list {
        for item in &list.items {
            if matches(&item.name) {
                results.push(SearchResult {
                    kind: ResultKind::Shopping,
                    id: item.id.clone(),
                    title: item.name.clone(),
                    description: item.quantity.map(|q| format!("x{q}")),
                });
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseCategory;
    use crate::inventory::ItemCategory;
    use crate::task::{Frequency, Room};
    use crate::vendor::VendorType;
    use chrono::NaiveDate;

    fn make_index_data() -> (Vec<Expense>, Vec<Task>, Vec<InventoryItem>, Vec<Plant>, Vec<Vendor>, ShoppingList) {
        let expenses = vec![Expense::new_equal_split(
            "hh-1",
            24.5,
            "EUR",
            ExpenseCategory::Groceries,
            "ana",
            &["ana".to_string()],
            "Weekly milk run",
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            "ana",
        )];
        let tasks = vec![Task::new("hh-1", "Clean the oven", Room::Kitchen, Frequency::Monthly, "ana")];
        let inventory = vec![InventoryItem::new(
            "hh-1",
            "Dish soap",
            ItemCategory::Cleaning,
            Some(2),
            Some(1),
            "ana",
        )];
        let plants = vec![Plant::new("hh-1", "Monstera", "Living room", 7, "ana")];
        let vendors = vec![Vendor::new("hh-1", "City Power", VendorType::Utility, "ana")];
        let mut list = ShoppingList::new("hh-1");
        list.add("Olive oil", "ana");
        (expenses, tasks, inventory, plants, vendors, list)
    }

    #[test]
    fn empty_query_returns_nothing() {
        let (expenses, tasks, inventory, plants, vendors, list) = make_index_data();
        let index = SearchIndex {
            expenses: &expenses,
            tasks: &tasks,
            inventory: &inventory,
            plants: &plants,
            vendors: &vendors,
            shopping_list: Some(&list),
        };
        assert!(search_all(&index, "").is_empty());
        assert!(search_all(&index, "   ").is_empty());
    }

    #[test]
    fn matches_are_case_insensitive_across_collections() {
        let (expenses, tasks, inventory, plants, vendors, list) = make_index_data();
        let index = SearchIndex {
            expenses: &expenses,
            tasks: &tasks,
            inventory: &inventory,
            plants: &plants,
            vendors: &vendors,
            shopping_list: Some(&list),
        };

        let hits = search_all(&index, "MILK");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, ResultKind::Expense);

        let hits = search_all(&index, "oven");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, ResultKind::Task);

        let hits = search_all(&index, "soap");
        assert_eq!(hits[0].kind, ResultKind::Inventory);

        let hits = search_all(&index, "living");
        assert_eq!(hits[0].kind, ResultKind::Plant);

        let hits = search_all(&index, "power");
        assert_eq!(hits[0].kind, ResultKind::Vendor);

        let hits = search_all(&index, "olive");
        assert_eq!(hits[0].kind, ResultKind::Shopping);
    }

    #[test]
    fn task_room_and_expense_category_match() {
        let (expenses, tasks, ..) = make_index_data();
        let index = SearchIndex {
            expenses: &expenses,
            tasks: &tasks,
            ..Default::default()
        };

        let hits = search_all(&index, "kitchen");
        assert!(hits.iter().any(|h| h.kind == ResultKind::Task));

        let hits = search_all(&index, "groceries");
        assert!(hits.iter().any(|h| h.kind == ResultKind::Expense));
    }
}
