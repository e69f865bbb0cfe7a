//! Shared shopping list, one per household.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::expense::{Expense, ExpenseCategory};

/// A single entry on the shopping list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Unique identifier
    pub id: String,
    /// Item name
    pub name: String,
    /// Optional quantity
    pub quantity: Option<u32>,
    /// Member who added the item
    pub added_by: String,
    /// When the item was added
    pub added_at: DateTime<Utc>,
    /// Whether the item has been bought
    pub checked: bool,
    /// Member who checked the item off
    pub checked_by: Option<String>,
    /// When the item was checked off
    pub checked_at: Option<DateTime<Utc>>,
}

impl ShoppingItem {
    /// Create a new unchecked item.
    pub fn new(name: impl Into<String>, added_by: impl Into<String>) -> Self {
        ShoppingItem {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            quantity: None,
            added_by: added_by.into(),
            added_at: Utc::now(),
            checked: false,
            checked_by: None,
            checked_at: None,
        }
    }

    /// Flip the checked state; records who and when on check, clears both
    /// on uncheck.
    pub fn toggle(&mut self, member: &str, now: DateTime<Utc>) {
        if self.checked {
            self.checked = false;
            self.checked_by = None;
            self.checked_at = None;
        } else {
            self.checked = true;
            self.checked_by = Some(member.to_string());
            self.checked_at = Some(now);
        }
    }
}

/// The household shopping list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Unique identifier
    pub id: String,
    /// Owning household
    pub household_id: String,
    /// List entries
    pub items: Vec<ShoppingItem>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    /// Create an empty list for a household.
    pub fn new(household_id: impl Into<String>) -> Self {
        let now = Utc::now();
        ShoppingList {
            id: uuid::Uuid::new_v4().to_string(),
            household_id: household_id.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a new unchecked item and return its id.
    pub fn add(&mut self, name: impl Into<String>, added_by: impl Into<String>) -> String {
        let item = ShoppingItem::new(name, added_by);
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = Utc::now();
        id
    }

    /// Toggle the item with `id`; returns false when no such item exists.
    pub fn toggle(&mut self, id: &str, member: &str, now: DateTime<Utc>) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.toggle(member, now);
                self.updated_at = now;
                true
            }
            None => false,
        }
    }

    /// Remove the item with `id`; returns false when no such item exists.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Drop every checked item, returning how many were removed.
    pub fn clear_checked(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !i.checked);
        let removed = before - self.items.len();
        if removed > 0 {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// True when the list has items and every one is checked.
    pub fn all_checked(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.checked)
    }
}

/// Common grocery words recognized in expense descriptions.
const GROCERY_KEYWORDS: &[&str] = &[
    "milk", "bread", "pasta", "rice", "cheese", "eggs", "butter",
    "tomatoes", "onions", "garlic", "potatoes", "chicken", "beef",
    "fish", "salmon", "yogurt", "cereal", "coffee", "tea", "sugar",
    "salt", "pepper", "oil", "vinegar", "flour", "bananas", "apples",
    "oranges", "lettuce", "carrots", "cucumber", "peppers", "mushrooms",
];

/// Item suggestions extracted from grocery expense descriptions: known
/// keywords plus short descriptions that look like a single item. At most
/// 20 suggestions, first-seen order.
pub fn purchase_suggestions(expenses: &[Expense]) -> Vec<String> {
    let mut seen = Vec::new();
    let mut push_unique = |name: String, seen: &mut Vec<String>| {
        if !seen.contains(&name) {
            seen.push(name);
        }
    };

    for expense in expenses.iter().filter(|e| e.category == ExpenseCategory::Groceries) {
        let description = expense.description.to_lowercase();
        for keyword in GROCERY_KEYWORDS {
            if description.contains(keyword) {
                push_unique(capitalize(keyword), &mut seen);
            }
        }
        // Short descriptions are likely a single item themselves.
        if description.len() < 30 && description.split_whitespace().count() <= 3 {
            push_unique(capitalize(&description), &mut seen);
        }
    }

    seen.truncate(20);
    seen
}

/// Suggestions ranked by how often they appear across `expenses`,
/// most frequent first, top 10.
pub fn frequent_items(expenses: &[Expense]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for expense in expenses.iter().filter(|e| e.category == ExpenseCategory::Groceries) {
        let description = expense.description.to_lowercase();
        for keyword in GROCERY_KEYWORDS {
            if description.contains(keyword) {
                *counts.entry(capitalize(keyword)).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(10);
    ranked
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn grocery_expense(description: &str) -> Expense {
        Expense::new_equal_split(
            "hh-1",
            12.0,
            "EUR",
            ExpenseCategory::Groceries,
            "ana",
            &["ana".to_string()],
            description,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            "ana",
        )
    }

    #[test]
    fn add_toggle_and_clear() {
        let mut list = ShoppingList::new("hh-1");
        let id_a = list.add("Milk", "ana");
        let id_b = list.add("Bread", "ben");

        assert!(list.toggle(&id_a, "ana", Utc::now()));
        assert!(!list.all_checked());
        assert!(list.toggle(&id_b, "ben", Utc::now()));
        assert!(list.all_checked());

        assert_eq!(list.clear_checked(), 2);
        assert!(list.items.is_empty());
        assert!(!list.all_checked()); // empty list never counts as done
    }

    #[test]
    fn toggle_records_and_clears_attribution() {
        let mut list = ShoppingList::new("hh-1");
        let id = list.add("Eggs", "ana");
        let now = Utc::now();

        list.toggle(&id, "ben", now);
        assert_eq!(list.items[0].checked_by.as_deref(), Some("ben"));
        assert_eq!(list.items[0].checked_at, Some(now));

        list.toggle(&id, "ben", now);
        assert!(!list.items[0].checked);
        assert!(list.items[0].checked_by.is_none());
        assert!(list.items[0].checked_at.is_none());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut list = ShoppingList::new("hh-1");
        list.add("Milk", "ana");
        assert!(!list.remove("missing"));
        assert_eq!(list.items.len(), 1);
    }

    #[test]
    fn suggestions_extract_keywords_and_short_descriptions() {
        let expenses = vec![
            grocery_expense("weekly shop: milk, bread and coffee"),
            grocery_expense("olives"),
        ];

        let suggestions = purchase_suggestions(&expenses);
        assert!(suggestions.contains(&"Milk".to_string()));
        assert!(suggestions.contains(&"Bread".to_string()));
        assert!(suggestions.contains(&"Coffee".to_string()));
        assert!(suggestions.contains(&"Olives".to_string()));
    }

    #[test]
    fn suggestions_ignore_non_grocery_expenses() {
        let mut bus = grocery_expense("milk run by bus");
        bus.category = ExpenseCategory::Transport;
        assert!(purchase_suggestions(&[bus]).is_empty());
    }

    #[test]
    fn frequent_items_rank_by_count() {
        let expenses = vec![
            grocery_expense("milk and bread"),
            grocery_expense("milk"),
            grocery_expense("milk, eggs"),
            grocery_expense("bread"),
        ];

        let ranked = frequent_items(&expenses);
        assert_eq!(ranked[0], ("Milk".to_string(), 3));
        assert_eq!(ranked[1], ("Bread".to_string(), 2));
    }
}
