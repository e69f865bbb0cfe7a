//! Household inventory with low-stock thresholds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock level derived from quantity against the minimum threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Ok,
    Low,
    Out,
}

impl StockStatus {
    /// Parse from the lowercase storage form. Unknown values map to `Ok`.
    pub fn parse(s: &str) -> StockStatus {
        match s {
            "low" => StockStatus::Low,
            "out" => StockStatus::Out,
            _ => StockStatus::Ok,
        }
    }

    /// Lowercase storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Ok => "ok",
            StockStatus::Low => "low",
            StockStatus::Out => "out",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of inventory item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Groceries,
    Cleaning,
    Personal,
    Other,
}

impl ItemCategory {
    /// Parse from the lowercase storage form. Unknown values map to `Other`.
    pub fn parse(s: &str) -> ItemCategory {
        match s {
            "groceries" => ItemCategory::Groceries,
            "cleaning" => ItemCategory::Cleaning,
            "personal" => ItemCategory::Personal,
            _ => ItemCategory::Other,
        }
    }

    /// Lowercase storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Groceries => "groceries",
            ItemCategory::Cleaning => "cleaning",
            ItemCategory::Personal => "personal",
            ItemCategory::Other => "other",
        }
    }
}

/// A tracked household product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier
    pub id: String,
    /// Owning household
    pub household_id: String,
    /// Item name
    pub name: String,
    /// Item category
    pub category: ItemCategory,
    /// Derived stock status
    pub status: StockStatus,
    /// Quantity on hand
    pub quantity: Option<u32>,
    /// Unit label ("pcs", "kg", "L", ...)
    pub unit: Option<String>,
    /// Threshold at or below which the item counts as low
    pub min_quantity: Option<u32>,
    /// When the item was last restocked
    pub last_purchased: Option<DateTime<Utc>>,
    /// When the item was last consumed
    pub last_used: Option<DateTime<Utc>>,
    /// Task ids that consume this item
    #[serde(default)]
    pub linked_tasks: Vec<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
    /// Member who created the item
    pub created_by: String,
}

impl InventoryItem {
    /// Create a new item; status derives from the initial quantity.
    pub fn new(
        household_id: impl Into<String>,
        name: impl Into<String>,
        category: ItemCategory,
        quantity: Option<u32>,
        min_quantity: Option<u32>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        InventoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            household_id: household_id.into(),
            name: name.into(),
            category,
            status: derive_status(quantity, min_quantity),
            quantity,
            unit: None,
            min_quantity,
            last_purchased: None,
            last_used: None,
            linked_tasks: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// Set the quantity and re-derive status.
    pub fn set_quantity(&mut self, quantity: Option<u32>, now: DateTime<Utc>) {
        self.quantity = quantity;
        self.status = derive_status(quantity, self.min_quantity);
        self.updated_at = now;
    }

    /// Consume one unit (when a linked task completes). Quantity stops at
    /// zero; stamps `last_used`.
    pub fn consume_one(&mut self, now: DateTime<Utc>) {
        if let Some(q) = self.quantity {
            if q > 0 {
                self.set_quantity(Some(q - 1), now);
            }
        }
        self.last_used = Some(now);
    }

    /// Add `amount` units and stamp `last_purchased`.
    pub fn restock(&mut self, amount: u32, now: DateTime<Utc>) {
        let current = self.quantity.unwrap_or(0);
        self.set_quantity(Some(current + amount), now);
        self.last_purchased = Some(now);
    }

    /// Whether the item needs attention (low or out of stock).
    pub fn is_low_stock(&self) -> bool {
        matches!(self.status, StockStatus::Low | StockStatus::Out)
    }
}

/// Status rule: no quantity or zero is out; at or below the minimum
/// threshold is low; otherwise ok.
pub fn derive_status(quantity: Option<u32>, min_quantity: Option<u32>) -> StockStatus {
    let quantity = match quantity {
        None | Some(0) => return StockStatus::Out,
        Some(q) => q,
    };
    if quantity <= min_quantity.unwrap_or(0) {
        StockStatus::Low
    } else {
        StockStatus::Ok
    }
}

/// Items that are low or out of stock.
pub fn low_stock(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|i| i.is_low_stock()).collect()
}

/// Starter set of items most households want tracked from day one.
pub fn critical_items() -> Vec<(&'static str, ItemCategory, u32)> {
    vec![
        ("Toilet paper", ItemCategory::Personal, 4),
        ("Dish soap", ItemCategory::Cleaning, 1),
        ("Laundry detergent", ItemCategory::Cleaning, 1),
        ("Trash bags", ItemCategory::Cleaning, 10),
        ("Sponges", ItemCategory::Cleaning, 2),
        ("Olive oil", ItemCategory::Groceries, 1),
        ("Salt", ItemCategory::Groceries, 1),
        ("Coffee", ItemCategory::Groceries, 1),
    ]
}
