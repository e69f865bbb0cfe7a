//! Shared expenses: equal splits, category rollups, member balances.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Spending category for an expense.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Groceries,
    Bills,
    Transport,
    Home,
    Extra,
}

impl ExpenseCategory {
    /// All categories, in display order.
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Groceries,
        ExpenseCategory::Bills,
        ExpenseCategory::Transport,
        ExpenseCategory::Home,
        ExpenseCategory::Extra,
    ];

    /// Parse from the lowercase storage form. Unknown values map to `Extra`.
    pub fn parse(s: &str) -> ExpenseCategory {
        match s {
            "groceries" => ExpenseCategory::Groceries,
            "bills" => ExpenseCategory::Bills,
            "transport" => ExpenseCategory::Transport,
            "home" => ExpenseCategory::Home,
            _ => ExpenseCategory::Extra,
        }
    }

    /// Lowercase storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Groceries => "groceries",
            ExpenseCategory::Bills => "bills",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Home => "home",
            ExpenseCategory::Extra => "extra",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared household expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: String,
    /// Owning household
    pub household_id: String,
    /// Amount in household currency
    pub amount: f64,
    /// Display currency code (e.g. "EUR")
    pub currency: String,
    /// Spending category
    pub category: ExpenseCategory,
    /// Member who paid
    pub paid_by: String,
    /// Amount owed by each member
    #[serde(default)]
    pub split_between: HashMap<String, f64>,
    /// Free-text description
    pub description: String,
    /// Date the expense happened
    pub date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Member who recorded the expense
    pub created_by: String,
    /// Whether the expense has been settled
    pub reconciled: bool,
}

impl Expense {
    /// Create a new unreconciled expense split equally across `members`.
    pub fn new_equal_split(
        household_id: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        category: ExpenseCategory,
        paid_by: impl Into<String>,
        members: &[String],
        description: impl Into<String>,
        date: NaiveDate,
        created_by: impl Into<String>,
    ) -> Self {
        let paid_by = paid_by.into();
        Expense {
            id: uuid::Uuid::new_v4().to_string(),
            household_id: household_id.into(),
            amount,
            currency: currency.into(),
            category,
            paid_by,
            split_between: split_equally(amount, members),
            description: description.into(),
            date,
            created_at: Utc::now(),
            created_by: created_by.into(),
            reconciled: false,
        }
    }
}

/// Split `amount` equally between `members`. Empty member lists yield an
/// empty map rather than dividing by zero.
pub fn split_equally(amount: f64, members: &[String]) -> HashMap<String, f64> {
    if members.is_empty() {
        return HashMap::new();
    }
    let share = amount / members.len() as f64;
    members.iter().map(|m| (m.clone(), share)).collect()
}

/// Sum of all expense amounts.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Total amount per category.
pub fn totals_by_category(expenses: &[Expense]) -> HashMap<ExpenseCategory, f64> {
    let mut totals = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Share of the overall total per category, in percent. Empty input (or an
/// all-zero total) yields an empty map.
pub fn category_percentages(expenses: &[Expense]) -> HashMap<ExpenseCategory, f64> {
    let grand_total = total(expenses);
    if grand_total == 0.0 {
        return HashMap::new();
    }
    totals_by_category(expenses)
        .into_iter()
        .map(|(category, amount)| (category, amount / grand_total * 100.0))
        .collect()
}

/// Net balance per member: the payer is credited the full amount of each
/// expense, and every split participant is debited their share. Positive
/// means the member is owed money; negative means they owe.
pub fn member_balances(expenses: &[Expense]) -> HashMap<String, f64> {
    let mut balances: HashMap<String, f64> = HashMap::new();
    for expense in expenses {
        *balances.entry(expense.paid_by.clone()).or_insert(0.0) += expense.amount;
        for (member, share) in &expense.split_between {
            *balances.entry(member.clone()).or_insert(0.0) -= share;
        }
    }
    balances
}

/// Inclusive `(start, end)` window for "this week": Monday of the week
/// containing `reference` through `reference` itself.
pub fn week_window(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = reference.weekday().num_days_from_monday() as u64;
    (reference - Days::new(offset), reference)
}

/// Inclusive `(start, end)` window for "this month": the 1st of the month
/// containing `reference` through `reference` itself.
pub fn month_window(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = reference
        .with_day(1)
        .expect("day 1 exists in every month");
    (start, reference)
}

/// Expenses dated within the inclusive `[start, end]` window.
pub fn in_window(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .collect()
}
