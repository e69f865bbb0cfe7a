//! Recurring expenses: fixed bills that come due on a cadence.
//!
//! Unlike tasks, a recurring expense carries a single `next_due_date`
//! cursor that advances by one period each time it is marked paid.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::expense::{Expense, ExpenseCategory};

/// Billing cadence for a recurring expense.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Yearly,
}

impl BillingCycle {
    /// Parse from the lowercase storage form. Unknown values map to `Monthly`.
    pub fn parse(s: &str) -> BillingCycle {
        match s {
            "weekly" => BillingCycle::Weekly,
            "yearly" => BillingCycle::Yearly,
            _ => BillingCycle::Monthly,
        }
    }

    /// Lowercase storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Weekly => "weekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurring household bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpense {
    /// Unique identifier
    pub id: String,
    /// Owning household
    pub household_id: String,
    /// Bill title (e.g. "Electricity")
    pub title: String,
    /// Amount per period
    pub amount: f64,
    /// Spending category
    pub category: ExpenseCategory,
    /// Billing cadence
    pub frequency: BillingCycle,
    /// Next date the bill comes due
    pub next_due_date: NaiveDate,
    /// Last date the bill was paid
    pub last_paid_date: Option<NaiveDate>,
    /// Member who usually pays
    pub paid_by: Option<String>,
    /// Materialize an equal-split expense automatically when marked paid
    pub auto_create: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Member who created the record
    pub created_by: String,
}

impl RecurringExpense {
    /// Advance `next_due_date` by one billing period.
    ///
    /// Monthly and yearly advances clamp to the end of shorter months: a
    /// bill due Jan 31 comes due Feb 28 next.
    pub fn advance(&mut self) {
        self.next_due_date = match self.frequency {
            BillingCycle::Weekly => self.next_due_date + Days::new(7),
            BillingCycle::Monthly => self.next_due_date + Months::new(1),
            BillingCycle::Yearly => self.next_due_date + Months::new(12),
        };
    }

    /// Mark the bill paid on `today`: stamps `last_paid_date`, advances the
    /// due cursor, and returns the equal-split [`Expense`] to record when
    /// `auto_create` is set.
    pub fn mark_paid(
        &mut self,
        today: NaiveDate,
        paid_by_fallback: &str,
        members: &[String],
    ) -> Option<Expense> {
        self.last_paid_date = Some(today);
        self.advance();

        if !self.auto_create {
            return None;
        }
        let payer = self.paid_by.clone().unwrap_or_else(|| paid_by_fallback.to_string());
        Some(Expense::new_equal_split(
            self.household_id.clone(),
            self.amount,
            "EUR",
            self.category,
            payer,
            members,
            self.title.clone(),
            today,
            paid_by_fallback,
        ))
    }
}

/// Recurring expenses due within `days_ahead` days of `reference`
/// (inclusive both ends), soonest first.
pub fn upcoming<'a>(
    expenses: &'a [RecurringExpense],
    reference: NaiveDate,
    days_ahead: u64,
) -> Vec<&'a RecurringExpense> {
    let horizon = reference + Days::new(days_ahead);
    let mut due: Vec<&RecurringExpense> = expenses
        .iter()
        .filter(|e| e.next_due_date >= reference && e.next_due_date <= horizon)
        .collect();
    due.sort_by_key(|e| e.next_due_date);
    due
}
