//! Recurring bill commands.

use chrono::Utc;
use clap::Subcommand;
use hearth_core::recurring_expense::upcoming;
use hearth_core::{BillingCycle, Config, ExpenseCategory, HouseholdDb, RecurringExpense};

use super::{active_household, active_user, parse_date, CliResult};

#[derive(Subcommand)]
pub enum RecurringAction {
    /// Register a recurring bill
    Add {
        /// Bill title
        title: String,
        /// Amount per period
        amount: f64,
        /// Billing cycle: weekly, monthly or yearly
        #[arg(long, default_value = "monthly")]
        cycle: String,
        /// Category
        #[arg(long, default_value = "bills")]
        category: String,
        /// First due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        /// Member who usually pays
        #[arg(long)]
        paid_by: Option<String>,
        /// Record an equal-split expense automatically when marked paid
        #[arg(long)]
        auto_create: bool,
    },
    /// List recurring bills, soonest due first
    List,
    /// Bills due within the next N days
    Upcoming {
        /// Days ahead to look
        #[arg(long, default_value = "30")]
        days: u64,
    },
    /// Mark a bill paid and advance its due date
    Paid {
        /// Bill ID
        id: String,
    },
    /// Delete a recurring bill
    Delete {
        /// Bill ID
        id: String,
    },
}

pub fn run(action: RecurringAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;

    match action {
        RecurringAction::Add {
            title,
            amount,
            cycle,
            category,
            due,
            paid_by,
            auto_create,
        } => {
            let user = active_user(&config)?;
            let bill = RecurringExpense {
                id: uuid::Uuid::new_v4().to_string(),
                household_id: household_id.clone(),
                title,
                amount,
                category: ExpenseCategory::parse(&category),
                frequency: BillingCycle::parse(&cycle),
                next_due_date: parse_date(&due)?,
                last_paid_date: None,
                paid_by,
                auto_create,
                created_at: Utc::now(),
                created_by: user,
            };
            db.create_recurring_expense(&bill)?;
            println!("Recurring bill created: {}", bill.id);
            println!("{}", serde_json::to_string_pretty(&bill)?);
        }
        RecurringAction::List => {
            let bills = db.list_recurring_expenses(&household_id)?;
            println!("{}", serde_json::to_string_pretty(&bills)?);
        }
        RecurringAction::Upcoming { days } => {
            let bills = db.list_recurring_expenses(&household_id)?;
            let due = upcoming(&bills, Utc::now().date_naive(), days);
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        RecurringAction::Paid { id } => {
            let user = active_user(&config)?;
            let mut bill = db
                .get_recurring_expense(&id)?
                .ok_or(format!("Recurring bill not found: {id}"))?;
            let household = db
                .get_household(&household_id)?
                .ok_or(format!("Household not found: {household_id}"))?;

            let created = bill.mark_paid(Utc::now().date_naive(), &user, &household.members);
            db.update_recurring_expense(&bill)?;
            println!("{} paid, next due {}", bill.title, bill.next_due_date);

            if let Some(expense) = created {
                db.create_expense(&expense)?;
                println!("Expense recorded: {}", expense.id);
            }
        }
        RecurringAction::Delete { id } => {
            if db.delete_recurring_expense(&id)? {
                println!("Recurring bill deleted: {id}");
            } else {
                println!("Recurring bill not found: {id}");
            }
        }
    }
    Ok(())
}
