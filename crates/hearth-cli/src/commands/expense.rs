//! Expense tracking commands.

use chrono::Utc;
use clap::Subcommand;
use hearth_core::expense::{
    self, category_percentages, member_balances, month_window, totals_by_category, week_window,
};
use hearth_core::{Config, Expense, ExpenseCategory, HouseholdDb};

use super::{active_household, active_user, parse_date, CliResult};

#[derive(Subcommand)]
pub enum ExpenseAction {
    /// Record an expense, split equally across members
    Add {
        /// Amount
        amount: f64,
        /// Description
        description: String,
        /// Category: groceries, bills, transport, home or extra
        #[arg(long, default_value = "extra")]
        category: String,
        /// Expense date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
        /// Member who paid, default the active user
        #[arg(long)]
        paid_by: Option<String>,
        /// Comma-separated members to split between, default all members
        #[arg(long)]
        split: Option<String>,
    },
    /// List expenses, newest first
    List {
        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Window end, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },
    /// Totals, category breakdown and member balances
    Summary {
        /// Current week (Monday through today) instead of current month
        #[arg(long)]
        week: bool,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

pub fn run(action: ExpenseAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;

    match action {
        ExpenseAction::Add {
            amount,
            description,
            category,
            date,
            paid_by,
            split,
        } => {
            let user = active_user(&config)?;
            let household = db
                .get_household(&household_id)?
                .ok_or(format!("Household not found: {household_id}"))?;

            let members: Vec<String> = match split {
                Some(raw) => raw.split(',').map(|s| s.trim().to_string()).collect(),
                None => household.members.clone(),
            };
            let expense_date = match date {
                Some(raw) => parse_date(&raw)?,
                None => Utc::now().date_naive(),
            };

            let expense = Expense::new_equal_split(
                &household_id,
                amount,
                &household.settings.currency,
                ExpenseCategory::parse(&category),
                paid_by.unwrap_or_else(|| user.clone()),
                &members,
                description,
                expense_date,
                user,
            );
            db.create_expense(&expense)?;
            println!("Expense recorded: {}", expense.id);
            println!("{}", serde_json::to_string_pretty(&expense)?);
        }
        ExpenseAction::List { from, to, category } => {
            let start = from.as_deref().map(parse_date).transpose()?;
            let end = to.as_deref().map(parse_date).transpose()?;
            let category = category.as_deref().map(ExpenseCategory::parse);

            let expenses = db.list_expenses(&household_id, start, end, category)?;
            println!("{}", serde_json::to_string_pretty(&expenses)?);
        }
        ExpenseAction::Summary { week } => {
            let today = Utc::now().date_naive();
            let (start, end) = if week { week_window(today) } else { month_window(today) };
            let expenses = db.list_expenses(&household_id, Some(start), Some(end), None)?;

            println!("Window: {start} to {end}");
            println!("Total: {:.2}", expense::total(&expenses));

            let percentages = category_percentages(&expenses);
            let mut categories: Vec<_> = totals_by_category(&expenses).into_iter().collect();
            categories.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            for (category, amount) in categories {
                let share = percentages.get(&category).copied().unwrap_or(0.0);
                println!("  {category}: {amount:.2} ({share:.0}%)");
            }

            let mut balances: Vec<_> = member_balances(&expenses).into_iter().collect();
            balances.sort_by(|a, b| a.0.cmp(&b.0));
            println!("Balances:");
            for (member, balance) in balances {
                println!("  {member}: {balance:+.2}");
            }
        }
        ExpenseAction::Delete { id } => {
            if db.delete_expense(&id)? {
                println!("Expense deleted: {id}");
            } else {
                println!("Expense not found: {id}");
            }
        }
    }
    Ok(())
}
