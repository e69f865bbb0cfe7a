//! Achievement badge commands.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use hearth_core::badges::{catalog, evaluate, BadgeSnapshot};
use hearth_core::expense::week_window;
use hearth_core::storage::db::TaskFilter;
use hearth_core::{Config, HouseholdDb};

use super::{active_household, active_user, CliResult};

#[derive(Subcommand)]
pub enum BadgesAction {
    /// List every badge and whether it has been earned
    List,
    /// Evaluate conditions and unlock any new badges
    Check,
}

pub fn run(action: BadgesAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;
    let user = active_user(&config)?;

    match action {
        BadgesAction::List => {
            let shown = db.shown_badges(&user)?;
            for badge in catalog() {
                let earned = if shown.iter().any(|id| id == badge.id) { "earned" } else { "locked" };
                println!("{} {} - {} [{}]", badge.emoji, badge.name, badge.description, earned);
            }
        }
        BadgesAction::Check => {
            let today = Utc::now().date_naive();
            let (start, end) = week_window(today);
            let week_expenses = db.list_expenses(&household_id, Some(start), Some(end), None)?;
            let shopping_list = db.get_shopping_list(&household_id)?;
            let activity_dates = collect_activity_dates(&db, &household_id)?;

            let snapshot = BadgeSnapshot {
                week_expenses: &week_expenses,
                shopping_list: Some(&shopping_list),
                activity_dates: &activity_dates,
            };
            let shown = db.shown_badges(&user)?;
            let unlocked = evaluate(&snapshot, &shown);

            if unlocked.is_empty() {
                println!("No new badges");
            }
            for badge in unlocked {
                db.mark_badge_shown(&user, badge.id, Utc::now())?;
                println!("{} {} unlocked - {}", badge.emoji, badge.name, badge.description);
            }
        }
    }
    Ok(())
}

/// Distinct dates with any household activity: expenses recorded, tasks
/// completed or shopping items checked off.
fn collect_activity_dates(
    db: &HouseholdDb,
    household_id: &str,
) -> Result<Vec<NaiveDate>, Box<dyn std::error::Error>> {
    let mut dates = Vec::new();

    for expense in db.list_expenses(household_id, None, None, None)? {
        dates.push(expense.date);
    }
    for task in db.list_tasks(household_id, &TaskFilter::default())? {
        if let Some(completed_at) = task.completed_at {
            dates.push(completed_at.date_naive());
        }
    }
    for item in db.get_shopping_list(household_id)?.items {
        if let Some(checked_at) = item.checked_at {
            dates.push(checked_at.date_naive());
        }
    }

    dates.sort();
    dates.dedup();
    Ok(dates)
}
