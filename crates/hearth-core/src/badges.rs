//! Gamification badges unlocked by household activity.
//!
//! Evaluation is pure: callers assemble a [`BadgeSnapshot`] from already
//! fetched records and get back the badges newly unlocked, excluding ids
//! the member has already been shown (shown ids persist in storage).

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::expense::Expense;
use crate::shopping::ShoppingList;

/// A badge definition.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Badge {
    /// Stable identifier, also the storage key for "already shown"
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// What the member did to earn it
    pub description: &'static str,
    /// Display emoji
    pub emoji: &'static str,
}

/// Everything badge conditions look at, snapshotted once per evaluation.
#[derive(Debug, Clone, Copy)]
pub struct BadgeSnapshot<'a> {
    /// Expenses recorded in the current week
    pub week_expenses: &'a [Expense],
    /// The household shopping list, if one exists
    pub shopping_list: Option<&'a ShoppingList>,
    /// Distinct dates with any household activity, most recent ones included
    pub activity_dates: &'a [NaiveDate],
}

const CATALOG: &[Badge] = &[
    Badge {
        id: "first-expense",
        name: "First Expense",
        description: "You recorded your first expense",
        emoji: "💸",
    },
    Badge {
        id: "expense-tracker",
        name: "Expense Tracker",
        description: "10 expenses recorded",
        emoji: "📊",
    },
    Badge {
        id: "shopping-hero",
        name: "Shopping Hero",
        description: "You completed the shopping list",
        emoji: "💪",
    },
    Badge {
        id: "house-harmony",
        name: "House Harmony",
        description: "3 consecutive days of activity",
        emoji: "🌸",
    },
];

/// All badge definitions.
pub fn catalog() -> &'static [Badge] {
    CATALOG
}

/// Whether the condition for `badge` holds for `snapshot`.
pub fn condition_met(badge: &Badge, snapshot: &BadgeSnapshot<'_>) -> bool {
    match badge.id {
        "first-expense" => !snapshot.week_expenses.is_empty(),
        "expense-tracker" => snapshot.week_expenses.len() >= 10,
        "shopping-hero" => snapshot
            .shopping_list
            .map_or(false, |list| list.all_checked()),
        "house-harmony" => has_consecutive_days(snapshot.activity_dates, 3),
        _ => false,
    }
}

/// Badges newly unlocked by `snapshot`, skipping ids in `already_shown`.
pub fn evaluate(
    snapshot: &BadgeSnapshot<'_>,
    already_shown: &[String],
) -> Vec<&'static Badge> {
    CATALOG
        .iter()
        .filter(|badge| !already_shown.iter().any(|id| id == badge.id))
        .filter(|badge| condition_met(badge, snapshot))
        .collect()
}

/// Whether `dates` contains a run of at least `run` consecutive days.
fn has_consecutive_days(dates: &[NaiveDate], run: usize) -> bool {
    if run == 0 {
        return true;
    }
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut streak = 1;
    for pair in sorted.windows(2) {
        if pair[0] + Days::new(1) == pair[1] {
            streak += 1;
            if streak >= run {
                return true;
            }
        } else {
            streak = 1;
        }
    }
    streak >= run && !sorted.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_expenses(count: usize) -> Vec<Expense> {
        (0..count)
            .map(|i| {
                Expense::new_equal_split(
                    "hh-1",
                    10.0,
                    "EUR",
                    ExpenseCategory::Extra,
                    "ana",
                    &["ana".to_string()],
                    format!("expense {i}"),
                    date(2025, 3, 10),
                    "ana",
                )
            })
            .collect()
    }

    fn snapshot<'a>(
        expenses: &'a [Expense],
        list: Option<&'a ShoppingList>,
        activity: &'a [NaiveDate],
    ) -> BadgeSnapshot<'a> {
        BadgeSnapshot {
            week_expenses: expenses,
            shopping_list: list,
            activity_dates: activity,
        }
    }

    #[test]
    fn first_expense_unlocks_on_one() {
        let expenses = make_expenses(1);
        let unlocked = evaluate(&snapshot(&expenses, None, &[]), &[]);
        assert!(unlocked.iter().any(|b| b.id == "first-expense"));
        assert!(!unlocked.iter().any(|b| b.id == "expense-tracker"));
    }

    #[test]
    fn expense_tracker_needs_ten() {
        let nine = make_expenses(9);
        let unlocked = evaluate(&snapshot(&nine, None, &[]), &[]);
        assert!(!unlocked.iter().any(|b| b.id == "expense-tracker"));

        let ten = make_expenses(10);
        let unlocked = evaluate(&snapshot(&ten, None, &[]), &[]);
        assert!(unlocked.iter().any(|b| b.id == "expense-tracker"));
    }

    #[test]
    fn shopping_hero_requires_nonempty_fully_checked_list() {
        let mut list = ShoppingList::new("hh-1");
        let unlocked = evaluate(&snapshot(&[], Some(&list), &[]), &[]);
        assert!(!unlocked.iter().any(|b| b.id == "shopping-hero"));

        let id = list.add("Milk", "ana");
        list.toggle(&id, "ana", chrono::Utc::now());
        let unlocked = evaluate(&snapshot(&[], Some(&list), &[]), &[]);
        assert!(unlocked.iter().any(|b| b.id == "shopping-hero"));
    }

    #[test]
    fn house_harmony_needs_three_consecutive_days() {
        let gapped = [date(2025, 3, 1), date(2025, 3, 2), date(2025, 3, 4)];
        let unlocked = evaluate(&snapshot(&[], None, &gapped), &[]);
        assert!(!unlocked.iter().any(|b| b.id == "house-harmony"));

        let streak = [date(2025, 3, 1), date(2025, 3, 2), date(2025, 3, 3)];
        let unlocked = evaluate(&snapshot(&[], None, &streak), &[]);
        assert!(unlocked.iter().any(|b| b.id == "house-harmony"));
    }

    #[test]
    fn already_shown_badges_are_excluded() {
        let expenses = make_expenses(1);
        let shown = vec!["first-expense".to_string()];
        let unlocked = evaluate(&snapshot(&expenses, None, &[]), &shown);
        assert!(!unlocked.iter().any(|b| b.id == "first-expense"));
    }

    #[test]
    fn duplicate_activity_dates_do_not_fake_a_streak() {
        let dup = [date(2025, 3, 1), date(2025, 3, 1), date(2025, 3, 2)];
        assert!(!has_consecutive_days(&dup, 3));
    }
}
