//! Occurrence engine: which dates a task is due on.
//!
//! Pure, synchronous date arithmetic over in-memory [`Task`] records. The
//! reference date is always an explicit parameter so a single render pass
//! stays internally consistent; callers snapshot "today" once and thread it
//! through, never reading the wall clock per task.
//!
//! Recurrence phase is anchored to the task's `start_date` rather than to a
//! fixed calendar grid: a weekly task created on a Tuesday recurs on
//! Tuesdays, and two weekly tasks created on different weekdays never
//! synchronize. Recurrence tracks "N periods since the anchor", not
//! absolute calendar phase.

use chrono::{Datelike, Days, NaiveDate};
use std::cmp::Ordering;

use super::{Frequency, Task};

/// Whether `task` has an occurrence on `date`.
///
/// One-time tasks match the calendar day of their anchor (`start_date`,
/// falling back to `due_date`); with neither anchor they are due on every
/// queried date, so a task created without dates stays visible instead of
/// silently disappearing. Recurring tasks require `start_date` and never
/// occur before it or after an inclusive `end_date`.
pub fn is_due(task: &Task, date: NaiveDate) -> bool {
    if task.frequency == Frequency::OneTime {
        return match one_time_anchor(task) {
            Some(anchor) => anchor == date,
            None => true,
        };
    }

    // Recurring tasks need an anchor to measure from.
    let start = match task.start_date {
        Some(start) => start,
        None => return false,
    };

    if date < start {
        return false;
    }
    if let Some(end) = task.end_date {
        // end_date bounds every recurrence type identically, inclusive.
        if date > end {
            return false;
        }
    }

    match task.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => {
            date.weekday() == start.weekday()
                && (date - start).num_days() % 7 == 0
        }
        Frequency::Monthly => {
            // Same day-of-month, any month at or after the anchor. Anchors
            // on the 29th-31st simply produce no occurrence in months that
            // are too short; there is no clamping to the last day.
            date.day() == start.day() && months_between(start, date) >= 0
        }
        Frequency::OneTime => unreachable!("handled above"),
    }
}

/// The effective occurrence date of a one-time task.
pub fn one_time_anchor(task: &Task) -> Option<NaiveDate> {
    task.start_date.or(task.due_date)
}

/// Every date in `[start, end]` (inclusive) on which `task` is due.
///
/// Iterates day by day rather than taking a closed-form shortcut: the
/// start/end clipping and per-frequency modulus checks are cheap and the
/// ranges are small (a week, or a month grid padded with adjacent-month
/// days so chips can render on dimmed leading/trailing cells).
pub fn occurrences_in_range(task: &Task, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut day = start;
    while day <= end {
        if is_due(task, day) {
            dates.push(day);
        }
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Ordering for a single day's task list.
///
/// Tasks with a `scheduled_time` sort before tasks without one; among timed
/// tasks, lexicographic `HH:mm` comparison (valid for zero-padded 24h
/// strings); untimed tasks sort by title. Applied identically on every
/// surface that lists a day so orderings never diverge between screens.
pub fn day_order(a: &Task, b: &Task) -> Ordering {
    match (&a.scheduled_time, &b.scheduled_time) {
        (Some(ta), Some(tb)) => ta.cmp(tb).then_with(|| a.title.cmp(&b.title)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    }
}

/// The tasks due on `date`, in display order.
pub fn tasks_for_day<'a>(tasks: &'a [Task], date: NaiveDate) -> Vec<&'a Task> {
    let mut due: Vec<&Task> = tasks.iter().filter(|t| is_due(t, date)).collect();
    due.sort_by(|a, b| day_order(a, b));
    due
}

/// Whole-month difference from `start` to `date` (negative when `date`
/// is in an earlier month).
fn months_between(start: NaiveDate, date: NaiveDate) -> i32 {
    (date.year() - start.year()) * 12 + (date.month() as i32 - start.month() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Room;

    fn make_task(frequency: Frequency) -> Task {
        Task::new("hh-1", "Test task", Room::Kitchen, frequency, "user-1")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_due_every_day_from_start() {
        let mut task = make_task(Frequency::Daily);
        task.start_date = Some(date(2025, 1, 6));

        assert!(!is_due(&task, date(2025, 1, 5)));
        assert!(is_due(&task, date(2025, 1, 6)));
        assert!(is_due(&task, date(2025, 1, 7)));
        assert!(is_due(&task, date(2026, 7, 1)));
    }

    #[test]
    fn recurring_without_start_is_never_due() {
        let task = make_task(Frequency::Daily);
        assert!(!is_due(&task, date(2025, 1, 6)));

        let mut weekly = make_task(Frequency::Weekly);
        weekly.due_date = Some(date(2025, 1, 6)); // due_date is not an anchor for recurring
        assert!(!is_due(&weekly, date(2025, 1, 6)));
    }

    #[test]
    fn weekly_matches_weekday_and_seven_day_multiples() {
        let mut task = make_task(Frequency::Weekly);
        task.start_date = Some(date(2025, 1, 6)); // Monday

        assert!(is_due(&task, date(2025, 1, 6)));
        assert!(is_due(&task, date(2025, 1, 13)));
        assert!(is_due(&task, date(2025, 1, 20)));
        assert!(!is_due(&task, date(2025, 1, 7))); // Tuesday
        assert!(!is_due(&task, date(2024, 12, 30))); // Monday before start
    }

    #[test]
    fn weekly_scenario_with_end_date() {
        let mut task = make_task(Frequency::Weekly);
        task.start_date = Some(date(2025, 1, 6)); // Monday
        task.end_date = Some(date(2025, 1, 27));

        for d in [date(2025, 1, 6), date(2025, 1, 13), date(2025, 1, 20), date(2025, 1, 27)] {
            assert!(is_due(&task, d), "expected due on {d}");
        }
        assert!(!is_due(&task, date(2025, 1, 3))); // before start
        assert!(!is_due(&task, date(2025, 2, 3))); // Monday after end
        assert!(!is_due(&task, date(2025, 1, 7))); // wrong weekday
    }

    #[test]
    fn monthly_matches_day_of_month() {
        let mut task = make_task(Frequency::Monthly);
        task.start_date = Some(date(2025, 1, 15));

        assert!(is_due(&task, date(2025, 1, 15)));
        assert!(is_due(&task, date(2025, 2, 15)));
        assert!(is_due(&task, date(2026, 3, 15)));
        assert!(!is_due(&task, date(2025, 2, 14)));
        assert!(!is_due(&task, date(2024, 12, 15))); // before start
    }

    #[test]
    fn monthly_short_month_skips_without_rollover() {
        let mut task = make_task(Frequency::Monthly);
        task.start_date = Some(date(2025, 1, 31));

        assert!(!is_due(&task, date(2025, 2, 28))); // no clamping to month end
        assert!(is_due(&task, date(2025, 3, 31)));
        assert!(!is_due(&task, date(2025, 4, 30)));
        assert!(is_due(&task, date(2025, 5, 31)));
    }

    #[test]
    fn end_date_bounds_every_frequency() {
        for frequency in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly] {
            let mut task = make_task(frequency);
            task.start_date = Some(date(2025, 1, 6));
            task.end_date = Some(date(2025, 3, 31));

            // 2025-04-07 is a Monday, and past the end for every pattern.
            assert!(!is_due(&task, date(2025, 4, 7)), "{frequency} leaked past end_date");
        }
    }

    #[test]
    fn end_date_itself_still_matches() {
        let mut task = make_task(Frequency::Daily);
        task.start_date = Some(date(2025, 1, 6));
        task.end_date = Some(date(2025, 1, 10));

        assert!(is_due(&task, date(2025, 1, 10)));
        assert!(!is_due(&task, date(2025, 1, 11)));
    }

    #[test]
    fn one_time_uses_start_then_due_date() {
        let mut task = make_task(Frequency::OneTime);
        task.start_date = Some(date(2025, 3, 10));
        assert!(is_due(&task, date(2025, 3, 10)));
        assert!(!is_due(&task, date(2025, 3, 11)));

        let mut by_due = make_task(Frequency::OneTime);
        by_due.due_date = Some(date(2025, 3, 12));
        assert!(is_due(&by_due, date(2025, 3, 12)));
        assert!(!is_due(&by_due, date(2025, 3, 10)));

        // start_date wins over due_date when both are set
        let mut both = make_task(Frequency::OneTime);
        both.start_date = Some(date(2025, 3, 10));
        both.due_date = Some(date(2025, 3, 12));
        assert!(is_due(&both, date(2025, 3, 10)));
        assert!(!is_due(&both, date(2025, 3, 12)));
    }

    #[test]
    fn one_time_without_anchors_is_always_due() {
        let task = make_task(Frequency::OneTime);
        assert!(is_due(&task, date(2025, 1, 1)));
        assert!(is_due(&task, date(2030, 12, 31)));
    }

    #[test]
    fn is_due_is_idempotent() {
        let mut task = make_task(Frequency::Weekly);
        task.start_date = Some(date(2025, 1, 6));
        let d = date(2025, 1, 13);
        assert_eq!(is_due(&task, d), is_due(&task, d));
    }

    #[test]
    fn weekly_window_from_anchor_yields_exactly_the_anchor() {
        let mut task = make_task(Frequency::Weekly);
        let anchor = date(2025, 1, 6);
        task.start_date = Some(anchor);

        let dates = occurrences_in_range(&task, anchor, anchor + Days::new(6));
        assert_eq!(dates, vec![anchor]);
    }

    #[test]
    fn daily_occurrences_clip_to_start_and_end() {
        let mut task = make_task(Frequency::Daily);
        task.start_date = Some(date(2025, 1, 6));
        task.end_date = Some(date(2025, 1, 8));

        let dates = occurrences_in_range(&task, date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(dates, vec![date(2025, 1, 6), date(2025, 1, 7), date(2025, 1, 8)]);
    }

    #[test]
    fn occurrences_on_empty_range() {
        let mut task = make_task(Frequency::Daily);
        task.start_date = Some(date(2025, 1, 1));
        // end before start yields no dates rather than panicking
        assert!(occurrences_in_range(&task, date(2025, 1, 10), date(2025, 1, 5)).is_empty());
    }

    #[test]
    fn day_order_times_first_then_titles() {
        let mut morning = make_task(Frequency::Daily);
        morning.title = "Zebra chores".into();
        morning.scheduled_time = Some("08:00".into());
        let mut evening = make_task(Frequency::Daily);
        evening.title = "Aardvark chores".into();
        evening.scheduled_time = Some("19:30".into());
        let mut untimed_a = make_task(Frequency::Daily);
        untimed_a.title = "Dust".into();
        let mut untimed_b = make_task(Frequency::Daily);
        untimed_b.title = "Vacuum".into();

        for t in [&mut morning, &mut evening, &mut untimed_a, &mut untimed_b] {
            t.start_date = Some(date(2025, 1, 1));
        }

        let tasks = vec![untimed_b, evening, untimed_a, morning];
        let ordered = tasks_for_day(&tasks, date(2025, 1, 2));
        let titles: Vec<&str> = ordered.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Zebra chores", "Aardvark chores", "Dust", "Vacuum"]);
    }

    #[test]
    fn tasks_for_day_filters_by_occurrence() {
        let mut monday = make_task(Frequency::Weekly);
        monday.title = "Monday only".into();
        monday.start_date = Some(date(2025, 1, 6));
        let mut daily = make_task(Frequency::Daily);
        daily.title = "Every day".into();
        daily.start_date = Some(date(2025, 1, 1));

        let tasks = vec![monday, daily];
        let tuesday = tasks_for_day(&tasks, date(2025, 1, 7));
        assert_eq!(tuesday.len(), 1);
        assert_eq!(tuesday[0].title, "Every day");
    }
}
