//! Calendar range helpers for the week and month task views.
//!
//! Weeks start on Monday. The month grid is padded with leading/trailing
//! days of adjacent months so every row spans Monday through Sunday; tasks
//! occurring on those padded days still render (dimmed) in the grid.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Monday-start week containing `date`, as an inclusive `(start, end)` pair.
pub fn week_span(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday() as u64;
    let start = date - Days::new(offset);
    (start, start + Days::new(6))
}

/// The seven days of the Monday-start week containing `date`.
pub fn week_days(date: NaiveDate) -> Vec<NaiveDate> {
    let (start, _) = week_span(date);
    (0..7).map(|i| start + Days::new(i)).collect()
}

/// Every cell of the month grid containing `date`: from the Monday on or
/// before the 1st through the Sunday on or after the last day of the month.
pub fn month_grid(date: NaiveDate) -> Vec<NaiveDate> {
    let month_start = date.with_day(1).expect("day 1 exists in every month");
    let month_end = last_day_of_month(date);

    let grid_start = month_start - Days::new(month_start.weekday().num_days_from_monday() as u64);
    let grid_end = month_end + Days::new(days_until(month_end.weekday(), Weekday::Sun));

    let mut days = Vec::new();
    let mut day = grid_start;
    while day <= grid_end {
        days.push(day);
        day = day + Days::new(1);
    }
    days
}

/// Last calendar day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of next month exists")
        - Days::new(1)
}

fn days_until(from: Weekday, to: Weekday) -> u64 {
    let from = from.num_days_from_monday() as i64;
    let to = to.num_days_from_monday() as i64;
    ((to - from).rem_euclid(7)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_span_is_monday_through_sunday() {
        // 2025-01-08 is a Wednesday
        let (start, end) = week_span(date(2025, 1, 8));
        assert_eq!(start, date(2025, 1, 6));
        assert_eq!(end, date(2025, 1, 12));

        // A Monday is its own week start
        let (start, _) = week_span(date(2025, 1, 6));
        assert_eq!(start, date(2025, 1, 6));
    }

    #[test]
    fn week_days_has_seven_consecutive_days() {
        let days = week_days(date(2025, 1, 8));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2025, 1, 6));
        assert_eq!(days[6], date(2025, 1, 12));
    }

    #[test]
    fn month_grid_pads_to_full_weeks() {
        // January 2025: the 1st is a Wednesday, the 31st a Friday.
        let days = month_grid(date(2025, 1, 15));
        assert_eq!(days[0], date(2024, 12, 30)); // Monday before Jan 1
        assert_eq!(*days.last().unwrap(), date(2025, 2, 2)); // Sunday after Jan 31
        assert_eq!(days.len() % 7, 0);
    }

    #[test]
    fn month_grid_exact_fit_needs_no_padding() {
        // September 2025 runs Monday Sep 1 through Tuesday Sep 30.
        let days = month_grid(date(2025, 9, 10));
        assert_eq!(days[0], date(2025, 9, 1));
        assert_eq!(*days.last().unwrap(), date(2025, 10, 5));
    }

    #[test]
    fn last_day_handles_december_and_february() {
        assert_eq!(last_day_of_month(date(2025, 12, 10)), date(2025, 12, 31));
        assert_eq!(last_day_of_month(date(2024, 2, 1)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2025, 2, 1)), date(2025, 2, 28));
    }
}
