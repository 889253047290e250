//! Fixed-step time grids and strict date/time parsing

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

const DAY_MINUTES: i64 = 24 * 60;

/// Strict `YYYY-MM-DD` parse; malformed input is a Format error, never
/// silently coerced
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| AppError::Format(format!("Invalid date '{}' (use YYYY-MM-DD)", s)))
}

/// Strict `HH:MM` parse
pub fn parse_time(s: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map_err(|_| AppError::Format(format!("Invalid time '{}' (use HH:MM)", s)))
}

fn minute_of_day(t: NaiveTime) -> i64 {
    (t.num_seconds_from_midnight() / 60) as i64
}

fn time_from_minute(m: i64) -> NaiveTime {
    // callers keep m within a single day
    NaiveTime::from_num_seconds_from_midnight_opt((m * 60) as u32, 0)
        .unwrap_or(NaiveTime::MIN)
}

/// Every start time `t` with `t >= start` and `t + step <= end`, stepping
/// by `step_minutes` from `start`. Empty when the window is shorter than
/// one step.
///
/// This is a fixed grid of candidate start times; it is NOT aware of
/// service durations. Duration filtering happens downstream in the
/// availability resolver.
pub fn time_slots(start: NaiveTime, end: NaiveTime, step_minutes: i64) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    if step_minutes <= 0 {
        return slots;
    }

    let end_minute = minute_of_day(end).min(DAY_MINUTES);
    let mut current = minute_of_day(start);
    while current + step_minutes <= end_minute {
        slots.push(time_from_minute(current));
        current += step_minutes;
    }
    slots
}

/// True iff the combined date+time instant is strictly before `now`
pub fn is_in_past(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    date.and_time(time) < now
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn working_day_on_hour_grid() {
        let slots = time_slots(t(9, 0), t(18, 0), 60);
        assert_eq!(slots.len(), 9);
        assert_eq!(slots.first(), Some(&t(9, 0)));
        assert_eq!(slots.last(), Some(&t(17, 0)));
    }

    #[test]
    fn window_shorter_than_step_is_empty() {
        assert!(time_slots(t(10, 0), t(10, 45), 60).is_empty());
    }

    #[test]
    fn exact_fit_yields_single_slot() {
        assert_eq!(time_slots(t(10, 0), t(11, 0), 60), vec![t(10, 0)]);
    }

    #[test]
    fn partial_trailing_step_is_dropped() {
        // 10:00-12:30 at step 60: the 12:00 slot would end at 13:00
        assert_eq!(time_slots(t(10, 0), t(12, 30), 60), vec![t(10, 0), t(11, 0)]);
    }

    #[test]
    fn grid_follows_window_start_not_the_hour() {
        assert_eq!(
            time_slots(t(9, 30), t(12, 0), 60),
            vec![t(9, 30), t(10, 30)]
        );
    }

    #[test]
    fn inverted_window_is_empty() {
        assert!(time_slots(t(18, 0), t(9, 0), 60).is_empty());
    }

    #[test]
    fn nonpositive_step_is_empty() {
        assert!(time_slots(t(9, 0), t(18, 0), 0).is_empty());
        assert!(time_slots(t(9, 0), t(18, 0), -30).is_empty());
    }

    #[test]
    fn strict_date_parsing() {
        assert!(parse_date("2025-09-10").is_ok());
        assert!(matches!(parse_date("10.09.2025"), Err(AppError::Format(_))));
        assert!(matches!(parse_date("2025-13-01"), Err(AppError::Format(_))));
        assert!(matches!(parse_date(""), Err(AppError::Format(_))));
    }

    #[test]
    fn strict_time_parsing() {
        assert!(parse_time("09:00").is_ok());
        assert!(matches!(parse_time("9am"), Err(AppError::Format(_))));
        assert!(matches!(parse_time("25:00"), Err(AppError::Format(_))));
    }

    #[test]
    fn fixed_past_date_is_always_past() {
        let now = chrono::Utc::now().naive_utc();
        assert!(is_in_past(parse_date("2020-01-01").unwrap(), t(9, 0), now));
        assert!(!is_in_past(parse_date("2999-01-01").unwrap(), t(9, 0), now));
    }

    #[test]
    fn past_comparison_is_strict() {
        let date = parse_date("2025-09-10").unwrap();
        let instant = date.and_time(t(9, 0));
        assert!(!is_in_past(date, t(9, 0), instant));
        assert!(is_in_past(
            date,
            t(9, 0),
            instant + chrono::Duration::minutes(1)
        ));
    }
}
