//! Half-open interval overlap testing for booked appointments

use chrono::{NaiveTime, Timelike};
use tracing::warn;

const DAY_MINUTES: i64 = 24 * 60;

/// An already-booked interval on a provider's day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedInterval {
    pub start: NaiveTime,
    /// True service duration in minutes. None when the joined offering row
    /// no longer carries one; the policy default applies then.
    pub duration_minutes: Option<i64>,
}

fn minute_of_day(t: NaiveTime) -> i64 {
    (t.num_seconds_from_midnight() / 60) as i64
}

/// True iff `[candidate_start, candidate_start + duration)` overlaps none
/// of the existing intervals.
///
/// Two intervals `[s1, s1+d1)` and `[s2, s2+d2)` overlap iff
/// `s1 < s2+d2 && s2 < s1+d1`; boundary-touching intervals do NOT
/// conflict. Intervals running past midnight are clamped to end-of-day.
/// Entries with a garbage duration are scored with the default instead of
/// failing the whole query.
pub fn slot_is_free(
    candidate_start: NaiveTime,
    candidate_duration_minutes: i64,
    existing: &[BookedInterval],
    default_duration_minutes: i64,
) -> bool {
    let s1 = minute_of_day(candidate_start);
    let e1 = (s1 + candidate_duration_minutes.max(0)).min(DAY_MINUTES);

    for interval in existing {
        let mut duration = interval
            .duration_minutes
            .unwrap_or(default_duration_minutes);
        if duration <= 0 {
            warn!(
                start = %interval.start,
                duration,
                "booked interval has a non-positive duration, using default"
            );
            duration = default_duration_minutes;
        }

        let s2 = minute_of_day(interval.start);
        let e2 = (s2 + duration).min(DAY_MINUTES);
        if s1 < e2 && s2 < e1 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn booked(h: u32, m: u32, duration: i64) -> BookedInterval {
        BookedInterval {
            start: t(h, m),
            duration_minutes: Some(duration),
        }
    }

    #[test]
    fn exact_start_collision_is_taken() {
        let existing = [booked(10, 0, 60)];
        assert!(!slot_is_free(t(10, 0), 60, &existing, 60));
    }

    #[test]
    fn boundary_touch_is_free() {
        let existing = [booked(10, 0, 60)];
        // ends exactly when the booking starts
        assert!(slot_is_free(t(9, 0), 60, &existing, 60));
        // starts exactly when the booking ends
        assert!(slot_is_free(t(11, 0), 60, &existing, 60));
    }

    #[test]
    fn containment_and_straddle_conflict() {
        let existing = [booked(10, 0, 120)];
        assert!(!slot_is_free(t(10, 30), 30, &existing, 60));
        assert!(!slot_is_free(t(9, 30), 60, &existing, 60));
        assert!(!slot_is_free(t(11, 30), 60, &existing, 60));
        assert!(!slot_is_free(t(9, 0), 240, &existing, 60));
    }

    #[test]
    fn long_candidate_reaches_later_booking() {
        let existing = [booked(12, 0, 60)];
        assert!(slot_is_free(t(10, 0), 120, &existing, 60));
        assert!(!slot_is_free(t(10, 0), 150, &existing, 60));
    }

    #[test]
    fn unknown_duration_falls_back_to_default() {
        let existing = [BookedInterval {
            start: t(10, 0),
            duration_minutes: None,
        }];
        // default 60: 10:00-11:00 is busy
        assert!(!slot_is_free(t(10, 30), 30, &existing, 60));
        assert!(slot_is_free(t(11, 0), 60, &existing, 60));
        // default 90 extends the busy block
        assert!(!slot_is_free(t(11, 0), 60, &existing, 90));
    }

    #[test]
    fn garbage_duration_is_scored_with_default_not_fatal() {
        let existing = [booked(10, 0, 0), booked(14, 0, -30)];
        assert!(!slot_is_free(t(10, 0), 60, &existing, 60));
        assert!(!slot_is_free(t(14, 30), 60, &existing, 60));
        assert!(slot_is_free(t(12, 0), 60, &existing, 60));
    }

    #[test]
    fn empty_day_is_free() {
        assert!(slot_is_free(t(10, 0), 60, &[], 60));
    }

    #[test]
    fn interval_past_midnight_is_clamped() {
        let existing = [booked(23, 0, 180)];
        assert!(!slot_is_free(t(23, 30), 30, &existing, 60));
        assert!(slot_is_free(t(22, 0), 60, &existing, 60));
    }
}
