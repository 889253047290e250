//! Availability resolution and race-safe booking commits
//!
//! The resolver turns a provider's raw working-time windows plus the
//! already-booked appointments into the set of offerable start times for a
//! given service duration, and re-runs the same conflict check inside the
//! commit transaction so that two clients racing for one slot can never
//! both win.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        booking::{BookingConfirmation, CreateBooking},
        offering::Offering,
    },
    repository::Repository,
    timetable::{self, BookedInterval},
};

/// Offerable start times for one provider, date, and service duration.
///
/// Pure: windows and booked intervals are already fetched. Per window, a
/// fixed-step grid is generated; a grid point survives unless it lies in
/// the past or its `[point, point + duration)` interval overlaps an active
/// booking (half-open test). The union across windows is returned
/// ascending with duplicates from overlapping windows removed.
pub fn offerable_slots(
    windows: &[(NaiveTime, NaiveTime)],
    existing: &[BookedInterval],
    service_duration_minutes: i64,
    step_minutes: i64,
    default_duration_minutes: i64,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    let mut slots: Vec<NaiveTime> = Vec::new();
    for &(window_start, window_end) in windows {
        for slot in timetable::time_slots(window_start, window_end, step_minutes) {
            if timetable::is_in_past(date, slot, now) {
                continue;
            }
            if !timetable::slot_is_free(
                slot,
                service_duration_minutes,
                existing,
                default_duration_minutes,
            ) {
                continue;
            }
            slots.push(slot);
        }
    }
    slots.sort_unstable();
    slots.dedup();
    slots
}

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
    policy: BookingConfig,
}

impl AvailabilityService {
    pub fn new(repository: Repository, policy: BookingConfig) -> Self {
        Self { repository, policy }
    }

    /// Offering that belongs to the given provider and is still bookable
    async fn bookable_offering(&self, provider_id: i32, offering_id: i32) -> AppResult<Offering> {
        let offering = self.repository.offerings.get(offering_id).await?;
        if offering.provider_id != provider_id {
            return Err(AppError::Validation(format!(
                "Offering {} does not belong to provider {}",
                offering_id, provider_id
            )));
        }
        if offering.retired_at.is_some() {
            return Err(AppError::Validation(format!(
                "Offering {} has been retired",
                offering_id
            )));
        }
        Ok(offering)
    }

    /// Slots a client can be offered for (provider, date, offering).
    /// An empty result means no availability on that date.
    pub async fn available_slots(
        &self,
        provider_id: i32,
        date: NaiveDate,
        offering_id: i32,
    ) -> AppResult<Vec<NaiveTime>> {
        self.repository.providers.get(provider_id).await?;
        let offering = self.bookable_offering(provider_id, offering_id).await?;

        let windows = self
            .repository
            .schedules
            .windows_for(provider_id, date)
            .await?;
        if windows.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self
            .repository
            .bookings
            .active_intervals(provider_id, date)
            .await?;

        let window_bounds: Vec<(NaiveTime, NaiveTime)> = windows
            .iter()
            .map(|w| (w.start_time, w.end_time))
            .collect();

        Ok(offerable_slots(
            &window_bounds,
            &existing,
            i64::from(offering.duration_minutes),
            self.policy.slot_step_minutes,
            self.policy.default_duration_minutes,
            date,
            Utc::now().naive_utc(),
        ))
    }

    /// Commit a booking.
    ///
    /// The overlap check runs again inside the same transaction as the
    /// insert, under an advisory lock on (provider, date), closing the
    /// race between availability display and commit. Losing the race is a
    /// Conflict, never a silent double insert.
    pub async fn commit_booking(&self, request: CreateBooking) -> AppResult<BookingConfirmation> {
        let date = timetable::parse_date(&request.date)?;
        let time = timetable::parse_time(&request.time)?;

        let provider = self.repository.providers.get(request.provider_id).await?;
        let offering = self
            .bookable_offering(request.provider_id, request.offering_id)
            .await?;
        // the booking references the clients table
        self.repository.clients.get(request.client_id).await?;

        if timetable::is_in_past(date, time, Utc::now().naive_utc()) {
            return Err(AppError::Validation(
                "Cannot book a time in the past".to_string(),
            ));
        }

        let mut tx = self.repository.pool.begin().await?;
        self.repository
            .bookings
            .lock_provider_day(&mut tx, request.provider_id, date)
            .await?;

        let existing = self
            .repository
            .bookings
            .active_intervals_for(&mut *tx, request.provider_id, date)
            .await?;
        if !timetable::slot_is_free(
            time,
            i64::from(offering.duration_minutes),
            &existing,
            self.policy.default_duration_minutes,
        ) {
            return Err(AppError::Conflict(format!(
                "Slot {} on {} is no longer available",
                request.time, request.date
            )));
        }

        let booking_id = self
            .repository
            .bookings
            .create(
                &mut tx,
                request.client_id,
                request.provider_id,
                request.offering_id,
                date,
                time,
            )
            .await?;
        tx.commit().await?;

        Ok(BookingConfirmation {
            id: booking_id,
            booked_date: date,
            start_time: time,
            provider_name: provider.name,
            provider_address: provider.address,
            offering_name: offering.name,
            price: offering.price,
            duration_minutes: offering.duration_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booked(h: u32, m: u32, duration: i64) -> BookedInterval {
        BookedInterval {
            start: t(h, m),
            duration_minutes: Some(duration),
        }
    }

    // far enough in the past that no test slot is filtered as elapsed
    fn long_ago() -> NaiveDateTime {
        d("2000-01-01").and_time(t(0, 0))
    }

    #[test]
    fn booked_hour_is_skipped() {
        let slots = offerable_slots(
            &[(t(10, 0), t(13, 0))],
            &[booked(10, 0, 60)],
            60,
            60,
            60,
            d("2025-09-10"),
            long_ago(),
        );
        assert_eq!(slots, vec![t(11, 0), t(12, 0)]);
    }

    #[test]
    fn no_windows_means_no_slots() {
        let slots = offerable_slots(&[], &[], 60, 60, 60, d("2025-09-10"), long_ago());
        assert!(slots.is_empty());
    }

    #[test]
    fn free_day_offers_whole_grid() {
        let slots = offerable_slots(
            &[(t(9, 0), t(18, 0))],
            &[],
            60,
            60,
            60,
            d("2025-09-10"),
            long_ago(),
        );
        assert_eq!(slots.len(), 9);
        assert_eq!(slots[0], t(9, 0));
        assert_eq!(slots[8], t(17, 0));
    }

    #[test]
    fn long_service_needs_room_before_next_booking() {
        // 90-minute service on an hourly grid: 10:00 runs into the 11:00
        // booking, 12:00 is clear
        let slots = offerable_slots(
            &[(t(10, 0), t(14, 0))],
            &[booked(11, 0, 60)],
            90,
            60,
            60,
            d("2025-09-10"),
            long_ago(),
        );
        assert_eq!(slots, vec![t(12, 0), t(13, 0)]);
    }

    #[test]
    fn past_slots_are_withheld() {
        let date = d("2025-09-10");
        let slots = offerable_slots(
            &[(t(9, 0), t(13, 0))],
            &[],
            60,
            60,
            60,
            date,
            date.and_time(t(10, 30)),
        );
        // 09:00 and 10:00 already elapsed at 10:30
        assert_eq!(slots, vec![t(11, 0), t(12, 0)]);
    }

    #[test]
    fn overlapping_windows_offer_each_slot_once() {
        let slots = offerable_slots(
            &[(t(9, 0), t(12, 0)), (t(10, 0), t(14, 0))],
            &[],
            60,
            60,
            60,
            d("2025-09-10"),
            long_ago(),
        );
        assert_eq!(
            slots,
            vec![t(9, 0), t(10, 0), t(11, 0), t(12, 0), t(13, 0)]
        );
    }

    #[test]
    fn disjoint_windows_union_in_order() {
        let slots = offerable_slots(
            &[(t(14, 0), t(16, 0)), (t(9, 0), t(11, 0))],
            &[],
            60,
            60,
            60,
            d("2025-09-10"),
            long_ago(),
        );
        assert_eq!(slots, vec![t(9, 0), t(10, 0), t(14, 0), t(15, 0)]);
    }

    #[test]
    fn boundary_touching_booking_does_not_block() {
        // booking 11:00-12:00; the 10:00 slot of a 60-minute service ends
        // exactly at the booking start
        let slots = offerable_slots(
            &[(t(10, 0), t(14, 0))],
            &[booked(11, 0, 60)],
            60,
            60,
            60,
            d("2025-09-10"),
            long_ago(),
        );
        assert_eq!(slots, vec![t(10, 0), t(12, 0), t(13, 0)]);
    }
}
