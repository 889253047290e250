//! Time-relative reminders and the cleanup sweep
//!
//! Three independent periodic duties: a daily day-ahead reminder batch, an
//! hour-ahead scan on a short period, and a daily sweep that retires
//! elapsed bookings. Each duty is also callable directly (idempotent-safe)
//! by an external scheduler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use tracing::{error, info};

use crate::{
    config::ReminderConfig,
    error::AppResult,
    models::booking::BookingDetails,
    repository::Repository,
};

/// Which horizon a reminder event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    DayAhead,
    HourAhead,
}

/// A reminder ready for delivery, with everything the delivering
/// collaborator needs to build its message
#[derive(Debug, Clone)]
pub struct ReminderEvent {
    pub kind: ReminderKind,
    pub booking: BookingDetails,
}

/// Delivery seam for reminder events.
///
/// Delivery is at-least-once: the hour-ahead scan can hit the same booking
/// in adjacent runs, and it cannot distinguish a first hit from a repeat.
/// Implementations that must not re-notify have to record "already sent"
/// per booking themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReminderNotifier: Send + Sync {
    async fn notify(&self, event: &ReminderEvent) -> AppResult<()>;
}

/// Default notifier: logs the event and leaves delivery to whoever tails
/// the logs. Real deployments plug a transport in here.
pub struct LogNotifier;

#[async_trait]
impl ReminderNotifier for LogNotifier {
    async fn notify(&self, event: &ReminderEvent) -> AppResult<()> {
        info!(
            kind = ?event.kind,
            booking_id = event.booking.id,
            client_id = event.booking.client_id,
            date = %event.booking.booked_date,
            time = %event.booking.start_time,
            provider = %event.booking.provider_name,
            "reminder due"
        );
        Ok(())
    }
}

/// True iff the booking starts within the hour-ahead band relative to
/// `now` (inclusive on both ends)
fn in_hour_ahead_band(
    booking: &BookingDetails,
    now: NaiveDateTime,
    band_min_minutes: i64,
    band_max_minutes: i64,
) -> bool {
    let start = booking.booked_date.and_time(booking.start_time);
    let lead = start.signed_duration_since(now);
    lead >= Duration::minutes(band_min_minutes) && lead <= Duration::minutes(band_max_minutes)
}

/// Emit one event per booking; a failed delivery is logged and skipped,
/// never aborting the batch. Returns the number delivered.
async fn emit_events(
    notifier: &dyn ReminderNotifier,
    kind: ReminderKind,
    bookings: Vec<BookingDetails>,
) -> u32 {
    let mut delivered = 0;
    for booking in bookings {
        let booking_id = booking.id;
        let event = ReminderEvent { kind, booking };
        match notifier.notify(&event).await {
            Ok(()) => delivered += 1,
            Err(e) => error!(booking_id, ?kind, "failed to deliver reminder: {}", e),
        }
    }
    delivered
}

#[derive(Clone)]
pub struct ReminderService {
    repository: Repository,
    config: ReminderConfig,
    notifier: Arc<dyn ReminderNotifier>,
}

impl ReminderService {
    pub fn new(
        repository: Repository,
        config: ReminderConfig,
        notifier: Arc<dyn ReminderNotifier>,
    ) -> Self {
        Self {
            repository,
            config,
            notifier,
        }
    }

    /// One reminder per active booking dated tomorrow
    pub async fn run_day_ahead(&self, now: NaiveDateTime) -> AppResult<u32> {
        let tomorrow = now.date() + Duration::days(1);
        let bookings = self.repository.bookings.active_on(tomorrow).await?;
        let delivered =
            emit_events(self.notifier.as_ref(), ReminderKind::DayAhead, bookings).await;
        info!(%tomorrow, delivered, "day-ahead reminder batch done");
        Ok(delivered)
    }

    /// One reminder per active booking starting within the configured band
    /// (default 55-65 minutes) from `now`.
    ///
    /// The band is wider than the scan period would strictly need so that
    /// polling granularity never skips a booking; the resulting repeat
    /// hits are the delivering collaborator's problem (see
    /// [`ReminderNotifier`]).
    pub async fn run_hour_ahead(&self, now: NaiveDateTime) -> AppResult<u32> {
        let bookings = self.repository.bookings.active_on(now.date()).await?;
        let due: Vec<BookingDetails> = bookings
            .into_iter()
            .filter(|b| {
                in_hour_ahead_band(
                    b,
                    now,
                    self.config.band_min_minutes,
                    self.config.band_max_minutes,
                )
            })
            .collect();
        let delivered =
            emit_events(self.notifier.as_ref(), ReminderKind::HourAhead, due).await;
        if delivered > 0 {
            info!(delivered, "hour-ahead reminder batch done");
        }
        Ok(delivered)
    }

    /// Transition every active booking whose date has fully elapsed
    /// (strictly before today) to completed
    pub async fn run_cleanup(&self, now: NaiveDateTime) -> AppResult<u64> {
        let completed = self.repository.bookings.sweep_complete(now.date()).await?;
        info!(completed, "cleanup sweep done");
        Ok(completed)
    }
}

/// Seconds until the next occurrence of `hour:00` UTC
fn seconds_until_hour(now: NaiveDateTime, hour: u32) -> u64 {
    let today_run = now
        .date()
        .and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| now.date().and_hms_opt(0, 0, 0).expect("midnight exists"));
    let next = if now < today_run {
        today_run
    } else {
        today_run + Duration::days(1)
    };
    next.signed_duration_since(now).num_seconds().max(1) as u64
}

/// Spawn the three periodic duty loops. The loops hold no database locks
/// between runs and keep going when a run fails.
pub fn spawn_workers(service: ReminderService) {
    let day_ahead_hour = service.config.day_ahead_hour;
    let scan_minutes = service.config.scan_minutes.max(1);

    let day_ahead = service.clone();
    tokio::spawn(async move {
        loop {
            let now = Utc::now().naive_utc();
            let wait = seconds_until_hour(now, day_ahead_hour);
            tokio::time::sleep(std::time::Duration::from_secs(wait)).await;
            if let Err(e) = day_ahead.run_day_ahead(Utc::now().naive_utc()).await {
                error!("day-ahead reminder run failed: {}", e);
            }
        }
    });

    let hour_ahead = service.clone();
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(scan_minutes * 60));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = hour_ahead.run_hour_ahead(Utc::now().naive_utc()).await {
                error!("hour-ahead reminder run failed: {}", e);
            }
        }
    });

    tokio::spawn(async move {
        loop {
            let now = Utc::now().naive_utc();
            let wait = seconds_until_hour(now, 0);
            tokio::time::sleep(std::time::Duration::from_secs(wait)).await;
            if let Err(e) = service.run_cleanup(Utc::now().naive_utc()).await {
                error!("cleanup sweep failed: {}", e);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingStatus;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    fn details(date: &str, time: &str) -> BookingDetails {
        BookingDetails {
            id: 1,
            client_id: 42,
            provider_id: 7,
            booked_date: date.parse::<NaiveDate>().unwrap(),
            start_time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            status: BookingStatus::Active,
            provider_name: "Anna".to_string(),
            provider_address: Some("10 Pushkin St".to_string()),
            offering_name: "Haircut".to_string(),
            price: Decimal::new(150_000, 2),
            duration_minutes: 60,
            client_name: Some("Kira".to_string()),
        }
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        date.parse::<NaiveDate>()
            .unwrap()
            .and_time(NaiveTime::parse_from_str(time, "%H:%M").unwrap())
    }

    #[test]
    fn sixty_minutes_ahead_is_in_band() {
        let booking = details("2025-09-10", "10:00");
        assert!(in_hour_ahead_band(&booking, at("2025-09-10", "09:00"), 55, 65));
    }

    #[test]
    fn eighty_minutes_ahead_is_outside_band() {
        let booking = details("2025-09-10", "10:20");
        assert!(!in_hour_ahead_band(&booking, at("2025-09-10", "09:00"), 55, 65));
    }

    #[test]
    fn band_bounds_are_inclusive() {
        let booking = details("2025-09-10", "10:00");
        assert!(in_hour_ahead_band(&booking, at("2025-09-10", "09:05"), 55, 65));
        assert!(in_hour_ahead_band(&booking, at("2025-09-10", "08:55"), 55, 65));
        assert!(!in_hour_ahead_band(&booking, at("2025-09-10", "09:06"), 55, 65));
        assert!(!in_hour_ahead_band(&booking, at("2025-09-10", "08:54"), 55, 65));
    }

    #[test]
    fn elapsed_booking_is_not_due() {
        let booking = details("2025-09-10", "10:00");
        assert!(!in_hour_ahead_band(&booking, at("2025-09-10", "10:30"), 55, 65));
    }

    #[tokio::test]
    async fn one_failed_delivery_does_not_abort_the_batch() {
        use crate::error::AppError;

        let mut notifier = MockReminderNotifier::new();
        let mut calls = 0;
        notifier.expect_notify().times(3).returning(move |_| {
            calls += 1;
            if calls == 2 {
                Err(AppError::Internal("transport down".to_string()))
            } else {
                Ok(())
            }
        });

        let bookings = vec![
            details("2025-09-10", "10:00"),
            details("2025-09-10", "11:00"),
            details("2025-09-10", "12:00"),
        ];
        let delivered = emit_events(&notifier, ReminderKind::DayAhead, bookings).await;
        assert_eq!(delivered, 2);
    }

    #[test]
    fn next_daily_run_is_today_or_tomorrow() {
        let before = at("2025-09-10", "08:00");
        assert_eq!(seconds_until_hour(before, 10), 2 * 3600);
        let after = at("2025-09-10", "12:00");
        assert_eq!(seconds_until_hour(after, 10), 22 * 3600);
    }
}
