//! Bookings repository for database operations

use chrono::{Datelike, NaiveDate, NaiveTime};
use sqlx::{Pool, Postgres, Row, Transaction};
use tracing::warn;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingDetails, BookingStatus},
    timetable::BookedInterval,
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.client_id, b.provider_id, b.booked_date, b.start_time, b.status,
           p.name AS provider_name, p.address AS provider_address,
           o.name AS offering_name, o.price, o.duration_minutes,
           c.display_name AS client_name
    FROM bookings b
    JOIN providers p ON b.provider_id = p.id
    JOIN offerings o ON b.offering_id = o.id
    LEFT JOIN clients c ON b.client_id = c.account_id
"#;

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Serialize booking commits for one provider's day. Transaction-scoped
    /// advisory lock, released automatically on commit or rollback; plain
    /// availability reads are not blocked.
    pub async fn lock_provider_day(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        provider_id: i32,
        date: NaiveDate,
    ) -> AppResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(provider_id)
            .bind(date.num_days_from_ce())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Insert a new active booking inside an open transaction.
    ///
    /// Does NOT re-check overlap; the availability resolver runs the check
    /// within the same transaction before calling this.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client_id: i64,
        provider_id: i32,
        offering_id: i32,
        date: NaiveDate,
        time: NaiveTime,
    ) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO bookings (client_id, provider_id, offering_id, booked_date, start_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(client_id)
        .bind(provider_id)
        .bind(offering_id)
        .bind(date)
        .bind(time)
        .fetch_one(&mut **tx)
        .await?;
        Ok(id)
    }

    /// Active booked intervals of one provider on one date, with the true
    /// service duration joined from the catalog.
    ///
    /// Callable against the pool or an open transaction: the commit path
    /// re-runs exactly this query inside its transaction. Rows this query
    /// cannot decode are skipped with a warning; availability is computed
    /// from the remaining rows.
    pub async fn active_intervals_for<'e, E>(
        &self,
        executor: E,
        provider_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<BookedInterval>>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query(
            r#"
            SELECT b.start_time, o.duration_minutes
            FROM bookings b
            LEFT JOIN offerings o ON b.offering_id = o.id
            WHERE b.provider_id = $1 AND b.booked_date = $2 AND b.status = 'active'
            "#,
        )
        .bind(provider_id)
        .bind(date)
        .fetch_all(executor)
        .await?;

        let mut intervals = Vec::with_capacity(rows.len());
        for row in rows {
            match row.try_get::<NaiveTime, _>("start_time") {
                Ok(start) => {
                    let duration_minutes = row
                        .try_get::<Option<i32>, _>("duration_minutes")
                        .ok()
                        .flatten()
                        .map(i64::from);
                    intervals.push(BookedInterval {
                        start,
                        duration_minutes,
                    });
                }
                Err(e) => {
                    warn!(provider_id, %date, "skipping unreadable booking row: {}", e);
                }
            }
        }
        Ok(intervals)
    }

    /// Convenience wrapper over [`Self::active_intervals_for`] on the pool
    pub async fn active_intervals(
        &self,
        provider_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<BookedInterval>> {
        self.active_intervals_for(&self.pool, provider_id, date)
            .await
    }

    /// Booking with joined display fields
    pub async fn get_details(&self, booking_id: i32) -> AppResult<BookingDetails> {
        let query = format!("{} WHERE b.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, BookingDetails>(&query)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))
    }

    /// Booking by id, None if it does not exist
    pub async fn find(&self, booking_id: i32) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Transition a booking to cancelled.
    ///
    /// Idempotent on an already-cancelled booking; cancelling a completed
    /// booking is rejected (the transition graph is one-way).
    pub async fn cancel(&self, booking_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'cancelled' WHERE id = $1 AND status = 'active'",
        )
        .bind(booking_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }
        match self.find(booking_id).await?.map(|b| b.status) {
            None => Err(AppError::NotFound(format!(
                "Booking {} not found",
                booking_id
            ))),
            Some(BookingStatus::Cancelled) => Ok(()),
            Some(BookingStatus::Completed) => Err(AppError::Validation(
                "Cannot cancel a completed booking".to_string(),
            )),
            // lost a race against another cancel/sweep; the terminal
            // states above cover a single re-check
            Some(BookingStatus::Active) => Ok(()),
        }
    }

    /// Transition every active booking dated strictly before `cutoff` to
    /// completed; returns the count mutated
    pub async fn sweep_complete(&self, cutoff: NaiveDate) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'completed' WHERE booked_date < $1 AND status = 'active'",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Every active booking on a date, for the reminder scans
    pub async fn active_on(&self, date: NaiveDate) -> AppResult<Vec<BookingDetails>> {
        let query = format!(
            "{} WHERE b.booked_date = $1 AND b.status = 'active' ORDER BY b.start_time",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Active bookings of a client, ordered by (date, time)
    pub async fn for_client(&self, client_id: i64) -> AppResult<Vec<BookingDetails>> {
        let query = format!(
            "{} WHERE b.client_id = $1 AND b.status = 'active' ORDER BY b.booked_date, b.start_time",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Active bookings of a provider, ordered by (date, time)
    pub async fn for_provider(&self, provider_id: i32) -> AppResult<Vec<BookingDetails>> {
        let query = format!(
            "{} WHERE b.provider_id = $1 AND b.status = 'active' ORDER BY b.booked_date, b.start_time",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(provider_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
