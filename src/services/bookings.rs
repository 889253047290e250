//! Booking lifecycle service (everything after the commit)

use crate::{
    error::{AppError, AppResult},
    models::booking::BookingDetails,
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingService {
    repository: Repository,
}

impl BookingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, booking_id: i32) -> AppResult<BookingDetails> {
        self.repository.bookings.get_details(booking_id).await
    }

    /// Cancel a booking on behalf of its client.
    ///
    /// Freeing a slot can never create a conflict, so no overlap check is
    /// involved; the transition is guarded only by existence and
    /// ownership. Idempotent on an already-cancelled booking.
    pub async fn cancel(&self, acting_account: i64, booking_id: i32) -> AppResult<()> {
        let booking = self
            .repository
            .bookings
            .find(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;
        if booking.client_id != acting_account {
            return Err(AppError::Authorization(format!(
                "Account {} does not own booking {}",
                acting_account, booking_id
            )));
        }
        self.repository.bookings.cancel(booking_id).await
    }

    /// Active bookings of a client, ordered by (date, time)
    pub async fn for_client(&self, client_id: i64) -> AppResult<Vec<BookingDetails>> {
        self.repository.clients.get(client_id).await?;
        self.repository.bookings.for_client(client_id).await
    }

    /// Active bookings of a provider, ordered by (date, time)
    pub async fn for_provider(&self, provider_id: i32) -> AppResult<Vec<BookingDetails>> {
        self.repository.providers.get(provider_id).await?;
        self.repository.bookings.for_provider(provider_id).await
    }
}
