//! Repository layer for database operations

pub mod bookings;
pub mod clients;
pub mod offerings;
pub mod providers;
pub mod schedules;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub providers: providers::ProvidersRepository,
    pub offerings: offerings::OfferingsRepository,
    pub schedules: schedules::SchedulesRepository,
    pub bookings: bookings::BookingsRepository,
    pub clients: clients::ClientsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            providers: providers::ProvidersRepository::new(pool.clone()),
            offerings: offerings::OfferingsRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            clients: clients::ClientsRepository::new(pool.clone()),
            pool,
        }
    }
}
