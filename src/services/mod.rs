//! Business logic services

pub mod availability;
pub mod bookings;
pub mod clients;
pub mod offerings;
pub mod providers;
pub mod reminders;
pub mod schedules;

use std::sync::Arc;

use crate::{
    config::{BookingConfig, ReminderConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub providers: providers::ProviderService,
    pub offerings: offerings::OfferingService,
    pub schedules: schedules::ScheduleService,
    pub availability: availability::AvailabilityService,
    pub bookings: bookings::BookingService,
    pub clients: clients::ClientService,
    pub reminders: reminders::ReminderService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        booking_config: BookingConfig,
        reminder_config: ReminderConfig,
        notifier: Arc<dyn reminders::ReminderNotifier>,
    ) -> Self {
        Self {
            providers: providers::ProviderService::new(repository.clone()),
            offerings: offerings::OfferingService::new(repository.clone()),
            schedules: schedules::ScheduleService::new(repository.clone()),
            availability: availability::AvailabilityService::new(
                repository.clone(),
                booking_config.clone(),
            ),
            bookings: bookings::BookingService::new(repository.clone()),
            clients: clients::ClientService::new(repository.clone()),
            reminders: reminders::ReminderService::new(repository, reminder_config, notifier),
        }
    }
}
