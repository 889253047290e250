//! Working-time window service

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::schedule::{CreateWorkWindow, WorkWindow},
    repository::Repository,
    timetable,
};

use super::providers::ensure_owner;

#[derive(Clone)]
pub struct ScheduleService {
    repository: Repository,
}

impl ScheduleService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a working-time window to the acting provider's calendar
    pub async fn add_window(
        &self,
        acting_account: i64,
        provider_id: i32,
        data: CreateWorkWindow,
    ) -> AppResult<WorkWindow> {
        ensure_owner(&self.repository, acting_account, provider_id).await?;

        let date = timetable::parse_date(&data.date)?;
        let start = timetable::parse_time(&data.start_time)?;
        let end = timetable::parse_time(&data.end_time)?;
        if end <= start {
            return Err(AppError::Validation(
                "Window end must be after its start".to_string(),
            ));
        }

        self.repository
            .schedules
            .add(provider_id, date, start, end)
            .await
    }

    /// Windows of a provider on one date, ordered by start time
    pub async fn windows_for(
        &self,
        provider_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<WorkWindow>> {
        self.repository.providers.get(provider_id).await?;
        self.repository.schedules.windows_for(provider_id, date).await
    }

    /// Every window of a provider, ordered by (date, start time)
    pub async fn all_windows(&self, provider_id: i32) -> AppResult<Vec<WorkWindow>> {
        self.repository.providers.get(provider_id).await?;
        self.repository.schedules.all_windows(provider_id).await
    }

    /// Dates from today on with at least one window
    pub async fn available_dates(&self, provider_id: i32) -> AppResult<Vec<NaiveDate>> {
        self.repository.providers.get(provider_id).await?;
        let today = Utc::now().date_naive();
        self.repository
            .schedules
            .available_dates(provider_id, today)
            .await
    }

    /// Delete one window. Idempotent: a missing id is a no-op success.
    pub async fn delete_window(&self, acting_account: i64, window_id: i32) -> AppResult<()> {
        let window = match self.repository.schedules.find(window_id).await? {
            Some(window) => window,
            None => return Ok(()),
        };
        ensure_owner(&self.repository, acting_account, window.provider_id).await?;
        self.repository.schedules.delete(window_id).await
    }

    /// Delete the provider's whole calendar; returns the count removed
    pub async fn delete_all_windows(
        &self,
        acting_account: i64,
        provider_id: i32,
    ) -> AppResult<u64> {
        ensure_owner(&self.repository, acting_account, provider_id).await?;
        self.repository.schedules.delete_all_for(provider_id).await
    }
}
