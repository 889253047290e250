//! Client identity service

use crate::{
    error::AppResult,
    models::client::{Client, TouchClient},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClientService {
    repository: Repository,
}

impl ClientService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record an interaction: create the client on first contact, refresh
    /// the display fields afterwards (last write wins)
    pub async fn touch(&self, account_id: i64, data: TouchClient) -> AppResult<Client> {
        self.repository.clients.upsert(account_id, &data).await
    }

    pub async fn get(&self, account_id: i64) -> AppResult<Client> {
        self.repository.clients.get(account_id).await
    }
}
