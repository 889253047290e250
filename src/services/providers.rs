//! Provider registration, secret verification, and account binding

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        client::TouchClient,
        provider::{Provider, ProviderSummary, RegisterProvider},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ProviderService {
    repository: Repository,
}

impl ProviderService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new provider. The access secret is stored as a salted
    /// argon2 hash. When the registering account is known it is bound
    /// immediately; otherwise the binding happens on the first successful
    /// secret verification.
    pub async fn register(
        &self,
        acting_account: Option<i64>,
        data: RegisterProvider,
    ) -> AppResult<Provider> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(account_id) = acting_account {
            // the binding references the clients table
            self.repository
                .clients
                .upsert(account_id, &TouchClient {
                    handle: None,
                    display_name: Some(data.name.clone()),
                    phone: None,
                })
                .await?;
        }

        let secret_hash = hash_secret(&data.secret)?;
        let provider = self
            .repository
            .providers
            .create(
                &data.name,
                &data.specialty,
                data.contact.as_deref(),
                data.address.as_deref(),
                &secret_hash,
                acting_account,
            )
            .await?;

        if let Some(account_id) = acting_account {
            self.repository.clients.mark_provider(account_id).await?;
        }
        Ok(provider)
    }

    /// Verify a provider's access secret for the front-end login flow.
    ///
    /// The first successful verification binds the acting account to the
    /// provider; the binding is one-way and later verifications from any
    /// other account are rejected even with the right secret.
    pub async fn verify_secret(
        &self,
        provider_id: i32,
        secret: &str,
        acting_account: i64,
    ) -> AppResult<Provider> {
        let provider = self.repository.providers.get(provider_id).await?;

        if !verify_secret_hash(&provider.secret_hash, secret) {
            return Err(AppError::Authorization("Invalid secret".to_string()));
        }

        match provider.bound_account_id {
            Some(bound) if bound == acting_account => Ok(provider),
            Some(_) => Err(AppError::Authorization(
                "Provider is already bound to another account".to_string(),
            )),
            None => {
                self.repository
                    .clients
                    .upsert(acting_account, &TouchClient {
                        handle: None,
                        display_name: None,
                        phone: None,
                    })
                    .await?;
                if !self
                    .repository
                    .providers
                    .bind_account(provider_id, acting_account)
                    .await?
                {
                    // lost a concurrent first-login race
                    return Err(AppError::Authorization(
                        "Provider is already bound to another account".to_string(),
                    ));
                }
                self.repository.clients.mark_provider(acting_account).await?;
                self.repository.providers.get(provider_id).await
            }
        }
    }

    /// Rotate the access secret; only the bound account may do this
    pub async fn rotate_secret(
        &self,
        acting_account: i64,
        provider_id: i32,
        new_secret: &str,
    ) -> AppResult<()> {
        if new_secret.len() < 6 {
            return Err(AppError::Validation(
                "Secret must be at least 6 characters".to_string(),
            ));
        }
        ensure_owner(&self.repository, acting_account, provider_id).await?;
        let hash = hash_secret(new_secret)?;
        self.repository
            .providers
            .rotate_secret(provider_id, &hash)
            .await
    }

    pub async fn get(&self, provider_id: i32) -> AppResult<Provider> {
        self.repository.providers.get(provider_id).await
    }

    /// Providers, optionally narrowed to one specialty tag
    pub async fn list(&self, specialty: Option<&str>) -> AppResult<Vec<ProviderSummary>> {
        match specialty {
            Some(tag) => self.repository.providers.list_by_specialty(tag).await,
            None => self.repository.providers.list().await,
        }
    }

    /// Distinct specialty tags for client browsing
    pub async fn specialties(&self) -> AppResult<Vec<String>> {
        self.repository.providers.specialties().await
    }
}

/// Ownership guard shared by every provider-scoped mutation: the acting
/// account must be the one bound to the target provider. The caller's
/// identity is trusted input (the front-end authenticated it); only the
/// binding is checked here.
pub(crate) async fn ensure_owner(
    repository: &Repository,
    acting_account: i64,
    provider_id: i32,
) -> AppResult<Provider> {
    let provider = repository.providers.get(provider_id).await?;
    if provider.bound_account_id != Some(acting_account) {
        return Err(AppError::Authorization(format!(
            "Account {} is not bound to provider {}",
            acting_account, provider_id
        )));
    }
    Ok(provider)
}

/// Hash a secret using Argon2
fn hash_secret(secret: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash secret: {}", e)))
}

fn verify_secret_hash(stored_hash: &str, secret: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
