//! Account service
//!
//! CRUD over Cloudflare accounts plus the read-only calls that check an
//! account against the API (zone listing, connection test, credential
//! verification).

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    Account, AccountView, ActivityAction, ActivityEvent, ConnectionTestResult,
    CreateAccountRequest, CredentialCheck, EntityType, ProviderZone, UpdateAccountRequest,
    ZoneSummary,
};

/// Number of zones shown by a connection test.
const PREVIEW_ZONES: usize = 5;

/// Account service
pub struct AccountService {
    ctx: Arc<ServiceContext>,
}

impl AccountService {
    /// Create an account service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    // ===== CRUD operations =====

    /// List all accounts, without their secrets
    pub async fn list_accounts(&self) -> CoreResult<Vec<AccountView>> {
        let accounts = self.ctx.account_repository().find_all().await?;
        Ok(accounts.iter().map(AccountView::from).collect())
    }

    /// Get account based on ID
    pub async fn get_account(&self, account_id: &str) -> CoreResult<AccountView> {
        let account = self.ctx.require_account(account_id).await?;
        Ok(AccountView::from(&account))
    }

    /// Create an account
    ///
    /// Credentials are stored as given; use [`Self::verify_credentials`] to
    /// check them against Cloudflare.
    pub async fn create_account(
        &self,
        actor_id: &str,
        request: CreateAccountRequest,
    ) -> CoreResult<AccountView> {
        require_credentials(&request.email, &request.api_key)?;

        let account = Account {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            api_key: request.api_key,
            account_id: request.account_id,
            created_at: Utc::now(),
        };
        self.ctx.account_repository().save(&account).await?;
        log::info!("Account created: {} ({})", account.name, account.id);

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(
                    ActivityAction::Create,
                    EntityType::CloudflareAccount,
                    &account.id,
                )
                .name(&account.name),
            )
            .await;

        Ok(AccountView::from(&account))
    }

    /// Partially update an account
    pub async fn update_account(
        &self,
        actor_id: &str,
        account_id: &str,
        request: UpdateAccountRequest,
    ) -> CoreResult<AccountView> {
        if request.is_empty() {
            return Err(CoreError::ValidationError("No data to update".to_string()));
        }

        let mut account = self.ctx.require_account(account_id).await?;
        request.apply_to(&mut account);
        require_credentials(&account.email, &account.api_key)?;
        self.ctx.account_repository().save(&account).await?;

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(
                    ActivityAction::Update,
                    EntityType::CloudflareAccount,
                    account_id,
                )
                .name(&account.name),
            )
            .await;

        Ok(AccountView::from(&account))
    }

    /// Delete an account
    ///
    /// Domains owned by the account are kept; syncing them fails with
    /// `AccountNotFound` until they are reassigned.
    pub async fn delete_account(&self, actor_id: &str, account_id: &str) -> CoreResult<()> {
        let account = self.ctx.require_account(account_id).await?;
        self.ctx.account_repository().delete(account_id).await?;
        log::info!("Account deleted: {} ({account_id})", account.name);

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(
                    ActivityAction::Delete,
                    EntityType::CloudflareAccount,
                    account_id,
                )
                .name(&account.name),
            )
            .await;

        Ok(())
    }

    // ===== Remote checks =====

    /// List the zones visible to an account
    pub async fn list_zones(&self, account_id: &str) -> CoreResult<Vec<ProviderZone>> {
        let account = self.ctx.require_account(account_id).await?;
        let provider = self.ctx.provider_for(&account)?;

        let listing = provider.list_zones().await;
        match listing.error {
            Some(message) => Err(CoreError::ApiError {
                provider: provider.id().to_string(),
                message,
            }),
            None => Ok(listing.zones),
        }
    }

    /// Try a zone listing and summarize the outcome
    ///
    /// A failing listing is reported in the result, not as an error.
    pub async fn test_connection(&self, account_id: &str) -> CoreResult<ConnectionTestResult> {
        let account = self.ctx.require_account(account_id).await?;
        let provider = self.ctx.provider_for(&account)?;

        let listing = provider.list_zones().await;
        if let Some(error) = listing.error {
            log::warn!("Connection test failed for account {account_id}: {error}");
            return Ok(ConnectionTestResult {
                success: false,
                message: format!("Connection failed: {error}"),
                zones_count: 0,
                zones: Vec::new(),
            });
        }

        Ok(ConnectionTestResult {
            success: true,
            message: format!(
                "Connection successful! Found {} zones.",
                listing.zones.len()
            ),
            zones_count: listing.zones.len(),
            zones: listing
                .zones
                .into_iter()
                .take(PREVIEW_ZONES)
                .map(|zone| ZoneSummary {
                    name: zone.name,
                    status: zone.status,
                })
                .collect(),
        })
    }

    /// Check the stored credentials against the verify endpoint
    pub async fn verify_credentials(&self, account_id: &str) -> CoreResult<CredentialCheck> {
        let account = self.ctx.require_account(account_id).await?;
        let provider = self.ctx.provider_for(&account)?;
        Ok(provider.verify_credentials().await)
    }
}

fn require_credentials(email: &str, api_key: &str) -> CoreResult<()> {
    if email.trim().is_empty() || api_key.trim().is_empty() {
        return Err(CoreError::ValidationError(
            "Email and API key are required".to_string(),
        ));
    }
    Ok(())
}
