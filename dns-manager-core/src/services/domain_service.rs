//! Domain management service

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, SyncService};
use crate::types::{
    ActivityAction, ActivityEvent, CreateDomainRequest, DEFAULT_DOMAIN_STATUS, Domain, DomainView,
    EntityType, UpdateDomainRequest,
};

/// Domain management service
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    /// Create a domain service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    async fn view(&self, domain: Domain) -> CoreResult<DomainView> {
        let records_count = self
            .ctx
            .record_repository()
            .count_by_domain(&domain.id)
            .await?;
        Ok(DomainView {
            domain,
            records_count,
        })
    }

    /// List all domains with their record counts
    pub async fn list_domains(&self) -> CoreResult<Vec<DomainView>> {
        let domains = self.ctx.domain_repository().find_all().await?;
        let mut views = Vec::with_capacity(domains.len());
        for domain in domains {
            views.push(self.view(domain).await?);
        }
        Ok(views)
    }

    pub async fn get_domain(&self, domain_id: &str) -> CoreResult<DomainView> {
        let domain = self.ctx.require_domain(domain_id).await?;
        self.view(domain).await
    }

    /// Create a domain
    ///
    /// Without an explicit zone id the zone is looked up by name on the
    /// owning account; a failed lookup leaves the domain unlinked. When a
    /// preset is given it is applied right after creation.
    pub async fn create_domain(
        &self,
        actor_id: &str,
        request: CreateDomainRequest,
    ) -> CoreResult<DomainView> {
        if self
            .ctx
            .domain_repository()
            .find_by_name(&request.name)
            .await?
            .is_some()
        {
            return Err(CoreError::DomainExists(request.name));
        }
        if let Some(preset_id) = request.preset_id.as_deref() {
            self.ctx.require_preset(preset_id).await?;
        }

        let zone_id = match request.provider_zone_id {
            Some(zone_id) => Some(zone_id),
            None => self
                .resolve_zone(&request.provider_account_id, &request.name)
                .await?,
        };

        let domain = Domain {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name,
            provider_account_id: request.provider_account_id,
            provider_zone_id: zone_id,
            registration_date: request.registration_date,
            client_contact: request.client_contact,
            provider_name: request.provider_name,
            preset_id: None,
            status: DEFAULT_DOMAIN_STATUS.to_string(),
            created_at: Utc::now(),
        };
        self.ctx.domain_repository().save(&domain).await?;
        log::info!("Domain created: {} ({})", domain.name, domain.id);

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Create, EntityType::Domain, &domain.id)
                    .name(&domain.name),
            )
            .await;

        if let Some(preset_id) = request.preset_id.as_deref() {
            SyncService::new(self.ctx.clone())
                .apply_preset(actor_id, &domain.id, preset_id)
                .await?;
        }

        self.get_domain(&domain.id).await
    }

    /// Zone id for `name` on the account, if both can be found.
    async fn resolve_zone(&self, account_id: &str, name: &str) -> CoreResult<Option<String>> {
        let Some(account) = self.ctx.account_repository().find_by_id(account_id).await? else {
            log::debug!("Account {account_id} not found, creating {name} unlinked");
            return Ok(None);
        };
        let provider = self.ctx.provider_for(&account)?;
        let zone = provider.find_zone_by_name(name).await;
        if zone.is_none() {
            log::info!("No Cloudflare zone named {name} on account {}", account.name);
        }
        Ok(zone.map(|z| z.id))
    }

    /// Partially update a domain
    pub async fn update_domain(
        &self,
        actor_id: &str,
        domain_id: &str,
        request: UpdateDomainRequest,
    ) -> CoreResult<DomainView> {
        if request.is_empty() {
            return Err(CoreError::ValidationError("No data to update".to_string()));
        }

        let mut domain = self.ctx.require_domain(domain_id).await?;
        if let Some(name) = request.name.as_deref() {
            if let Some(other) = self.ctx.domain_repository().find_by_name(name).await? {
                if other.id != domain.id {
                    return Err(CoreError::DomainExists(name.to_string()));
                }
            }
        }

        request.apply_to(&mut domain);
        self.ctx.domain_repository().save(&domain).await?;

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Update, EntityType::Domain, &domain.id)
                    .name(&domain.name),
            )
            .await;

        self.view(domain).await
    }

    /// Delete a domain and its local records
    ///
    /// Records on Cloudflare are left alone.
    pub async fn delete_domain(&self, actor_id: &str, domain_id: &str) -> CoreResult<()> {
        let domain = self.ctx.require_domain(domain_id).await?;
        self.ctx.domain_repository().delete(domain_id).await?;
        log::info!("Domain deleted: {} ({domain_id})", domain.name);

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Delete, EntityType::Domain, domain_id)
                    .name(&domain.name),
            )
            .await;

        Ok(())
    }
}
