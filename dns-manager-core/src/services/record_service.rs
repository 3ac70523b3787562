//! Local DNS record service
//!
//! Edits here only touch the local store, except for proxy toggling which
//! is mirrored to Cloudflare for linked records.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    ActivityAction, ActivityEvent, CreateRecordRequest, DnsRecord, DnsRecordType, EntityType,
    ProxyToggleResult, UpdateRecordRequest,
};

/// Local DNS record service
pub struct RecordService {
    ctx: Arc<ServiceContext>,
}

/// Activity label of a record, e.g. `A www.example.com`.
fn label(record: &DnsRecord) -> String {
    format!("{} {}", record.record_type, record.name)
}

impl RecordService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Load a record of the given domain or fail with `RecordNotFound`
    async fn require_record(&self, domain_id: &str, record_id: &str) -> CoreResult<DnsRecord> {
        self.ctx
            .record_repository()
            .find_by_id(record_id)
            .await?
            .filter(|r| r.domain_id == domain_id)
            .ok_or_else(|| CoreError::RecordNotFound(record_id.to_string()))
    }

    pub async fn list_records(&self, domain_id: &str) -> CoreResult<Vec<DnsRecord>> {
        self.ctx.require_domain(domain_id).await?;
        self.ctx.record_repository().find_by_domain(domain_id).await
    }

    /// Create an unlinked record; push the domain to send it to Cloudflare
    pub async fn create_record(
        &self,
        actor_id: &str,
        domain_id: &str,
        request: CreateRecordRequest,
    ) -> CoreResult<DnsRecord> {
        let domain = self.ctx.require_domain(domain_id).await?;

        let record = DnsRecord::new_local(
            &domain.id,
            request.record_type,
            request.name,
            request.content,
            request.ttl,
            request.priority,
            request.proxied,
        );
        self.ctx.record_repository().save(&record).await?;

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Create, EntityType::DnsRecord, &record.id)
                    .name(label(&record)),
            )
            .await;

        Ok(record)
    }

    pub async fn update_record(
        &self,
        actor_id: &str,
        domain_id: &str,
        record_id: &str,
        request: UpdateRecordRequest,
    ) -> CoreResult<DnsRecord> {
        if request.is_empty() {
            return Err(CoreError::ValidationError("No data to update".to_string()));
        }

        let mut record = self.require_record(domain_id, record_id).await?;
        request.apply_to(&mut record);
        self.ctx.record_repository().save(&record).await?;

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Update, EntityType::DnsRecord, record_id)
                    .name(label(&record)),
            )
            .await;

        Ok(record)
    }

    /// Delete a local record; the remote copy, if any, is kept
    pub async fn delete_record(
        &self,
        actor_id: &str,
        domain_id: &str,
        record_id: &str,
    ) -> CoreResult<()> {
        let record = self.require_record(domain_id, record_id).await?;
        self.ctx.record_repository().delete(record_id).await?;

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Delete, EntityType::DnsRecord, record_id)
                    .name(label(&record)),
            )
            .await;

        Ok(())
    }

    /// Flip the proxy flag of an A, AAAA or CNAME record.
    ///
    /// For linked records on a linked domain the new flag is also sent to
    /// Cloudflare; a remote failure is logged and the local change kept.
    pub async fn toggle_proxy(
        &self,
        actor_id: &str,
        domain_id: &str,
        record_id: &str,
    ) -> CoreResult<ProxyToggleResult> {
        let mut record = self.require_record(domain_id, record_id).await?;

        let proxiable = DnsRecordType::from_str(&record.record_type)
            .is_ok_and(DnsRecordType::is_proxiable);
        if !proxiable {
            return Err(CoreError::ValidationError(
                "Only A, AAAA, and CNAME records can be proxied".to_string(),
            ));
        }

        record.proxied = !record.proxied;
        self.ctx.record_repository().save(&record).await?;

        if let Some(remote_id) = record.provider_record_id.as_deref() {
            if let Err(e) = self.mirror_proxy(domain_id, remote_id, record.proxied).await {
                log::warn!("Failed to update proxy on Cloudflare for record {remote_id}: {e}");
            }
        }

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::ToggleProxy, EntityType::DnsRecord, record_id)
                    .name(label(&record))
                    .details(format!("Proxied: {}", record.proxied)),
            )
            .await;

        Ok(ProxyToggleResult {
            proxied: record.proxied,
            message: if record.proxied {
                "Proxy enabled".to_string()
            } else {
                "Proxy disabled".to_string()
            },
        })
    }

    /// Send the flag to Cloudflare when the domain and its account resolve.
    ///
    /// Errors here never undo the local change; the caller only logs them.
    async fn mirror_proxy(
        &self,
        domain_id: &str,
        remote_id: &str,
        proxied: bool,
    ) -> CoreResult<()> {
        let Some(domain) = self.ctx.domain_repository().find_by_id(domain_id).await? else {
            return Ok(());
        };
        let Some(zone_id) = domain.provider_zone_id.as_deref() else {
            return Ok(());
        };
        let Some(account) = self
            .ctx
            .account_repository()
            .find_by_id(&domain.provider_account_id)
            .await?
        else {
            log::warn!("Account of {} is gone, proxy change kept local", domain.name);
            return Ok(());
        };

        let provider = self.ctx.provider_for(&account)?;
        provider.toggle_proxy(zone_id, remote_id, proxied).await?;
        Ok(())
    }
}
