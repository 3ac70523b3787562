//! Reconciliation between local records and Cloudflare zones
//!
//! Both directions are full overwrites, not merges:
//! - pull replaces every local record of the domain with the remote set,
//!   so records that were never pushed are lost;
//! - push sends every local record, updating linked ones and creating the
//!   rest, and never deletes remote records.
//!
//! Applying a preset only seeds local records; a push is needed to create
//! them remotely.

use std::sync::Arc;

use chrono::Utc;
use dns_manager_provider::DnsProvider;
use futures::stream::{self, StreamExt};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    ActivityAction, ActivityEvent, DEFAULT_DOMAIN_STATUS, DnsRecord, Domain, EntityType,
    ImportReport, PresetApplyReport, PushReport, SyncReport,
};

/// Remote calls in flight at once during a push.
pub const DEFAULT_PUSH_CONCURRENCY: usize = 4;

/// What happened to one record during a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PushOutcome {
    Created,
    Updated,
    Failed,
}

/// A domain resolved for remote work: its zone and a client for its account.
struct LinkedDomain {
    domain: Domain,
    zone_id: String,
    provider: Arc<dyn DnsProvider>,
}

/// Reconciliation service
pub struct SyncService {
    ctx: Arc<ServiceContext>,
    push_concurrency: usize,
}

impl SyncService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            push_concurrency: DEFAULT_PUSH_CONCURRENCY,
        }
    }

    /// Set how many records are pushed concurrently (at least one).
    #[must_use]
    pub fn with_push_concurrency(mut self, push_concurrency: usize) -> Self {
        self.push_concurrency = push_concurrency.max(1);
        self
    }

    /// Resolve domain, zone and account, in that order.
    async fn linked_domain(&self, domain_id: &str) -> CoreResult<LinkedDomain> {
        let domain = self.ctx.require_domain(domain_id).await?;
        let zone_id = domain.provider_zone_id.clone().ok_or_else(|| {
            CoreError::ValidationError("Domain not linked to Cloudflare zone".to_string())
        })?;
        let account = self
            .ctx
            .require_account(&domain.provider_account_id)
            .await?;
        let provider = self.ctx.provider_for(&account)?;

        Ok(LinkedDomain {
            domain,
            zone_id,
            provider,
        })
    }

    // ===== Pull =====

    /// Replace the domain's local records with the zone's records.
    ///
    /// Destructive: local records that were never pushed are dropped. A
    /// failed remote listing reads as an empty zone.
    pub async fn sync_from_provider(
        &self,
        actor_id: &str,
        domain_id: &str,
    ) -> CoreResult<SyncReport> {
        let LinkedDomain {
            domain,
            zone_id,
            provider,
        } = self.linked_domain(domain_id).await?;

        let remote = provider.list_records(&zone_id).await;
        let records: Vec<DnsRecord> = remote
            .into_iter()
            .map(|r| DnsRecord::from_remote(&domain.id, r))
            .collect();

        self.ctx
            .record_repository()
            .replace_for_domain(&domain.id, &records)
            .await?;
        log::info!(
            "Pulled {} records for {} from zone {zone_id}",
            records.len(),
            domain.name
        );

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(
                    ActivityAction::SyncFromCloudflare,
                    EntityType::Domain,
                    &domain.id,
                )
                .name(&domain.name)
                .details(format!("Synced {} records", records.len())),
            )
            .await;

        Ok(SyncReport {
            synced: records.len(),
            message: format!("Synced {} records from Cloudflare", records.len()),
        })
    }

    // ===== Push =====

    /// Send every local record of the domain to its zone.
    ///
    /// Linked records are updated, the others created and linked to the
    /// returned remote id. A failing record is counted and logged; it never
    /// stops the rest of the batch.
    pub async fn push_to_provider(
        &self,
        actor_id: &str,
        domain_id: &str,
    ) -> CoreResult<PushReport> {
        let LinkedDomain {
            domain,
            zone_id,
            provider,
        } = self.linked_domain(domain_id).await?;

        let records = self.ctx.record_repository().find_by_domain(&domain.id).await?;
        let provider = provider.as_ref();
        let zone_id = zone_id.as_str();

        let outcomes: Vec<PushOutcome> = stream::iter(records)
            .map(|record| self.push_record(provider, zone_id, record))
            .buffer_unordered(self.push_concurrency)
            .collect()
            .await;

        let count = |wanted: PushOutcome| outcomes.iter().filter(|o| **o == wanted).count();
        let (created, updated, failed) = (
            count(PushOutcome::Created),
            count(PushOutcome::Updated),
            count(PushOutcome::Failed),
        );
        if failed > 0 {
            log::warn!("Push of {}: {failed} records failed", domain.name);
        }

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::PushToCloudflare, EntityType::Domain, &domain.id)
                    .name(&domain.name)
                    .details(format!("Created {created}, Updated {updated}")),
            )
            .await;

        let message = if failed > 0 {
            format!("Pushed to Cloudflare: {created} created, {updated} updated, {failed} failed")
        } else {
            format!("Pushed to Cloudflare: {created} created, {updated} updated")
        };
        Ok(PushReport {
            created,
            updated,
            failed,
            message,
        })
    }

    async fn push_record(
        &self,
        provider: &dyn DnsProvider,
        zone_id: &str,
        mut record: DnsRecord,
    ) -> PushOutcome {
        let payload = record.to_payload();

        if let Some(remote_id) = record.provider_record_id.as_deref() {
            return match provider.update_record(zone_id, remote_id, &payload).await {
                Ok(_) => PushOutcome::Updated,
                Err(e) => {
                    log::warn!("Failed to update {} {}: {e}", record.record_type, record.name);
                    PushOutcome::Failed
                }
            };
        }

        match provider.create_record(zone_id, &payload).await {
            Ok(remote) => {
                record.provider_record_id = Some(remote.id);
                if let Err(e) = self.ctx.record_repository().save(&record).await {
                    // The remote record exists; the next pull relinks it.
                    log::error!("Created {} remotely but failed to link it: {e}", record.name);
                }
                PushOutcome::Created
            }
            Err(e) => {
                log::warn!("Failed to create {} {}: {e}", record.record_type, record.name);
                PushOutcome::Failed
            }
        }
    }

    // ===== Presets =====

    /// Replace the domain's local records with the preset's templates.
    ///
    /// The new records are unlinked. Cloudflare is not contacted.
    pub async fn apply_preset(
        &self,
        actor_id: &str,
        domain_id: &str,
        preset_id: &str,
    ) -> CoreResult<PresetApplyReport> {
        let mut domain = self.ctx.require_domain(domain_id).await?;
        let preset = self.ctx.require_preset(preset_id).await?;

        let templates = self.ctx.preset_repository().find_records(preset_id).await?;
        let records: Vec<DnsRecord> = templates
            .iter()
            .map(|t| t.materialize(&domain.id, &domain.name))
            .collect();

        self.ctx
            .record_repository()
            .replace_for_domain(&domain.id, &records)
            .await?;

        domain.preset_id = Some(preset.id.clone());
        self.ctx.domain_repository().save(&domain).await?;
        log::info!(
            "Applied preset {} to {} ({} records)",
            preset.name,
            domain.name,
            records.len()
        );

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::ApplyPreset, EntityType::Domain, &domain.id)
                    .name(&domain.name)
                    .details(format!("Applied preset: {}", preset.name)),
            )
            .await;

        Ok(PresetApplyReport {
            applied: records.len(),
            message: format!(
                "Applied preset '{}' with {} records",
                preset.name,
                records.len()
            ),
        })
    }

    // ===== Zone import =====

    /// Create a domain for every zone of the account not yet managed.
    ///
    /// Zones are matched to domains by exact name.
    pub async fn import_zones(&self, actor_id: &str, account_id: &str) -> CoreResult<ImportReport> {
        let account = self.ctx.require_account(account_id).await?;
        let provider = self.ctx.provider_for(&account)?;

        let listing = provider.list_zones().await;
        if let Some(message) = listing.error {
            return Err(CoreError::ApiError {
                provider: provider.id().to_string(),
                message,
            });
        }
        if listing.zones.is_empty() {
            return Err(CoreError::ValidationError(
                "No zones found in this Cloudflare account".to_string(),
            ));
        }

        let total = listing.zones.len();
        let (mut imported, mut skipped) = (0, 0);
        for zone in listing.zones {
            if self
                .ctx
                .domain_repository()
                .find_by_name(&zone.name)
                .await?
                .is_some()
            {
                skipped += 1;
                continue;
            }

            let domain = Domain {
                id: uuid::Uuid::new_v4().to_string(),
                name: zone.name,
                provider_account_id: account.id.clone(),
                provider_zone_id: Some(zone.id),
                registration_date: None,
                client_contact: None,
                provider_name: None,
                preset_id: None,
                status: DEFAULT_DOMAIN_STATUS.to_string(),
                created_at: Utc::now(),
            };
            self.ctx.domain_repository().save(&domain).await?;
            imported += 1;

            self.ctx
                .activity()
                .record(
                    actor_id,
                    ActivityEvent::new(ActivityAction::Import, EntityType::Domain, &domain.id)
                        .name(&domain.name)
                        .details("Imported from Cloudflare"),
                )
                .await;
        }

        log::info!("Imported {imported} zones from {} ({skipped} skipped)", account.name);
        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(
                    ActivityAction::ImportZones,
                    EntityType::CloudflareAccount,
                    &account.id,
                )
                .name(&account.name)
                .details(format!("Imported {imported} zones, skipped {skipped}")),
            )
            .await;

        Ok(ImportReport {
            imported,
            skipped,
            total,
            message: format!(
                "Import complete: {imported} domains imported, {skipped} skipped (already exist)"
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ProviderCall, TestHarness, remote_record, zone};
    use crate::traits::{AccountRepository, DomainRepository, RecordRepository};
    use dns_manager_provider::ZoneListing;

    // ===== pull =====

    #[tokio::test]
    async fn pull_requires_existing_domain() {
        let h = TestHarness::new();
        let err = SyncService::new(h.ctx.clone())
            .sync_from_provider("alice", "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DomainNotFound(_)));
    }

    #[tokio::test]
    async fn pull_requires_zone_link() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        let domain = h.seed_domain(&account, "example.com", None).await;

        let err = SyncService::new(h.ctx.clone())
            .sync_from_provider("alice", &domain.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::ValidationError(msg) if msg == "Domain not linked to Cloudflare zone"
        ));
    }

    #[tokio::test]
    async fn pull_requires_owning_account() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        let domain = h.seed_domain(&account, "example.com", Some("z1")).await;
        h.accounts.delete(&account.id).await.unwrap();

        let err = SyncService::new(h.ctx.clone())
            .sync_from_provider("alice", &domain.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::AccountNotFound(id) if id == account.id));
    }

    #[tokio::test]
    async fn pull_is_destructive_and_idempotent() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        let domain = h.seed_domain(&account, "example.com", Some("z1")).await;
        h.seed_record(&domain, "TXT", "local-only.example.com").await;
        h.provider
            .set_records(vec![
                remote_record("cf-a", "A", "example.com", "192.0.2.10"),
                remote_record("cf-b", "CNAME", "www.example.com", "example.com"),
            ])
            .await;
        let sync = SyncService::new(h.ctx.clone());

        let first = sync.sync_from_provider("alice", &domain.id).await.unwrap();
        let after_first = h.records.find_by_domain(&domain.id).await.unwrap();
        let second = sync.sync_from_provider("alice", &domain.id).await.unwrap();
        let after_second = h.records.find_by_domain(&domain.id).await.unwrap();

        assert_eq!(first.synced, 2);
        assert_eq!(first.message, "Synced 2 records from Cloudflare");
        assert_eq!(second, first);

        let linked = |records: &[DnsRecord]| -> Vec<Option<String>> {
            records.iter().map(|r| r.provider_record_id.clone()).collect()
        };
        assert_eq!(
            linked(&after_first),
            vec![Some("cf-a".to_string()), Some("cf-b".to_string())]
        );
        assert_eq!(linked(&after_second), linked(&after_first));
        assert!(after_second.iter().all(|r| r.name != "local-only.example.com"));
        assert!(after_second.iter().all(|r| !r.proxied));

        let log = h.activity_entries().await;
        assert_eq!(log[0].action, "sync_from_cloudflare");
        assert_eq!(log[0].details.as_deref(), Some("Synced 2 records"));
    }

    // ===== push =====

    #[tokio::test]
    async fn push_links_created_records_then_updates_them() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        let domain = h.seed_domain(&account, "example.com", Some("z1")).await;
        let record = h.seed_record(&domain, "A", "www.example.com").await;
        let sync = SyncService::new(h.ctx.clone());

        let first = sync.push_to_provider("alice", &domain.id).await.unwrap();
        let linked = h.records.find_by_id(&record.id).await.unwrap().unwrap();

        assert_eq!((first.created, first.updated, first.failed), (1, 0, 0));
        assert_eq!(first.message, "Pushed to Cloudflare: 1 created, 0 updated");
        assert_eq!(linked.provider_record_id.as_deref(), Some("cf-1"));

        let second = sync.push_to_provider("alice", &domain.id).await.unwrap();
        assert_eq!((second.created, second.updated), (0, 1));

        assert_eq!(
            h.provider.calls().await,
            vec![
                ProviderCall::Create {
                    zone_id: "z1".to_string(),
                    name: "www.example.com".to_string(),
                },
                ProviderCall::Update {
                    zone_id: "z1".to_string(),
                    record_id: "cf-1".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn push_failure_does_not_abort_batch() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        let domain = h.seed_domain(&account, "example.com", Some("z1")).await;
        for name in ["a.example.com", "bad.example.com", "c.example.com", "d.example.com"] {
            h.seed_record(&domain, "A", name).await;
        }
        h.provider.fail_writes_for("bad.example.com").await;

        let report = SyncService::new(h.ctx.clone())
            .with_push_concurrency(2)
            .push_to_provider("alice", &domain.id)
            .await
            .unwrap();

        assert_eq!((report.created, report.updated, report.failed), (3, 0, 1));
        assert_eq!(
            report.message,
            "Pushed to Cloudflare: 3 created, 0 updated, 1 failed"
        );
        let unlinked: Vec<String> = h
            .records
            .find_by_domain(&domain.id)
            .await
            .unwrap()
            .into_iter()
            .filter(|r| !r.is_linked())
            .map(|r| r.name)
            .collect();
        assert_eq!(unlinked, vec!["bad.example.com".to_string()]);

        let log = h.activity_entries().await;
        assert_eq!(log[0].details.as_deref(), Some("Created 3, Updated 0"));
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        let domain = h.seed_domain(&account, "example.com", Some("z1")).await;
        h.seed_record(&domain, "A", "www.example.com").await;

        let report = SyncService::new(h.ctx.clone())
            .with_push_concurrency(0)
            .push_to_provider("alice", &domain.id)
            .await
            .unwrap();
        assert_eq!(report.created, 1);
    }

    // ===== presets =====

    #[tokio::test]
    async fn apply_preset_seeds_unlinked_records() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        let domain = h.seed_domain(&account, "example.com", Some("z1")).await;
        h.seed_record(&domain, "TXT", "old.example.com").await;
        let preset = h
            .seed_preset(
                "Web",
                &[
                    ("A", "@", "192.0.2.1"),
                    ("CNAME", "www", "example.com"),
                    ("MX", "mail.example.com", "mx.example.net"),
                ],
            )
            .await;

        let report = SyncService::new(h.ctx.clone())
            .apply_preset("alice", &domain.id, &preset.id)
            .await
            .unwrap();

        assert_eq!(report.applied, 3);
        assert_eq!(report.message, "Applied preset 'Web' with 3 records");

        let records = h.records.find_by_domain(&domain.id).await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["example.com", "www.example.com", "mail.example.com"]);
        assert!(records.iter().all(|r| !r.is_linked()));

        let updated = h.domains.find_by_id(&domain.id).await.unwrap().unwrap();
        assert_eq!(updated.preset_id, Some(preset.id));
        assert!(h.provider.calls().await.is_empty());

        let log = h.activity_entries().await;
        assert_eq!(log[0].action, "apply_preset");
        assert_eq!(log[0].details.as_deref(), Some("Applied preset: Web"));
    }

    #[tokio::test]
    async fn apply_missing_preset_fails() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        let domain = h.seed_domain(&account, "example.com", None).await;

        let err = SyncService::new(h.ctx.clone())
            .apply_preset("alice", &domain.id, "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::PresetNotFound(_)));
    }

    // ===== import =====

    #[tokio::test]
    async fn import_twice_skips_everything_the_second_time() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        h.provider
            .set_zones(ZoneListing {
                zones: vec![zone("z1", "example.com"), zone("z2", "example.org")],
                error: None,
            })
            .await;
        let sync = SyncService::new(h.ctx.clone());

        let first = sync.import_zones("alice", &account.id).await.unwrap();
        let second = sync.import_zones("alice", &account.id).await.unwrap();

        assert_eq!((first.imported, first.skipped, first.total), (2, 0, 2));
        assert_eq!((second.imported, second.skipped), (0, 2));
        assert_eq!(
            second.message,
            "Import complete: 0 domains imported, 2 skipped (already exist)"
        );

        let domain = h.domains.find_by_name("example.org").await.unwrap().unwrap();
        assert_eq!(domain.provider_zone_id.as_deref(), Some("z2"));
        assert_eq!(domain.provider_account_id, account.id);

        let actions: Vec<String> = h
            .activity_entries()
            .await
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(actions, vec!["import", "import", "import_zones", "import_zones"]);
    }

    #[tokio::test]
    async fn import_surfaces_listing_error() {
        let h = TestHarness::new();
        let account = h.seed_account().await;
        h.provider
            .set_zones(ZoneListing {
                zones: Vec::new(),
                error: Some("Invalid API Token".to_string()),
            })
            .await;

        let err = SyncService::new(h.ctx.clone())
            .import_zones("alice", &account.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ApiError { .. }));
    }

    #[tokio::test]
    async fn import_of_empty_account_is_rejected() {
        let h = TestHarness::new();
        let account = h.seed_account().await;

        let err = SyncService::new(h.ctx.clone())
            .import_zones("alice", &account.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::ValidationError(msg) if msg == "No zones found in this Cloudflare account"
        ));
    }
}
