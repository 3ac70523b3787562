//! `DnsProvider` implementation for Cloudflare

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{CredentialCheck, ProviderRecord, RecordPayload, ZoneListing};

use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareResponse, CloudflareZone, RECORDS_PER_PAGE,
    ZONES_PER_PAGE,
};

/// Body of a proxy-only PATCH.
#[derive(Serialize)]
struct ProxyPatch {
    proxied: bool,
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn verify_credentials(&self) -> CredentialCheck {
        let reply = match self.send(Method::GET, "/user/tokens/verify", NO_BODY).await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("Credential check failed: {e}");
                return CredentialCheck {
                    valid: false,
                    message: e.to_string(),
                };
            }
        };

        let envelope =
            serde_json::from_str::<CloudflareResponse<serde_json::Value>>(&reply.body).ok();
        match envelope {
            Some(envelope) if reply.is_ok() && envelope.success => CredentialCheck {
                valid: true,
                message: "API credentials are valid".to_string(),
            },
            other => CredentialCheck {
                valid: false,
                message: other
                    .and_then(|envelope| envelope.first_error())
                    .map_or_else(|| "Unknown error".to_string(), |(_, message)| message),
            },
        }
    }

    async fn list_zones(&self) -> ZoneListing {
        let path = format!("/zones?per_page={ZONES_PER_PAGE}");
        let reply = match self.send(Method::GET, &path, NO_BODY).await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("Zone listing failed: {e}");
                return ZoneListing::failed(e.to_string());
            }
        };

        let fallback = format!("HTTP {}: Failed to fetch zones", reply.status);
        match serde_json::from_str::<CloudflareResponse<Vec<CloudflareZone>>>(&reply.body) {
            Ok(envelope) if reply.is_ok() && envelope.success => ZoneListing {
                zones: envelope
                    .result
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                error: None,
            },
            Ok(envelope) => ZoneListing::failed(
                envelope
                    .first_error()
                    .map_or(fallback, |(_, message)| message),
            ),
            Err(e) if reply.is_ok() => ZoneListing::failed(self.parse_error(e).to_string()),
            Err(_) => ZoneListing::failed(fallback),
        }
    }

    async fn list_records(&self, zone_id: &str) -> Vec<ProviderRecord> {
        let path = format!("/zones/{zone_id}/dns_records?per_page={RECORDS_PER_PAGE}");
        let context = ErrorContext {
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };

        match self
            .call::<Vec<CloudflareDnsRecord>, ()>(Method::GET, &path, None, context)
            .await
        {
            Ok(records) => records.into_iter().map(Into::into).collect(),
            Err(e) => {
                log::warn!("Listing records of zone {zone_id} failed, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    async fn create_record(
        &self,
        zone_id: &str,
        payload: &RecordPayload,
    ) -> Result<ProviderRecord> {
        let context = ErrorContext {
            record_name: Some(payload.name.clone()),
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let record: CloudflareDnsRecord = self
            .call(
                Method::POST,
                &format!("/zones/{zone_id}/dns_records"),
                Some(payload),
                context,
            )
            .await?;
        Ok(record.into())
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<ProviderRecord> {
        let context = ErrorContext {
            record_name: Some(payload.name.clone()),
            record_id: Some(record_id.to_string()),
            domain: Some(zone_id.to_string()),
        };
        let record: CloudflareDnsRecord = self
            .call(
                Method::PATCH,
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                Some(payload),
                context,
            )
            .await?;
        Ok(record.into())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let reply = self
            .send(
                Method::DELETE,
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                NO_BODY,
            )
            .await?;

        if reply.is_ok() {
            return Ok(());
        }

        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let err = self.status_error(&reply, context);
        log::warn!("Deleting record {record_id} failed: {err}");
        Err(err)
    }

    async fn toggle_proxy(
        &self,
        zone_id: &str,
        record_id: &str,
        proxied: bool,
    ) -> Result<ProviderRecord> {
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let record: CloudflareDnsRecord = self
            .call(
                Method::PATCH,
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                Some(&ProxyPatch { proxied }),
                context,
            )
            .await?;
        Ok(record.into())
    }
}
