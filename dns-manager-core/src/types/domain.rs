//! Domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status given to newly created domains.
pub const DEFAULT_DOMAIN_STATUS: &str = "active";

/// A managed domain, optionally linked to a Cloudflare zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    /// Domain ID (UUID)
    pub id: String,
    /// Fully qualified name, unique across domains
    pub name: String,
    /// Owning account
    pub provider_account_id: String,
    /// Remote zone backing this domain; `None` until resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    /// Free-form client contact (phone, messenger handle...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_contact: Option<String>,
    /// Registrar or reseller name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    /// Last applied preset; kept even if that preset is deleted later
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
    pub status: String,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl Domain {
    /// Whether the domain can be synchronized with Cloudflare.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.provider_zone_id.is_some()
    }
}

/// Domain with its derived record count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainView {
    #[serde(flatten)]
    pub domain: Domain,
    pub records_count: u64,
}

/// Create domain request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDomainRequest {
    pub name: String,
    pub provider_account_id: String,
    /// When absent, the zone is looked up by name on the owning account.
    #[serde(default)]
    pub provider_zone_id: Option<String>,
    #[serde(default)]
    pub registration_date: Option<String>,
    #[serde(default)]
    pub client_contact: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    /// Preset applied right after creation.
    #[serde(default)]
    pub preset_id: Option<String>,
}

/// Update domain request
///
/// Nullable fields use `Option<Option<T>>`: absent leaves the value alone,
/// `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDomainRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::patch::deserialize_some"
    )]
    pub provider_zone_id: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::patch::deserialize_some"
    )]
    pub registration_date: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::patch::deserialize_some"
    )]
    pub client_contact: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::patch::deserialize_some"
    )]
    pub provider_name: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::patch::deserialize_some"
    )]
    pub preset_id: Option<Option<String>>,
}

impl UpdateDomainRequest {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.provider_zone_id.is_none()
            && self.registration_date.is_none()
            && self.client_contact.is_none()
            && self.provider_name.is_none()
            && self.preset_id.is_none()
    }

    pub fn apply_to(self, domain: &mut Domain) {
        if let Some(name) = self.name {
            domain.name = name;
        }
        if let Some(status) = self.status {
            domain.status = status;
        }
        if let Some(zone) = self.provider_zone_id {
            domain.provider_zone_id = zone;
        }
        if let Some(date) = self.registration_date {
            domain.registration_date = date;
        }
        if let Some(contact) = self.client_contact {
            domain.client_contact = contact;
        }
        if let Some(provider_name) = self.provider_name {
            domain.provider_name = provider_name;
        }
        if let Some(preset_id) = self.preset_id {
            domain.preset_id = preset_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Domain {
        Domain {
            id: "d1".to_string(),
            name: "example.com".to_string(),
            provider_account_id: "acc-1".to_string(),
            provider_zone_id: Some("z1".to_string()),
            registration_date: None,
            client_contact: Some("+1 555 0100".to_string()),
            provider_name: None,
            preset_id: None,
            status: DEFAULT_DOMAIN_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn view_flattens_domain_fields() {
        let view = DomainView {
            domain: domain(),
            records_count: 3,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "example.com");
        assert_eq!(json["records_count"], 3);
        assert!(json.get("preset_id").is_none());
    }

    #[test]
    fn update_clears_only_explicit_nulls() {
        let req: UpdateDomainRequest = serde_json::from_str(
            r#"{"client_contact": null, "provider_name": "Namecheap"}"#,
        )
        .unwrap();
        let mut d = domain();
        req.apply_to(&mut d);

        assert_eq!(d.client_contact, None);
        assert_eq!(d.provider_name.as_deref(), Some("Namecheap"));
        assert_eq!(d.provider_zone_id.as_deref(), Some("z1"));
    }
}
