//! Account types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dns_manager_provider::ProviderCredentials;

/// A Cloudflare account: the credentials used to reach its zones.
///
/// The credential mode (global key or scoped token) is inferred from the
/// shape of `email`/`api_key` and never stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email, or a token label for scoped tokens
    pub email: String,
    /// Global API key or scoped token
    pub api_key: String,
    /// Cloudflare account identifier, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Credentials for building a provider client.
    #[must_use]
    pub fn credentials(&self) -> ProviderCredentials {
        ProviderCredentials::new(self.email.clone(), self.api_key.clone())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Account as returned by list/get: everything except the secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountView {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            account_id: account.account_id.clone(),
            created_at: account.created_at,
        }
    }
}

/// Create account request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub api_key: String,
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Update account request
///
/// Absent fields are left untouched; `account_id: Some(None)` clears the
/// stored identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::patch::deserialize_some"
    )]
    pub account_id: Option<Option<String>>,
}

impl UpdateAccountRequest {
    /// Whether the request carries no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.api_key.is_none()
            && self.account_id.is_none()
    }

    /// Merges the provided fields into `account`.
    pub fn apply_to(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(email) = self.email {
            account.email = email;
        }
        if let Some(api_key) = self.api_key {
            account.api_key = api_key;
        }
        if let Some(account_id) = self.account_id {
            account.account_id = account_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: "acc-1".to_string(),
            name: "Main".to_string(),
            email: "ops@example.com".to_string(),
            api_key: "super-secret-key".to_string(),
            account_id: Some("cf-123".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", account());
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn view_omits_api_key() {
        let json = serde_json::to_value(AccountView::from(&account())).unwrap();
        assert!(json.get("api_key").is_none());
        assert_eq!(json["account_id"], "cf-123");
    }

    #[test]
    fn update_distinguishes_null_from_absent() {
        let absent: UpdateAccountRequest = serde_json::from_str(r#"{"name": "Renamed"}"#).unwrap();
        let cleared: UpdateAccountRequest =
            serde_json::from_str(r#"{"account_id": null}"#).unwrap();

        let mut a = account();
        absent.apply_to(&mut a);
        assert_eq!(a.name, "Renamed");
        assert_eq!(a.account_id.as_deref(), Some("cf-123"));

        assert!(!cleared.is_empty());
        cleared.apply_to(&mut a);
        assert_eq!(a.account_id, None);
    }

    #[test]
    fn empty_update_is_detected() {
        let req: UpdateAccountRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_empty());
    }
}
