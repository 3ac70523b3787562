use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Cloudflare API v4 endpoint.
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

// ============ Credentials ============

/// Credentials of one Cloudflare account.
///
/// `api_key` is either a global API key (paired with the account email) or a
/// scoped API token. Which one is inferred by [`AuthMode::detect`].
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderCredentials {
    /// Account email (or any label when `api_key` is a token).
    pub email: String,
    /// Global API key or scoped API token.
    pub api_key: String,
}

impl ProviderCredentials {
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
        }
    }

    /// Authentication scheme these credentials will be sent with.
    #[must_use]
    pub fn auth_mode(&self) -> AuthMode {
        AuthMode::detect(&self.email, &self.api_key)
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// How requests are authenticated against the Cloudflare API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// `X-Auth-Email` + `X-Auth-Key` headers.
    GlobalKey,
    /// `Authorization: Bearer <token>` header.
    BearerToken,
}

/// Keys longer than this, paired with an email lacking `@`, are treated as tokens.
const TOKEN_MIN_LEN: usize = 40;

impl AuthMode {
    /// Infers the scheme from the credential shape. No network call.
    ///
    /// A key longer than 40 characters together with an "email" that has no
    /// `@` is a scoped token; everything else is a global key.
    #[must_use]
    pub fn detect(email: &str, api_key: &str) -> Self {
        if api_key.chars().count() > TOKEN_MIN_LEN && !email.contains('@') {
            Self::BearerToken
        } else {
            Self::GlobalKey
        }
    }
}

// ============ Client options ============

/// Transport settings for a provider client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// Retries for transient failures (0 disables retry).
    pub max_retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: CLOUDFLARE_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }
}

// ============ DNS Record Types ============

/// DNS record types the manager works with.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
/// Records are stored with their raw type string, so pulled records of other
/// types survive; this enum is used where behavior depends on the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
}

impl DnsRecordType {
    /// All supported types, in display order.
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Srv,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
        }
    }

    /// Only address and alias records can sit behind the Cloudflare proxy.
    #[must_use]
    pub fn is_proxiable(self) -> bool {
        matches!(self, Self::A | Self::Aaaa | Self::Cname)
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unsupported record type: {s}"))
    }
}

// ============ API results ============

/// Outcome of a credential check. Never an error: failures are reported in `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCheck {
    pub valid: bool,
    pub message: String,
}

/// A zone as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderZone {
    pub id: String,
    pub name: String,
    /// `active`, `pending`, ...; `unknown` when the API omits it.
    pub status: String,
    pub name_servers: Vec<String>,
}

/// First page of zones plus the error text when the listing failed.
///
/// On failure `zones` is empty and `error` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneListing {
    pub zones: Vec<ProviderZone>,
    pub error: Option<String>,
}

impl ZoneListing {
    pub(crate) fn failed(error: impl Into<String>) -> Self {
        Self {
            zones: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// A DNS record as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    /// Fully qualified name.
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default)]
    pub proxied: Option<bool>,
}

/// Body sent on record create/update.
///
/// `priority` is omitted entirely when absent: the API rejects the field on
/// record types that have no priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}
