//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dns_manager_core::types::{
    CreateAccountRequest, CreateDomainRequest, CreateRecordRequest, DEFAULT_TTL,
    PresetRecordRequest, UpdateAccountRequest, UpdateDomainRequest, UpdateRecordRequest,
};

/// Manage Cloudflare DNS through a local model of accounts, domains,
/// records and presets. Every command prints JSON on stdout.
#[derive(Debug, Parser)]
#[command(name = "dns-manager", version, about)]
pub struct Cli {
    /// Configuration file (defaults to `$DNS_MANAGER_CONFIG`, then built-in defaults)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Identifier recorded as the actor of every change
    #[arg(long, global = true, env = "DNS_MANAGER_ACTOR", default_value = "cli")]
    pub actor: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cloudflare accounts
    #[command(subcommand)]
    Accounts(AccountCommand),
    /// Managed domains
    #[command(subcommand)]
    Domains(DomainCommand),
    /// Local DNS records of a domain
    #[command(subcommand)]
    Records(RecordCommand),
    /// Record presets and their templates
    #[command(subcommand)]
    Presets(PresetCommand),
    /// Reconciliation with Cloudflare
    #[command(subcommand)]
    Sync(SyncCommand),
    /// Audit trail
    #[command(subcommand)]
    Activity(ActivityCommand),
}

// ============ accounts ============

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    List,
    Get {
        id: String,
    },
    Create(CreateAccountArgs),
    Update(UpdateAccountArgs),
    Delete {
        id: String,
    },
    /// List the zones visible to the account
    Zones {
        id: String,
    },
    /// Check the credentials by listing zones
    Test {
        id: String,
    },
    /// Check the credentials against the token verification endpoint
    Verify {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct CreateAccountArgs {
    #[arg(long)]
    pub name: String,
    /// Login email, or a label when using a scoped API token
    #[arg(long)]
    pub email: String,
    /// Global API key or scoped API token
    #[arg(long, env = "DNS_MANAGER_API_KEY", hide_env_values = true)]
    pub api_key: String,
    /// Cloudflare account identifier
    #[arg(long)]
    pub account_id: Option<String>,
}

impl From<CreateAccountArgs> for CreateAccountRequest {
    fn from(args: CreateAccountArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            api_key: args.api_key,
            account_id: args.account_id,
        }
    }
}

#[derive(Debug, Args)]
pub struct UpdateAccountArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long, conflicts_with = "clear_account_id")]
    pub account_id: Option<String>,
    #[arg(long)]
    pub clear_account_id: bool,
}

impl UpdateAccountArgs {
    pub fn into_parts(self) -> (String, UpdateAccountRequest) {
        let request = UpdateAccountRequest {
            name: self.name,
            email: self.email,
            api_key: self.api_key,
            account_id: patch(self.account_id, self.clear_account_id),
        };
        (self.id, request)
    }
}

// ============ domains ============

#[derive(Debug, Subcommand)]
pub enum DomainCommand {
    List,
    Get {
        id: String,
    },
    Create(CreateDomainArgs),
    Update(UpdateDomainArgs),
    /// Delete the domain and its local records
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct CreateDomainArgs {
    #[arg(long)]
    pub name: String,
    /// Owning account id
    #[arg(long)]
    pub account: String,
    /// Zone id; looked up by name on the account when omitted
    #[arg(long)]
    pub zone_id: Option<String>,
    #[arg(long)]
    pub registration_date: Option<String>,
    #[arg(long)]
    pub client_contact: Option<String>,
    /// Registrar or reseller
    #[arg(long)]
    pub provider_name: Option<String>,
    /// Preset applied right after creation
    #[arg(long)]
    pub preset: Option<String>,
}

impl From<CreateDomainArgs> for CreateDomainRequest {
    fn from(args: CreateDomainArgs) -> Self {
        Self {
            name: args.name,
            provider_account_id: args.account,
            provider_zone_id: args.zone_id,
            registration_date: args.registration_date,
            client_contact: args.client_contact,
            provider_name: args.provider_name,
            preset_id: args.preset,
        }
    }
}

/// Nullable domain fields that `--clear` can reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DomainField {
    ZoneId,
    RegistrationDate,
    ClientContact,
    ProviderName,
    Preset,
}

#[derive(Debug, Args)]
pub struct UpdateDomainArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub zone_id: Option<String>,
    #[arg(long)]
    pub registration_date: Option<String>,
    #[arg(long)]
    pub client_contact: Option<String>,
    #[arg(long)]
    pub provider_name: Option<String>,
    #[arg(long)]
    pub preset: Option<String>,
    /// Reset a field to empty (repeatable)
    #[arg(long, value_enum, value_name = "FIELD")]
    pub clear: Vec<DomainField>,
}

impl UpdateDomainArgs {
    pub fn into_parts(self) -> (String, UpdateDomainRequest) {
        let clears = |field| self.clear.contains(&field);
        let request = UpdateDomainRequest {
            provider_zone_id: patch(self.zone_id, clears(DomainField::ZoneId)),
            registration_date: patch(
                self.registration_date,
                clears(DomainField::RegistrationDate),
            ),
            client_contact: patch(self.client_contact, clears(DomainField::ClientContact)),
            provider_name: patch(self.provider_name, clears(DomainField::ProviderName)),
            preset_id: patch(self.preset, clears(DomainField::Preset)),
            name: self.name,
            status: self.status,
        };
        (self.id, request)
    }
}

// ============ records ============

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    List {
        domain: String,
    },
    Create {
        domain: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    Update(UpdateRecordArgs),
    /// Delete the local record (Cloudflare is left untouched)
    Delete {
        domain: String,
        record: String,
    },
    /// Flip the proxy flag of an A, AAAA or CNAME record
    ToggleProxy {
        domain: String,
        record: String,
    },
}

/// Full record definition, shared by records and preset templates.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Record type (A, AAAA, CNAME, MX, TXT, NS, SRV...)
    #[arg(long = "type", value_name = "TYPE")]
    pub record_type: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub content: String,
    #[arg(long, default_value_t = DEFAULT_TTL)]
    pub ttl: u32,
    #[arg(long)]
    pub priority: Option<u16>,
    #[arg(long)]
    pub proxied: bool,
}

impl From<RecordArgs> for CreateRecordRequest {
    fn from(args: RecordArgs) -> Self {
        Self {
            record_type: args.record_type,
            name: args.name,
            content: args.content,
            ttl: args.ttl,
            priority: args.priority,
            proxied: args.proxied,
        }
    }
}

impl From<RecordArgs> for PresetRecordRequest {
    fn from(args: RecordArgs) -> Self {
        Self {
            record_type: args.record_type,
            name: args.name,
            content: args.content,
            ttl: args.ttl,
            priority: args.priority,
            proxied: args.proxied,
        }
    }
}

#[derive(Debug, Args)]
pub struct UpdateRecordArgs {
    pub domain: String,
    pub record: String,
    #[arg(long = "type", value_name = "TYPE")]
    pub record_type: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub ttl: Option<u32>,
    #[arg(long, conflicts_with = "clear_priority")]
    pub priority: Option<u16>,
    #[arg(long)]
    pub clear_priority: bool,
    #[arg(long)]
    pub proxied: Option<bool>,
}

impl UpdateRecordArgs {
    pub fn into_parts(self) -> (String, String, UpdateRecordRequest) {
        let request = UpdateRecordRequest {
            record_type: self.record_type,
            name: self.name,
            content: self.content,
            ttl: self.ttl,
            priority: patch(self.priority, self.clear_priority),
            proxied: self.proxied,
        };
        (self.domain, self.record, request)
    }
}

// ============ presets ============

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    List,
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
    },
    /// Delete the preset and its templates
    Delete {
        id: String,
    },
    /// List the record templates of a preset
    Records {
        preset: String,
    },
    AddRecord {
        preset: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Replace a template with a full new definition
    UpdateRecord {
        preset: String,
        record_id: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    RemoveRecord {
        preset: String,
        record_id: String,
    },
}

// ============ sync ============

#[derive(Debug, Subcommand)]
pub enum SyncCommand {
    /// Replace the domain's local records with the zone's records
    Pull { domain: String },
    /// Send every local record of the domain to its zone
    Push { domain: String },
    /// Replace the domain's local records with a preset
    ApplyPreset { domain: String, preset: String },
    /// Create a domain for each zone of the account not managed yet
    ImportZones { account: String },
}

// ============ activity ============

#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Most recent entries, newest first
    List {
        #[arg(long)]
        limit: Option<u64>,
    },
}

/// Maps a value flag and its `--clear-*` companion onto an update field.
pub fn patch<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear { Some(None) } else { value.map(Some) }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dns-manager").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_go_anywhere() {
        let cli = parse(&["domains", "list", "--actor", "alice", "--config", "dns.toml"]);

        assert_eq!(cli.actor, "alice");
        assert_eq!(cli.config, Some(PathBuf::from("dns.toml")));
        assert!(matches!(cli.command, Command::Domains(DomainCommand::List)));
    }

    #[test]
    fn record_create_uses_default_ttl() {
        let cli = parse(&[
            "records", "create", "dom-1", "--type", "A", "--name", "www.example.com",
            "--content", "192.0.2.1",
        ]);

        let Command::Records(RecordCommand::Create { domain, record }) = cli.command else {
            panic!("unexpected command");
        };
        let request = CreateRecordRequest::from(record);
        assert_eq!(domain, "dom-1");
        assert_eq!(request.ttl, 3600);
        assert!(!request.proxied);
        assert_eq!(request.priority, None);
    }

    #[test]
    fn domain_update_distinguishes_clear_from_omit() {
        let cli = parse(&[
            "domains", "update", "dom-1", "--status", "expired", "--clear", "client-contact",
            "--clear", "preset",
        ]);

        let Command::Domains(DomainCommand::Update(args)) = cli.command else {
            panic!("unexpected command");
        };
        let (id, request) = args.into_parts();
        assert_eq!(id, "dom-1");
        assert_eq!(request.status.as_deref(), Some("expired"));
        assert_eq!(request.client_contact, Some(None));
        assert_eq!(request.preset_id, Some(None));
        assert_eq!(request.provider_zone_id, None);
        assert_eq!(request.name, None);
    }

    #[test]
    fn record_update_can_clear_priority() {
        let cli = parse(&["records", "update", "dom-1", "rec-1", "--clear-priority"]);

        let Command::Records(RecordCommand::Update(args)) = cli.command else {
            panic!("unexpected command");
        };
        let (_, _, request) = args.into_parts();
        assert_eq!(request.priority, Some(None));
        assert!(request.content.is_none());
    }

    #[test]
    fn priority_and_clear_conflict() {
        let result = Cli::try_parse_from([
            "dns-manager", "records", "update", "d", "r", "--priority", "10",
            "--clear-priority",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn patch_helper() {
        assert_eq!(patch(Some(1), false), Some(Some(1)));
        assert_eq!(patch::<u8>(None, false), None);
        assert_eq!(patch(Some(1), true), Some(None));
    }
}
