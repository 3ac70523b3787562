//! Maps parsed commands onto services.

use anyhow::Result;
use dns_manager_app::AppState;
use dns_manager_core::types::{CreatePresetRequest, UpdatePresetRequest};
use serde::Serialize;
use serde_json::{Value, json};

use crate::cli::{
    AccountCommand, ActivityCommand, Command, DomainCommand, PresetCommand, RecordCommand,
    SyncCommand, patch,
};

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn done() -> Value {
    json!({ "success": true })
}

/// Runs one command and returns what should be printed.
pub async fn run(state: &AppState, actor: &str, command: Command) -> Result<Value> {
    match command {
        Command::Accounts(cmd) => accounts(state, actor, cmd).await,
        Command::Domains(cmd) => domains(state, actor, cmd).await,
        Command::Records(cmd) => records(state, actor, cmd).await,
        Command::Presets(cmd) => presets(state, actor, cmd).await,
        Command::Sync(cmd) => sync(state, actor, cmd).await,
        Command::Activity(cmd) => activity(state, cmd).await,
    }
}

async fn accounts(state: &AppState, actor: &str, cmd: AccountCommand) -> Result<Value> {
    let service = &state.account_service;
    match cmd {
        AccountCommand::List => to_json(&service.list_accounts().await?),
        AccountCommand::Get { id } => to_json(&service.get_account(&id).await?),
        AccountCommand::Create(args) => {
            to_json(&service.create_account(actor, args.into()).await?)
        }
        AccountCommand::Update(args) => {
            let (id, request) = args.into_parts();
            to_json(&service.update_account(actor, &id, request).await?)
        }
        AccountCommand::Delete { id } => {
            service.delete_account(actor, &id).await?;
            Ok(done())
        }
        AccountCommand::Zones { id } => to_json(&service.list_zones(&id).await?),
        AccountCommand::Test { id } => to_json(&service.test_connection(&id).await?),
        AccountCommand::Verify { id } => to_json(&service.verify_credentials(&id).await?),
    }
}

async fn domains(state: &AppState, actor: &str, cmd: DomainCommand) -> Result<Value> {
    let service = &state.domain_service;
    match cmd {
        DomainCommand::List => to_json(&service.list_domains().await?),
        DomainCommand::Get { id } => to_json(&service.get_domain(&id).await?),
        DomainCommand::Create(args) => to_json(&service.create_domain(actor, args.into()).await?),
        DomainCommand::Update(args) => {
            let (id, request) = args.into_parts();
            to_json(&service.update_domain(actor, &id, request).await?)
        }
        DomainCommand::Delete { id } => {
            service.delete_domain(actor, &id).await?;
            Ok(done())
        }
    }
}

async fn records(state: &AppState, actor: &str, cmd: RecordCommand) -> Result<Value> {
    let service = &state.record_service;
    match cmd {
        RecordCommand::List { domain } => to_json(&service.list_records(&domain).await?),
        RecordCommand::Create { domain, record } => {
            to_json(&service.create_record(actor, &domain, record.into()).await?)
        }
        RecordCommand::Update(args) => {
            let (domain, record, request) = args.into_parts();
            to_json(&service.update_record(actor, &domain, &record, request).await?)
        }
        RecordCommand::Delete { domain, record } => {
            service.delete_record(actor, &domain, &record).await?;
            Ok(done())
        }
        RecordCommand::ToggleProxy { domain, record } => {
            to_json(&service.toggle_proxy(actor, &domain, &record).await?)
        }
    }
}

async fn presets(state: &AppState, actor: &str, cmd: PresetCommand) -> Result<Value> {
    let service = &state.preset_service;
    match cmd {
        PresetCommand::List => to_json(&service.list_presets().await?),
        PresetCommand::Get { id } => to_json(&service.get_preset(&id).await?),
        PresetCommand::Create { name, description } => to_json(
            &service
                .create_preset(actor, CreatePresetRequest { name, description })
                .await?,
        ),
        PresetCommand::Update {
            id,
            name,
            description,
            clear_description,
        } => {
            let request = UpdatePresetRequest {
                name,
                description: patch(description, clear_description),
            };
            to_json(&service.update_preset(actor, &id, request).await?)
        }
        PresetCommand::Delete { id } => {
            service.delete_preset(actor, &id).await?;
            Ok(done())
        }
        PresetCommand::Records { preset } => to_json(&service.list_preset_records(&preset).await?),
        PresetCommand::AddRecord { preset, record } => {
            to_json(&service.create_preset_record(&preset, record.into()).await?)
        }
        PresetCommand::UpdateRecord {
            preset,
            record_id,
            record,
        } => to_json(
            &service
                .update_preset_record(&preset, &record_id, record.into())
                .await?,
        ),
        PresetCommand::RemoveRecord { preset, record_id } => {
            service.delete_preset_record(&preset, &record_id).await?;
            Ok(done())
        }
    }
}

async fn sync(state: &AppState, actor: &str, cmd: SyncCommand) -> Result<Value> {
    let service = &state.sync_service;
    match cmd {
        SyncCommand::Pull { domain } => to_json(&service.sync_from_provider(actor, &domain).await?),
        SyncCommand::Push { domain } => to_json(&service.push_to_provider(actor, &domain).await?),
        SyncCommand::ApplyPreset { domain, preset } => {
            to_json(&service.apply_preset(actor, &domain, &preset).await?)
        }
        SyncCommand::ImportZones { account } => {
            to_json(&service.import_zones(actor, &account).await?)
        }
    }
}

async fn activity(state: &AppState, cmd: ActivityCommand) -> Result<Value> {
    match cmd {
        ActivityCommand::List { limit } => {
            to_json(&state.activity_service.list_recent(limit).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use dns_manager_app::AppConfig;
    use dns_manager_core::error::CoreError;

    use super::*;
    use crate::cli::Cli;

    async fn state() -> (AppState, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database.path = tmp.path().join("cli.db");
        (AppState::open(&config).await.unwrap(), tmp)
    }

    async fn exec(state: &AppState, args: &[&str]) -> Result<Value> {
        let cli = Cli::try_parse_from(std::iter::once("dns-manager").chain(args.iter().copied()))?;
        run(state, &cli.actor, cli.command).await
    }

    #[tokio::test]
    async fn account_listing_hides_the_key() {
        let (state, _tmp) = state().await;
        exec(
            &state,
            &[
                "accounts", "create", "--name", "Main", "--email", "ops@example.com",
                "--api-key", "secret-key",
            ],
        )
        .await
        .unwrap();

        let listed = exec(&state, &["accounts", "list"]).await.unwrap();

        assert_eq!(listed[0]["name"], "Main");
        assert!(listed[0].get("api_key").is_none());
        assert!(!listed.to_string().contains("secret-key"));
    }

    #[tokio::test]
    async fn preset_workflow_through_the_cli() {
        let (state, _tmp) = state().await;
        let preset = exec(&state, &["presets", "create", "--name", "Mail"])
            .await
            .unwrap();
        let preset_id = preset["id"].as_str().unwrap().to_string();

        exec(
            &state,
            &[
                "presets", "add-record", &preset_id, "--type", "MX", "--name", "@",
                "--content", "mx.example.net", "--priority", "10",
            ],
        )
        .await
        .unwrap();

        let view = exec(&state, &["presets", "get", &preset_id]).await.unwrap();
        assert_eq!(view["records_count"], 1);

        let removed = exec(&state, &["presets", "delete", &preset_id, "--actor", "ops"])
            .await
            .unwrap();
        assert_eq!(removed, json!({"success": true}));

        let activity = exec(&state, &["activity", "list", "--limit", "1"])
            .await
            .unwrap();
        assert_eq!(activity[0]["action"], "delete");
        assert_eq!(activity[0]["actor_id"], "ops");
    }

    #[tokio::test]
    async fn service_errors_keep_their_type() {
        let (state, _tmp) = state().await;

        let err = exec(&state, &["domains", "get", "missing"]).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::DomainNotFound(id)) if id == "missing"
        ));
    }
}
