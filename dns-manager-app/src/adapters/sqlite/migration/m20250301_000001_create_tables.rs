use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Account::Name).string().not_null())
                    .col(ColumnDef::new(Account::Email).string().not_null())
                    .col(ColumnDef::new(Account::ApiKey).string().not_null())
                    .col(ColumnDef::new(Account::AccountId).string().null())
                    .col(ColumnDef::new(Account::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Domain::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Domain::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Domain::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Domain::ProviderAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Domain::ProviderZoneId).string().null())
                    .col(ColumnDef::new(Domain::RegistrationDate).string().null())
                    .col(ColumnDef::new(Domain::ClientContact).string().null())
                    .col(ColumnDef::new(Domain::ProviderName).string().null())
                    .col(ColumnDef::new(Domain::PresetId).string().null())
                    .col(
                        ColumnDef::new(Domain::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Domain::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // No foreign keys: cascades are done by the repositories inside a transaction.
        manager
            .create_table(
                Table::create()
                    .table(DnsRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DnsRecord::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DnsRecord::DomainId).string().not_null())
                    .col(ColumnDef::new(DnsRecord::ProviderRecordId).string().null())
                    .col(ColumnDef::new(DnsRecord::RecordType).string().not_null())
                    .col(ColumnDef::new(DnsRecord::Name).string().not_null())
                    .col(ColumnDef::new(DnsRecord::Content).string().not_null())
                    .col(ColumnDef::new(DnsRecord::Ttl).big_integer().not_null())
                    .col(ColumnDef::new(DnsRecord::Priority).integer().null())
                    .col(
                        ColumnDef::new(DnsRecord::Proxied)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(DnsRecord::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_dns_records_domain_id")
                    .table(DnsRecord::Table)
                    .col(DnsRecord::DomainId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DnsPreset::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DnsPreset::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DnsPreset::Name).string().not_null())
                    .col(ColumnDef::new(DnsPreset::Description).string().null())
                    .col(ColumnDef::new(DnsPreset::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DnsPresetRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DnsPresetRecord::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DnsPresetRecord::PresetId).string().not_null())
                    .col(ColumnDef::new(DnsPresetRecord::RecordType).string().not_null())
                    .col(ColumnDef::new(DnsPresetRecord::Name).string().not_null())
                    .col(ColumnDef::new(DnsPresetRecord::Content).string().not_null())
                    .col(ColumnDef::new(DnsPresetRecord::Ttl).big_integer().not_null())
                    .col(ColumnDef::new(DnsPresetRecord::Priority).integer().null())
                    .col(
                        ColumnDef::new(DnsPresetRecord::Proxied)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_dns_preset_records_preset_id")
                    .table(DnsPresetRecord::Table)
                    .col(DnsPresetRecord::PresetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ActivityLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLog::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLog::Action).string().not_null())
                    .col(ColumnDef::new(ActivityLog::EntityType).string().not_null())
                    .col(ColumnDef::new(ActivityLog::EntityId).string().not_null())
                    .col(ColumnDef::new(ActivityLog::EntityName).string().null())
                    .col(ColumnDef::new(ActivityLog::Details).string().null())
                    .col(ColumnDef::new(ActivityLog::ActorId).string().not_null())
                    .col(ColumnDef::new(ActivityLog::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_logs_created_at")
                    .table(ActivityLog::Table)
                    .col(ActivityLog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DnsPresetRecord::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DnsPreset::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DnsRecord::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Domain::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Account {
    #[sea_orm(iden = "accounts")]
    Table,
    Id,
    Name,
    Email,
    ApiKey,
    AccountId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Domain {
    #[sea_orm(iden = "domains")]
    Table,
    Id,
    Name,
    ProviderAccountId,
    ProviderZoneId,
    RegistrationDate,
    ClientContact,
    ProviderName,
    PresetId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DnsRecord {
    #[sea_orm(iden = "dns_records")]
    Table,
    Id,
    DomainId,
    ProviderRecordId,
    RecordType,
    Name,
    Content,
    Ttl,
    Priority,
    Proxied,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DnsPreset {
    #[sea_orm(iden = "dns_presets")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DnsPresetRecord {
    #[sea_orm(iden = "dns_preset_records")]
    Table,
    Id,
    PresetId,
    RecordType,
    Name,
    Content,
    Ttl,
    Priority,
    Proxied,
}

#[derive(DeriveIden)]
enum ActivityLog {
    #[sea_orm(iden = "activity_logs")]
    Table,
    Id,
    Action,
    EntityType,
    EntityId,
    EntityName,
    Details,
    ActorId,
    CreatedAt,
}
