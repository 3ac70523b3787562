//! `SeaORM` entity for the `dns_records` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "dns_records")]
/// Local DNS record; `provider_record_id` links it to Cloudflare.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub domain_id: String,
    pub provider_record_id: Option<String>,
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: i64,
    pub priority: Option<i32>,
    pub proxied: bool,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
