//! `SeaORM` entities, one module per table.

pub mod account;
pub mod activity_log;
pub mod dns_preset;
pub mod dns_preset_record;
pub mod dns_record;
pub mod domain;
