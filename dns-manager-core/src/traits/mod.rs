//! Storage layer abstraction trait definition

mod account_repository;
mod activity_repository;
mod domain_repository;
mod preset_repository;
mod provider_factory;
mod record_repository;

pub use account_repository::AccountRepository;
pub use activity_repository::ActivityRepository;
pub use domain_repository::DomainRepository;
pub use preset_repository::PresetRepository;
pub use provider_factory::{CloudflareProviderFactory, ProviderFactory};
pub use record_repository::RecordRepository;
