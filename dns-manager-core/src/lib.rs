//! DNS Manager Core Library
//!
//! Business logic for managing Cloudflare-hosted DNS through a local model:
//! - Accounts, domains, local DNS records and record presets (CRUD services)
//! - Reconciliation with Cloudflare: pull, push, preset application and
//!   zone import (`SyncService`)
//! - An append-only activity log of every mutating operation
//!
//! Storage is abstracted behind repository traits; the platform layer
//! injects concrete implementations through [`ServiceContext`].

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{
    AccountService, ActivityRecorder, ActivityService, DomainService, PresetService,
    RecordService, ServiceContext, SyncService,
};
pub use traits::{
    AccountRepository, ActivityRepository, CloudflareProviderFactory, DomainRepository,
    PresetRepository, ProviderFactory, RecordRepository,
};
