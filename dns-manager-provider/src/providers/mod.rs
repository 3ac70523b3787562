//! DNS provider implementations

/// Shared helpers used by provider implementations.
pub(crate) mod common;

mod cloudflare;

pub use cloudflare::CloudflareProvider;
