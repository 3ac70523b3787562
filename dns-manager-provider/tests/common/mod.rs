//! Shared helpers for the Cloudflare client tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use dns_manager_provider::{ClientOptions, DnsProvider, ProviderCredentials, create_provider};
use httpmock::MockServer;

pub const EMAIL: &str = "ops@example.com";
pub const GLOBAL_KEY: &str = "c2547eb745079dac9320b638f5e225cf483cc5cfdda41";

/// A 48-char scoped token; paired with a label without `@` it selects bearer auth.
pub fn scoped_token() -> String {
    "t".repeat(48)
}

/// Asserts that a `Result` is `Ok` and unwraps the value (ends the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Asserts that an `Option` is `Some` and unwraps the value (ends the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

pub fn options(server: &MockServer, max_retries: u32) -> ClientOptions {
    ClientOptions {
        base_url: server.base_url(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        max_retries,
    }
}

/// Global-key client against the mock server, without retries.
pub fn global_key_provider(server: &MockServer) -> Arc<dyn DnsProvider> {
    provider_with(server, ProviderCredentials::new(EMAIL, GLOBAL_KEY), 0)
}

pub fn provider_with(
    server: &MockServer,
    credentials: ProviderCredentials,
    max_retries: u32,
) -> Arc<dyn DnsProvider> {
    match create_provider(credentials, &options(server, max_retries)) {
        Ok(provider) => provider,
        Err(e) => panic!("provider construction failed: {e}"),
    }
}
