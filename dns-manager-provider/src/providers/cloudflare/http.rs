//! Cloudflare HTTP request helpers

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpReply, HttpUtils};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::AuthMode;

use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// Attaches the auth headers matching the detected credential mode.
    fn authorized(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.auth_mode {
            AuthMode::BearerToken => builder.bearer_auth(&self.credentials.api_key),
            AuthMode::GlobalKey => builder
                .header("X-Auth-Email", &self.credentials.email)
                .header("X-Auth-Key", &self.credentials.api_key),
        }
    }

    /// Sends a request and returns the raw reply.
    ///
    /// POST is sent once: a retried create may duplicate the record.
    pub(crate) async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpReply> {
        let url = format!("{}{path}", self.base_url);
        let retries = if method == Method::POST {
            0
        } else {
            self.max_retries
        };
        let method_name = method.to_string();

        let mut builder = self.authorized(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        HttpUtils::execute_request_with_retry(
            builder,
            self.provider_name(),
            &method_name,
            &url,
            retries,
        )
        .await
    }

    /// Sends a request and unwraps the `result` of a successful envelope.
    ///
    /// Any status other than 200, or `success: false`, is mapped through the
    /// first reported error code.
    pub(crate) async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let reply = self.send(method, path, body).await?;
        let succeeded = reply.is_ok();

        let envelope: CloudflareResponse<T> =
            match HttpUtils::parse_json(&reply.body, self.provider_name()) {
                Ok(envelope) => envelope,
                Err(_) if !succeeded => {
                    return Err(self.status_error(&reply, context));
                }
                Err(e) => return Err(e),
            };

        if !succeeded || !envelope.success {
            let raw = envelope.first_error().map_or_else(
                || RawApiError::new(format!("HTTP {}", reply.status)),
                |(code, message)| RawApiError::with_code(code, message),
            );
            let err = self.map_error(raw, context);
            if err.is_expected() {
                log::warn!("API error on {path}: {err}");
            } else {
                log::error!("API error on {path}: {err}");
            }
            return Err(err);
        }

        envelope
            .result
            .ok_or_else(|| self.parse_error("Response is missing the result field"))
    }

    /// Error for a failed reply, using the envelope when the body has one.
    pub(crate) fn status_error(&self, reply: &HttpReply, context: ErrorContext) -> ProviderError {
        let raw = serde_json::from_str::<CloudflareResponse<serde_json::Value>>(&reply.body)
            .ok()
            .and_then(|envelope| envelope.first_error())
            .map_or_else(
                || RawApiError::new(format!("HTTP {}", reply.status)),
                |(code, message)| RawApiError::with_code(code, message),
            );
        self.map_error(raw, context)
    }
}
