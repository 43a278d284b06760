//! Shared request plumbing for the auth and table APIs

use crate::error::{ApiError, RequestError};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use toolhub_config::BackendConfig;
use toolhub_core::{AccessToken, CollaboratorError, CollaboratorResult};
use tracing::{debug, warn};

/// Client for a Supabase-compatible backend
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    /// Welcome notification ids each user has read, for backends without a
    /// notifications table. Shared across clones.
    welcome_reads: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> CollaboratorResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CollaboratorError::network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(http, config))
    }

    /// Use an existing `reqwest::Client`
    pub fn with_client(http: Client, config: &BackendConfig) -> Self {
        if config.anon_key.is_empty() {
            warn!("Backend anon key is empty; requests will likely be rejected");
        }
        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            welcome_reads: Arc::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn welcome_read_ids(&self, user_id: &str) -> HashSet<String> {
        self.welcome_reads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn mark_welcome_read<I>(&self, user_id: &str, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.welcome_reads
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id.to_string())
            .or_default()
            .extend(ids);
    }

    pub(crate) fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    /// `/rest/v1/<table>?<query>`; `query` is already encoded
    pub(crate) fn rest_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, query)
        }
    }

    /// Request carrying the API key, authorized as `token` or anonymously
    pub(crate) fn request(
        &self,
        method: Method,
        url: &str,
        token: Option<&AccessToken>,
    ) -> RequestBuilder {
        let bearer = token.map_or(self.anon_key.as_str(), AccessToken::as_str);
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(bearer)
    }

    /// Send and return the body of a 2xx response
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<String, RequestError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if status.is_success() {
            debug!("{} {}", status.as_u16(), url);
            Ok(body)
        } else {
            debug!("{} {}: {}", status.as_u16(), url, body);
            Err(RequestError::Api(ApiError::from_body(status.as_u16(), &body)))
        }
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> CollaboratorResult<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> CollaboratorResult<()> {
        self.execute(request).await?;
        Ok(())
    }
}

/// `col=eq.value` with the value percent-encoded
pub(crate) fn eq(column: &str, value: &str) -> String {
    format!("{}=eq.{}", column, urlencoding::encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            url: url.to_string(),
            anon_key: "anon".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let client = SupabaseClient::new(&config("https://demo.supabase.co/")).unwrap();
        assert_eq!(client.auth_url("user"), "https://demo.supabase.co/auth/v1/user");
        assert_eq!(
            client.rest_url("ai_tools", "select=*"),
            "https://demo.supabase.co/rest/v1/ai_tools?select=*"
        );
        assert_eq!(
            client.rest_url("profiles", ""),
            "https://demo.supabase.co/rest/v1/profiles"
        );
    }

    #[test]
    fn test_eq_filter_encodes_value() {
        assert_eq!(eq("id", "a b&c"), "id=eq.a%20b%26c");
    }
}
