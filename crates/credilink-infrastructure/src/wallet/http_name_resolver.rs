//! Name resolution through an HTTP ENS lookup service.

use async_trait::async_trait;
use credilink_core::wallet::NameResolver;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

/// Resolver calling `GET {base_url}/{address-or-name}`.
///
/// The service answers with `{"address": ..., "name": ...}`. Every failure
/// (transport, status, body) degrades to "no name".
pub struct HttpNameResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNameResolver {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn lookup(&self, query: &str) -> Option<LookupResponse> {
        let url = format!("{}/{}", self.base_url, query);
        let result = async {
            self.client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<LookupResponse>()
                .await
        }
        .await;

        match result {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::debug!("[ENS] Lookup for {} failed: {}", query, e);
                None
            }
        }
    }
}

/// Treats empty strings as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl NameResolver for HttpNameResolver {
    async fn reverse_resolve(&self, address: &str) -> Option<String> {
        non_empty(self.lookup(address).await?.name)
    }

    async fn resolve(&self, name: &str) -> Option<String> {
        let normalized = name.trim().to_lowercase();
        non_empty(self.lookup(&normalized).await?.address)
    }
}
