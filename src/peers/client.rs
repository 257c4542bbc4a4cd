use super::PeerGetter;
use crate::error::{CacheError, Result};

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

/// HTTP client for a single remote peer.
pub struct HttpGetter {
    /// Peer address plus base path, e.g. `http://10.0.0.2:8008/_geecache/`.
    base_url: String,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpGetter {
    pub fn new(base_url: String, http_client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            base_url,
            http_client,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, group: &str, key: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            urlencoding::encode(group),
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl PeerGetter for HttpGetter {
    async fn get(&self, group: &str, key: &str) -> Result<Bytes> {
        let url = self.url_for(group, key);

        let response = self
            .http_client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CacheError::PeerStatus {
                status: response.status().to_string(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| CacheError::PeerTransport(format!("reading response body: {}", e)))
    }
}
