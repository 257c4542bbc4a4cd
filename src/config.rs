//! Node configuration
//!
//! Every field has a default, so an empty or missing file yields a working
//! single-node setup. Command line flags take precedence over the file.
//!
//! ```toml
//! host = "localhost"
//! bind_host = "127.0.0.1"
//! port = 8001
//! api_port = 9999
//! cache_bytes = 2048
//! peers = ["http://localhost:8001", "http://localhost:8002"]
//!
//! [peer]
//! base_path = "/_geecache/"
//! replicas = 50
//! request_timeout_ms = 3000
//!
//! [logging]
//! level = "info"
//! ```

use crate::peers::PoolOptions;
use crate::peers::protocol::{DEFAULT_BASE_PATH, DEFAULT_REPLICAS, DEFAULT_REQUEST_TIMEOUT};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    /// Host name this node is reached at, as written in `peers`.
    #[serde(default = "default_host")]
    pub host: String,
    /// Interface both servers listen on, e.g. `0.0.0.0` for a multi-host cluster.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    /// Port serving peer requests.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Port for the public API front end.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Byte budget of each group's local cache, `0` for unbounded.
    #[serde(default = "default_cache_bytes")]
    pub cache_bytes: usize,
    /// Base URLs of every node in the cluster, this one included.
    #[serde(default)]
    pub peers: Vec<String>,
    #[serde(default)]
    pub peer: PeerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            bind_host: default_bind_host(),
            port: default_port(),
            api_port: default_api_port(),
            cache_bytes: default_cache_bytes(),
            peers: Vec::new(),
            peer: PeerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Settings every node in the cluster must agree on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeerConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_replicas")]
    pub replicas: usize,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            replicas: default_replicas(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl PeerConfig {
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            base_path: self.base_path.clone(),
            replicas: self.replicas,
            hash: None,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl NodeConfig {
    /// Reads the TOML file at `path`, or returns the defaults when it does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// This node's own base URL as it appears in the peer list.
    pub fn self_addr(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Whether `peers` lists this node. Without it the node cannot tell
    /// which keys it owns and sends requests for them to itself.
    pub fn peers_include_self(&self) -> bool {
        let self_addr = self.self_addr();
        self.peers
            .iter()
            .any(|peer| peer.trim_end_matches('/') == self_addr)
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_api_port() -> u16 {
    9999
}

fn default_cache_bytes() -> usize {
    2 << 10
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

fn default_replicas() -> usize {
    DEFAULT_REPLICAS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_millis() as u64
}

fn default_log_level() -> String {
    "info".to_string()
}
