use axum::extract::{Extension, Query};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use clap::Parser;
use peercache::config::NodeConfig;
use peercache::peers::protocol::CONTENT_TYPE_OCTET_STREAM;
use peercache::{Getter, Group, GroupRegistry, HttpPool};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "peercache")]
#[command(about = "Distributed cache node")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "peercache.toml")]
    config: PathBuf,

    /// Host name of this node as written in the peer list
    #[arg(long)]
    host: Option<String>,

    /// Interface to listen on
    #[arg(long)]
    bind_host: Option<String>,

    /// Port serving peer requests
    #[arg(short, long)]
    port: Option<u16>,

    /// Also start the public API server
    #[arg(long)]
    api: bool,

    /// Port of the public API server
    #[arg(long)]
    api_port: Option<u16>,

    /// Base URLs of every node, this one included (comma separated)
    #[arg(long, value_delimiter = ',')]
    peers: Vec<String>,

    /// Byte budget of the local cache (0 = unbounded)
    #[arg(long)]
    cache_bytes: Option<usize>,

    /// Log level
    #[arg(long, env = "PEERCACHE_LOG")]
    log_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiParams {
    key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Config file first, command line flags win
    let mut config = NodeConfig::load(&args.config)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(bind_host) = args.bind_host {
        config.bind_host = bind_host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(api_port) = args.api_port {
        config.api_port = api_port;
    }
    if let Some(cache_bytes) = args.cache_bytes {
        config.cache_bytes = cache_bytes;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if !args.peers.is_empty() {
        config.peers = args.peers;
    }
    if config.peers.is_empty() {
        config.peers = (8001..=8003)
            .map(|port| format!("http://{}:{}", config.host, port))
            .collect();
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let self_addr = config.self_addr();
    tracing::info!("Starting cache node {}", self_addr);
    tracing::info!("Peers: {:?}", config.peers);
    if !config.peers_include_self() {
        tracing::warn!(
            "{} is not in the peer list; requests for keys this node owns will loop back to it",
            self_addr
        );
    }

    // 1. Groups:
    let registry = GroupRegistry::new();
    let scores = registry.new_group("scores", config.cache_bytes, slow_db());

    // 2. Peer pool:
    let pool = HttpPool::with_options(&self_addr, config.peer.pool_options());
    pool.set(&config.peers);
    scores.register_peers(pool.clone());

    // 3. Public API:
    if args.api {
        let api_addr = (config.bind_host.as_str(), config.api_port);
        let api = Router::new()
            .route("/api", get(handle_api))
            .layer(Extension(scores.clone()));

        let listener = tokio::net::TcpListener::bind(api_addr).await?;
        tracing::info!("API server listening on http://{}", listener.local_addr()?);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, api).await {
                tracing::error!("API server stopped: {}", e);
            }
        });
    }

    // 4. Peer server:
    let listener =
        tokio::net::TcpListener::bind((config.bind_host.as_str(), config.port)).await?;
    tracing::info!("Cache server listening on {}{}", self_addr, pool.base_path());

    axum::serve(listener, pool.router(registry)).await?;

    Ok(())
}

/// Stand-in for a slow backing store.
fn slow_db() -> impl Getter + 'static {
    let db: HashMap<&'static str, &'static str> =
        HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")]);

    move |key: &str| -> anyhow::Result<Vec<u8>> {
        tracing::info!("[SlowDB] search key {}", key);
        db.get(key)
            .map(|v| v.as_bytes().to_vec())
            .ok_or_else(|| anyhow::anyhow!("{} not exist", key))
    }
}

async fn handle_api(
    Extension(group): Extension<Arc<Group>>,
    Query(params): Query<ApiParams>,
) -> Response {
    let Some(key) = params.key else {
        return (StatusCode::BAD_REQUEST, "key is required").into_response();
    };

    match group.get(&key).await {
        Ok(view) => (
            [(header::CONTENT_TYPE, CONTENT_TYPE_OCTET_STREAM)],
            view.bytes(),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("API get {} failed: {}", key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
