use super::pool::HttpPool;
use super::protocol::{CONTENT_TYPE_OCTET_STREAM, split_group_key};
use crate::error::CacheError;
use crate::group::GroupRegistry;

use axum::{
    extract::{Extension, Path},
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Serves `GET {base_path}{group}/{key}` for other nodes.
pub async fn handle_peer_get(
    Extension(pool): Extension<Arc<HttpPool>>,
    Extension(registry): Extension<Arc<GroupRegistry>>,
    method: Method,
    uri: Uri,
    Path(rest): Path<String>,
) -> Response {
    tracing::info!("[Server {}] {} {}", pool.self_addr(), method, uri.path());

    let Some((group_name, key)) = split_group_key(&rest) else {
        let err = CacheError::BadRequest(format!("expected <group>/<key>, got {}", rest));
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    };

    let Some(group) = registry.get_group(group_name) else {
        return (
            StatusCode::NOT_FOUND,
            CacheError::GroupNotFound(group_name.to_string()).to_string(),
        )
            .into_response();
    };

    match group.get(key).await {
        Ok(view) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CONTENT_TYPE_OCTET_STREAM)],
            view.bytes(),
        )
            .into_response(),
        Err(e @ CacheError::EmptyKey) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => {
            tracing::error!("Failed to get {}/{}: {}", group_name, key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Catches requests that do not carry the peer base path. Seeing one means
/// the pool was mounted at the wrong place.
pub async fn handle_unexpected_path(
    Extension(pool): Extension<Arc<HttpPool>>,
    method: Method,
    uri: Uri,
) -> Response {
    tracing::error!(
        "[Server {}] serving unexpected path: {} {}",
        pool.self_addr(),
        method,
        uri.path()
    );
    (StatusCode::NOT_FOUND, "unexpected path").into_response()
}
