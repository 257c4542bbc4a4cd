//! Peer Network Protocol
//!
//! A peer request is a plain `GET {base_path}{group}/{key}` where both
//! segments are percent-encoded. Responses:
//!
//! | Status | Meaning                          | Body             |
//! |--------|----------------------------------|------------------|
//! | 200    | value found or loaded            | raw value bytes  |
//! | 400    | path is not `{group}/{key}`      | error text       |
//! | 404    | unknown group                    | error text       |
//! | 500    | loader failed                    | error text       |

use std::time::Duration;

/// Path prefix reserved for peer traffic.
pub const DEFAULT_BASE_PATH: &str = "/_geecache/";
/// Virtual nodes per peer on the hash ring.
pub const DEFAULT_REPLICAS: usize = 50;
/// Upper bound on a single peer fetch.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// Makes sure a base path starts and ends with a single `/`.
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Splits the part of the path after the base path into `(group, key)`.
///
/// Only the first `/` separates the two, so keys may themselves contain `/`.
pub fn split_group_key(rest: &str) -> Option<(&str, &str)> {
    rest.split_once('/')
}
