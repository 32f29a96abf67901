//! Shared HTTP client construction and transport error classification.

use std::time::Duration;

use thiserror::Error;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default raw content host.
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

/// Upper bound on every outbound request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sent on every request; the REST API rejects requests without one.
pub const USER_AGENT: &str = concat!("tag-relay/", env!("CARGO_PKG_VERSION"));

/// Returned when the HTTP client cannot be configured.
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// Builds the client shared by [`crate::RawContentFetcher`] and
/// [`crate::DispatchClient`].
///
/// The client is safe for concurrent use; clones share the connection pool.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ClientBuildError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Describes a transport failure without the request headers.
pub(crate) fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

/// Joins a base URL and a path without doubling the separator.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
