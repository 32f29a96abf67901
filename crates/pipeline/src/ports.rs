//! Port traits implemented by infrastructure crates.
//!
//! The orchestrator in [`crate::relay`] depends only on these traits. The
//! `github` crate supplies the HTTP implementations; tests supply in-memory
//! fakes.

use async_trait::async_trait;

use crate::{
    ContentPath, Credential, DispatchError, DispatchEvent, FetchError, RepositoryId,
};

/// Reads raw file content from a repository's primary branch.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Returns the bytes stored at `path` in `repository`.
    ///
    /// Implementations must authenticate with `credential` and must
    /// distinguish [`FetchError::NotFound`] from other failures.
    async fn fetch(
        &self,
        repository: &RepositoryId,
        path: &ContentPath,
        credential: &Credential,
    ) -> Result<Vec<u8>, FetchError>;
}

/// Delivers a dispatch event to a repository's event API.
#[async_trait]
pub trait DispatchSender: Send + Sync {
    /// Sends `event` to `repository`. Exactly one outbound request per call.
    async fn send(
        &self,
        repository: &RepositoryId,
        credential: &Credential,
        event: &DispatchEvent,
    ) -> Result<(), DispatchError>;
}
