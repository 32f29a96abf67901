//! Core domain for the tag relay.
//!
//! The relay receives a deployment-completion notification naming an
//! application, reads that application's `values.yaml` from the deployment
//! repository, extracts `global.config.DEPLOYMENT_TAG`, and forwards it as an
//! `environment_ready` dispatch event to the target repository.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ApplicationName`, `RepositoryId`, etc.) |
//! | [`types`] | Wire payloads, `Credential`, `Tier`, `RelayOutcome` |
//! | [`errors`] | Port, extraction and request-level error types |
//! | [`extract`] | `values.yaml` tag extraction |
//! | [`ports`] | `ContentFetcher` and `DispatchSender` traits |
//! | [`relay`] | The request orchestrator |

pub mod errors;
pub mod extract;
pub mod identifiers;
pub mod ports;
pub mod relay;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{DispatchError, ExtractError, FetchError, RelayError};
pub use extract::extract_deployment_tag;
pub use identifiers::{
    ApplicationName, BranchName, ContentPath, DeploymentTag, InvalidRepositoryId, RepositoryId,
    RequestId,
};
pub use ports::{ContentFetcher, DispatchSender};
pub use relay::{Relay, RelaySettings, PREVIEW_PREFIX, SKIP_REASON};
pub use types::{
    ClientPayload, Credential, DispatchEvent, DispatchRequest, RelayOutcome, Tier,
    ENVIRONMENT_READY_EVENT,
};
