//! Error types for the tag relay domain.
//!
//! Each port has its own error enum ([`FetchError`], [`DispatchError`]) and the
//! extractor has [`ExtractError`]. [`RelayError`] is what the orchestrator
//! returns to the inbound surface; every variant maps to exactly one HTTP
//! status via [`RelayError::status_code`].
//!
//! No error message ever contains a credential.

use thiserror::Error;

use crate::{ApplicationName, ContentPath};

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failure to retrieve a file from the source repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The file does not exist at the requested path (HTTP 404).
    #[error("file not found at {path}")]
    NotFound {
        /// Path that was requested.
        path: ContentPath,
    },

    /// The content host answered with a status other than 200 or 404.
    #[error("unexpected status code: {status}")]
    Upstream {
        /// HTTP status code returned.
        status: u16,
    },

    /// The request never produced a response (timeout, DNS, connection refused).
    #[error("fetching file: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}

/// Failure to send a dispatch event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The event API answered with something other than 201 or 204.
    ///
    /// A 200 also lands here: the dispatch endpoint never returns it on
    /// success.
    #[error("unexpected status code: {status}, body: {body}")]
    UnexpectedStatus {
        /// HTTP status code returned.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The event payload could not be serialised.
    #[error("marshaling payload: {message}")]
    Serialization {
        /// Serialiser error message.
        message: String,
    },

    /// The request never produced a response.
    #[error("sending dispatch: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Extraction errors
// ---------------------------------------------------------------------------

/// Failure to read `global.config.DEPLOYMENT_TAG` from a values document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The bytes are not a YAML document of the expected shape.
    #[error("parsing YAML: {message}")]
    Parse {
        /// Parser error message.
        message: String,
    },

    /// The document parsed but the tag is absent or empty.
    #[error("DEPLOYMENT_TAG is empty or not found")]
    MissingField,
}

// ---------------------------------------------------------------------------
// Request-level errors
// ---------------------------------------------------------------------------

/// Every way a dispatch request can end other than a [`crate::RelayOutcome`].
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request body could not be decoded.
    #[error("Invalid payload")]
    InvalidPayload,

    /// Neither the relay nor the request supplied a credential.
    #[error("A GitHub token is required")]
    CredentialRequired,

    /// No tier holds a readable `values.yaml` for the application.
    #[error("Could not find 'values.yaml' for application '{application}'")]
    ValuesFileNotFound {
        /// Application that was looked up.
        application: ApplicationName,
    },

    /// The values file was found but the tag could not be read from it.
    #[error("Error extracting deployment tag: {0}")]
    Extraction(#[from] ExtractError),

    /// The tag was read but the event API did not accept the dispatch.
    #[error("Error sending dispatch: {0}")]
    Dispatch(#[from] DispatchError),
}

impl RelayError {
    /// HTTP status code reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPayload | Self::CredentialRequired => 400,
            Self::ValuesFileNotFound { .. } => 404,
            Self::Extraction(_) | Self::Dispatch(_) => 500,
        }
    }
}
