//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for example,
//! an [`ApplicationName`] with a [`DeploymentTag`] even though both are `String`
//! under the hood.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single inbound dispatch request.
///
/// Generated fresh for every request handled by the relay and attached to its
/// tracing span so all activity from one request can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Name of a deployed application as reported by the deployment controller
    /// (e.g. `"pr-42"`).
    ApplicationName
}

string_id! {
    /// A commit-identifying tag read from `global.config.DEPLOYMENT_TAG`.
    ///
    /// The format is opaque to the relay; it is forwarded verbatim.
    DeploymentTag
}

string_id! {
    /// A Git branch name (e.g. `"master"`).
    BranchName
}

string_id! {
    /// A file path relative to the repository root
    /// (e.g. `"configs/pr/light/pr-42/values.yaml"`).
    ContentPath
}

/// The primary branch, `master`.
impl Default for BranchName {
    fn default() -> Self {
        Self("master".to_string())
    }
}

impl ContentPath {
    /// `configs/pr/{tier}/{application}/values.yaml`.
    pub(crate) fn values_file(tier: &str, application: &ApplicationName) -> Self {
        Self(format!("configs/pr/{tier}/{application}/values.yaml"))
    }
}

// ---------------------------------------------------------------------------
// Repository identifier
// ---------------------------------------------------------------------------

/// Returned when a repository identifier is not in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid repository identifier '{value}': expected 'owner/name'")]
pub struct InvalidRepositoryId {
    /// The rejected input.
    pub value: String,
}

/// Identifies a GitHub repository by owner and name.
///
/// Parsed from `"owner/name"`. Exactly two non-empty components are required;
/// `"owner"`, `"owner/"` and `"owner/name/extra"` are all rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    /// Parses an `"owner/name"` string.
    pub fn parse(value: &str) -> Result<Self, InvalidRepositoryId> {
        let mut parts = value.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(InvalidRepositoryId {
                value: value.to_string(),
            }),
        }
    }

    /// Returns the owning user or organisation.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::str::FromStr for RepositoryId {
    type Err = InvalidRepositoryId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
