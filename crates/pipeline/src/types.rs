//! Shared value types for the tag relay domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! request and event payloads that cross the wire, plus the secret
//! [`Credential`] wrapper.

use serde::{Deserialize, Serialize};

use crate::{ApplicationName, ContentPath, DeploymentTag};

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// A GitHub access token.
///
/// Never empty. `Debug` and `Display` are redacted so the value cannot leak
/// into logs or error messages; the raw value is only reachable through
/// [`Credential::authorization_header`].
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a token, returning `None` if it is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the `Authorization` header value (`"token <credential>"`).
    pub fn authorization_header(&self) -> String {
        format!("token {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

// ---------------------------------------------------------------------------
// Inbound request
// ---------------------------------------------------------------------------

/// Body of `POST /dispatch`.
///
/// Sent by the deployment controller once an application finishes deploying.
#[derive(Clone, Deserialize)]
pub struct DispatchRequest {
    /// Name of the deployed application.
    pub application: String,

    /// Token to use when the relay has no configured default.
    #[serde(default)]
    pub github_token: Option<String>,
}

impl DispatchRequest {
    /// Returns the request-supplied credential, if a non-empty one was sent.
    pub fn credential(&self) -> Option<Credential> {
        self.github_token.clone().and_then(Credential::new)
    }
}

impl std::fmt::Debug for DispatchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchRequest")
            .field("application", &self.application)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Outbound event
// ---------------------------------------------------------------------------

/// Event type sent to the target repository for every successful relay.
pub const ENVIRONMENT_READY_EVENT: &str = "environment_ready";

/// `client_payload` of a [`DispatchEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPayload {
    /// The extracted deployment tag.
    #[serde(rename = "commitHash")]
    pub commit_hash: String,
    /// The application the tag was read for.
    #[serde(rename = "sourceName")]
    pub source_name: String,
}

/// A `repository_dispatch` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchEvent {
    /// Always [`ENVIRONMENT_READY_EVENT`].
    pub event_type: String,
    /// Workflow inputs forwarded to the target repository.
    pub client_payload: ClientPayload,
}

impl DispatchEvent {
    /// Builds the `environment_ready` event for one application.
    pub fn environment_ready(tag: &DeploymentTag, application: &ApplicationName) -> Self {
        Self {
            event_type: ENVIRONMENT_READY_EVENT.to_string(),
            client_payload: ClientPayload {
                commit_hash: tag.as_str().to_string(),
                source_name: application.as_str().to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Deployment tier hosting an application's configuration.
///
/// An application lives in exactly one tier; the relay probes them in
/// [`Tier::SEARCH_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// `configs/pr/light/`
    Light,
    /// `configs/pr/heavy/`
    Heavy,
}

impl Tier {
    /// Order in which tiers are probed.
    pub const SEARCH_ORDER: [Tier; 2] = [Tier::Light, Tier::Heavy];

    /// Directory name of the tier under `configs/pr/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Light => "light",
            Tier::Heavy => "heavy",
        }
    }

    /// Path of the application's `values.yaml` within this tier.
    pub fn values_path(self, application: &ApplicationName) -> ContentPath {
        ContentPath::values_file(self.as_str(), application)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Successful terminal states of one relay request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The application is not a preview environment; nothing was sent.
    Skipped {
        /// Why the request was ignored.
        reason: String,
    },
    /// The event was accepted by the target repository.
    Dispatched {
        /// Tag forwarded as `commitHash`.
        commit_hash: DeploymentTag,
        /// Application forwarded as `sourceName`.
        source_name: ApplicationName,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_is_redacted() {
        let cred = Credential::new("ghp_secret").unwrap();
        assert_eq!(format!("{cred:?}"), "Credential(<redacted>)");
        assert_eq!(cred.to_string(), "<redacted>");
        assert_eq!(cred.authorization_header(), "token ghp_secret");
        assert!(Credential::new("").is_none());
    }

    #[test]
    fn dispatch_request_debug_hides_token() {
        let req: DispatchRequest =
            serde_json::from_str(r#"{"application":"pr-1","github_token":"ghp_secret"}"#).unwrap();
        let debug = format!("{req:?}");
        assert!(debug.contains("pr-1"));
        assert!(!debug.contains("ghp_secret"));
    }

    #[test]
    fn dispatch_request_token_is_optional() {
        let req: DispatchRequest = serde_json::from_str(r#"{"application":"pr-1"}"#).unwrap();
        assert!(req.credential().is_none());

        let req: DispatchRequest =
            serde_json::from_str(r#"{"application":"pr-1","github_token":""}"#).unwrap();
        assert!(req.credential().is_none());
    }

    #[test]
    fn dispatch_request_requires_application() {
        assert!(serde_json::from_str::<DispatchRequest>(r#"{"github_token":"x"}"#).is_err());
    }

    #[test]
    fn dispatch_event_wire_shape() {
        let event = DispatchEvent::environment_ready(
            &DeploymentTag::new("deadbeef").unwrap(),
            &ApplicationName::new("pr-42").unwrap(),
        );
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({
                "event_type": "environment_ready",
                "client_payload": { "commitHash": "deadbeef", "sourceName": "pr-42" }
            })
        );
    }

    #[test]
    fn tier_paths_follow_search_order() {
        let app = ApplicationName::new("pr-7").unwrap();
        let paths: Vec<String> = Tier::SEARCH_ORDER
            .iter()
            .map(|t| t.values_path(&app).to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "configs/pr/light/pr-7/values.yaml",
                "configs/pr/heavy/pr-7/values.yaml",
            ]
        );
    }
}
