//! The request orchestrator.
//!
//! [`Relay::handle`] drives one dispatch request through
//! `Validated → Located → Extracted → Dispatched`. Each step either advances
//! or ends the request with a [`RelayError`]; there are no retries and no
//! step runs twice.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::{
    extract::extract_deployment_tag, ApplicationName, ContentFetcher, Credential, DispatchEvent,
    DispatchRequest, DispatchSender, FetchError, RelayError, RelayOutcome, RepositoryId, RequestId,
    Tier,
};

/// Prefix identifying preview-environment applications.
pub const PREVIEW_PREFIX: &str = "pr-";

/// Reason reported when an application is not a preview environment.
pub const SKIP_REASON: &str = "application name doesn't start with 'pr-'";

/// Process-wide settings the orchestrator needs. Read-only after startup.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Repository holding the per-application `values.yaml` files.
    pub source_repository: RepositoryId,
    /// Repository that receives the dispatch events.
    pub target_repository: RepositoryId,
    /// Credential used for every request when set. Takes precedence over any
    /// credential supplied in the request body.
    pub default_credential: Option<Credential>,
}

/// Orchestrates validation, lookup, extraction and dispatch for one request at
/// a time. Shared across request handlers behind an [`Arc`].
pub struct Relay {
    settings: RelaySettings,
    fetcher: Arc<dyn ContentFetcher>,
    sender: Arc<dyn DispatchSender>,
}

impl Relay {
    /// Creates a relay over the given ports.
    pub fn new(
        settings: RelaySettings,
        fetcher: Arc<dyn ContentFetcher>,
        sender: Arc<dyn DispatchSender>,
    ) -> Self {
        Self {
            settings,
            fetcher,
            sender,
        }
    }

    /// Handles one decoded dispatch request.
    ///
    /// Applications outside the preview prefix are skipped before any
    /// credential check or outbound call.
    #[instrument(
        name = "relay.dispatch",
        skip_all,
        fields(request_id = %RequestId::new_random(), application = %request.application)
    )]
    pub async fn handle(&self, request: DispatchRequest) -> Result<RelayOutcome, RelayError> {
        let Some(application) = ApplicationName::new(request.application.as_str())
            .filter(|name| name.as_str().starts_with(PREVIEW_PREFIX))
        else {
            info!("Skipping application: name doesn't start with '{PREVIEW_PREFIX}'");
            return Ok(RelayOutcome::Skipped {
                reason: SKIP_REASON.to_string(),
            });
        };

        let credential = self.resolve_credential(&request)?;
        info!("Dispatching for application");

        let content = self.locate_values_file(&application, &credential).await?;

        let tag = extract_deployment_tag(&content).map_err(|e| {
            error!(error = %e, "Error extracting deployment tag");
            RelayError::from(e)
        })?;
        info!(commit_hash = %tag, "Extracted deployment tag");

        let event = DispatchEvent::environment_ready(&tag, &application);
        self.sender
            .send(&self.settings.target_repository, &credential, &event)
            .await
            .map_err(|e| {
                error!(
                    target_repository = %self.settings.target_repository,
                    error = %e,
                    "Error sending dispatch"
                );
                RelayError::from(e)
            })?;

        info!(commit_hash = %tag, "Successfully dispatched");
        Ok(RelayOutcome::Dispatched {
            commit_hash: tag,
            source_name: application,
        })
    }

    /// The configured default always wins over a request-supplied credential.
    fn resolve_credential(&self, request: &DispatchRequest) -> Result<Credential, RelayError> {
        if let Some(credential) = &self.settings.default_credential {
            debug!("Using configured credential");
            return Ok(credential.clone());
        }
        request.credential().ok_or_else(|| {
            warn!("No credential configured or supplied");
            RelayError::CredentialRequired
        })
    }

    /// Probes each tier in order; the first successful fetch wins.
    async fn locate_values_file(
        &self,
        application: &ApplicationName,
        credential: &Credential,
    ) -> Result<Vec<u8>, RelayError> {
        for tier in Tier::SEARCH_ORDER {
            let path = tier.values_path(application);
            match self
                .fetcher
                .fetch(&self.settings.source_repository, &path, credential)
                .await
            {
                Ok(content) => {
                    info!(path = %path, %tier, "Found values file");
                    return Ok(content);
                }
                Err(e @ FetchError::NotFound { .. }) => {
                    debug!(path = %path, %tier, error = %e, "Values file not in tier");
                }
                Err(e) => {
                    warn!(path = %path, %tier, error = %e, "Values file fetch failed");
                }
            }
        }

        warn!(
            source_repository = %self.settings.source_repository,
            "Could not find 'values.yaml' in any tier"
        );
        Err(RelayError::ValuesFileNotFound {
            application: application.clone(),
        })
    }
}
