//! `repository_dispatch` delivery.

use async_trait::async_trait;
use pipeline::{Credential, DispatchError, DispatchEvent, DispatchSender, RepositoryId};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    StatusCode,
};
use tracing::{debug, instrument};

use crate::client::{describe_transport_error, join_url};

/// Media type requested from the REST API.
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Posts dispatch events to `{api_base_url}/repos/{owner}/{repo}/dispatches`.
#[derive(Debug, Clone)]
pub struct DispatchClient {
    client: reqwest::Client,
    api_base_url: String,
}

impl DispatchClient {
    /// Creates a client targeting the REST API at `api_base_url`.
    pub fn new(client: reqwest::Client, api_base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
        }
    }

    /// Returns the dispatch endpoint for a repository.
    pub fn dispatch_url(&self, repository: &RepositoryId) -> String {
        join_url(
            &self.api_base_url,
            &format!("repos/{}/{}/dispatches", repository.owner(), repository.name()),
        )
    }
}

#[async_trait]
impl DispatchSender for DispatchClient {
    /// Only 201 and 204 count as accepted.
    #[instrument(name = "github.dispatch", skip_all, fields(repository = %repository, event_type = %event.event_type))]
    async fn send(
        &self,
        repository: &RepositoryId,
        credential: &Credential,
        event: &DispatchEvent,
    ) -> Result<(), DispatchError> {
        let body = serde_json::to_vec(event).map_err(|e| DispatchError::Serialization {
            message: e.to_string(),
        })?;

        let response = self
            .client
            .post(self.dispatch_url(repository))
            .header(AUTHORIZATION, credential.authorization_header())
            .header(ACCEPT, GITHUB_JSON)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| DispatchError::Transport {
                message: describe_transport_error(&e),
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "Event API responded");

        if status == StatusCode::CREATED || status == StatusCode::NO_CONTENT {
            return Ok(());
        }

        // The body is diagnostic only; a failed read still reports the status.
        let body = response.text().await.unwrap_or_default();
        Err(DispatchError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pipeline::{ApplicationName, DeploymentTag};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::build_http_client;

    fn client(base_url: &str) -> DispatchClient {
        DispatchClient::new(build_http_client(Duration::from_secs(5)).unwrap(), base_url)
    }

    fn repo() -> RepositoryId {
        RepositoryId::parse("acme/product").unwrap()
    }

    fn event() -> DispatchEvent {
        DispatchEvent::environment_ready(
            &DeploymentTag::new("deadbeef").unwrap(),
            &ApplicationName::new("pr-42").unwrap(),
        )
    }

    fn token() -> Credential {
        Credential::new("ghp_abc").unwrap()
    }

    #[test]
    fn dispatch_url_layout() {
        assert_eq!(
            client("https://api.github.com").dispatch_url(&repo()),
            "https://api.github.com/repos/acme/product/dispatches"
        );
    }

    #[tokio::test]
    async fn sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/acme/product/dispatches"))
            .and(header("authorization", "token ghp_abc"))
            .and(header("accept", GITHUB_JSON))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "event_type": "environment_ready",
                "client_payload": { "commitHash": "deadbeef", "sourceName": "pr-42" }
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server.uri())
            .send(&repo(), &token(), &event())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("user-agent").is_some());
    }

    #[tokio::test]
    async fn accepts_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        assert!(client(&server.uri())
            .send(&repo(), &token(), &event())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn rejects_200_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"message\":\"ok?\"}"))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .send(&repo(), &token(), &event())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DispatchError::UnexpectedStatus {
                status: 200,
                body: "{\"message\":\"ok?\"}".to_string()
            }
        );
    }

    #[tokio::test]
    async fn rejects_422() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .send(&repo(), &token(), &event())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("Validation Failed"));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let err = client("http://127.0.0.1:1")
            .send(&repo(), &token(), &event())
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Transport { .. }));
    }
}
