//! Raw file retrieval from the content host.

use async_trait::async_trait;
use pipeline::{BranchName, ContentFetcher, ContentPath, Credential, FetchError, RepositoryId};
use reqwest::{header::AUTHORIZATION, StatusCode};
use tracing::{debug, instrument};

use crate::client::{describe_transport_error, join_url};

/// Fetches files from `{base_url}/{owner}/{repo}/{branch}/{path}`.
#[derive(Debug, Clone)]
pub struct RawContentFetcher {
    client: reqwest::Client,
    base_url: String,
    branch: BranchName,
}

impl RawContentFetcher {
    /// Creates a fetcher reading `branch` from the host at `base_url`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, branch: BranchName) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            branch,
        }
    }

    /// Returns the URL a file is fetched from.
    pub fn content_url(&self, repository: &RepositoryId, path: &ContentPath) -> String {
        join_url(
            &self.base_url,
            &format!(
                "{}/{}/{}/{}",
                repository.owner(),
                repository.name(),
                self.branch,
                path
            ),
        )
    }
}

#[async_trait]
impl ContentFetcher for RawContentFetcher {
    #[instrument(name = "github.fetch_content", skip_all, fields(repository = %repository, path = %path))]
    async fn fetch(
        &self,
        repository: &RepositoryId,
        path: &ContentPath,
        credential: &Credential,
    ) -> Result<Vec<u8>, FetchError> {
        let url = self.content_url(repository, path);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, credential.authorization_header())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                message: describe_transport_error(&e),
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "Content host responded");

        match status {
            StatusCode::OK => {
                let body = response.bytes().await.map_err(|e| FetchError::Transport {
                    message: describe_transport_error(&e),
                })?;
                Ok(body.to_vec())
            }
            StatusCode::NOT_FOUND => Err(FetchError::NotFound { path: path.clone() }),
            other => Err(FetchError::Upstream {
                status: other.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::build_http_client;

    fn fetcher(base_url: &str, timeout: Duration) -> RawContentFetcher {
        RawContentFetcher::new(
            build_http_client(timeout).unwrap(),
            base_url,
            BranchName::new("master").unwrap(),
        )
    }

    fn repo() -> RepositoryId {
        RepositoryId::parse("acme/deployment").unwrap()
    }

    fn values_path() -> ContentPath {
        ContentPath::new("configs/pr/light/pr-1/values.yaml").unwrap()
    }

    fn token() -> Credential {
        Credential::new("ghp_abc").unwrap()
    }

    #[test]
    fn content_url_layout() {
        let f = fetcher("https://raw.githubusercontent.com/", Duration::from_secs(1));
        assert_eq!(
            f.content_url(&repo(), &values_path()),
            "https://raw.githubusercontent.com/acme/deployment/master/configs/pr/light/pr-1/values.yaml"
        );
    }

    #[tokio::test]
    async fn returns_body_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/acme/deployment/master/configs/pr/light/pr-1/values.yaml",
            ))
            .and(header("authorization", "token ghp_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"global: {}\n".as_ref()))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetcher(&server.uri(), Duration::from_secs(5))
            .fetch(&repo(), &values_path(), &token())
            .await
            .unwrap();

        assert_eq!(body, b"global: {}\n");
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher(&server.uri(), Duration::from_secs(5))
            .fetch(&repo(), &values_path(), &token())
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::NotFound { path: values_path() });
    }

    #[tokio::test]
    async fn maps_other_statuses_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = fetcher(&server.uri(), Duration::from_secs(5))
            .fetch(&repo(), &values_path(), &token())
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::Upstream { status: 403 });
    }

    #[tokio::test]
    async fn timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let err = fetcher(&server.uri(), Duration::from_millis(100))
            .fetch(&repo(), &values_path(), &token())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn transport_error_never_contains_credential() {
        let err = fetcher("http://127.0.0.1:1", Duration::from_secs(2))
            .fetch(&repo(), &values_path(), &token())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(!err.to_string().contains("ghp_abc"));
    }
}
