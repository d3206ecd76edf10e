//! GitHub REST client implementation.
//!
//! A thin async client over the endpoints the browser needs. The token
//! is held in a [`SecretBox`] so it cannot leak through `Debug` output
//! or request logging.

use std::time::Duration;

use reqwest::header;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, StargazerError};

use super::{RepoHost, RepoOwner, Repository};

const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const USER_AGENT: &str = concat!("stargazer/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// GitHub gives at most 100 items per page; one page is all the browser
/// fetches per list.
const PER_PAGE: u32 = 100;

/// Shape of GitHub's JSON error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Async GitHub REST client.
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: SecretBox<String>,
}

impl GitHubClient {
    /// Create a client for api.github.com with the given token.
    ///
    /// Configures the HTTP transport with a 10s connect timeout and a
    /// 30s total timeout.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against a different API root (GitHub Enterprise,
    /// or a local stub in tests).
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StargazerError::Config(format!("invalid API base URL: {}", e)))?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: SecretBox::new(Box::new(token.to_string())),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StargazerError::Api(format!("invalid endpoint '{}': {}", path, e)))
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(header::ACCEPT, ACCEPT_JSON)
            .header(
                header::AUTHORIZATION,
                format!("token {}", self.token.expose_secret()),
            )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self.request(reqwest::Method::GET, url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, method: reqwest::Method, path: &str) -> Result<()> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, method = %method, "request");
        let response = self.request(method, url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

impl RepoHost for GitHubClient {
    async fn resolve_authenticated_login(&self) -> Result<String> {
        let user: RepoOwner = self.get_json("user").await?;
        Ok(user.login)
    }

    async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>> {
        self.get_json(&format!(
            "users/{}/repos?per_page={}&sort=updated",
            account, PER_PAGE
        ))
        .await
    }

    async fn list_starred(&self, account: &str) -> Result<Vec<Repository>> {
        self.get_json(&format!("users/{}/starred?per_page={}", account, PER_PAGE))
            .await
    }

    async fn star(&self, owner: &str, name: &str) -> Result<()> {
        self.send_empty(
            reqwest::Method::PUT,
            &format!("user/starred/{}/{}", owner, name),
        )
        .await
    }

    async fn unstar(&self, owner: &str, name: &str) -> Result<()> {
        self.send_empty(
            reqwest::Method::DELETE,
            &format!("user/starred/{}/{}", owner, name),
        )
        .await
    }

    async fn fork(&self, owner: &str, name: &str) -> Result<Repository> {
        let url = self.endpoint(&format!("repos/{}/{}/forks", owner, name))?;
        tracing::debug!(%url, "POST");
        let response = self.request(reqwest::Method::POST, url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn close(self) {
        // reqwest tears its connection pool down when the last handle to
        // the client drops; consuming self here is that last handle.
        tracing::debug!("closing GitHub client");
    }
}

/// Map a non-success response onto the error taxonomy.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED {
        return Err(StargazerError::Auth(
            "invalid or expired GitHub token".to_string(),
        ));
    }
    if status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && body.to_lowercase().contains("rate limit"))
    {
        return Err(StargazerError::RateLimited(retry_after.unwrap_or(60)));
    }
    if status == StatusCode::NOT_FOUND {
        return Err(StargazerError::NotFound(error_message(&body)));
    }

    Err(StargazerError::Api(format!(
        "GitHub API error ({}): {}",
        status,
        error_message(&body)
    )))
}

/// Pull the `message` field out of a GitHub error body, falling back to
/// the raw body text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string())
}
