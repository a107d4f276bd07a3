//! Requirements publisher — pushes a markdown document to a GitHub repository
//! through the file-contents API. Not part of the interview request path.

use std::time::Duration;

use base64::{prelude::BASE64_STANDARD, Engine};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Built-in document published when no file is given.
pub const SAMPLE_REQUIREMENTS_MD: &str = r#"
# Functional Requirements for MyApp

## 1. User Authentication
- **Feature**: Users must be able to log in and log out.
- **Requirements**:
  - Login using Google OAuth.
  - Password recovery through email.
  - User role management (Admin, Regular User).

## 2. User Profile Management
- **Feature**: Users can update their profiles.
- **Requirements**:
  - Allow users to update profile picture, name, and contact information.
  - Admins can manage users' permissions.
"#;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Where and how to write the document.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub branch: String,
    pub message: String,
    pub markdown: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Created,
    Updated,
}

#[derive(Debug, Serialize)]
struct PutContentsBody<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExistingFile {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

pub struct GitHubPublisher {
    client: Client,
    api_base: String,
    token: String,
}

impl GitHubPublisher {
    pub fn new(token: String, api_base: impl Into<String>) -> Result<Self, PublishError> {
        Ok(Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()?,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn contents_url(&self, request: &PublishRequest) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base,
            request.owner,
            request.repo,
            request.path.trim_start_matches('/')
        )
    }

    /// Creates the file, or replaces it if it already exists on the branch.
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome, PublishError> {
        let url = self.contents_url(request);
        let sha = self.existing_sha(&url, &request.branch).await?;
        debug!("Existing blob sha for {}: {:?}", request.path, sha);

        let body = PutContentsBody {
            message: &request.message,
            content: BASE64_STANDARD.encode(request.markdown.as_bytes()),
            branch: &request.branch,
            sha,
        };

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await?;

        let outcome = match response.status() {
            StatusCode::CREATED => PublishOutcome::Created,
            StatusCode::OK => PublishOutcome::Updated,
            status => return Err(api_error(status, response).await),
        };

        info!(
            "Published {}/{}:{} on branch {} ({:?})",
            request.owner, request.repo, request.path, request.branch, outcome
        );
        Ok(outcome)
    }

    async fn existing_sha(&self, url: &str, branch: &str) -> Result<Option<String>, PublishError> {
        let response = self
            .client
            .get(url)
            .query(&[("ref", branch)])
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<ExistingFile>().await?.sha)),
            status => Err(api_error(status, response).await),
        }
    }
}

async fn api_error(status: StatusCode, response: reqwest::Response) -> PublishError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GitHubErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    PublishError::Api {
        status: status.as_u16(),
        message,
    }
}
