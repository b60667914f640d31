//! Remote repository registry
//!
//! The registry is the authenticated user's GitHub account. Results are
//! fetched on every call and never cached.

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hearth_core::Config;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Repositories requested per page
const PER_PAGE: usize = 100;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Repository metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoInfo {
    /// Repository name
    pub name: String,

    /// Description, if set
    #[serde(default)]
    pub description: Option<String>,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last update time
    pub updated_at: DateTime<Utc>,

    /// Size in kilobytes
    pub size: u64,

    /// License, if detected
    #[serde(default)]
    pub license: Option<License>,
}

/// Repository license
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct License {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RepoSummary {
    name: String,
}

/// Read access to the user's remote repositories
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepoRegistry: Send + Sync {
    /// Names of every repository owned by the authenticated user
    async fn repo_names(&self) -> Result<BTreeSet<String>>;

    /// Metadata for one repository
    async fn repo_info(&self, name: &str) -> Result<RepoInfo>;
}

/// GitHub REST API client
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
    username: String,
}

impl GitHubClient {
    /// Create a client for `api_url` authenticating as `username`
    pub fn new(api_url: &str, token: &str, username: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("hearth/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            username: username.to_string(),
        })
    }

    /// Create a client from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, &config.token, &config.username)
    }

    /// Authenticated GET returning the parsed JSON body
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{}", self.api_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::registry_request(status.as_u16(), url));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RepoRegistry for GitHubClient {
    async fn repo_names(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        let mut page = 1;

        loop {
            let endpoint = format!(
                "user/repos?affiliation=owner&per_page={}&page={}",
                PER_PAGE, page
            );
            let repos: Vec<RepoSummary> = self.get(&endpoint).await?;
            let count = repos.len();
            names.extend(repos.into_iter().map(|r| r.name));

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        debug!("Registry reports {} repositories", names.len());
        Ok(names)
    }

    async fn repo_info(&self, name: &str) -> Result<RepoInfo> {
        self.get(&format!("repos/{}/{}", self.username, name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_info_deserializes_github_payload() {
        let payload = r#"{
            "name": "hearth",
            "full_name": "me/hearth",
            "description": null,
            "created_at": "2021-02-04T10:00:00Z",
            "updated_at": "2021-03-01T12:30:00Z",
            "size": 512,
            "license": {"key": "mit", "name": "MIT License"}
        }"#;

        let info: RepoInfo = serde_json::from_str(payload).unwrap();
        assert_eq!(info.name, "hearth");
        assert_eq!(info.description, None);
        assert_eq!(info.size, 512);
        assert_eq!(info.license.unwrap().name, "MIT License");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = GitHubClient::new("http://localhost:1234/", "t", "me").unwrap();
        assert_eq!(client.api_url, "http://localhost:1234");
    }
}
