// ABOUTME: ghi SDK library providing a GraphQL client for the GitHub API
// ABOUTME: Covers issue listing, lookup, creation, and state transitions

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod builder;
pub mod constants;
pub mod error;
pub mod issues;
pub mod repo;
pub mod types;

pub use builder::GhClientConfig;
pub use error::{GhError, Result};
pub use issues::{IssueFilters, StateFilter};
pub use repo::{parse_issue_url, Repo};
pub use types::{
    CreateIssueParams, CreatedIssue, Issue, IssueList, IssueState, MetaLabel, MetaMilestone,
    MetaProject, MetaUser, RepoInfo, RepoMetadata, StatusPayload,
};

pub struct GhClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlMessage>>,
}

#[derive(Deserialize)]
struct GraphQlMessage {
    message: String,
}

impl GhClient {
    pub fn from_config(config: GhClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = format!("bearer {}", config.auth_token.expose_secret());
        let mut auth_value =
            HeaderValue::from_str(&bearer).map_err(|_| GhError::Auth)?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(USER_AGENT, HeaderValue::from_static("ghi/0.1.0"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config
                .base_url
                .unwrap_or_else(|| constants::urls::GITHUB_API_BASE.to_string()),
        })
    }

    /// POST one GraphQL document and deserialize the `data` payload.
    /// GraphQL-level errors surface with the service's own message.
    pub(crate) async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let endpoint = format!("{}/graphql", self.base_url.trim_end_matches('/'));
        log::debug!("POST {} variables={}", endpoint, variables);

        let response = self
            .client
            .post(&endpoint)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        match response.status().as_u16() {
            401 => return Err(GhError::Auth),
            403 | 429 => return Err(GhError::RateLimit),
            _ => {}
        }

        let body: GraphQlResponse<T> = response.error_for_status()?.json().await?;

        if let Some(errors) = body.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(GhError::GraphQl(message));
        }

        body.data.ok_or(GhError::InvalidResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_client_creation() {
        let client = GhClient::builder()
            .auth_token(SecretString::new("token".to_string().into_boxed_str()))
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_defaults_to_github() {
        let client = GhClient::builder()
            .auth_token(SecretString::new("token".to_string().into_boxed_str()))
            .build()
            .unwrap();
        assert_eq!(client.base_url, constants::urls::GITHUB_API_BASE);
    }
}
