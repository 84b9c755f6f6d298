// ABOUTME: Custom error types for the ghi SDK with user-friendly messages
// ABOUTME: Provides specific error handling for GitHub API failure modes

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GhError {
    #[error("Authentication failed. Check your GITHUB_TOKEN")]
    Auth,

    #[error("Issue #{0} not found")]
    IssueNotFound(u64),

    #[error("Repository {0} not found")]
    RepoNotFound(String),

    #[error("Invalid repository format: {0}")]
    InvalidRepo(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Rate limit exceeded. Please wait before making more requests")]
    RateLimit,

    #[error("Invalid API response format")]
    InvalidResponse,

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GhError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            GhError::Auth => {
                Some("Create a token at https://github.com/settings/tokens and export GITHUB_TOKEN")
            }
            GhError::InvalidRepo(_) => Some("Expected the OWNER/REPO format, e.g. cli/cli"),
            GhError::IssueNotFound(_) => {
                Some("An issue can be referenced by number (123) or by its full URL")
            }
            GhError::Network(_) => Some("Check your internet connection and try again"),
            GhError::RateLimit => Some("Wait a moment before making another request"),
            GhError::Timeout => Some("Try again or check your network connection"),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GhError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GhError::Timeout
        } else if err.is_status() {
            if let Some(status) = err.status() {
                match status.as_u16() {
                    401 => GhError::Auth,
                    403 | 429 => GhError::RateLimit,
                    _ => GhError::Network(err.to_string()),
                }
            } else {
                GhError::Network(err.to_string())
            }
        } else {
            GhError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GhError {
    fn from(_err: serde_json::Error) -> Self {
        GhError::InvalidResponse
    }
}

pub type Result<T> = std::result::Result<T, GhError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GhError::Auth.to_string(),
            "Authentication failed. Check your GITHUB_TOKEN"
        );
        assert_eq!(GhError::IssueNotFound(42).to_string(), "Issue #42 not found");
        assert_eq!(
            GhError::RepoNotFound("octocat/spoon-knife".to_string()).to_string(),
            "Repository octocat/spoon-knife not found"
        );
        assert_eq!(
            GhError::Network("Connection refused".to_string()).to_string(),
            "Network error: Connection refused"
        );
        assert_eq!(
            GhError::GraphQl("Field not found".to_string()).to_string(),
            "GraphQL error: Field not found"
        );
    }

    #[test]
    fn test_help_text() {
        assert!(GhError::Auth.help_text().unwrap().contains("GITHUB_TOKEN"));
        assert!(
            GhError::InvalidRepo("x".to_string())
                .help_text()
                .unwrap()
                .contains("OWNER/REPO")
        );
        assert_eq!(GhError::GraphQl("test".to_string()).help_text(), None);
        assert_eq!(GhError::InvalidResponse.help_text(), None);
    }
}
