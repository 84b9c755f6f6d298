// ABOUTME: Centralized constants for the ghi SDK
// ABOUTME: Contains API endpoints and timeout configuration

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// GitHub API URLs
pub mod urls {
    /// Base URL for the GitHub GraphQL API
    pub const GITHUB_API_BASE: &str = "https://api.github.com";

    /// Base URL for github.com web pages
    pub const GITHUB_WEB_BASE: &str = "https://github.com";
}
