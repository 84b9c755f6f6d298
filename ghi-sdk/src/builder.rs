// ABOUTME: Builder pattern implementation for GhClient configuration
// ABOUTME: Provides type-safe configuration with sensible defaults

use secrecy::SecretString;
use typed_builder::TypedBuilder;

use crate::constants::timeouts;
use crate::error::GhError;
use crate::GhClient;
use std::time::Duration;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<GhClient, GhError>))]
pub struct GhClientConfig {
    pub auth_token: SecretString,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    /// Override the API endpoint, e.g. for GitHub Enterprise or tests.
    #[builder(default = None, setter(strip_option))]
    pub base_url: Option<String>,
}

impl From<GhClientConfig> for Result<GhClient, GhError> {
    fn from(config: GhClientConfig) -> Self {
        GhClient::from_config(config)
    }
}

impl GhClient {
    pub fn builder() -> GhClientConfigBuilder {
        GhClientConfig::builder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn token() -> SecretString {
        SecretString::new("test-token".to_string().into_boxed_str())
    }

    #[test]
    fn test_builder_with_minimal_config() {
        let client = GhClient::builder().auth_token(token()).build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_with_all_options() {
        let client = GhClient::builder()
            .auth_token(token())
            .timeout(Duration::from_secs(60))
            .base_url("http://127.0.0.1:9999".to_string())
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_config_uses_secrecy_for_sensitive_data() {
        let secret = token();
        let debug_str = format!("{:?}", secret);
        assert!(!debug_str.contains("test-token"));
    }
}
