//! Configuration management for GitLab client

use std::{path::PathBuf, time::Duration};

use compact_str::CompactString;

use super::error::{ClientError, Result};
use crate::config::GlimConfig;

/// Main configuration for GitLab client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GitLab API root, e.g. `https://gitlab.example.com/api/v4`
    pub base_url: CompactString,
    /// Private access token
    pub private_token: CompactString,
    /// Request configuration
    pub request: RequestConfig,
    /// Debug configuration
    pub debug: DebugConfig,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: CompactString,
}

/// Debug and logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Enable debug logging of HTTP responses
    pub log_responses: bool,
    /// Directory for storing debug logs
    pub log_directory: Option<PathBuf>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("glim-gitlab/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_responses: false,
            log_directory: Some(PathBuf::from("glim-gitlab-logs")),
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(
        base_url: impl Into<CompactString>,
        private_token: impl Into<CompactString>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            private_token: private_token.into(),
            request: RequestConfig::default(),
            debug: DebugConfig::default(),
        }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::config("Base URL cannot be empty"));
        }

        if self.private_token.is_empty() {
            return Err(ClientError::config("Private token cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::config("Base URL must start with http:// or https://"));
        }

        if self.request.timeout.is_zero() {
            return Err(ClientError::config("Timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Set request configuration
    pub fn with_request(mut self, request: RequestConfig) -> Self {
        self.request = request;
        self
    }

    /// Set debug configuration
    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = debug;
        self
    }

    /// Enable debug logging
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug.log_responses = enabled;
        self
    }
}

impl From<GlimConfig> for ClientConfig {
    fn from(config: GlimConfig) -> Self {
        Self::new(config.gitlab_url, config.gitlab_token)
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<CompactString>,
    private_token: Option<CompactString>,
    request: Option<RequestConfig>,
    debug: Option<DebugConfig>,
}

impl ClientConfigBuilder {
    /// Set base URL
    pub fn base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set private token
    pub fn private_token(mut self, token: impl Into<CompactString>) -> Self {
        self.private_token = Some(token.into());
        self
    }

    /// Set request configuration
    pub fn request(mut self, request: RequestConfig) -> Self {
        self.request = Some(request);
        self
    }

    /// Set debug configuration
    pub fn debug(mut self, debug: DebugConfig) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Enable debug logging
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        let mut debug = self.debug.unwrap_or_default();
        debug.log_responses = enabled;
        self.debug = Some(debug);
        self
    }

    /// Set directory for response logs
    pub fn log_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        let mut debug = self.debug.unwrap_or_default();
        debug.log_directory = Some(dir.into());
        self.debug = Some(debug);
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let mut request = self.request.unwrap_or_default();
        request.timeout = timeout;
        self.request = Some(request);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<CompactString>) -> Self {
        let mut request = self.request.unwrap_or_default();
        request.user_agent = user_agent.into();
        self.request = Some(request);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::config("Base URL is required"))?;
        let private_token = self
            .private_token
            .ok_or_else(|| ClientError::config("Private token is required"))?;

        let config = ClientConfig {
            base_url,
            private_token,
            request: self.request.unwrap_or_default(),
            debug: self.debug.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .base_url("https://gitlab.example.com/api/v4")
            .private_token("test-token")
            .timeout(Duration::from_secs(5))
            .user_agent("hook-sync/1.0")
            .debug_logging(true)
            .build()
            .unwrap();

        assert_eq!(config.base_url, "https://gitlab.example.com/api/v4");
        assert_eq!(config.private_token, "test-token");
        assert_eq!(config.request.timeout, Duration::from_secs(5));
        assert_eq!(config.request.user_agent, "hook-sync/1.0");
        assert!(config.debug.log_responses);
    }

    #[test]
    fn test_builder_requires_fields() {
        assert!(ClientConfig::builder().private_token("t").build().is_err());
        assert!(ClientConfig::builder().base_url("https://gitlab.com").build().is_err());
    }

    #[test]
    fn test_config_validation() {
        // Valid config
        let config = ClientConfig::new("https://gitlab.com/api/v4", "token");
        assert!(config.validate().is_ok());

        // Empty base URL
        let config = ClientConfig::new("", "token");
        assert!(config.validate().is_err());

        // Empty token
        let config = ClientConfig::new("https://gitlab.com/api/v4", "");
        assert!(config.validate().is_err());

        // Invalid URL
        let config = ClientConfig::new("not-a-url", "token");
        assert!(config.validate().is_err());

        // Zero timeout
        let config = ClientConfig::new("https://gitlab.com/api/v4", "token").with_request(
            RequestConfig { timeout: Duration::ZERO, ..Default::default() },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_glim_config() {
        let glim_config = GlimConfig {
            gitlab_url: "https://gitlab.example.com/api/v4".into(),
            gitlab_token: "test-token".into(),
            log_level: Some("debug".into()),
        };

        let client_config = ClientConfig::from(glim_config);
        assert_eq!(client_config.base_url, "https://gitlab.example.com/api/v4");
        assert_eq!(client_config.private_token, "test-token");
        assert!(!client_config.debug.log_responses);
    }
}
