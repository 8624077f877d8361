//! Public configuration for the HTTP inference client.

use std::time::Duration;

/// Configuration for [`HttpInferenceClient`](crate::HttpInferenceClient).
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use llamapocket_infer::InferenceClientConfig;
/// use std::time::Duration;
///
/// let config = InferenceClientConfig::new()
///     .with_base_url("http://192.168.1.20:8000")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct InferenceClientConfig {
    /// Root URL of the generation server.
    pub(crate) base_url: String,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors.
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff.
    pub(crate) retry_base_delay: Duration,
}

impl Default for InferenceClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl InferenceClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root URL of the generation server.
    ///
    /// Defaults to `http://localhost:8000`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 3 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InferenceClientConfig::new();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_builder_pattern() {
        let config = InferenceClientConfig::new()
            .with_base_url("http://10.0.0.5:9000")
            .with_timeout(Duration::from_secs(60))
            .with_max_retries(1)
            .with_retry_delay(Duration::from_millis(100));

        assert_eq!(config.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.retry_base_delay, Duration::from_millis(100));
    }
}
