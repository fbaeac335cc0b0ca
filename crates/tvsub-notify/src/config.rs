//! Public configuration for the webhook notifier.

use std::time::Duration;

/// Configuration for [`crate::WebhookNotifier`].
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Path appended to the server URL
    pub(crate) path: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            path: "/send-message".to_string(),
        }
    }
}

impl WebhookConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the message path on the server. Defaults to `/send-message`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WebhookConfig::new();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.path, "/send-message");
    }

    #[test]
    fn test_path_gets_leading_slash() {
        assert_eq!(WebhookConfig::new().with_path("notify").path, "/notify");
    }
}
