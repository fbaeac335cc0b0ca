//! Public configuration for the tracker and catalog clients.

use std::time::Duration;

/// Browser-like user agent; the tracker rejects obvious bots.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the tracker site client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tvsub_tracker::TrackerClientConfig;
///
/// let config = TrackerClientConfig::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_cookie("c_secure_uid=1");
/// ```
#[derive(Debug, Clone)]
pub struct TrackerClientConfig {
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Session cookie sent with artifact downloads
    pub(crate) cookie: Option<String>,
}

impl Default for TrackerClientConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            cookie: None,
        }
    }
}

impl TrackerClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
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

    /// Send `cookie` with artifact downloads. Blank values are ignored.
    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        self.cookie = (!cookie.trim().is_empty()).then_some(cookie);
        self
    }
}

/// Configuration for the Douban catalog client.
#[derive(Debug, Clone)]
pub struct DoubanClientConfig {
    /// Base URL of the Douban movie site
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl Default for DoubanClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://movie.douban.com".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl DoubanClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    ///
    /// Defaults to `https://movie.douban.com`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
