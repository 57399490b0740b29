//! Connector configuration and default values.

/// Production API.
pub const DEFAULT_API_URL: &str = "https://project-kiwi.org/api/";

/// Sandbox API, for testing integrations.
pub const SANDBOX_API_URL: &str = "https://sandbox.project-kiwi.org/api/";

/// Url template of imagery tiles. `{imagery_id}`, `{z}`, `{x}` and `{y}` are substituted.
pub const DEFAULT_TILE_URL_TEMPLATE: &str =
    "https://project-kiwi-tiles.s3.amazonaws.com/{imagery_id}/{z}/{x}/{y}";

/// Highest zoom level imagery is tiled at.
pub const DEFAULT_MAX_ZOOM: u32 = 22;

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "PROJECT_KIWI_API_KEY";

/// Environment variable overriding the API url.
pub const API_URL_ENV_VAR: &str = "PROJECT_KIWI_API_URL";

/// Configuration of a [`Connector`](crate::Connector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// Base url of the API, with a trailing slash. Routes are appended to it.
    pub api_url: String,
    /// API key, sent with every request.
    pub api_key: String,
    /// User agent of the HTTP client.
    pub user_agent: String,
}

impl ConnectorConfig {
    /// Creates a configuration for the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            api_key: api_key.into(),
            user_agent: concat!("projectkiwi/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Reads the configuration from [`API_KEY_ENV_VAR`] and (optionally) [`API_URL_ENV_VAR`].
    ///
    /// Returns `None` if the API key variable is not set.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV_VAR).ok()?;
        let config = Self::new(api_key);
        Some(match std::env::var(API_URL_ENV_VAR) {
            Ok(url) => config.with_api_url(url),
            Err(_) => config,
        })
    }

    /// Sets the base url of the API. A missing trailing slash is added.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        self.api_url = api_url;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn route_url(&self, route: &str) -> String {
        format!("{}{route}", self.api_url)
    }
}
