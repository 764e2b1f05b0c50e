use std::time::Duration;

/// Base URL of the public Pwned Passwords API.
pub const DEFAULT_API_URL: &str = "https://api.pwnedpasswords.com";

/// Client name reported in the `User-Agent` header by default.
pub const DEFAULT_CLIENT_NAME: &str = "Rust";

/// Environment variable the CLI reads to override [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "PWNED_PASSWORDS_API_URL";

/// Settings for a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Sent as `User-Agent: pwnedpasswords (<client_name>)`.
    pub client_name: String,
    /// Applied to each request individually.
    pub timeout: Option<Duration>,
    /// Ask the service to pad range responses with zero-count entries.
    pub add_padding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            timeout: None,
            add_padding: false,
        }
    }
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_padding(mut self, add_padding: bool) -> Self {
        self.add_padding = add_padding;
        self
    }

    pub fn user_agent(&self) -> String {
        format!("pwnedpasswords ({})", self.client_name)
    }
}
