use std::fmt;
use std::time::Duration;

/// Google Geocoding API JSON endpoint
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
const BASE_URL_VAR: &str = "GOOGLE_GEOCODING_BASE_URL";
const TIMEOUT_VAR: &str = "GOOGLE_GEOCODING_TIMEOUT_SECS";
const ACCEPT_INVALID_CERTS_VAR: &str = "GOOGLE_GEOCODING_ACCEPT_INVALID_CERTS";

/// Settings for [`GoogleGeocoder`](crate::GoogleGeocoder)
#[derive(Clone)]
pub struct GeocoderConfig {
    /// Full endpoint URL, without query string
    pub base_url: String,
    /// Sent as `key=` only when present and non-empty
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Disables TLS certificate verification. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
}

impl GeocoderConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = lookup(TIMEOUT_VAR)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let accept_invalid_certs = lookup(ACCEPT_INVALID_CERTS_VAR)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Self {
            base_url,
            api_key: lookup(API_KEY_VAR),
            timeout: Duration::from_secs(timeout_secs),
            accept_invalid_certs,
        }
        .normalized()
    }

    /// Use a different endpoint, e.g. a proxy or a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.normalized()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API key to send, if any
    pub(crate) fn effective_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    fn normalized(mut self) -> Self {
        if self.api_key.as_deref().is_some_and(str::is_empty) {
            self.api_key = None;
        }
        self
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for GeocoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}
