use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::GeocoderConfig;
use crate::error::GeocodingError;
use crate::types::GeocodeResult;

const DEFAULT_USER_AGENT: &str = "google-geocoding-rs/0.1";

/// Forward geocoding client for the Google Geocoding API.
///
/// Each call to [`geocode`](Self::geocode) is one independent request with
/// no caching, rate limiting or retries.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    config: GeocoderConfig,
}

impl GoogleGeocoder {
    /// Create a geocoder from explicit settings
    pub fn new(config: GeocoderConfig) -> crate::Result<Self> {
        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for geocoding requests");
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a geocoder configured from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::new(GeocoderConfig::from_env())
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// The request URL for `address`. Includes `key=` only when an API key
    /// is configured.
    pub fn request_url(&self, address: &str) -> String {
        let mut url = format!(
            "{}?address={}&sensor=false",
            self.config.base_url,
            urlencoding::encode(address)
        );
        if let Some(key) = self.config.effective_api_key() {
            url.push_str(&format!("&key={}", urlencoding::encode(key)));
        }
        url
    }

    /// Geocode an address, using the first result the service returns
    pub async fn geocode(&self, address: &str) -> crate::Result<GeocodeResult> {
        if address.trim().is_empty() {
            return Err(GeocodingError::EmptyAddress);
        }

        // The URL is not logged since it may carry the API key
        debug!(address, "Requesting geocode");

        let response = self
            .client
            .get(self.request_url(address))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let raw = decode_body(status, &body)?;

        let result = match GeocodeResult::from_response(raw) {
            Ok(result) => result,
            Err(err) => {
                warn!(
                    address,
                    status = err.status().unwrap_or("<none>"),
                    "Geocoding service rejected request"
                );
                return Err(err);
            }
        };

        info!(
            "Geocoded \"{}\" => \"{}\"",
            address,
            result.formatted_address().unwrap_or_default()
        );

        Ok(result)
    }
}

/// Decode a response body; an empty body decodes to `null`
fn decode_body(status: StatusCode, body: &[u8]) -> crate::Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(GeocodingError::UnexpectedStatus(status.as_u16())),
        Err(err) => Err(err.into()),
    }
}
