//! Error types for the Google Geocoding client

use std::fmt;

use serde_json::Value;

/// Errors from the geocoder
#[derive(Debug)]
pub enum GeocodingError {
    /// No address was given
    EmptyAddress,
    /// The service answered with an empty body or a status other than `"OK"`.
    /// Holds the decoded response, or an empty object if there was none.
    Rejected { response: Value },
    Http(reqwest::Error),
    Json(serde_json::Error),
    /// Non-2xx HTTP status with a body that is not JSON
    UnexpectedStatus(u16),
}

impl GeocodingError {
    pub(crate) fn rejected(response: Value) -> Self {
        let response = match response {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };
        Self::Rejected { response }
    }

    /// The raw service response carried by a rejection
    pub fn response(&self) -> Option<&Value> {
        match self {
            Self::Rejected { response } => Some(response),
            _ => None,
        }
    }

    /// The service `status` of a rejection, e.g. `"ZERO_RESULTS"`
    pub fn status(&self) -> Option<&str> {
        self.response()?.get("status")?.as_str()
    }
}

impl fmt::Display for GeocodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "Address must not be empty"),
            Self::Rejected { .. } => match self.status() {
                Some(status) => write!(f, "Geocoding failed with status {status}"),
                None => write!(f, "Geocoding failed: empty response"),
            },
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::UnexpectedStatus(code) => {
                write!(f, "Geocoding service returned HTTP status {code}")
            }
        }
    }
}

impl std::error::Error for GeocodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeocodingError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for GeocodingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, GeocodingError>;
