//! Error types for the geocode CLI

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Geocoding(google_geocoding::GeocodingError),
    Output(serde_json::Error),
    Config(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Geocoding(err) => write!(f, "Geocoding error: {}", err),
            CliError::Output(err) => write!(f, "Output error: {}", err),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Geocoding(err) => Some(err),
            CliError::Output(err) => Some(err),
            CliError::Config(_) => None,
        }
    }
}

impl From<google_geocoding::GeocodingError> for CliError {
    fn from(err: google_geocoding::GeocodingError) -> Self {
        CliError::Geocoding(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for CliError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        CliError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
