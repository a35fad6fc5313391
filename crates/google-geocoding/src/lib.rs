//! Google Geocoding API Client
//!
//! Geocodes a postal address against the
//! [Google Geocoding API](https://developers.google.com/maps/documentation/geocoding)
//! and flattens the first result into a small set of typed address fields.
//!
//! # Example
//!
//! ```no_run
//! use google_geocoding::GoogleGeocoder;
//!
//! # async fn example() -> Result<(), google_geocoding::GeocodingError> {
//! let geocoder = GoogleGeocoder::from_env()?;
//! let result = geocoder.geocode("1600 Pennsylvania Ave, Washington DC").await?;
//! println!("{:?} ({:?})", result.formatted_address(), result.coordinates());
//! if !result.is_exact_match() {
//!     println!("partial match only");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod extract;
mod types;

pub use client::GoogleGeocoder;
pub use config::{GeocoderConfig, DEFAULT_BASE_URL};
pub use error::{GeocodingError, Result};
pub use types::{AddressField, FieldValue, GeocodeResult, NameForm, STATUS_OK};
