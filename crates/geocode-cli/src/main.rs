//! geocode - look up a postal address with the Google Geocoding API
//!
//! Prints the flattened address fields of the best match, or the result as
//! JSON with `--json`.

mod error;

use clap::Parser;
use google_geocoding::{AddressField, GeocodeResult, GeocoderConfig, GoogleGeocoder};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::error::Result;

#[derive(Debug, Parser)]
#[command(name = "geocode", about = "Geocode a postal address")]
struct Args {
    /// Address to geocode; separate words are joined with spaces
    #[arg(required = true)]
    address: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Google Maps API key
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging()?;

    let mut config = GeocoderConfig::from_env();
    if let Some(key) = args.api_key {
        config = config.with_api_key(key);
    }
    info!(base_url = %config.base_url, "Geocoder configured");

    let geocoder = GoogleGeocoder::new(config)?;
    let address = args.address.join(" ");
    let result = geocoder.geocode(&address).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_plain(&result));
    }

    Ok(())
}

/// Install the global tracing subscriber. Called once at startup.
fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("geocode_cli=info".parse()?)
        .add_directive("google_geocoding=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    Ok(())
}

/// One `name: value` line per populated field
fn render_plain(result: &GeocodeResult) -> String {
    let mut out = String::new();
    for field in AddressField::ALL {
        if let Some(value) = result.get(field) {
            out.push_str(&format!("{}: {}\n", field, value));
        }
    }
    out.push_str(&format!("exact_match: {}\n", result.is_exact_match()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_args_are_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_address_words_are_collected() {
        let args = Args::try_parse_from(["geocode", "--json", "10", "Downing", "St"]).unwrap();
        assert!(args.json);
        assert_eq!(args.address.join(" "), "10 Downing St");
    }

    #[test]
    fn test_address_is_required() {
        assert!(Args::try_parse_from(["geocode"]).is_err());
    }

    #[test]
    fn test_render_plain_skips_missing_fields() {
        let result = GeocodeResult::from_response(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Berlin, Germany",
                "partial_match": true,
                "geometry": { "location": { "lat": 52.52, "lng": 13.405 } },
                "address_components": [
                    { "long_name": "Berlin", "short_name": "Berlin", "types": ["locality", "political"] },
                    { "long_name": "Germany", "short_name": "DE", "types": ["country", "political"] }
                ]
            }]
        }))
        .unwrap();

        assert_eq!(
            render_plain(&result),
            "city: Berlin\n\
             country_long_name: Germany\n\
             country_short_name: DE\n\
             lat: 52.52\n\
             lng: 13.405\n\
             formatted_address: Berlin, Germany\n\
             formatted_street_address:  \n\
             exact_match: false\n"
        );
    }
}
