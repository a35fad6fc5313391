use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{GeocodingError, Result};
use crate::extract;

/// The only `status` value the service uses for success
pub const STATUS_OK: &str = "OK";

/// Which name of an address component to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameForm {
    Long,
    Short,
}

impl NameForm {
    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::Long => "long_name",
            Self::Short => "short_name",
        }
    }
}

/// The scalar fields extracted from a geocode response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    City,
    County,
    StateLongName,
    StateShortName,
    CountryLongName,
    CountryShortName,
    PostalCode,
    Lat,
    Lng,
    FormattedAddress,
    FormattedStreetAddress,
}

impl AddressField {
    pub const ALL: [AddressField; 11] = [
        AddressField::City,
        AddressField::County,
        AddressField::StateLongName,
        AddressField::StateShortName,
        AddressField::CountryLongName,
        AddressField::CountryShortName,
        AddressField::PostalCode,
        AddressField::Lat,
        AddressField::Lng,
        AddressField::FormattedAddress,
        AddressField::FormattedStreetAddress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::County => "county",
            Self::StateLongName => "state_long_name",
            Self::StateShortName => "state_short_name",
            Self::CountryLongName => "country_long_name",
            Self::CountryShortName => "country_short_name",
            Self::PostalCode => "postal_code",
            Self::Lat => "lat",
            Self::Lng => "lng",
            Self::FormattedAddress => "formatted_address",
            Self::FormattedStreetAddress => "formatted_street_address",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single extracted field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Coordinate(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Coordinate(_) => None,
        }
    }

    pub fn as_coordinate(&self) -> Option<f64> {
        match self {
            Self::Coordinate(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Coordinate(v) => write!(f, "{v}"),
        }
    }
}

/// Address fields taken from the first result of a successful geocode.
///
/// Values are immutable once built. Every field is optional; a component
/// missing from the response leaves only that field empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    city: Option<String>,
    county: Option<String>,
    state_long_name: Option<String>,
    state_short_name: Option<String>,
    country_long_name: Option<String>,
    country_short_name: Option<String>,
    postal_code: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    formatted_address: Option<String>,
    formatted_street_address: Option<String>,
    partial_match: bool,
    #[serde(skip)]
    raw_response: Value,
}

impl GeocodeResult {
    /// Build a result from an already decoded service response.
    ///
    /// Fails with [`GeocodingError::Rejected`] if the response is empty or
    /// its `status` is not exactly `"OK"`.
    pub fn from_response(raw_response: Value) -> Result<Self> {
        if !is_success(&raw_response) {
            return Err(GeocodingError::rejected(raw_response));
        }

        let mut result = Self {
            city: None,
            county: None,
            state_long_name: None,
            state_short_name: None,
            country_long_name: None,
            country_short_name: None,
            postal_code: None,
            lat: None,
            lng: None,
            formatted_address: None,
            formatted_street_address: None,
            partial_match: false,
            raw_response: Value::Null,
        };

        if let Some(first) = raw_response.pointer("/results/0") {
            for field in AddressField::ALL {
                result.set(field, extract::extract(field, first));
            }
            result.partial_match = extract::is_partial_match(first);
        }

        result.raw_response = raw_response;
        Ok(result)
    }

    fn set(&mut self, field: AddressField, value: Option<FieldValue>) {
        let text = || value.as_ref().and_then(FieldValue::as_text).map(str::to_string);
        match field {
            AddressField::City => self.city = text(),
            AddressField::County => self.county = text(),
            AddressField::StateLongName => self.state_long_name = text(),
            AddressField::StateShortName => self.state_short_name = text(),
            AddressField::CountryLongName => self.country_long_name = text(),
            AddressField::CountryShortName => self.country_short_name = text(),
            AddressField::PostalCode => self.postal_code = text(),
            AddressField::FormattedAddress => self.formatted_address = text(),
            AddressField::FormattedStreetAddress => self.formatted_street_address = text(),
            AddressField::Lat => self.lat = value.as_ref().and_then(FieldValue::as_coordinate),
            AddressField::Lng => self.lng = value.as_ref().and_then(FieldValue::as_coordinate),
        }
    }

    /// Look up a field by name
    pub fn get(&self, field: AddressField) -> Option<FieldValue> {
        let text = |v: &Option<String>| v.clone().map(FieldValue::Text);
        match field {
            AddressField::City => text(&self.city),
            AddressField::County => text(&self.county),
            AddressField::StateLongName => text(&self.state_long_name),
            AddressField::StateShortName => text(&self.state_short_name),
            AddressField::CountryLongName => text(&self.country_long_name),
            AddressField::CountryShortName => text(&self.country_short_name),
            AddressField::PostalCode => text(&self.postal_code),
            AddressField::FormattedAddress => text(&self.formatted_address),
            AddressField::FormattedStreetAddress => text(&self.formatted_street_address),
            AddressField::Lat => self.lat.map(FieldValue::Coordinate),
            AddressField::Lng => self.lng.map(FieldValue::Coordinate),
        }
    }

    /// True unless the service flagged the first result as a partial match
    pub fn is_exact_match(&self) -> bool {
        !self.partial_match
    }

    pub fn partial_match(&self) -> bool {
        self.partial_match
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn county(&self) -> Option<&str> {
        self.county.as_deref()
    }

    pub fn state_long_name(&self) -> Option<&str> {
        self.state_long_name.as_deref()
    }

    pub fn state_short_name(&self) -> Option<&str> {
        self.state_short_name.as_deref()
    }

    pub fn country_long_name(&self) -> Option<&str> {
        self.country_long_name.as_deref()
    }

    pub fn country_short_name(&self) -> Option<&str> {
        self.country_short_name.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn lat(&self) -> Option<f64> {
        self.lat
    }

    pub fn lng(&self) -> Option<f64> {
        self.lng
    }

    /// `(lat, lng)` when both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lng?))
    }

    pub fn formatted_address(&self) -> Option<&str> {
        self.formatted_address.as_deref()
    }

    pub fn formatted_street_address(&self) -> Option<&str> {
        self.formatted_street_address.as_deref()
    }

    /// The full decoded response this result was built from
    pub fn raw_response(&self) -> &Value {
        &self.raw_response
    }
}

fn is_success(response: &Value) -> bool {
    let non_empty = match response {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    };
    non_empty && response.get("status").and_then(Value::as_str) == Some(STATUS_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn white_house() -> Value {
        json!({
            "status": "OK",
            "results": [{
                "formatted_address": "1600 Pennsylvania Avenue NW, Washington, DC 20500, USA",
                "geometry": { "location": { "lat": 38.8976763, "lng": -77.0365298 } },
                "address_components": [
                    { "long_name": "1600", "short_name": "1600", "types": ["street_number"] },
                    { "long_name": "Pennsylvania Avenue Northwest", "short_name": "Pennsylvania Avenue NW", "types": ["route"] },
                    { "long_name": "Northwest Washington", "short_name": "Northwest Washington", "types": ["neighborhood", "political"] },
                    { "long_name": "Washington", "short_name": "Washington", "types": ["locality", "political"] },
                    { "long_name": "District of Columbia", "short_name": "District of Columbia", "types": ["administrative_area_level_2", "political"] },
                    { "long_name": "District of Columbia", "short_name": "DC", "types": ["administrative_area_level_1", "political"] },
                    { "long_name": "United States", "short_name": "US", "types": ["country", "political"] },
                    { "long_name": "20500", "short_name": "20500", "types": ["postal_code"] }
                ]
            }]
        })
    }

    #[test]
    fn test_extracts_all_fields() {
        let result = GeocodeResult::from_response(white_house()).unwrap();

        assert_eq!(
            result.formatted_address(),
            Some("1600 Pennsylvania Avenue NW, Washington, DC 20500, USA")
        );
        assert_eq!(result.lat(), Some(38.8976763));
        assert_eq!(result.lng(), Some(-77.0365298));
        assert_eq!(
            result.formatted_street_address(),
            Some("1600 Pennsylvania Avenue Northwest")
        );
        assert_eq!(result.city(), Some("Washington"));
        assert_eq!(result.county(), Some("District of Columbia"));
        assert_eq!(result.state_long_name(), Some("District of Columbia"));
        assert_eq!(result.state_short_name(), Some("DC"));
        assert_eq!(result.country_long_name(), Some("United States"));
        assert_eq!(result.country_short_name(), Some("US"));
        assert_eq!(result.postal_code(), Some("20500"));
        assert!(result.is_exact_match());
        assert_eq!(result.raw_response(), &white_house());
    }

    #[test]
    fn test_zero_results_is_rejected() {
        let raw = json!({"status": "ZERO_RESULTS", "results": []});
        let err = GeocodeResult::from_response(raw.clone()).unwrap_err();
        assert_eq!(err.status(), Some("ZERO_RESULTS"));
        assert_eq!(err.response(), Some(&raw));
    }

    #[test]
    fn test_status_must_be_exactly_ok() {
        for status in ["ok", "OK ", "PARTIAL_OK", ""] {
            let raw = json!({"status": status, "results": []});
            assert!(GeocodeResult::from_response(raw).is_err(), "{status:?}");
        }
        assert!(GeocodeResult::from_response(json!({"results": []})).is_err());
    }

    #[test]
    fn test_empty_responses_are_rejected() {
        for raw in [Value::Null, json!({})] {
            let err = GeocodeResult::from_response(raw).unwrap_err();
            assert_eq!(err.response(), Some(&json!({})));
        }
    }

    #[test]
    fn test_partial_match_polarity() {
        let with_flag = |flag: Value| {
            let mut raw = white_house();
            raw["results"][0]["partial_match"] = flag;
            GeocodeResult::from_response(raw).unwrap()
        };

        assert!(!with_flag(json!(true)).is_exact_match());
        assert!(with_flag(json!(false)).is_exact_match());
        assert!(with_flag(Value::Null).is_exact_match());
        assert!(with_flag(json!("true")).is_exact_match());
    }

    #[test]
    fn test_missing_component_only_clears_that_field() {
        let mut raw = white_house();
        raw["results"][0]["address_components"]
            .as_array_mut()
            .unwrap()
            .retain(|c| c["types"][0] != "postal_code");

        let result = GeocodeResult::from_response(raw).unwrap();
        assert_eq!(result.postal_code(), None);
        assert_eq!(result.city(), Some("Washington"));
        assert_eq!(result.state_short_name(), Some("DC"));
        assert_eq!(result.coordinates(), Some((38.8976763, -77.0365298)));
    }

    #[test]
    fn test_street_address_without_parts_is_blank() {
        let raw = json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Berlin, Germany",
                "address_components": [
                    { "long_name": "Berlin", "short_name": "Berlin", "types": ["locality", "political"] }
                ]
            }]
        });

        let result = GeocodeResult::from_response(raw).unwrap();
        assert_eq!(result.formatted_street_address(), Some(" "));
        assert_eq!(result.city(), Some("Berlin"));
    }

    #[test]
    fn test_only_first_result_is_used() {
        let mut raw = white_house();
        raw["results"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "formatted_address": "Somewhere else", "partial_match": true }));

        let result = GeocodeResult::from_response(raw).unwrap();
        assert_eq!(
            result.formatted_address(),
            Some("1600 Pennsylvania Avenue NW, Washington, DC 20500, USA")
        );
        assert!(result.is_exact_match());
    }

    #[test]
    fn test_ok_without_results_has_empty_fields() {
        let result = GeocodeResult::from_response(json!({"status": "OK"})).unwrap();
        for field in AddressField::ALL {
            assert_eq!(result.get(field), None, "{field}");
        }
        assert!(result.is_exact_match());
    }

    #[test]
    fn test_same_input_same_result() {
        let a = GeocodeResult::from_response(white_house()).unwrap();
        let b = GeocodeResult::from_response(white_house()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_get_matches_accessors() {
        let result = GeocodeResult::from_response(white_house()).unwrap();
        assert_eq!(
            result.get(AddressField::StateShortName),
            Some(FieldValue::Text("DC".to_string()))
        );
        assert_eq!(
            result.get(AddressField::Lat),
            Some(FieldValue::Coordinate(38.8976763))
        );
    }

    #[test]
    fn test_serialize_skips_raw_response() {
        let result = GeocodeResult::from_response(white_house()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["postal_code"], "20500");
        assert_eq!(json["partial_match"], false);
        assert!(json.get("raw_response").is_none());
    }
}
