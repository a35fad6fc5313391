//! Field extraction rules for the first entry of a geocode response

use serde_json::Value;

use crate::types::{AddressField, FieldValue, NameForm};

/// How a field is read from a result entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Rule {
    /// String at a JSON pointer relative to the result entry
    Text(&'static str),
    /// Number at a JSON pointer relative to the result entry
    Coordinate(&'static str),
    /// Name of the first address component carrying one of `types`,
    /// tried in order
    Component {
        types: &'static [&'static str],
        form: NameForm,
    },
    /// `street_number` and `route` long names joined by a space
    StreetAddress,
}

pub(crate) fn rule(field: AddressField) -> Rule {
    use NameForm::{Long, Short};

    match field {
        AddressField::Lat => Rule::Coordinate("/geometry/location/lat"),
        AddressField::Lng => Rule::Coordinate("/geometry/location/lng"),
        AddressField::FormattedAddress => Rule::Text("/formatted_address"),
        AddressField::FormattedStreetAddress => Rule::StreetAddress,
        AddressField::PostalCode => component(&["postal_code"], Long),
        AddressField::City => component(&["sublocality", "locality"], Long),
        AddressField::County => component(&["administrative_area_level_2"], Long),
        AddressField::StateLongName => component(&["administrative_area_level_1"], Long),
        AddressField::StateShortName => component(&["administrative_area_level_1"], Short),
        AddressField::CountryLongName => component(&["country"], Long),
        AddressField::CountryShortName => component(&["country"], Short),
    }
}

fn component(types: &'static [&'static str], form: NameForm) -> Rule {
    Rule::Component { types, form }
}

/// Apply a field's rule to a result entry
pub(crate) fn extract(field: AddressField, result: &Value) -> Option<FieldValue> {
    match rule(field) {
        Rule::Text(pointer) => result
            .pointer(pointer)
            .and_then(Value::as_str)
            .map(|s| FieldValue::Text(s.to_string())),
        Rule::Coordinate(pointer) => result
            .pointer(pointer)
            .and_then(Value::as_f64)
            .map(FieldValue::Coordinate),
        Rule::Component { types, form } => types
            .iter()
            .find_map(|type_tag| component_name(result, type_tag, form))
            .map(|s| FieldValue::Text(s.to_string())),
        Rule::StreetAddress => Some(FieldValue::Text(street_address(result))),
    }
}

/// Only a literal `true` counts as a partial match
pub(crate) fn is_partial_match(result: &Value) -> bool {
    result.get("partial_match").and_then(Value::as_bool) == Some(true)
}

/// Name of the first address component whose `types` contains `type_tag`
pub(crate) fn component_name<'a>(
    result: &'a Value,
    type_tag: &str,
    form: NameForm,
) -> Option<&'a str> {
    result
        .get("address_components")?
        .as_array()?
        .iter()
        .find(|component| has_type(component, type_tag))?
        .get(form.key())?
        .as_str()
}

fn has_type(component: &Value, type_tag: &str) -> bool {
    component
        .get("types")
        .and_then(Value::as_array)
        .is_some_and(|types| types.iter().any(|t| t.as_str() == Some(type_tag)))
}

// A missing half renders as empty, so "1600 ", " Main St" or " " are possible.
fn street_address(result: &Value) -> String {
    let number = component_name(result, "street_number", NameForm::Long);
    let route = component_name(result, "route", NameForm::Long);
    format!(
        "{} {}",
        number.unwrap_or_default(),
        route.unwrap_or_default()
    )
}
