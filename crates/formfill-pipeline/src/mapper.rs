//! Field Mapper
//!
//! Pure derivation of the fill table: for every locator -> data-key pair in
//! the form mapping, look the key up in the consolidated record and coerce the
//! value to text. Missing, null, and empty values are omitted; a key the model
//! did not emit is expected, not an error.

use formfill_domain::{ConsolidatedRecord, FillTable, FormMapping};
use serde_json::Value;
use tracing::{debug, warn};

/// Build the locator -> value table for one form.
///
/// Pure function with no hidden state: identical inputs yield identical
/// output. A value that cannot be coerced to text drops that locator only.
pub fn build_fill_table(consolidated: &ConsolidatedRecord, mapping: &FormMapping) -> FillTable {
    let mut table = FillTable::new();
    for (locator, data_key) in mapping.fields() {
        match consolidated.get(data_key) {
            None | Some(Value::Null) => {
                debug!(%locator, %data_key, "no value in consolidated data, leaving field empty");
            }
            Some(value) => match coerce_to_text(value) {
                Some(text) if !text.is_empty() => {
                    debug!(%locator, %data_key, "mapped consolidated value to form field");
                    table.insert(locator.clone(), text);
                }
                Some(_) => {
                    debug!(%locator, %data_key, "value is empty, leaving field empty");
                }
                None => {
                    warn!(%locator, %data_key, "value is not a scalar, skipping field");
                }
            },
        }
    }
    table
}

/// String representation of a scalar JSON value; `None` for anything that has
/// no sensible single-field rendering.
fn coerce_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::json;

    fn mapping(pairs: &[(&str, &str)]) -> FormMapping {
        let fields: IndexMap<String, String> = pairs
            .iter()
            .map(|(locator, key)| (locator.to_string(), key.to_string()))
            .collect();
        FormMapping::new("http://example.test/form", fields)
    }

    fn record(pairs: Vec<(&str, Value)>) -> ConsolidatedRecord {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    #[test]
    fn test_output_is_exact_present_nonnull_nonempty_subset() {
        let consolidated = record(vec![
            ("amount", json!("42.00")),
            ("currency", Value::Null),
            ("memo", json!("")),
        ]);
        let mapping = mapping(&[
            ("#amt", "amount"),
            ("#cur", "currency"),
            ("#ref", "reference"),
            ("#memo", "memo"),
        ]);

        let table = build_fill_table(&consolidated, &mapping);
        let locators: Vec<&str> = table.locators().collect();
        assert_eq!(locators, vec!["#amt"]);
        assert_eq!(table.get("#amt"), Some("42.00"));
    }

    #[test]
    fn test_numbers_and_booleans_render_as_text() {
        let consolidated = record(vec![("count", json!(7)), ("approved", json!(true))]);
        let mapping = mapping(&[("#count", "count"), ("#ok", "approved")]);

        let table = build_fill_table(&consolidated, &mapping);
        assert_eq!(table.get("#count"), Some("7"));
        assert_eq!(table.get("#ok"), Some("true"));
    }

    #[test]
    fn test_strings_render_without_json_quoting() {
        let consolidated = record(vec![("name", json!("Ada Lovelace"))]);
        let table = build_fill_table(&consolidated, &mapping(&[("#name", "name")]));
        assert_eq!(table.get("#name"), Some("Ada Lovelace"));
    }

    #[test]
    fn test_composite_values_drop_their_locator_only() {
        let consolidated = record(vec![
            ("tags", json!(["a", "b"])),
            ("amount", json!("42.00")),
        ]);
        let mapping = mapping(&[("#tags", "tags"), ("#amt", "amount")]);

        let table = build_fill_table(&consolidated, &mapping);
        assert_eq!(table.get("#tags"), None);
        assert_eq!(table.get("#amt"), Some("42.00"));
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let consolidated = record(vec![("amount", json!("42.00"))]);
        let mapping = mapping(&[("#amt", "amount")]);

        let first = build_fill_table(&consolidated, &mapping);
        let second = build_fill_table(&consolidated, &mapping);
        assert_eq!(first, second);
    }

    #[test]
    fn test_table_order_follows_mapping_order() {
        let consolidated = record(vec![("b", json!("2")), ("a", json!("1"))]);
        let mapping = mapping(&[("#a", "a"), ("#b", "b")]);

        let table = build_fill_table(&consolidated, &mapping);
        let locators: Vec<&str> = table.locators().collect();
        assert_eq!(locators, vec!["#a", "#b"]);
    }
}
