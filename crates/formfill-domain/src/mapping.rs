//! Form mapping configuration and the derived fill table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving a form mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The requested form name has no entry in the mapping configuration.
    #[error("no form mapping found for '{0}'")]
    UnknownForm(String),

    /// The form entry exists but carries no `url`.
    #[error("form mapping '{0}' has no url entry")]
    MissingUrl(String),
}

/// The mapping for one target form: where to navigate and which consolidated
/// data key feeds each element locator.
///
/// Read-only during a run. Field iteration order is the configuration file
/// order, which is also the order fields are filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMapping {
    url: String,
    fields: IndexMap<String, String>,
}

impl FormMapping {
    /// Create a mapping from a url and locator -> data-key pairs.
    pub fn new(url: impl Into<String>, fields: IndexMap<String, String>) -> Self {
        Self {
            url: url.into(),
            fields,
        }
    }

    /// Page the form lives on.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Locator -> data-key pairs in configuration order.
    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    /// Locator of the first mapped field, used as the page-ready probe.
    pub fn first_locator(&self) -> Option<&str> {
        self.fields.keys().next().map(String::as_str)
    }
}

/// All configured form mappings, keyed by form name.
///
/// Deserialized straight from the mapping configuration file: each form is a
/// table holding a `url` entry plus locator -> data-key pairs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormMappingSet {
    forms: IndexMap<String, IndexMap<String, String>>,
}

impl FormMappingSet {
    /// Resolve a form name into its mapping.
    ///
    /// The `url` entry is split out and never treated as a field.
    pub fn resolve(&self, name: &str) -> Result<FormMapping, MappingError> {
        let table = self
            .forms
            .get(name)
            .ok_or_else(|| MappingError::UnknownForm(name.to_string()))?;
        let url = table
            .get("url")
            .cloned()
            .ok_or_else(|| MappingError::MissingUrl(name.to_string()))?;
        let fields = table
            .iter()
            .filter(|(key, _)| key.as_str() != "url")
            .map(|(locator, data_key)| (locator.clone(), data_key.clone()))
            .collect();
        Ok(FormMapping::new(url, fields))
    }

    /// Names of all configured forms.
    pub fn form_names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }
}

impl From<IndexMap<String, IndexMap<String, String>>> for FormMappingSet {
    fn from(forms: IndexMap<String, IndexMap<String, String>>) -> Self {
        Self { forms }
    }
}

/// Final locator -> string-value table, ready for element-by-element
/// application to a live page.
///
/// Entries whose data key was missing, null, or empty in the consolidated
/// record are omitted, never written as empty strings. Built fresh per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillTable(IndexMap<String, String>);

impl FillTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a locator -> value entry.
    pub fn insert(&mut self, locator: impl Into<String>, value: impl Into<String>) {
        self.0.insert(locator.into(), value.into());
    }

    /// Look up the value for a locator.
    pub fn get(&self, locator: &str) -> Option<&str> {
        self.0.get(locator).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over locator/value pairs in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Locators with a value, in mapping order.
    pub fn locators(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for FillTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
