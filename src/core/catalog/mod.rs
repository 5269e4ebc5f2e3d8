//! Per-locale key→text catalogs.
//!
//! A [`LocaleCatalog`] is an unordered mapping; ordering only matters when it is
//! persisted, where [`key_order`] keeps the file stable across runs so diffs stay
//! small. The same order decides which key of a duplicate group is canonical.

mod store;

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};

use serde_json::{Map, Value};

pub use store::CatalogStore;

/// Total order over keys: shorter first, then case-insensitive, then raw bytes.
///
/// The final raw comparison only breaks ties between keys differing in case,
/// e.g. `"Save"` and `"save"`, so the order is deterministic.
pub fn key_order(a: &str, b: &str) -> Ordering {
    a.chars()
        .count()
        .cmp(&b.chars().count())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Serialize a flat string map as pretty JSON in [`key_order`], with a trailing newline.
pub(crate) fn render_flat<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut sorted: Vec<(&str, &str)> = entries.into_iter().collect();
    sorted.sort_by(|a, b| key_order(a.0, b.0));

    let mut map = Map::new();
    for (key, text) in sorted {
        map.insert(key.to_string(), Value::String(text.to_string()));
    }

    // Serializing a map of strings cannot fail
    let body = serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default();
    format!("{}\n", body)
}

/// Parse a flat JSON object whose values are all strings.
///
/// Returns the reason as a plain message on failure; callers wrap it into the
/// error variant matching the artifact being read.
pub(crate) fn parse_flat(content: &str) -> Result<Vec<(String, String)>, String> {
    let value: Value = serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;
    let Value::Object(map) = value else {
        return Err("root is not a JSON object".to_string());
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        if key.is_empty() {
            return Err("contains an empty key".to_string());
        }
        match value {
            Value::String(text) => entries.push((key, text)),
            other => {
                return Err(format!(
                    "value of \"{}\" is {}, expected a string",
                    key,
                    json_kind(&other)
                ));
            }
        }
    }
    Ok(entries)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a nested object",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCatalog {
    locale: String,
    entries: HashMap<String, String>,
}

impl LocaleCatalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    pub fn from_entries<K, V, I>(locale: impl Into<String>, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut catalog = Self::new(locale);
        for (key, text) in entries {
            catalog.insert(key, text);
        }
        catalog
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite a key, returning the previous text.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), text.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn key_set(&self) -> HashSet<&str> {
        self.keys().collect()
    }

    /// Keys in persisted order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_by(|a, b| key_order(a, b));
        keys
    }

    /// Persisted JSON form (deterministic key order).
    pub fn to_json(&self) -> String {
        render_flat(self.iter())
    }
}

/// The base catalog plus every dependent catalog of one project.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    pub base: LocaleCatalog,
    pub dependents: Vec<LocaleCatalog>,
}

impl CatalogSet {
    pub fn new(base: LocaleCatalog, dependents: Vec<LocaleCatalog>) -> Self {
        Self { base, dependents }
    }

    pub fn base_locale(&self) -> &str {
        self.base.locale()
    }

    /// All catalogs, base first.
    pub fn iter(&self) -> impl Iterator<Item = &LocaleCatalog> {
        std::iter::once(&self.base).chain(self.dependents.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LocaleCatalog> {
        std::iter::once(&mut self.base).chain(self.dependents.iter_mut())
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleCatalog> {
        self.iter().find(|c| c.locale() == locale)
    }

    pub fn get_mut(&mut self, locale: &str) -> Option<&mut LocaleCatalog> {
        self.iter_mut().find(|c| c.locale() == locale)
    }

    pub fn locales(&self) -> Vec<&str> {
        self.iter().map(LocaleCatalog::locale).collect()
    }

    /// Union of the key sets of every catalog.
    pub fn declared_keys(&self) -> HashSet<String> {
        self.iter()
            .flat_map(|c| c.keys().map(str::to_string))
            .collect()
    }
}
