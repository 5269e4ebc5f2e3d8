use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::catalog::CatalogSet;

/// Locale → key → text, as read from a bulk-insert file.
pub type EntryBatch = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddReport {
    /// Locale → keys that did not exist before.
    pub added: BTreeMap<String, Vec<String>>,
    /// Locale → existing keys whose text was replaced.
    pub updated: BTreeMap<String, Vec<String>>,
    /// Locales of the batch without a catalog; skipped.
    pub unknown_locales: Vec<String>,
    /// Locales whose batch entries included an empty key; that entry is skipped.
    pub empty_keys: Vec<String>,
}

impl AddReport {
    pub fn changed_locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self
            .added
            .keys()
            .chain(self.updated.keys())
            .map(String::as_str)
            .collect();
        locales.sort();
        locales.dedup();
        locales
    }

    pub fn total(&self) -> usize {
        self.added.values().chain(self.updated.values()).map(Vec::len).sum()
    }
}

/// Insert or overwrite entries in the matching catalogs.
///
/// Writing the same text a key already has is not a change.
pub fn add_entries(catalogs: &mut CatalogSet, batch: &EntryBatch) -> AddReport {
    let mut report = AddReport::default();

    for (locale, entries) in batch {
        let Some(catalog) = catalogs.get_mut(locale) else {
            tracing::warn!(event = "add_unknown_locale", locale = locale.as_str());
            report.unknown_locales.push(locale.clone());
            continue;
        };

        for (key, text) in entries {
            if key.is_empty() {
                tracing::warn!(event = "add_empty_key", locale = locale.as_str());
                report.empty_keys.push(locale.clone());
                continue;
            }
            match catalog.insert(key.as_str(), text.as_str()) {
                None => report.added.entry(locale.clone()).or_default().push(key.clone()),
                Some(previous) if previous != *text => report
                    .updated
                    .entry(locale.clone())
                    .or_default()
                    .push(key.clone()),
                Some(_) => {}
            }
        }
    }

    tracing::info!(event = "add_complete", entries = report.total());
    report
}
