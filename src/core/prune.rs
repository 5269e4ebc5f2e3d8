use std::{collections::BTreeMap, path::Path};

use serde::Serialize;

use crate::{
    core::{
        catalog::{CatalogSet, key_order},
        usage::UsageIndex,
        utils::append_lines,
    },
    error::{PipelineError, PipelineResult},
};

/// One catalog entry dropped by pruning, with the text it held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrunedEntry {
    pub locale: String,
    pub key: String,
    pub text: String,
}

impl PrunedEntry {
    /// `<locale>:<key> | <text as a JSON string>`
    pub fn log_line(&self) -> String {
        let text = serde_json::to_string(&self.text).unwrap_or_else(|_| self.text.clone());
        format!("{}:{} | {}", self.locale, self.key, text)
    }
}

/// What pruning removed, per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// Unused keys in catalog order, across all catalogs.
    pub unused: Vec<String>,
    /// Locale → number of keys removed. Only locales that changed are listed.
    pub removed: BTreeMap<String, usize>,
    /// Every removed entry, catalog by catalog.
    pub entries: Vec<PrunedEntry>,
}

impl PruneReport {
    pub fn changed_locales(&self) -> impl Iterator<Item = &str> {
        self.removed.keys().map(String::as_str)
    }

    pub fn total_removed(&self) -> usize {
        self.removed.values().sum()
    }
}

/// Remove every key no source file references, from every catalog.
///
/// `unused = declared(all catalogs) - used(index)`; base and dependents are
/// treated alike.
pub fn prune(catalogs: &mut CatalogSet, index: &UsageIndex) -> PruneReport {
    let mut unused: Vec<String> = catalogs
        .declared_keys()
        .into_iter()
        .filter(|key| !index.contains(key))
        .collect();
    unused.sort_by(|a, b| key_order(a, b));

    let mut removed = BTreeMap::new();
    let mut entries = Vec::new();
    for catalog in catalogs.iter_mut() {
        let locale = catalog.locale().to_string();
        let before = entries.len();
        for key in &unused {
            if let Some(text) = catalog.remove(key) {
                entries.push(PrunedEntry {
                    locale: locale.clone(),
                    key: key.clone(),
                    text,
                });
            }
        }
        let count = entries.len() - before;
        if count > 0 {
            tracing::debug!(event = "keys_pruned", locale = catalog.locale(), removed = count);
            removed.insert(catalog.locale().to_string(), count);
        }
    }

    tracing::info!(
        event = "prune_complete",
        unused = unused.len(),
        catalogs_changed = removed.len()
    );
    PruneReport {
        unused,
        removed,
        entries,
    }
}

/// Append one line per pruned entry to the prune log.
pub fn append_prune_log(path: &Path, entries: &[PrunedEntry]) -> PipelineResult<()> {
    let lines: Vec<String> = entries.iter().map(PrunedEntry::log_line).collect();
    append_lines(path, &lines).map_err(|e| PipelineError::io(path, e))
}
