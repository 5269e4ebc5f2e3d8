use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    core::catalog::{CatalogSet, key_order},
    error::{PipelineError, PipelineResult},
};

/// Keys added to and removed from one dependent catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocaleSync {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl LocaleSync {
    pub fn is_changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Dependent locale → changes. Unchanged locales are not listed.
    pub locales: BTreeMap<String, LocaleSync>,
}

impl SyncReport {
    pub fn changed_locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn total_added(&self) -> usize {
        self.locales.values().map(|l| l.added.len()).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.locales.values().map(|l| l.removed.len()).sum()
    }
}

/// Make every dependent catalog's key set equal to the base's.
///
/// Keys missing from a dependent are added with `placeholder` as text; keys the
/// base does not have are dropped. Existing dependent texts are never touched.
pub fn synchronize(catalogs: &mut CatalogSet, placeholder: &str) -> PipelineResult<SyncReport> {
    if catalogs.base.is_empty() {
        return Err(PipelineError::EmptyBase {
            locale: catalogs.base_locale().to_string(),
        });
    }

    let base_keys = catalogs.base.sorted_keys();
    let mut report = SyncReport::default();

    for dependent in catalogs.dependents.iter_mut() {
        let mut change = LocaleSync::default();

        let mut extra: Vec<String> = dependent
            .keys()
            .filter(|key| !catalogs.base.contains_key(key))
            .map(str::to_string)
            .collect();
        extra.sort_by(|a, b| key_order(a, b));
        for key in extra {
            dependent.remove(&key);
            change.removed.push(key);
        }

        for key in &base_keys {
            if !dependent.contains_key(key) {
                dependent.insert(*key, placeholder);
                change.added.push(key.to_string());
            }
        }

        if change.is_changed() {
            tracing::debug!(
                event = "catalog_synced",
                locale = dependent.locale(),
                added = change.added.len(),
                removed = change.removed.len()
            );
            report.locales.insert(dependent.locale().to_string(), change);
        }
    }

    tracing::info!(
        event = "sync_complete",
        catalogs_changed = report.locales.len(),
        added = report.total_added(),
        removed = report.total_removed()
    );
    Ok(report)
}
