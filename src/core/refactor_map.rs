//! Duplicate key → canonical key, plus its persisted audit artifact.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fs, io,
    path::Path,
};

use crate::{
    core::{
        catalog::{parse_flat, render_flat},
        utils::write_atomic,
    },
    error::{PipelineError, PipelineResult},
};

/// Mapping from deprecated duplicate keys to their canonical replacement.
///
/// Canonical keys are fixed points: no key is both a duplicate and a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefactorMap {
    entries: BTreeMap<String, String>,
}

impl RefactorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, duplicate: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(duplicate.into(), canonical.into());
    }

    pub fn canonical_for(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_duplicate(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn duplicates(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Distinct canonical keys.
    pub fn canonicals(&self) -> HashSet<&str> {
        self.entries.values().map(String::as_str).collect()
    }

    /// Keys that appear on both sides of the map.
    pub fn chained_keys(&self) -> Vec<&str> {
        self.entries
            .values()
            .filter(|canonical| self.entries.contains_key(canonical.as_str()))
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn to_json(&self) -> String {
        render_flat(self.iter())
    }

    /// Load the artifact; `Ok(None)` when it was never written.
    pub fn load(path: &Path) -> PipelineResult<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PipelineError::io(path, e)),
        };

        let entries = parse_flat(&content).map_err(|reason| PipelineError::CorruptRefactorMap {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(Some(Self::from_pairs(entries)))
    }

    pub fn save(&self, path: &Path) -> PipelineResult<()> {
        write_atomic(path, &self.to_json()).map_err(|e| PipelineError::io(path, e))?;
        tracing::debug!(event = "refactor_map_saved", entries = self.len(), path = %path.display());
        Ok(())
    }
}
