//! Duplicate detection over the base catalog.
//!
//! Keys sharing the same display text collapse onto one canonical key, the
//! first of the group under [`key_order`]. Technical keys are only chosen as
//! canonical when the whole group is technical, and keys no call literal can
//! spell (quotes, line breaks) only when no other member can be spelled.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    core::{
        catalog::{LocaleCatalog, key_order},
        refactor_map::RefactorMap,
        scan::CallGrammar,
        workspace::Workspace,
    },
    error::{PipelineError, PipelineResult},
};

/// Keys of the base catalog sharing one display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub text: String,
    pub canonical: String,
    /// Every other key of the group, in catalog order.
    pub duplicates: Vec<String>,
}

/// Texts never considered for deduplication: empty, blank or the placeholder.
pub fn is_exempt_text(text: &str, placeholder: &str) -> bool {
    text.trim().is_empty() || text == placeholder
}

pub struct Canonicalizer<'a> {
    placeholder: &'a str,
    technical_keys: &'a HashSet<String>,
}

impl<'a> Canonicalizer<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            placeholder: &workspace.placeholder,
            technical_keys: &workspace.technical_keys,
        }
    }

    /// Duplicate groups of `base`, ordered by canonical key.
    pub fn groups(&self, base: &LocaleCatalog) -> PipelineResult<Vec<DuplicateGroup>> {
        if base.is_empty() {
            return Err(PipelineError::EmptyBase {
                locale: base.locale().to_string(),
            });
        }

        let mut by_text: HashMap<&str, Vec<&str>> = HashMap::new();
        for (key, text) in base.iter() {
            if !is_exempt_text(text, self.placeholder) {
                by_text.entry(text).or_default().push(key);
            }
        }

        let mut groups: Vec<DuplicateGroup> = by_text
            .into_iter()
            .filter(|(_, keys)| keys.len() >= 2)
            .map(|(text, mut keys)| {
                keys.sort_by(|a, b| key_order(a, b));
                let canonical = self.pick_canonical(&keys);
                DuplicateGroup {
                    text: text.to_string(),
                    canonical: canonical.to_string(),
                    duplicates: keys
                        .iter()
                        .filter(|k| **k != canonical)
                        .map(|k| k.to_string())
                        .collect(),
                }
            })
            .collect();
        groups.sort_by(|a, b| key_order(&a.canonical, &b.canonical));
        Ok(groups)
    }

    /// The deduplication map of `base`.
    pub fn canonicalize(&self, base: &LocaleCatalog) -> PipelineResult<RefactorMap> {
        let groups = self.groups(base)?;
        let mut map = RefactorMap::new();
        for group in &groups {
            for duplicate in &group.duplicates {
                map.insert(duplicate.as_str(), group.canonical.as_str());
            }
        }

        tracing::info!(
            event = "canonicalize_complete",
            groups = groups.len(),
            duplicates = map.len()
        );
        Ok(map)
    }

    /// First key of a sorted group that a call literal can spell and that is
    /// not technical. Falls back to the first spellable key, then to the first
    /// key of the group.
    fn pick_canonical<'k>(&self, sorted: &[&'k str]) -> &'k str {
        let spellable = || sorted.iter().filter(|k| CallGrammar::can_express(k));
        spellable()
            .find(|k| !self.technical_keys.contains(**k))
            .or_else(|| spellable().next())
            .or_else(|| sorted.first())
            .copied()
            .unwrap_or_default()
    }
}
