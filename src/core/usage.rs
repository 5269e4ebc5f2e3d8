use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::core::{catalog::LocaleCatalog, refactor_map::RefactorMap, scan::CallForm};

/// One reference to a catalog key found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// Path relative to the project root.
    pub file: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub col: usize,
    /// Byte offset of the call start in the scanned text.
    pub offset: usize,
    pub form: CallForm,
    pub key: String,
    /// The full source line, for reporting.
    #[serde(skip)]
    pub source_line: String,
}

/// Key → every occurrence referencing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageIndex {
    entries: BTreeMap<String, BTreeSet<Occurrence>>,
}

impl UsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, occurrence: Occurrence) {
        self.entries
            .entry(occurrence.key.clone())
            .or_default()
            .insert(occurrence);
    }

    /// Fold another partial index into this one.
    pub fn merge(&mut self, other: UsageIndex) {
        for (key, occurrences) in other.entries {
            self.entries.entry(key).or_default().extend(occurrences);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn occurrences(&self, key: &str) -> Option<&BTreeSet<Occurrence>> {
        self.entries.get(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn used_keys(&self) -> HashSet<&str> {
        self.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Occurrence>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys referenced.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_occurrences(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// Number of distinct files with at least one reference.
    pub fn file_count(&self) -> usize {
        self.entries
            .values()
            .flatten()
            .map(|o| o.file.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Move references of duplicate keys onto their canonical key.
    ///
    /// Mirrors what the rewriter did to the source text, so later stages see
    /// the rewritten references without rescanning. Only occurrences in
    /// `rewritten` files move; the rest stay under the duplicate key. Positions
    /// keep pointing at the pre-rewrite text. Returns the number of moved
    /// occurrences.
    pub fn remap(&mut self, map: &RefactorMap, rewritten: &HashSet<&str>) -> usize {
        let mut moved = 0;
        for (duplicate, canonical) in map.iter() {
            let Some(occurrences) = self.entries.remove(duplicate) else {
                continue;
            };
            let (moving, staying): (BTreeSet<_>, BTreeSet<_>) = occurrences
                .into_iter()
                .partition(|o| rewritten.contains(o.file.as_str()));
            if !staying.is_empty() {
                self.entries.insert(duplicate.to_string(), staying);
            }
            if moving.is_empty() {
                continue;
            }

            moved += moving.len();
            let target = self.entries.entry(canonical.to_string()).or_default();
            for mut occurrence in moving {
                occurrence.key = canonical.to_string();
                target.insert(occurrence);
            }
        }
        moved
    }
}

/// Reference count of one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyUsage {
    pub key: String,
    pub count: usize,
    pub files: usize,
}

/// How much of the base catalog the source tree actually uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub declared: usize,
    /// Declared keys with at least one reference.
    pub used: usize,
    /// Most referenced keys, highest count first.
    pub top: Vec<KeyUsage>,
    /// Declared keys nothing references, in catalog order.
    pub unreferenced: Vec<String>,
}

impl UsageReport {
    pub fn build(index: &UsageIndex, base: &LocaleCatalog, limit: usize) -> Self {
        let mut ranked: Vec<KeyUsage> = index
            .iter()
            .map(|(key, occurrences)| KeyUsage {
                key: key.to_string(),
                count: occurrences.len(),
                files: occurrences
                    .iter()
                    .map(|o| o.file.as_str())
                    .collect::<HashSet<_>>()
                    .len(),
            })
            .collect();
        // Ties keep key order, the index iterates sorted
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);

        let unreferenced: Vec<String> = base
            .sorted_keys()
            .into_iter()
            .filter(|key| !index.contains(key))
            .map(str::to_string)
            .collect();

        Self {
            declared: base.len(),
            used: base.len() - unreferenced.len(),
            top: ranked,
            unreferenced,
        }
    }

    /// Share of declared keys in use, in percent.
    pub fn used_percent(&self) -> f64 {
        if self.declared == 0 {
            return 0.0;
        }
        self.used as f64 * 100.0 / self.declared as f64
    }
}
