//! Structural checks over catalogs, source references and the refactor map.
//!
//! Every check always runs; the report aggregates them into per-check and
//! overall pass/fail.

use serde::Serialize;

use crate::{
    core::{
        canonicalize::Canonicalizer,
        catalog::{CatalogSet, key_order},
        refactor_map::RefactorMap,
        usage::UsageIndex,
        workspace::Workspace,
    },
    issues::{
        BrokenReferenceIssue, ChainedMappingIssue, DanglingCanonicalIssue, DuplicateTextIssue,
        Issue, LeftoverDuplicateIssue,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Check {
    NoDuplicates,
    DuplicatesRemoved,
    NoBrokenReferences,
    MapConsistent,
}

impl Check {
    pub const ALL: [Check; 4] = [
        Check::NoDuplicates,
        Check::DuplicatesRemoved,
        Check::NoBrokenReferences,
        Check::MapConsistent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Check::NoDuplicates => "no-duplicates",
            Check::DuplicatesRemoved => "duplicates-removed",
            Check::NoBrokenReferences => "no-broken-references",
            Check::MapConsistent => "map-consistent",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Check::NoDuplicates => "no duplicate text in the base catalog",
            Check::DuplicatesRemoved => "mapped duplicate keys are gone from every catalog",
            Check::NoBrokenReferences => "every source reference exists in the base catalog",
            Check::MapConsistent => "every canonical key exists in the base catalog",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub check: Check,
    pub issues: Vec<Issue>,
    /// Set when the check had nothing to look at.
    pub skipped: Option<String>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckResult::passed)
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.checks.iter().flat_map(|c| c.issues.iter())
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = Check> + '_ {
        self.checks.iter().filter(|c| !c.passed()).map(|c| c.check)
    }
}

const NO_MAP_NOTE: &str = "no refactor map artifact";

pub struct Validator<'a> {
    workspace: &'a Workspace,
}

impl<'a> Validator<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Run all four checks. `map` is `None` when no refactor map exists, in
    /// which case the map-based checks pass as skipped.
    pub fn validate(
        &self,
        catalogs: &CatalogSet,
        index: &UsageIndex,
        map: Option<&RefactorMap>,
    ) -> ValidationReport {
        let checks = vec![
            self.check_no_duplicates(catalogs),
            self.check_duplicates_removed(catalogs, map),
            self.check_no_broken_references(catalogs, index),
            self.check_map_consistent(catalogs, index, map),
        ];
        let report = ValidationReport { checks };

        tracing::info!(
            event = "validate_complete",
            passed = report.passed(),
            issues = report.issues().count()
        );
        report
    }

    fn catalog_path(&self, locale: &str) -> String {
        let path = self.workspace.catalog_store().path_for(locale);
        self.workspace.display_path(&path)
    }

    fn map_path(&self) -> String {
        self.workspace.display_path(&self.workspace.refactor_map_path)
    }

    fn check_no_duplicates(&self, catalogs: &CatalogSet) -> CheckResult {
        // An empty base has no duplicates
        let groups = Canonicalizer::new(self.workspace)
            .groups(&catalogs.base)
            .unwrap_or_default();

        let catalog_path = self.catalog_path(catalogs.base_locale());
        let issues = groups
            .into_iter()
            .map(|group| {
                let mut keys = vec![group.canonical];
                keys.extend(group.duplicates);
                Issue::DuplicateText(DuplicateTextIssue {
                    catalog_path: catalog_path.clone(),
                    text: group.text,
                    keys,
                })
            })
            .collect();

        CheckResult {
            check: Check::NoDuplicates,
            issues,
            skipped: None,
        }
    }

    fn check_duplicates_removed(
        &self,
        catalogs: &CatalogSet,
        map: Option<&RefactorMap>,
    ) -> CheckResult {
        let Some(map) = map else {
            return skipped(Check::DuplicatesRemoved);
        };

        let mut issues = Vec::new();
        for catalog in catalogs.iter() {
            for (duplicate, canonical) in map.iter() {
                if catalog.contains_key(duplicate) {
                    issues.push(Issue::LeftoverDuplicate(LeftoverDuplicateIssue {
                        catalog_path: self.catalog_path(catalog.locale()),
                        key: duplicate.to_string(),
                        canonical: canonical.to_string(),
                    }));
                }
            }
        }

        CheckResult {
            check: Check::DuplicatesRemoved,
            issues,
            skipped: None,
        }
    }

    fn check_no_broken_references(&self, catalogs: &CatalogSet, index: &UsageIndex) -> CheckResult {
        let issues = index
            .iter()
            .filter(|(key, _)| !catalogs.base.contains_key(key))
            .flat_map(|(_, occurrences)| occurrences.iter())
            .map(|occurrence| {
                Issue::BrokenReference(BrokenReferenceIssue {
                    occurrence: occurrence.clone(),
                    base_locale: catalogs.base_locale().to_string(),
                })
            })
            .collect();

        CheckResult {
            check: Check::NoBrokenReferences,
            issues,
            skipped: None,
        }
    }

    /// Canonical keys must exist in the base catalog while anything still
    /// needs them: a source reference, or one of their duplicates left in some
    /// catalog. A canonical key pruned together with its whole group is
    /// consistent. Chained entries are reported too.
    fn check_map_consistent(
        &self,
        catalogs: &CatalogSet,
        index: &UsageIndex,
        map: Option<&RefactorMap>,
    ) -> CheckResult {
        let Some(map) = map else {
            return skipped(Check::MapConsistent);
        };

        let map_path = self.map_path();
        let mut issues: Vec<Issue> = map
            .chained_keys()
            .into_iter()
            .map(|key| {
                Issue::ChainedMapping(ChainedMappingIssue {
                    map_path: map_path.clone(),
                    key: key.to_string(),
                })
            })
            .collect();

        let mut canonicals: Vec<&str> = map.canonicals().into_iter().collect();
        canonicals.sort_by(|a, b| key_order(a, b));
        for canonical in canonicals {
            if catalogs.base.contains_key(canonical) {
                continue;
            }
            let duplicates: Vec<String> = map
                .iter()
                .filter(|(_, c)| *c == canonical)
                .map(|(d, _)| d.to_string())
                .collect();
            let duplicate_survives = duplicates
                .iter()
                .any(|d| catalogs.iter().any(|catalog| catalog.contains_key(d)));
            if !index.contains(canonical) && !duplicate_survives {
                continue;
            }
            issues.push(Issue::DanglingCanonical(DanglingCanonicalIssue {
                map_path: map_path.clone(),
                canonical: canonical.to_string(),
                duplicates,
            }));
        }

        CheckResult {
            check: Check::MapConsistent,
            issues,
            skipped: None,
        }
    }
}

fn skipped(check: Check) -> CheckResult {
    CheckResult {
        check,
        issues: Vec::new(),
        skipped: Some(NO_MAP_NOTE.to_string()),
    }
}
