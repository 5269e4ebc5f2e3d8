//! Stage sequencing: Scan → Dedup → Prune → Sync → Check.
//!
//! Each stage can also be driven on its own (the CLI exposes them one by one).
//! Catalogs are loaded once and mutated in memory; a stage persists only the
//! catalogs it changed, at its end. With `dry_run` every stage computes exactly
//! the same result and nothing is written.

use std::{collections::HashSet, path::PathBuf};

use serde::Serialize;

use crate::{
    core::{
        canonicalize::{Canonicalizer, DuplicateGroup},
        catalog::CatalogSet,
        prune::{PruneReport, append_prune_log, prune},
        refactor_map::RefactorMap,
        rewrite::{ReferenceRewriter, Replacement, append_replacement_log},
        scan::{ReferenceScanner, ScanOutput, SourceWarning},
        sync::{SyncReport, synchronize},
        usage::UsageIndex,
        validate::{ValidationReport, Validator},
        workspace::Workspace,
    },
    error::PipelineResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Scan,
    Dedup,
    Prune,
    Sync,
    Check,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Scan,
        Stage::Dedup,
        Stage::Prune,
        Stage::Sync,
        Stage::Check,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::Dedup => "dedup",
            Stage::Prune => "prune",
            Stage::Sync => "sync",
            Stage::Check => "check",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source files of the workspace plus the usage index built from them.
#[derive(Debug)]
pub struct SourceState {
    pub files: Vec<PathBuf>,
    pub index: UsageIndex,
    pub warnings: Vec<SourceWarning>,
    pub files_scanned: usize,
}

#[derive(Debug, Default)]
pub struct DedupOutcome {
    pub groups: Vec<DuplicateGroup>,
    pub map: RefactorMap,
    pub replacements: Vec<Replacement>,
    pub files_changed: Vec<String>,
    /// Duplicate keys dropped from the base catalog.
    pub removed_from_base: Vec<String>,
    /// Duplicate keys kept in the base because a file referencing them could
    /// not be rewritten.
    pub retained: Vec<String>,
    /// Usage occurrences moved onto canonical keys.
    pub remapped: usize,
    pub warnings: Vec<SourceWarning>,
}

/// Everything a full run did (or would do).
#[derive(Debug)]
pub struct PipelineReport {
    pub dry_run: bool,
    pub files_scanned: usize,
    pub keys_referenced: usize,
    pub dedup: DedupOutcome,
    pub prune: PruneReport,
    pub sync: SyncReport,
    pub validation: ValidationReport,
    pub warnings: Vec<SourceWarning>,
    /// Catalog locales written to disk, in write order.
    pub written: Vec<String>,
}

impl PipelineReport {
    pub fn passed(&self) -> bool {
        self.validation.passed()
    }
}

pub struct Pipeline<'a> {
    workspace: &'a Workspace,
    dry_run: bool,
    written: Vec<String>,
}

impl<'a> Pipeline<'a> {
    pub fn new(workspace: &'a Workspace, dry_run: bool) -> Self {
        Self {
            workspace,
            dry_run,
            written: Vec::new(),
        }
    }

    /// Locales persisted so far.
    pub fn written(&self) -> &[String] {
        &self.written
    }

    pub fn load_catalogs(&self) -> PipelineResult<CatalogSet> {
        self.workspace
            .catalog_store()
            .load_set(&self.workspace.base_locale, &self.workspace.locales)
    }

    /// The persisted refactor map artifact, if any.
    pub fn load_refactor_map(&self) -> PipelineResult<Option<RefactorMap>> {
        RefactorMap::load(&self.workspace.refactor_map_path)
    }

    /// Scan stage.
    pub fn scan(&self) -> SourceState {
        let discovered = self.workspace.sources.discover(&self.workspace.root);
        let ScanOutput {
            index,
            warnings,
            files_scanned,
        } = ReferenceScanner::new(self.workspace).scan(&discovered.files);

        let mut all_warnings = discovered.warnings;
        all_warnings.extend(warnings);
        SourceState {
            files: discovered.files,
            index,
            warnings: all_warnings,
            files_scanned,
        }
    }

    /// Dedup stage: canonicalize the base, rewrite references, drop the
    /// duplicates from the base and remap the usage index.
    pub fn dedup(
        &mut self,
        catalogs: &mut CatalogSet,
        sources: &mut SourceState,
    ) -> PipelineResult<DedupOutcome> {
        let canonicalizer = Canonicalizer::new(self.workspace);
        let groups = canonicalizer.groups(&catalogs.base)?;
        let map = canonicalizer.canonicalize(&catalogs.base)?;
        if map.is_empty() {
            return Ok(DedupOutcome {
                groups,
                ..Default::default()
            });
        }

        let rewrite =
            ReferenceRewriter::new(self.workspace).rewrite(&sources.files, &map, self.dry_run);

        // References in files the rewriter could not change keep their
        // duplicate key, which then stays in the base.
        let rewritten: HashSet<&str> = rewrite.files_changed.iter().map(String::as_str).collect();
        let remapped = sources.index.remap(&map, &rewritten);
        let retained: Vec<String> = map
            .duplicates()
            .filter(|key| sources.index.contains(key))
            .map(str::to_string)
            .collect();
        for key in &retained {
            tracing::warn!(event = "duplicate_retained", key = key.as_str());
        }
        let kept: HashSet<&str> = retained.iter().map(String::as_str).collect();

        if !self.dry_run {
            let applied = RefactorMap::from_pairs(
                map.iter().filter(|(duplicate, _)| !kept.contains(duplicate)),
            );
            if !applied.is_empty() {
                applied.save(&self.workspace.refactor_map_path)?;
            }
            append_replacement_log(&self.workspace.replacement_log_path, &rewrite.replacements)?;
        }

        let removed_from_base: Vec<String> = map
            .duplicates()
            .filter(|key| !kept.contains(key))
            .filter(|key| catalogs.base.remove(key).is_some())
            .map(str::to_string)
            .collect();
        if !removed_from_base.is_empty() {
            self.persist(catalogs, &[catalogs.base_locale().to_string()])?;
        }

        tracing::info!(
            event = "dedup_complete",
            duplicates = map.len(),
            replacements = rewrite.replacements.len(),
            removed = removed_from_base.len(),
            retained = retained.len(),
            remapped,
            dry_run = self.dry_run
        );

        Ok(DedupOutcome {
            groups,
            map,
            replacements: rewrite.replacements,
            files_changed: rewrite.files_changed,
            removed_from_base,
            retained,
            remapped,
            warnings: rewrite.warnings,
        })
    }

    /// Prune stage.
    pub fn prune(
        &mut self,
        catalogs: &mut CatalogSet,
        index: &UsageIndex,
    ) -> PipelineResult<PruneReport> {
        let report = prune(catalogs, index);
        if !self.dry_run {
            append_prune_log(&self.workspace.prune_log_path, &report.entries)?;
        }
        let changed: Vec<String> = report.changed_locales().map(str::to_string).collect();
        self.persist(catalogs, &changed)?;
        Ok(report)
    }

    /// Sync stage.
    pub fn sync(&mut self, catalogs: &mut CatalogSet) -> PipelineResult<SyncReport> {
        let report = synchronize(catalogs, &self.workspace.placeholder)?;
        let changed: Vec<String> = report.changed_locales().map(str::to_string).collect();
        self.persist(catalogs, &changed)?;
        Ok(report)
    }

    /// Check stage.
    pub fn check(
        &self,
        catalogs: &CatalogSet,
        index: &UsageIndex,
        map: Option<&RefactorMap>,
    ) -> ValidationReport {
        Validator::new(self.workspace).validate(catalogs, index, map)
    }

    /// All stages in order, halting at the first hard failure.
    ///
    /// Writes already flushed by earlier stages stay in place on failure.
    pub fn run(mut self) -> PipelineResult<PipelineReport> {
        tracing::info!(event = "pipeline_start", dry_run = self.dry_run);

        let mut catalogs = self.load_catalogs()?;
        let mut sources = self.scan();
        let dedup = self.dedup(&mut catalogs, &mut sources)?;
        let prune = self.prune(&mut catalogs, &sources.index)?;
        let sync = self.sync(&mut catalogs)?;

        // This run's map when it found duplicates, otherwise the last artifact
        let persisted = if dedup.map.is_empty() {
            self.load_refactor_map()?
        } else {
            None
        };
        let map = if dedup.map.is_empty() {
            persisted.as_ref()
        } else {
            Some(&dedup.map)
        };
        let validation = self.check(&catalogs, &sources.index, map);

        let mut warnings = sources.warnings;
        warnings.extend(dedup.warnings.iter().cloned());

        tracing::info!(
            event = "pipeline_complete",
            passed = validation.passed(),
            written = self.written.len(),
            dry_run = self.dry_run
        );
        Ok(PipelineReport {
            dry_run: self.dry_run,
            files_scanned: sources.files_scanned,
            keys_referenced: sources.index.len(),
            dedup,
            prune,
            sync,
            validation,
            warnings,
            written: self.written,
        })
    }

    /// Save the named catalogs unless this is a dry run.
    pub fn persist(&mut self, catalogs: &CatalogSet, locales: &[String]) -> PipelineResult<()> {
        if self.dry_run {
            return Ok(());
        }
        let store = self.workspace.catalog_store();
        for locale in locales {
            if let Some(catalog) = catalogs.get(locale) {
                store.save(catalog)?;
                self.written.push(locale.clone());
            }
        }
        Ok(())
    }
}
