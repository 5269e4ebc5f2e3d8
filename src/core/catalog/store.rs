use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{CatalogSet, LocaleCatalog, parse_flat};
use crate::{
    core::utils::write_atomic,
    error::{PipelineError, PipelineResult},
};

/// Reads and writes `<dir>/<locale>.json` catalog files.
///
/// Saves to different locales are independent; saves to the same locale must be
/// serialized by the caller.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.dir.join(format!("{}.json", locale))
    }

    pub fn exists(&self, locale: &str) -> bool {
        self.path_for(locale).is_file()
    }

    pub fn load(&self, locale: &str) -> PipelineResult<LocaleCatalog> {
        let path = self.path_for(locale);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            // Binary garbage is a corrupt catalog, not an I/O failure
            io::ErrorKind::InvalidData => PipelineError::CorruptCatalog {
                path: path.clone(),
                reason: "file is not valid UTF-8".to_string(),
            },
            _ => PipelineError::io(&path, e),
        })?;

        let entries = parse_flat(&content)
            .map_err(|reason| PipelineError::CorruptCatalog { path, reason })?;
        Ok(LocaleCatalog::from_entries(locale, entries))
    }

    /// Full-file atomic rewrite in deterministic key order.
    pub fn save(&self, catalog: &LocaleCatalog) -> PipelineResult<()> {
        let path = self.path_for(catalog.locale());
        write_atomic(&path, &catalog.to_json()).map_err(|e| PipelineError::io(&path, e))?;
        tracing::debug!(
            event = "catalog_saved",
            locale = catalog.locale(),
            keys = catalog.len(),
            path = %path.display()
        );
        Ok(())
    }

    /// Locales with a `*.json` file in the catalog directory, sorted.
    pub fn discover_locales(&self) -> PipelineResult<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(PipelineError::CatalogDirMissing {
                path: self.dir.clone(),
            });
        }

        let mut locales = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| PipelineError::io(&self.dir, e))? {
            let path = entry.map_err(|e| PipelineError::io(&self.dir, e))?.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some("json")
                && let Some(locale) = path.file_stem().and_then(|s| s.to_str())
            {
                locales.push(locale.to_string());
            }
        }
        locales.sort();
        Ok(locales)
    }

    /// Load the base catalog and every dependent one.
    ///
    /// With an empty `configured` list the dependents are discovered from the
    /// directory. A configured dependent without a file loads as an empty catalog
    /// so the synchronizer can create it; a missing base catalog is fatal.
    pub fn load_set(&self, base_locale: &str, configured: &[String]) -> PipelineResult<CatalogSet> {
        if !self.dir.is_dir() {
            return Err(PipelineError::CatalogDirMissing {
                path: self.dir.clone(),
            });
        }

        if !self.exists(base_locale) {
            return Err(PipelineError::MissingBaseCatalog {
                locale: base_locale.to_string(),
                path: self.path_for(base_locale),
            });
        }
        let base = self.load(base_locale)?;

        let locales = if configured.is_empty() {
            self.discover_locales()?
        } else {
            configured.to_vec()
        };

        let mut dependents = Vec::new();
        for locale in locales.iter().filter(|l| l.as_str() != base_locale) {
            if dependents.iter().any(|c: &LocaleCatalog| c.locale() == locale) {
                continue;
            }
            if self.exists(locale) {
                dependents.push(self.load(locale)?);
            } else {
                tracing::warn!(
                    event = "catalog_missing",
                    locale = locale.as_str(),
                    path = %self.path_for(locale).display(),
                    "dependent catalog not found, starting from an empty one"
                );
                dependents.push(LocaleCatalog::new(locale.as_str()));
            }
        }

        tracing::debug!(
            event = "catalogs_loaded",
            base = base_locale,
            dependents = dependents.len(),
            base_keys = base.len()
        );
        Ok(CatalogSet::new(base, dependents))
    }
}
