use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    core::{
        catalog::CatalogStore,
        scan::{CallGrammar, KeyFilter, SourceFilter},
    },
};

const PRUNE_LOG_FILE: &str = "prune.log";

/// Fully resolved settings for one pipeline invocation.
///
/// Built once from a [`Config`] and a project root; every stage receives the
/// pieces it needs from here instead of resolving paths on its own.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Project root; source paths in reports and logs are relative to it.
    pub root: PathBuf,
    pub catalog_dir: PathBuf,
    pub base_locale: String,
    /// Configured locales, empty means "discover from the catalog directory".
    pub locales: Vec<String>,
    pub placeholder: String,
    pub technical_keys: HashSet<String>,
    pub sources: SourceFilter,
    pub grammar: CallGrammar,
    pub key_filter: KeyFilter,
    pub refactor_map_path: PathBuf,
    pub replacement_log_path: PathBuf,
    /// `prune.log`, next to the replacement log.
    pub prune_log_path: PathBuf,
}

impl Workspace {
    pub fn from_config(root: &Path, config: &Config) -> Self {
        let root = root.to_path_buf();
        let replacement_log_path = resolve(&root, &config.replacement_log_file);
        Self {
            catalog_dir: resolve(&root, &config.catalog_dir),
            base_locale: config.base_locale.clone(),
            locales: config.locales.clone(),
            placeholder: config.placeholder.clone(),
            technical_keys: config.technical_keys.iter().cloned().collect(),
            sources: SourceFilter::new(&config.includes, &config.ignores, &config.extensions),
            grammar: CallGrammar::new(&config.function_name, &config.namespace),
            key_filter: KeyFilter::new(&config.ignore_literals),
            refactor_map_path: resolve(&root, &config.refactor_map_file),
            prune_log_path: replacement_log_path.with_file_name(PRUNE_LOG_FILE),
            replacement_log_path,
            root,
        }
    }

    pub fn catalog_store(&self) -> CatalogStore {
        CatalogStore::new(&self.catalog_dir)
    }

    /// `path` relative to the project root, with `/` separators, for reports and logs.
    pub fn display_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.to_string_lossy().replace('\\', "/")
    }
}

fn resolve(root: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(".").unwrap_or(p);
        root.join(rel)
    }
}
