use std::{
    collections::{BTreeSet, HashSet},
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::WalkDir;

use super::SourceWarning;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are matched as path substrings.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Which files under the project root belong to the source tree.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    includes: Vec<String>,
    substrings: Vec<String>,
    globs: Vec<Pattern>,
    extensions: HashSet<String>,
}

/// Result of discovering source files.
#[derive(Debug, Default)]
pub struct SourceFiles {
    pub files: Vec<PathBuf>,
    /// Paths that could not be traversed.
    pub warnings: Vec<SourceWarning>,
}

impl SourceFilter {
    pub fn new(includes: &[String], ignores: &[String], extensions: &[String]) -> Self {
        let mut substrings = Vec::new();
        let mut globs = Vec::new();
        for ignore in ignores {
            if is_glob_pattern(ignore) {
                // Invalid patterns are rejected by `Config::validate`
                if let Ok(pattern) = Pattern::new(ignore) {
                    globs.push(pattern);
                }
            } else {
                substrings.push(ignore.clone());
            }
        }

        Self {
            includes: includes.to_vec(),
            substrings,
            globs,
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Whether a root-relative path (with `/` separators) is excluded.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        self.substrings.iter().any(|s| rel_path.contains(s.as_str()))
            || self.globs.iter().any(|p| p.matches(rel_path))
    }

    pub fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(e))
    }

    /// Walk the include directories below `root`, pruning ignored directories.
    ///
    /// Files are returned sorted and without duplicates, even when include
    /// directories overlap.
    pub fn discover(&self, root: &Path) -> SourceFiles {
        let mut files: BTreeSet<PathBuf> = BTreeSet::new();
        let mut warnings = Vec::new();

        let dirs: Vec<PathBuf> = if self.includes.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.includes.iter().map(|inc| root.join(inc)).collect()
        };

        for dir in dirs {
            if !dir.exists() {
                tracing::debug!(event = "include_missing", path = %dir.display());
                continue;
            }

            let walker = WalkDir::new(&dir)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| {
                    // The include root itself is never filtered out
                    entry.depth() == 0 || !self.is_ignored(&relative(root, entry.path()))
                });

            for entry in walker {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        let path = e
                            .path()
                            .map(|p| relative(root, p))
                            .unwrap_or_else(|| relative(root, &dir));
                        tracing::warn!(event = "path_unreadable", path = %path, error = %e);
                        warnings.push(SourceWarning {
                            path,
                            error: e.to_string(),
                        });
                        continue;
                    }
                };

                if entry.file_type().is_file() && self.has_allowed_extension(entry.path()) {
                    files.insert(entry.into_path());
                }
            }
        }

        SourceFiles {
            files: files.into_iter().collect(),
            warnings,
        }
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
