use std::{fs, path::PathBuf};

use rayon::prelude::*;

use super::{CallGrammar, KeyFilter, SourceWarning};
use crate::core::{
    usage::{Occurrence, UsageIndex},
    utils::LineIndex,
    workspace::Workspace,
};

/// Result of scanning the source tree.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub index: UsageIndex,
    pub warnings: Vec<SourceWarning>,
    pub files_scanned: usize,
}

/// Extracts key references from source files. Never writes anything.
pub struct ReferenceScanner<'a> {
    workspace: &'a Workspace,
}

impl<'a> ReferenceScanner<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Discover the source files of the workspace and scan them.
    pub fn scan_workspace(&self) -> ScanOutput {
        let discovered = self.workspace.sources.discover(&self.workspace.root);
        let mut output = self.scan(&discovered.files);
        let mut warnings = discovered.warnings;
        warnings.append(&mut output.warnings);
        output.warnings = warnings;
        output
    }

    /// Scan `files` in parallel; per-file indexes are merged after the join.
    pub fn scan(&self, files: &[PathBuf]) -> ScanOutput {
        let grammar = &self.workspace.grammar;
        let filter = &self.workspace.key_filter;

        let results: Vec<_> = files
            .par_iter()
            .map(|path| {
                let rel_path = self.workspace.display_path(path);
                let result = fs::read_to_string(path)
                    .map(|content| scan_source(grammar, filter, &rel_path, &content));
                (rel_path, result)
            })
            .collect();

        let mut output = ScanOutput::default();
        for (rel_path, result) in results {
            match result {
                Ok(occurrences) => {
                    output.files_scanned += 1;
                    for occurrence in occurrences {
                        output.index.insert(occurrence);
                    }
                }
                Err(e) => {
                    tracing::warn!(event = "source_unreadable", path = %rel_path, error = %e);
                    output.warnings.push(SourceWarning {
                        path: rel_path,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            event = "scan_complete",
            files = output.files_scanned,
            keys = output.index.len(),
            occurrences = output.index.total_occurrences(),
            warnings = output.warnings.len()
        );
        output
    }
}

/// Every plausible key reference in one source text.
pub fn scan_source(
    grammar: &CallGrammar,
    filter: &KeyFilter,
    file: &str,
    content: &str,
) -> Vec<Occurrence> {
    let lines = LineIndex::new(content);

    grammar
        .find_calls(content)
        .into_iter()
        .filter(|call| filter.is_plausible(call.literal))
        .map(|call| {
            let (line, col) = lines.line_col(content, call.start);
            Occurrence {
                file: file.to_string(),
                line,
                col,
                offset: call.start,
                form: call.form,
                key: call.literal.to_string(),
                source_line: lines.line_text(content, line).to_string(),
            }
        })
        .collect()
}
