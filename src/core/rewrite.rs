//! In-place replacement of duplicate key references in source files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    core::{
        refactor_map::RefactorMap,
        scan::{CallGrammar, SourceWarning},
        utils::{append_lines, write_atomic},
        workspace::Workspace,
    },
    error::{PipelineError, PipelineResult},
};

/// One rewritten call expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Replacement {
    /// Path relative to the project root.
    pub file: String,
    /// Byte offset of the call in the original file.
    pub offset: usize,
    pub original: String,
    pub replacement: String,
}

impl Replacement {
    /// `<file>:<offset> | <original> → <replacement>`
    pub fn log_line(&self) -> String {
        format!(
            "{}:{} | {} → {}",
            self.file, self.offset, self.original, self.replacement
        )
    }
}

#[derive(Debug, Default)]
pub struct RewriteOutput {
    /// Sorted by (file, offset).
    pub replacements: Vec<Replacement>,
    /// Files whose content changed (or would change in a dry run).
    pub files_changed: Vec<String>,
    pub warnings: Vec<SourceWarning>,
}

/// Rewrite `content` in a single left-to-right pass.
///
/// Every call whose literal is a duplicate key becomes the same call-form with
/// the same quote around the canonical key. Output text is never re-scanned, so
/// each occurrence is replaced exactly once. Returns `None` when nothing changed.
pub fn rewrite_source(
    grammar: &CallGrammar,
    map: &RefactorMap,
    content: &str,
) -> Option<(String, Vec<(usize, String, String)>)> {
    let mut output = String::with_capacity(content.len());
    let mut edits = Vec::new();
    let mut cursor = 0;

    for call in grammar.find_calls(content) {
        if call.start < cursor {
            continue;
        }
        let Some(canonical) = map.canonical_for(call.literal) else {
            continue;
        };

        let replacement = grammar.render(call.form, call.quote, canonical);
        output.push_str(&content[cursor..call.start]);
        output.push_str(&replacement);
        edits.push((call.start, call.text(content).to_string(), replacement));
        cursor = call.end;
    }

    if edits.is_empty() {
        return None;
    }
    output.push_str(&content[cursor..]);
    Some((output, edits))
}

pub struct ReferenceRewriter<'a> {
    workspace: &'a Workspace,
}

enum FileOutcome {
    Unchanged,
    Rewritten(Vec<Replacement>),
    Failed(SourceWarning),
}

impl<'a> ReferenceRewriter<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Apply `map` to `files`. With `dry_run` nothing is written, but the
    /// returned replacements are exactly those a real run would make.
    pub fn rewrite(&self, files: &[PathBuf], map: &RefactorMap, dry_run: bool) -> RewriteOutput {
        let mut output = RewriteOutput::default();
        if map.is_empty() {
            return output;
        }

        let outcomes: Vec<_> = files
            .par_iter()
            .map(|path| self.rewrite_file(path, map, dry_run))
            .collect();

        for outcome in outcomes {
            match outcome {
                FileOutcome::Unchanged => {}
                FileOutcome::Rewritten(replacements) => {
                    if let Some(first) = replacements.first() {
                        output.files_changed.push(first.file.clone());
                    }
                    output.replacements.extend(replacements);
                }
                FileOutcome::Failed(warning) => output.warnings.push(warning),
            }
        }
        output.replacements.sort();
        output.files_changed.sort();

        tracing::info!(
            event = "rewrite_complete",
            files_changed = output.files_changed.len(),
            replacements = output.replacements.len(),
            warnings = output.warnings.len(),
            dry_run
        );
        output
    }

    fn rewrite_file(&self, path: &Path, map: &RefactorMap, dry_run: bool) -> FileOutcome {
        let rel_path = self.workspace.display_path(path);
        let fail = |e: std::io::Error| {
            tracing::warn!(event = "source_rewrite_failed", path = %rel_path, error = %e);
            FileOutcome::Failed(SourceWarning {
                path: rel_path.clone(),
                error: e.to_string(),
            })
        };

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => return fail(e),
        };
        let Some((rewritten, edits)) = rewrite_source(&self.workspace.grammar, map, &content)
        else {
            return FileOutcome::Unchanged;
        };

        if !dry_run && let Err(e) = write_atomic(path, &rewritten) {
            return fail(e);
        }
        tracing::debug!(event = "source_rewritten", path = %rel_path, replacements = edits.len(), dry_run);

        FileOutcome::Rewritten(
            edits
                .into_iter()
                .map(|(offset, original, replacement)| Replacement {
                    file: rel_path.clone(),
                    offset,
                    original,
                    replacement,
                })
                .collect(),
        )
    }
}

/// Append replacements to the log file, one line each, creating it if needed.
pub fn append_replacement_log(path: &Path, replacements: &[Replacement]) -> PipelineResult<()> {
    let lines: Vec<String> = replacements.iter().map(Replacement::log_line).collect();
    append_lines(path, &lines).map_err(|e| PipelineError::io(path, e))
}
