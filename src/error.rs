//! Hard failures of the consistency pipeline.
//!
//! Everything in here aborts the stage that raised it. Per-file problems during a
//! scan or rewrite are not errors; they are collected as
//! [`SourceWarning`](crate::core::SourceWarning)s and the run continues.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The persisted catalog is not a flat key to string mapping.
    #[error("corrupt catalog {}: {reason}", path.display())]
    CorruptCatalog { path: PathBuf, reason: String },

    #[error("base catalog '{locale}' not found at {}", path.display())]
    MissingBaseCatalog { locale: String, path: PathBuf },

    /// The base catalog has no keys, so no canonical key set exists.
    #[error("base catalog '{locale}' is empty")]
    EmptyBase { locale: String },

    #[error("catalog directory {} does not exist", path.display())]
    CatalogDirMissing { path: PathBuf },

    #[error("corrupt refactor map {}: {reason}", path.display())]
    CorruptRefactorMap { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
