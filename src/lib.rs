//! Keyfold - translation key consistency pipeline
//!
//! Keyfold keeps flat locale catalogs and the source code that references them
//! consistent: it merges keys that share a display text, rewrites the source
//! references accordingly, prunes unreferenced keys, aligns every dependent
//! catalog with the base catalog and validates the result.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Pipeline stages (scan, dedup, prune, sync, check)
//! - `error`: Typed pipeline errors
//! - `issues`: Issue type definitions reported by the validator
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod issues;
pub mod mcp;
