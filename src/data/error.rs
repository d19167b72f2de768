//! Data loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or indexing the book's data tables
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse `{path}`: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported data file format `{0}` (expected toml, json, yml or yaml)")]
    UnsupportedFormat(PathBuf),

    #[error("required data table `{name}` not found in `{dir}`")]
    NotFound { name: &'static str, dir: PathBuf },

    #[error("{kind} `{slug}` appears more than once in the ordering")]
    DuplicateSlug { kind: &'static str, slug: String },

    #[error("{kind} slug `{slug}` must be a single path segment (no `/`, `\\` or `..`)")]
    InvalidSlug { kind: &'static str, slug: String },

    #[error("duplicate {table} key `{key}`")]
    DuplicateKey { table: &'static str, key: String },
}
