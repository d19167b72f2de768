//! Render error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::xref::XrefError;

/// Errors raised while rendering one unit.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Xref(#[from] XrefError),

    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    #[error("directive `{directive}` requires attribute `{attr}`")]
    MissingAttribute {
        directive: &'static str,
        attr: &'static str,
    },

    #[error("cannot read table source `{0}`")]
    Include(PathBuf, #[source] std::io::Error),

    #[error("cannot read unit source `{0}`")]
    Source(PathBuf, #[source] std::io::Error),
}

/// A render error tagged with the unit it occurred in.
// NOTE: `error` is not a #[source]; Display already includes it.
#[derive(Debug, Error)]
#[error("{unit}: {error}")]
pub struct UnitError {
    /// Human-readable unit name (``chapter `intro` ``, `index page`).
    pub unit: String,
    pub error: RenderError,
}

impl UnitError {
    pub fn new(unit: impl Into<String>, error: impl Into<RenderError>) -> Self {
        Self {
            unit: unit.into(),
            error: error.into(),
        }
    }
}
