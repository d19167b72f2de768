//! Core types - pure abstractions shared across the codebase.

mod kind;
mod url;

pub use kind::{ContentKind, TargetKind};
pub use url::UrlPath;
