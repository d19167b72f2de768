//! Cross-reference error types.

use thiserror::Error;

use super::APPENDIX_CAPACITY;
use crate::core::TargetKind;

/// Content-integrity errors raised while resolving references.
///
/// None of these are transient: each one names the offending identifier
/// and target kind so the source document can be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XrefError {
    #[error("unresolved {kind} reference `{key}`")]
    UnresolvedReference { kind: TargetKind, key: String },

    #[error("{kind} `{slug}` is listed in the ordering but has no metadata record")]
    MissingMetadata { kind: TargetKind, slug: String },

    #[error("unknown contributor `{id}`")]
    UnknownContributor { id: String },

    #[error("{kind} `{slug}` is at position {position}, beyond the {max}-letter limit", max = APPENDIX_CAPACITY)]
    CapacityExceeded {
        kind: TargetKind,
        slug: String,
        position: usize,
    },
}
