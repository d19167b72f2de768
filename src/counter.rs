//! Chapter-scoped sequence numbering for figures and tables.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::ContentKind;

/// A numbered content marker produced during a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Numbered {
    pub kind: ContentKind,
    pub ordinal: u32,
}

/// Per-render-pass counter state, keyed by `(kind, chapter scope)`.
///
/// Every call to [`ScopedCounter::next`] both reads and advances; there is
/// no peek. Each chapter render owns its own instance, so parallel chapter
/// renders never share counts.
#[derive(Debug, Default)]
pub struct ScopedCounter {
    counts: FxHashMap<(ContentKind, String), u32>,
}

impl ScopedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next ordinal for `kind` inside `scope`, starting at 1.
    pub fn next(&mut self, kind: ContentKind, scope: &str) -> Numbered {
        let count = self
            .counts
            .entry((kind, scope.to_string()))
            .or_insert(0);
        *count += 1;
        Numbered {
            kind,
            ordinal: *count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_from_one() {
        let mut counter = ScopedCounter::new();
        let ordinals: Vec<_> = (0..5)
            .map(|_| counter.next(ContentKind::Figure, "intro").ordinal)
            .collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_new_scope_starts_fresh() {
        let mut counter = ScopedCounter::new();
        counter.next(ContentKind::Figure, "intro");
        counter.next(ContentKind::Figure, "intro");
        counter.next(ContentKind::Figure, "intro");
        assert_eq!(counter.next(ContentKind::Figure, "setup").ordinal, 1);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut counter = ScopedCounter::new();
        assert_eq!(counter.next(ContentKind::Figure, "intro").ordinal, 1);
        assert_eq!(counter.next(ContentKind::Table, "intro").ordinal, 1);
        assert_eq!(counter.next(ContentKind::Figure, "intro").ordinal, 2);
        assert_eq!(
            counter.next(ContentKind::Table, "intro"),
            Numbered {
                kind: ContentKind::Table,
                ordinal: 2
            }
        );
    }

    #[test]
    fn test_scope_resumes_its_own_count() {
        let mut counter = ScopedCounter::new();
        counter.next(ContentKind::Table, "a");
        counter.next(ContentKind::Table, "b");
        assert_eq!(counter.next(ContentKind::Table, "a").ordinal, 2);
    }
}
