//! Ordering registry: the authoritative chapter and appendix sequences.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::core::TargetKind;
use crate::data::DataError;

/// Raw ordering data as stored in `order.{toml,json,yml}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderData {
    pub chapters: Vec<String>,
    pub appendices: Vec<String>,
}

/// Chapter and appendix order for one render pass.
///
/// Position lookups go through a slug -> index map built once here;
/// the sequences themselves are never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct OrderingRegistry {
    chapters: Vec<String>,
    appendices: Vec<String>,
    chapter_index: FxHashMap<String, usize>,
    appendix_index: FxHashMap<String, usize>,
}

impl OrderingRegistry {
    /// Build the registry.
    ///
    /// Chapters and appendices share the `/<slug>/` URL space, so a slug may
    /// appear only once across both sequences. Slugs become file names and
    /// must be a single path component.
    pub fn new(chapters: Vec<String>, appendices: Vec<String>) -> Result<Self, DataError> {
        let chapter_index = index_of(&chapters, TargetKind::Chapter)?;
        let appendix_index = index_of(&appendices, TargetKind::Appendix)?;
        if let Some(slug) = appendices.iter().find(|s| chapter_index.contains_key(*s)) {
            return Err(DataError::DuplicateSlug {
                kind: TargetKind::Appendix.name(),
                slug: slug.clone(),
            });
        }
        Ok(Self {
            chapters,
            appendices,
            chapter_index,
            appendix_index,
        })
    }

    pub fn from_data(data: OrderData) -> Result<Self, DataError> {
        Self::new(data.chapters, data.appendices)
    }

    pub fn chapters(&self) -> &[String] {
        &self.chapters
    }

    pub fn appendices(&self) -> &[String] {
        &self.appendices
    }

    /// 0-based position of `slug` in the sequence for `kind`.
    ///
    /// Always `None` for non-unit kinds.
    pub fn position(&self, kind: TargetKind, slug: &str) -> Option<usize> {
        match kind {
            TargetKind::Chapter => self.chapter_index.get(slug).copied(),
            TargetKind::Appendix => self.appendix_index.get(slug).copied(),
            TargetKind::Glossary | TargetKind::Bibliography => None,
        }
    }

    /// All units in render order: chapters first, then appendices.
    pub fn units(&self) -> impl Iterator<Item = (TargetKind, &str)> {
        let chapters = self
            .chapters
            .iter()
            .map(|s| (TargetKind::Chapter, s.as_str()));
        let appendices = self
            .appendices
            .iter()
            .map(|s| (TargetKind::Appendix, s.as_str()));
        chapters.chain(appendices)
    }

    pub fn len(&self) -> usize {
        self.chapters.len() + self.appendices.len()
    }
}

/// A slug is usable as one path segment: non-empty, no separators, no `..`.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && !slug.contains(['/', '\\']) && !slug.contains("..")
}

fn index_of(slugs: &[String], kind: TargetKind) -> Result<FxHashMap<String, usize>, DataError> {
    let mut index = FxHashMap::default();
    for (i, slug) in slugs.iter().enumerate() {
        if !is_valid_slug(slug) {
            return Err(DataError::InvalidSlug {
                kind: kind.name(),
                slug: slug.clone(),
            });
        }
        if index.insert(slug.clone(), i).is_some() {
            return Err(DataError::DuplicateSlug {
                kind: kind.name(),
                slug: slug.clone(),
            });
        }
    }
    Ok(index)
}
