//! Unit metadata records (one per chapter or appendix).

use serde::{Deserialize, Serialize};

use super::table::Keyed;

/// Free-form extra fields, kept as raw JSON.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Descriptive metadata for a chapter or appendix
///
/// # Standard Fields
///
/// | Field   | Type     | Description                          |
/// |---------|----------|--------------------------------------|
/// | `slug`  | `String` | Unit identifier (matches the order)  |
/// | `title` | `String` | Display title                        |
///
/// Any other fields (`lede`, `syllabus`, ...) are captured in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMeta {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    /// Additional user-defined fields.
    #[serde(flatten, default)]
    pub extra: JsonMap,
}

#[cfg(test)]
impl UnitMeta {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            extra: JsonMap::new(),
        }
    }
}

impl Keyed for UnitMeta {
    const TABLE: &'static str = "unit";

    fn key(&self) -> &str {
        &self.slug
    }
}
