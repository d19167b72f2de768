//! Bibliography and glossary records.

use serde::Deserialize;

use super::table::Keyed;

/// Bibliography entry. Only the title is rendered; styling is left to the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BibEntry {
    pub key: String,
    pub title: String,
}

impl Keyed for BibEntry {
    const TABLE: &'static str = "reference";

    fn key(&self) -> &str {
        &self.key
    }
}

/// Glossary entry. `term` and `def` are Markdown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlossaryEntry {
    pub key: String,
    pub term: String,
    #[serde(default)]
    pub def: String,
}

impl Keyed for GlossaryEntry {
    const TABLE: &'static str = "glossary";

    fn key(&self) -> &str {
        &self.key
    }
}
