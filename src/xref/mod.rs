//! Cross-reference resolution.
//!
//! Maps a symbolic identifier to a canonical URL and a label:
//!
//! | Target       | URL                     | Label                          |
//! |--------------|-------------------------|--------------------------------|
//! | chapter      | `/<slug>/`              | `Chapter N` (1-based position) |
//! | appendix     | `/<slug>/`              | `Appendix L` (A..Z)            |
//! | glossary     | `/glossary/#g:<key>`    | caller text, as inline HTML    |
//! | bibliography | `/references/#b:<key>`  | record title, as inline HTML   |
//!
//! Chapters and appendices resolve by position in the ordering registry;
//! glossary and bibliography entries resolve by key. Misses are errors,
//! never dead links.

mod error;

pub use error::XrefError;

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::book::Book;
use crate::core::{TargetKind, UrlPath};
use crate::utils::html::escape_attr;
use crate::utils::markdown::markdownify_inline;

/// Number of appendix letters (A..Z).
pub const APPENDIX_CAPACITY: usize = 26;

/// Page that owns glossary anchors.
pub const GLOSSARY_PAGE: &str = "glossary";
/// Page that owns bibliography anchors.
pub const REFERENCES_PAGE: &str = "references";

/// Letter for a 0-based appendix position, if within capacity.
pub fn appendix_letter(position: usize) -> Option<char> {
    (position < APPENDIX_CAPACITY).then(|| char::from(b'A' + position as u8))
}

/// Human-readable part of a resolved reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Label {
    /// 1-based chapter number.
    Chapter(usize),
    /// Appendix letter.
    Appendix(char),
    /// Already-rendered inline HTML.
    Rich(String),
}

impl Label {
    /// HTML form; structural labels keep their words together with `&nbsp;`.
    pub fn to_html(&self) -> Cow<'_, str> {
        match self {
            Self::Chapter(n) => Cow::Owned(format!("Chapter&nbsp;{n}")),
            Self::Appendix(letter) => Cow::Owned(format!("Appendix&nbsp;{letter}")),
            Self::Rich(html) => Cow::Borrowed(html),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chapter(n) => write!(f, "Chapter {n}"),
            Self::Appendix(letter) => write!(f, "Appendix {letter}"),
            Self::Rich(html) => f.write_str(html),
        }
    }
}

/// A resolved cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XRef {
    pub kind: TargetKind,
    pub url: UrlPath,
    pub label: Label,
}

impl XRef {
    /// Render as an anchor element under `base_path`.
    pub fn to_html(&self, base_path: &str) -> String {
        let href = self.url.href(base_path);
        let class = match self.kind {
            TargetKind::Glossary => " class=\"glossary\"",
            TargetKind::Bibliography => " class=\"references\"",
            TargetKind::Chapter | TargetKind::Appendix => "",
        };
        format!(
            "<a{class} href=\"{}\">{}</a>",
            escape_attr(&href),
            self.label.to_html()
        )
    }
}

/// Pure query over a loaded book.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    book: &'a Book,
    strict_glossary: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(book: &'a Book) -> Self {
        Self {
            book,
            strict_glossary: false,
        }
    }

    /// Reject glossary keys missing from a loaded glossary table.
    pub fn strict_glossary(mut self, strict: bool) -> Self {
        self.strict_glossary = strict;
        self
    }

    pub fn resolve_chapter(&self, slug: &str) -> Result<XRef, XrefError> {
        let position = self.position(TargetKind::Chapter, slug)?;
        Ok(XRef {
            kind: TargetKind::Chapter,
            url: UrlPath::page(slug),
            label: Label::Chapter(position + 1),
        })
    }

    pub fn resolve_appendix(&self, slug: &str) -> Result<XRef, XrefError> {
        let position = self.position(TargetKind::Appendix, slug)?;
        let letter = appendix_letter(position).ok_or_else(|| XrefError::CapacityExceeded {
            kind: TargetKind::Appendix,
            slug: slug.to_string(),
            position,
        })?;
        Ok(XRef {
            kind: TargetKind::Appendix,
            url: UrlPath::page(slug),
            label: Label::Appendix(letter),
        })
    }

    /// Glossary links are built from the key alone; the key is only checked
    /// when a glossary table is loaded.
    pub fn resolve_glossary(&self, key: &str, text: &str) -> Result<XRef, XrefError> {
        if let Some(glossary) = &self.book.glossary
            && !glossary.contains(key)
        {
            if self.strict_glossary {
                return Err(XrefError::UnresolvedReference {
                    kind: TargetKind::Glossary,
                    key: key.to_string(),
                });
            }
            crate::log!("warning"; "glossary key `{}` has no glossary entry", key);
        }

        Ok(XRef {
            kind: TargetKind::Glossary,
            url: UrlPath::anchor(GLOSSARY_PAGE, "g", key),
            label: Label::Rich(markdownify_inline(text)),
        })
    }

    pub fn resolve_bibliography(&self, key: &str) -> Result<XRef, XrefError> {
        let entry =
            self.book
                .references
                .get(key)
                .ok_or_else(|| XrefError::UnresolvedReference {
                    kind: TargetKind::Bibliography,
                    key: key.to_string(),
                })?;
        Ok(XRef {
            kind: TargetKind::Bibliography,
            url: UrlPath::anchor(REFERENCES_PAGE, "b", key),
            label: Label::Rich(markdownify_inline(&entry.title)),
        })
    }

    fn position(&self, kind: TargetKind, slug: &str) -> Result<usize, XrefError> {
        self.book
            .order
            .position(kind, slug)
            .ok_or_else(|| XrefError::UnresolvedReference {
                kind,
                key: slug.to_string(),
            })
    }
}
