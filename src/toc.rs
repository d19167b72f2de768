//! Table of contents: one ordered listing for chapters, one for appendices.

use serde::Serialize;

use crate::book::Book;
use crate::core::{TargetKind, UrlPath};
use crate::utils::html::{escape, escape_attr};
use crate::xref::XrefError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub url: UrlPath,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Toc {
    pub chapters: Vec<TocEntry>,
    pub appendices: Vec<TocEntry>,
}

impl Toc {
    /// Walk the ordering registry and look up each unit's title.
    ///
    /// A slug without a metadata record is an error rather than a blank entry.
    pub fn generate(book: &Book) -> Result<Self, XrefError> {
        Ok(Self {
            chapters: entries(book, TargetKind::Chapter, book.order.chapters())?,
            appendices: entries(book, TargetKind::Appendix, book.order.appendices())?,
        })
    }

    /// Render as two `<ol>` lists, linking under `base_path`.
    pub fn to_html(&self, base_path: &str) -> String {
        format!(
            "<ol class=\"chapters\">\n{}</ol>\n<ol class=\"appendices\">\n{}</ol>\n",
            list_items(&self.chapters, base_path),
            list_items(&self.appendices, base_path)
        )
    }

    /// Plain-text listing for the terminal.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.chapters.iter().enumerate() {
            out.push_str(&format!("{:>3}. {}  {}\n", i + 1, entry.title, entry.url));
        }
        for (i, entry) in self.appendices.iter().enumerate() {
            let letter = crate::xref::appendix_letter(i).unwrap_or('?');
            out.push_str(&format!("{:>3}. {}  {}\n", letter, entry.title, entry.url));
        }
        out
    }
}

fn entries(book: &Book, kind: TargetKind, slugs: &[String]) -> Result<Vec<TocEntry>, XrefError> {
    slugs
        .iter()
        .map(|slug| {
            let title = book.title(slug).ok_or_else(|| XrefError::MissingMetadata {
                kind,
                slug: slug.clone(),
            })?;
            Ok(TocEntry {
                url: UrlPath::page(slug),
                title: title.to_string(),
            })
        })
        .collect()
}

fn list_items(entries: &[TocEntry], base_path: &str) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                escape_attr(&entry.url.href(base_path)),
                escape(&entry.title)
            )
        })
        .collect()
}
