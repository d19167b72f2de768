//! Page shells and generated listing pages.

use serde::Serialize;

use crate::book::{BibEntry, GlossaryEntry, KeyedTable};
use crate::core::UrlPath;
use crate::utils::html::{escape, escape_attr};
use crate::utils::markdown::{markdownify, markdownify_inline};

/// A rendered page body, not yet wrapped in a document shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub url: UrlPath,
    pub title: String,
    /// Heading label shown above the title (`Chapter 2`), if any.
    pub label: Option<String>,
    pub body: String,
}

impl RenderedPage {
    /// Wrap the body in a minimal HTML document.
    pub fn to_document(&self, book_title: &str) -> String {
        let heading = match &self.label {
            Some(label) => format!(
                "<h1><span class=\"label\">{}</span> {}</h1>\n",
                escape(label),
                escape(&self.title)
            ),
            None => format!("<h1>{}</h1>\n", escape(&self.title)),
        };
        let head_title = if self.title == book_title {
            escape(book_title).into_owned()
        } else {
            format!("{} - {}", escape(&self.title), escape(book_title))
        };
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{head_title}</title>\n</head>\n<body>\n<main>\n{heading}{}</main>\n</body>\n</html>\n",
            self.body
        )
    }
}

/// Definition list owning the `g:<key>` anchors.
pub fn glossary_list(glossary: &KeyedTable<GlossaryEntry>) -> String {
    let mut out = String::from("<dl class=\"glossary\">\n");
    for entry in glossary.iter() {
        out.push_str(&format!(
            "<dt id=\"g:{}\">{}</dt>\n<dd>{}</dd>\n",
            escape_attr(&entry.key),
            markdownify_inline(&entry.term),
            markdownify(&entry.def).trim_end()
        ));
    }
    out.push_str("</dl>\n");
    out
}

/// Reference list owning the `b:<key>` anchors. Only titles are shown.
pub fn references_list(references: &KeyedTable<BibEntry>) -> String {
    let mut out = String::from("<ul class=\"references\">\n");
    for entry in references.iter() {
        out.push_str(&format!(
            "<li id=\"b:{}\">{}</li>\n",
            escape_attr(&entry.key),
            markdownify_inline(&entry.title)
        ));
    }
    out.push_str("</ul>\n");
    out
}
