//! `{% name key="value" %}` directives embedded in unit sources.
//!
//! | Directive  | Attributes                    |
//! |------------|-------------------------------|
//! | `chapter`  | `slug`                        |
//! | `appendix` | `slug`                        |
//! | `glossary` | `key`, `text`                 |
//! | `cite`     | `key`                         |
//! | `figure`   | `id`, `img`, `alt`, `caption` |
//! | `table`    | `id`, `src`, `caption`        |
//! | `authors`  | `ids` (whitespace separated)  |
//! | `toc`      | -                             |

use std::sync::LazyLock;

use regex::Regex;

use super::RenderError;
use crate::utils::html::parse_attributes;
use crate::utils::markdown::code_ranges;

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%[ \t]*([A-Za-z_][A-Za-z0-9_]*)((?:[^%]|%[^}])*)%\}").unwrap()
});

/// A parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Chapter {
        slug: String,
    },
    Appendix {
        slug: String,
    },
    Glossary {
        key: String,
        text: String,
    },
    Cite {
        key: String,
    },
    Figure {
        id: String,
        img: String,
        alt: String,
        caption: String,
    },
    Table {
        id: String,
        src: String,
        caption: String,
    },
    Authors {
        ids: Vec<String>,
    },
    Toc,
}

impl Directive {
    /// Parse a directive from its name and raw attribute string.
    pub fn parse(name: &str, attrs: &str) -> Result<Self, RenderError> {
        let attrs = Attrs(parse_attributes(attrs));
        let directive = match name {
            "chapter" => Self::Chapter {
                slug: attrs.required("chapter", "slug")?,
            },
            "appendix" => Self::Appendix {
                slug: attrs.required("appendix", "slug")?,
            },
            "glossary" => Self::Glossary {
                key: attrs.required("glossary", "key")?,
                text: attrs.required("glossary", "text")?,
            },
            "cite" => Self::Cite {
                key: attrs.required("cite", "key")?,
            },
            "figure" => Self::Figure {
                id: attrs.required("figure", "id")?,
                img: attrs.required("figure", "img")?,
                alt: attrs.optional("alt"),
                caption: attrs.required("figure", "caption")?,
            },
            "table" => Self::Table {
                id: attrs.required("table", "id")?,
                src: attrs.required("table", "src")?,
                caption: attrs.required("table", "caption")?,
            },
            "authors" => Self::Authors {
                ids: attrs
                    .optional("ids")
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
            },
            "toc" => Self::Toc,
            other => return Err(RenderError::UnknownDirective(other.to_string())),
        };
        Ok(directive)
    }

    /// Whether the expansion is block-level HTML.
    pub fn is_block(&self) -> bool {
        matches!(self, Self::Figure { .. } | Self::Table { .. } | Self::Toc)
    }
}

struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn required(&self, directive: &'static str, attr: &'static str) -> Result<String, RenderError> {
        self.get(attr)
            .map(str::to_string)
            .ok_or(RenderError::MissingAttribute { directive, attr })
    }

    fn optional(&self, attr: &str) -> String {
        self.get(attr).unwrap_or_default().to_string()
    }
}

/// Replace every directive in `source`, in document order.
///
/// `expand_one` is called exactly once per directive, top to bottom, and the
/// first error aborts the expansion. Directives inside code spans and code
/// blocks are left as written.
pub fn expand<F>(source: &str, mut expand_one: F) -> Result<String, RenderError>
where
    F: FnMut(Directive) -> Result<String, RenderError>,
{
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    let code = code_ranges(source);

    for caps in DIRECTIVE_RE.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        if code.iter().any(|range| range.contains(&whole.start())) {
            continue;
        }
        let directive = Directive::parse(&caps[1], &caps[2])?;
        let block = directive.is_block();

        out.push_str(&source[last..whole.start()]);
        let html = expand_one(directive)?;
        if block {
            // Keep block HTML separated from surrounding Markdown
            out.push_str("\n\n");
            out.push_str(html.trim_end());
            out.push_str("\n\n");
        } else {
            out.push_str(&html);
        }
        last = whole.end();
    }

    out.push_str(&source[last..]);
    Ok(out)
}
