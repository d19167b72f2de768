//! Render pass: directive expansion, numbering and Markdown conversion.
//!
//! Each unit is rendered by one top-to-bottom traversal that owns a fresh
//! [`ScopedCounter`]. Units are independent of each other, so they are
//! rendered in parallel; the book data is only ever borrowed.

pub mod directive;
mod error;
mod page;

pub use error::{RenderError, UnitError};
pub use page::RenderedPage;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::book::Book;
use crate::core::{ContentKind, TargetKind, UrlPath};
use crate::counter::ScopedCounter;
use crate::credits::render_authors;
use crate::toc::Toc;
use crate::utils::html::escape_attr;
use crate::utils::markdown::{markdownify, markdownify_inline};
use crate::xref::{GLOSSARY_PAGE, REFERENCES_PAGE, Resolver, XrefError};
use directive::Directive;

/// Scope name used for numbering on the index page.
const INDEX_SCOPE: &str = "index";

/// Settings for one render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Book title (index page title and document `<title>` suffix).
    pub title: String,
    /// Directory holding `<slug>.md` sources and table files.
    pub content_dir: PathBuf,
    /// Deployment path prefix applied to every `href`.
    pub base_path: String,
    /// Reject glossary keys missing from a loaded glossary table.
    pub strict_glossary: bool,
}

/// One render pass over a loaded book.
pub struct RenderPass<'a> {
    book: &'a Book,
    resolver: Resolver<'a>,
    options: &'a RenderOptions,
}

impl<'a> RenderPass<'a> {
    pub fn new(book: &'a Book, options: &'a RenderOptions) -> Self {
        Self {
            book,
            resolver: Resolver::new(book).strict_glossary(options.strict_glossary),
            options,
        }
    }

    /// Render every chapter and appendix, in parallel, keeping registry order.
    ///
    /// `on_done` is called from worker threads as each unit finishes.
    pub fn render_units<F>(&self, on_done: F) -> Vec<Result<RenderedPage, UnitError>>
    where
        F: Fn(TargetKind) + Sync,
    {
        let units: Vec<_> = self.book.order.units().collect();
        units
            .par_iter()
            .map(|&(kind, slug)| {
                let result = self
                    .render_unit(kind, slug)
                    .map_err(|e| UnitError::new(format!("{kind} `{slug}`"), e));
                on_done(kind);
                result
            })
            .collect()
    }

    /// Render the whole site in memory. Nothing is returned unless every
    /// page rendered; the first error in registry order wins.
    pub fn render_book<F>(&self, on_done: F) -> Result<Vec<RenderedPage>, UnitError>
    where
        F: Fn(TargetKind) + Sync,
    {
        let mut pages = vec![self.render_index()?];
        for result in self.render_units(on_done) {
            pages.push(result?);
        }
        self.attach_listings(&mut pages);
        Ok(pages)
    }

    /// Render every unit and return all failures.
    ///
    /// A problem already reported from the book data is not repeated for
    /// the unit it belongs to.
    pub fn check_book(&self) -> Vec<UnitError> {
        let problems = self.book.validate();
        let already_reported = |e: &UnitError| {
            matches!(&e.error, RenderError::Xref(xref) if problems.contains(xref))
        };

        let mut errors = Vec::new();
        if let Err(e) = self.render_index()
            && !already_reported(&e)
        {
            errors.push(e);
        }
        errors.extend(
            self.render_units(|_| ())
                .into_iter()
                .filter_map(Result::err)
                .filter(|e| !already_reported(e)),
        );

        let mut all: Vec<_> = problems
            .iter()
            .cloned()
            .map(|e| UnitError::new("book data", e))
            .collect();
        all.append(&mut errors);
        all
    }

    /// Render a single chapter or appendix.
    pub fn render_unit(&self, kind: TargetKind, slug: &str) -> Result<RenderedPage, RenderError> {
        let title = self
            .book
            .title(slug)
            .ok_or_else(|| XrefError::MissingMetadata {
                kind,
                slug: slug.to_string(),
            })?;
        let label = match kind {
            TargetKind::Appendix => self.resolver.resolve_appendix(slug)?.label,
            _ => self.resolver.resolve_chapter(slug)?.label,
        };

        let path = self.source_path(slug);
        let source =
            std::fs::read_to_string(&path).map_err(|e| RenderError::Source(path.clone(), e))?;
        crate::debug!("render"; "{} `{}` from {}", kind, slug, path.display());

        Ok(RenderedPage {
            url: UrlPath::page(slug),
            title: title.to_string(),
            label: Some(label.to_string()),
            body: self.render_source(slug, &source)?,
        })
    }

    /// Expand directives in `source` and convert it to HTML.
    ///
    /// Figures and tables are numbered within `scope`, in document order.
    pub fn render_source(&self, scope: &str, source: &str) -> Result<String, RenderError> {
        let mut counter = ScopedCounter::new();
        let expanded =
            directive::expand(source, |d| self.expand_directive(d, scope, &mut counter))?;
        Ok(markdownify(&expanded))
    }

    /// Index page: `index.md` if present, otherwise the table of contents.
    fn render_index(&self) -> Result<RenderedPage, UnitError> {
        let tag = |e: RenderError| UnitError::new("index page", e);
        let path = self.options.content_dir.join("index.md");
        let body = if path.is_file() {
            let source = std::fs::read_to_string(&path)
                .map_err(|e| tag(RenderError::Source(path.clone(), e)))?;
            self.render_source(INDEX_SCOPE, &source).map_err(tag)?
        } else {
            Toc::generate(self.book)
                .map_err(|e| tag(e.into()))?
                .to_html(&self.options.base_path)
        };
        Ok(RenderedPage {
            url: UrlPath::root(),
            title: self.options.title.clone(),
            label: None,
            body,
        })
    }

    /// Add glossary and reference listings, either to the unit that owns
    /// that URL or as standalone pages.
    fn attach_listings(&self, pages: &mut Vec<RenderedPage>) {
        if let Some(glossary) = &self.book.glossary {
            attach(pages, GLOSSARY_PAGE, "Glossary", page::glossary_list(glossary));
        }
        if !self.book.references.is_empty() {
            attach(
                pages,
                REFERENCES_PAGE,
                "References",
                page::references_list(&self.book.references),
            );
        }
    }

    fn expand_directive(
        &self,
        directive: Directive,
        scope: &str,
        counter: &mut ScopedCounter,
    ) -> Result<String, RenderError> {
        let base = self.options.base_path.as_str();
        let html = match directive {
            Directive::Chapter { slug } => self.resolver.resolve_chapter(&slug)?.to_html(base),
            Directive::Appendix { slug } => self.resolver.resolve_appendix(&slug)?.to_html(base),
            Directive::Glossary { key, text } => {
                self.resolver.resolve_glossary(&key, &text)?.to_html(base)
            }
            Directive::Cite { key } => self.resolver.resolve_bibliography(&key)?.to_html(base),
            Directive::Figure {
                id,
                img,
                alt,
                caption,
            } => {
                let number = counter.next(ContentKind::Figure, scope);
                format!(
                    "<figure id=\"{}\">\n  <img src=\"./{}\" alt=\"{}\">\n  <figcaption>{} {}: {}</figcaption>\n</figure>",
                    escape_attr(&id),
                    escape_attr(&img),
                    escape_attr(&alt),
                    number.kind.caption_label(),
                    number.ordinal,
                    markdownify_inline(&caption)
                )
            }
            Directive::Table { id, src, caption } => {
                let path = self.options.content_dir.join(&src);
                let table = std::fs::read_to_string(&path)
                    .map_err(|e| RenderError::Include(path.clone(), e))?;
                let number = counter.next(ContentKind::Table, scope);
                format!(
                    "<div class=\"table\" id=\"{}\">\n{}\n<p>{} {}: {}</p>\n</div>",
                    escape_attr(&id),
                    markdownify(&table).trim(),
                    number.kind.caption_label(),
                    number.ordinal,
                    markdownify_inline(&caption)
                )
            }
            Directive::Authors { ids } => render_authors(&self.book.contributors, &ids)?,
            Directive::Toc => Toc::generate(self.book)?.to_html(base),
        };
        Ok(html)
    }

    fn source_path(&self, slug: &str) -> PathBuf {
        source_path(&self.options.content_dir, slug)
    }
}

/// `<content>/<slug>.md`
pub fn source_path(content_dir: &Path, slug: &str) -> PathBuf {
    content_dir.join(format!("{slug}.md"))
}

fn attach(pages: &mut Vec<RenderedPage>, slug: &str, title: &str, listing: String) {
    let url = UrlPath::page(slug);
    match pages.iter_mut().find(|page| page.url == url) {
        Some(page) => page.body.push_str(&listing),
        None => pages.push(RenderedPage {
            url,
            title: title.to_string(),
            label: None,
            body: listing,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{BibEntry, Contributor, GlossaryEntry, OrderingRegistry, UnitMeta};
    use std::fs;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_book() -> Book {
        let order =
            OrderingRegistry::new(strings(&["intro", "design"]), strings(&["glossary"])).unwrap();
        Book::new(
            order,
            vec![
                UnitMeta::new("intro", "Introduction"),
                UnitMeta::new("design", "Design"),
                UnitMeta::new("glossary", "Glossary"),
            ],
        )
        .unwrap()
        .with_contributors(vec![
            Contributor::new("ada", "Ada", "Lovelace"),
            Contributor::new("alan", "Alan", "Turing"),
        ])
        .unwrap()
        .with_references(vec![BibEntry {
            key: "Knuth1984".to_string(),
            title: "Literate Programming".to_string(),
        }])
        .unwrap()
        .with_glossary(vec![GlossaryEntry {
            key: "api".to_string(),
            term: "API".to_string(),
            def: "Application programming interface.".to_string(),
        }])
        .unwrap()
    }

    fn site(files: &[(&str, &str)]) -> (TempDir, RenderOptions) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let options = RenderOptions {
            title: "Sample".to_string(),
            content_dir: dir.path().to_path_buf(),
            ..RenderOptions::default()
        };
        (dir, options)
    }

    const INTRO: &str = r#"Welcome, by {% authors ids="ada alan" %}.

{% figure id="f-one" img="one.svg" alt="One" caption="The *first* figure" %}

{% table id="t-one" src="one.tbl" caption="First table" %}

{% figure id="f-two" img="two.svg" alt="Two" caption="Second" %}

See {% chapter slug="design" %}, {% appendix slug="glossary" %},
{% glossary key="api" text="APIs" %} and {% cite key="Knuth1984" %}.
"#;

    const TABLE: &str = "| A | B |\n|---|---|\n| 1 | 2 |\n";

    #[test]
    fn test_render_source_numbers_in_document_order() {
        let book = sample_book();
        let (_dir, options) = site(&[("one.tbl", TABLE)]);
        let pass = RenderPass::new(&book, &options);
        let html = pass.render_source("intro", INTRO).unwrap();

        assert!(html.contains("<figcaption>Figure 1: The <em>first</em> figure</figcaption>"));
        assert!(html.contains("<figcaption>Figure 2: Second</figcaption>"));
        assert!(html.contains("<p>Table 1: First table</p>"));
        assert!(html.contains("<img src=\"./one.svg\" alt=\"One\">"));
        assert!(html.contains("<div class=\"table\" id=\"t-one\">"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_render_source_links() {
        let book = sample_book();
        let (_dir, options) = site(&[("one.tbl", TABLE)]);
        let html = RenderPass::new(&book, &options)
            .render_source("intro", INTRO)
            .unwrap();

        // Markdown decodes the &nbsp; entity into U+00A0
        assert!(html.contains("<a href=\"/design/\">Chapter\u{a0}2</a>"));
        assert!(html.contains("<a href=\"/glossary/\">Appendix\u{a0}A</a>"));
        assert!(html.contains("<a class=\"glossary\" href=\"/glossary/#g:api\">APIs</a>"));
        assert!(html.contains(
            "<a class=\"references\" href=\"/references/#b:Knuth1984\">Literate Programming</a>"
        ));
        assert!(html.contains(
            "<a href=\"https://github.com/ada\">Ada Lovelace</a> and <a href=\"https://github.com/alan\">Alan Turing</a>"
        ));
    }

    #[test]
    fn test_render_source_base_path() {
        let book = sample_book();
        let (_dir, mut options) = site(&[]);
        options.base_path = "/book".to_string();
        let html = RenderPass::new(&book, &options)
            .render_source("intro", r#"{% chapter slug="intro" %}"#)
            .unwrap();
        assert_eq!(html, "<p><a href=\"/book/intro/\">Chapter\u{a0}1</a></p>\n");
    }

    #[test]
    fn test_each_render_restarts_numbering() {
        let book = sample_book();
        let (_dir, options) = site(&[]);
        let pass = RenderPass::new(&book, &options);
        let source = r#"{% figure id="f" img="x.png" caption="x" %}"#;
        assert!(pass.render_source("intro", source).unwrap().contains("Figure 1:"));
        assert!(pass.render_source("design", source).unwrap().contains("Figure 1:"));
    }

    #[test]
    fn test_unresolved_reference_aborts() {
        let book = sample_book();
        let (_dir, options) = site(&[]);
        let err = RenderPass::new(&book, &options)
            .render_source("intro", r#"ok {% chapter slug="missing" %}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Xref(XrefError::UnresolvedReference {
                kind: TargetKind::Chapter,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_contributor_aborts() {
        let book = sample_book();
        let (_dir, options) = site(&[]);
        let err = RenderPass::new(&book, &options)
            .render_source("intro", r#"{% authors ids="ada bob" %}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Xref(XrefError::UnknownContributor { ref id }) if id == "bob"
        ));
    }

    #[test]
    fn test_missing_table_source() {
        let book = sample_book();
        let (_dir, options) = site(&[]);
        let err = RenderPass::new(&book, &options)
            .render_source("intro", r#"{% table id="t" src="nope.tbl" caption="x" %}"#)
            .unwrap_err();
        assert!(matches!(err, RenderError::Include(..)));
    }

    #[test]
    fn test_render_book() {
        let book = sample_book();
        let (_dir, options) = site(&[
            ("intro.md", INTRO),
            ("one.tbl", TABLE),
            ("design.md", "# Design\n\n{% figure id=\"d\" img=\"d.png\" caption=\"D\" %}\n"),
            ("glossary.md", "Terms used in this book.\n"),
        ]);
        let pass = RenderPass::new(&book, &options);
        let pages = pass.render_book(|_| ()).unwrap();

        let urls: Vec<_> = pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/intro/", "/design/", "/glossary/", "/references/"]);

        // Index falls back to the table of contents
        assert!(pages[0].body.contains("<ol class=\"chapters\">"));
        assert_eq!(pages[1].label.as_deref(), Some("Chapter 1"));
        assert_eq!(pages[3].label.as_deref(), Some("Appendix A"));
        // Chapter numbering restarts in each unit
        assert!(pages[2].body.contains("Figure 1: D"));
        // Glossary listing is attached to the unit that owns /glossary/
        assert!(pages[3].body.contains("Terms used in this book."));
        assert!(pages[3].body.contains("<dt id=\"g:api\">API</dt>"));
        assert!(pages[4].body.contains("<li id=\"b:Knuth1984\">"));
    }

    #[test]
    fn test_render_book_is_idempotent() {
        let book = sample_book();
        let (_dir, options) = site(&[
            ("intro.md", INTRO),
            ("one.tbl", TABLE),
            ("design.md", "{% figure id=\"d\" img=\"d.png\" caption=\"D\" %}"),
            ("glossary.md", ""),
        ]);
        let pass = RenderPass::new(&book, &options);
        let first = pass.render_book(|_| ()).unwrap();
        let second = RenderPass::new(&book, &options).render_book(|_| ()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_book_uses_index_source() {
        let book = sample_book();
        let (_dir, options) = site(&[
            ("index.md", "Start with {% chapter slug=\"intro\" %}.\n\n{% toc %}\n"),
            ("intro.md", "hi"),
            ("design.md", "hi"),
            ("glossary.md", "hi"),
        ]);
        let pages = RenderPass::new(&book, &options).render_book(|_| ()).unwrap();
        assert!(pages[0].body.contains("Chapter\u{a0}1"));
        assert!(pages[0].body.contains("<ol class=\"appendices\">"));
        assert_eq!(pages[0].title, "Sample");
    }

    #[test]
    fn test_render_book_fails_without_partial_output() {
        let book = sample_book();
        let (_dir, options) = site(&[
            ("intro.md", "{% cite key=\"nobody\" %}"),
            ("design.md", "fine"),
            ("glossary.md", "fine"),
        ]);
        let err = RenderPass::new(&book, &options)
            .render_book(|_| ())
            .unwrap_err();
        assert_eq!(err.unit, "chapter `intro`");
        assert!(matches!(
            err.error,
            RenderError::Xref(XrefError::UnresolvedReference {
                kind: TargetKind::Bibliography,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_unit_source() {
        let book = sample_book();
        let (_dir, options) = site(&[]);
        let err = RenderPass::new(&book, &options)
            .render_unit(TargetKind::Chapter, "intro")
            .unwrap_err();
        assert!(matches!(err, RenderError::Source(..)));
    }

    #[test]
    fn test_check_book_collects_every_failure() {
        let book = sample_book();
        let (_dir, options) = site(&[
            ("intro.md", "{% chapter slug=\"nope\" %}"),
            ("design.md", "{% appendix slug=\"nope\" %}"),
            ("glossary.md", "fine"),
        ]);
        let errors = RenderPass::new(&book, &options).check_book();
        let units: Vec<_> = errors.iter().map(|e| e.unit.as_str()).collect();
        assert_eq!(units, vec!["chapter `intro`", "chapter `design`"]);
    }

    #[test]
    fn test_check_book_reports_missing_metadata_once() {
        let order = OrderingRegistry::new(strings(&["intro", "ghost"]), vec![]).unwrap();
        let book = Book::new(order, vec![UnitMeta::new("intro", "Introduction")]).unwrap();
        let (_dir, options) = site(&[("intro.md", "fine"), ("ghost.md", "boo")]);

        let errors = RenderPass::new(&book, &options).check_book();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].unit, "book data");
        assert!(matches!(
            &errors[0].error,
            RenderError::Xref(XrefError::MissingMetadata { slug, .. }) if slug == "ghost"
        ));
    }

    #[test]
    fn test_render_source_leaves_code_untouched() {
        let book = sample_book();
        let (_dir, options) = site(&[]);
        let source = "Syntax:\n\n```\n{% chapter slug=\"example\" %}\n```\n\n\
                      Inline `{% figure id=\"f\" img=\"a\" caption=\"c\" %}` code.\n";
        let html = RenderPass::new(&book, &options)
            .render_source("intro", source)
            .unwrap();

        assert!(html.contains("<pre><code>{% chapter slug="));
        assert!(html.contains("<p>Inline <code>{% figure id="));
        assert!(!html.contains("<figure"));
    }

    #[test]
    fn test_render_units_reports_progress() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let book = sample_book();
        let (_dir, options) = site(&[("intro.md", ""), ("design.md", ""), ("glossary.md", "")]);
        let done = AtomicUsize::new(0);
        let results = RenderPass::new(&book, &options).render_units(|_| {
            done.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(results.len(), 3);
        assert_eq!(done.load(Ordering::Relaxed), 3);
    }
}
