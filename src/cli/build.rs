//! Book building orchestration.
//!
//! Build phases:
//! - **Load** - Read the data tables into a `Book`
//! - **Render** - Parallel unit rendering into in-memory pages
//! - **Write** - Replace or update the output directory

use crate::{
    book::Book,
    config::BookConfig,
    core::TargetKind,
    data, debug, log,
    logger::ProgressLine,
    render::{RenderPass, RenderedPage},
    utils::plural::plural_count,
};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use std::{fs, path::Path};

/// Load the book's data tables named by the config.
pub fn load_book(config: &BookConfig) -> Result<Book> {
    data::load_book(&config.paths.data)
        .with_context(|| format!("failed to load data from {}", config.paths.data.display()))
}

/// Build the entire book.
///
/// Every page is rendered before anything is written, so a failing
/// reference leaves the previous output untouched.
pub fn build_book(config: &BookConfig) -> Result<()> {
    let book = load_book(config)?;
    let options = config.render_options();
    let pass = RenderPass::new(&book, &options);

    let progress = ProgressLine::new(&[
        ("chapters", book.order.chapters().len()),
        ("appendices", book.order.appendices().len()),
    ]);
    let pages = pass.render_book(|kind| progress.inc(progress_name(kind)));
    match pages {
        Ok(_) => progress.finish(),
        Err(_) => drop(progress),
    }
    let pages = pages.context("render failed")?;

    let written = write_pages(
        &config.paths.output,
        &pages,
        &config.book.title,
        config.build.clean,
    )?;
    debug!("build"; "wrote {}", plural_count(written, "page"));
    log!("build"; "done");
    Ok(())
}

fn progress_name(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Appendix => "appendices",
        _ => "chapters",
    }
}

/// Write each page to `<output>/<url>/index.html`.
///
/// With `clean`, the output directory is removed first. Two pages mapping
/// to the same file is an error, checked before anything is touched.
pub fn write_pages(
    output: &Path,
    pages: &[RenderedPage],
    book_title: &str,
    clean: bool,
) -> Result<usize> {
    let mut seen = FxHashSet::default();
    for page in pages {
        if !seen.insert(page.url.to_output_file()) {
            bail!("more than one page renders to `{}`", page.url);
        }
    }

    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("failed to clear output directory: {}", output.display())
        })?;
    }

    for page in pages {
        let path = output.join(page.url.to_output_file());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, page.to_document(book_title))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UrlPath;
    use tempfile::TempDir;

    fn page(url: UrlPath, title: &str) -> RenderedPage {
        RenderedPage {
            url,
            title: title.to_string(),
            label: None,
            body: "<p>body</p>\n".to_string(),
        }
    }

    #[test]
    fn test_write_pages_layout() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("_site");
        let pages = [page(UrlPath::root(), "Book"), page(UrlPath::page("intro"), "Intro")];

        assert_eq!(write_pages(&output, &pages, "Book", false).unwrap(), 2);
        assert!(output.join("index.html").is_file());
        let intro = fs::read_to_string(output.join("intro/index.html")).unwrap();
        assert!(intro.contains("<title>Intro - Book</title>"));
    }

    #[test]
    fn test_write_pages_clean() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("_site");
        fs::create_dir_all(output.join("stale")).unwrap();
        fs::write(output.join("stale/index.html"), "old").unwrap();

        write_pages(&output, &[page(UrlPath::root(), "Book")], "Book", false).unwrap();
        assert!(output.join("stale/index.html").exists());

        write_pages(&output, &[page(UrlPath::root(), "Book")], "Book", true).unwrap();
        assert!(!output.join("stale").exists());
        assert!(output.join("index.html").exists());
    }

    #[test]
    fn test_write_pages_rejects_shared_output_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("_site");
        let pages = [page(UrlPath::page("x"), "Chapter"), page(UrlPath::page("x"), "Appendix")];

        let err = write_pages(&output, &pages, "Book", false).unwrap_err();
        assert!(err.to_string().contains("/x/"));
        assert!(!output.exists());
    }

    #[test]
    fn test_progress_name() {
        assert_eq!(progress_name(TargetKind::Chapter), "chapters");
        assert_eq!(progress_name(TargetKind::Appendix), "appendices");
    }
}
