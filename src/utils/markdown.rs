//! Markdown to HTML helpers ("markdownify").

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, html};

/// Extensions enabled for chapter bodies and table sources.
fn block_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts
}

/// Convert block-level Markdown to HTML.
pub fn markdownify(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, block_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Byte ranges of code spans and code blocks (fenced or indented), in
/// source order. Their contents are rendered verbatim.
pub fn code_ranges(markdown: &str) -> Vec<Range<usize>> {
    Parser::new_ext(markdown, block_options())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Code(_) | Event::Start(Tag::CodeBlock(_)) => Some(range),
            _ => None,
        })
        .collect()
}

/// Convert a short Markdown fragment to inline HTML.
///
/// The result is trimmed and a single enclosing `<p>...</p>` is removed, so
/// `*Dune*` becomes `<em>Dune</em>` rather than `<p><em>Dune</em></p>`.
/// Multi-paragraph input keeps its paragraph markup.
pub fn markdownify_inline(text: &str) -> String {
    let rendered = markdownify(text);
    strip_paragraph(rendered.trim()).to_string()
}

/// Remove one enclosing `<p>...</p>` pair if it wraps the whole fragment.
pub fn strip_paragraph(html: &str) -> &str {
    match html
        .strip_prefix("<p>")
        .and_then(|inner| inner.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner,
        _ => html,
    }
}
