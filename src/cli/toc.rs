//! Table of contents output.

use crate::{cli::build::load_book, config::BookConfig, toc::Toc};
use anyhow::Result;

/// Print the table of contents as text or JSON.
pub fn print_toc(config: &BookConfig, json: bool, pretty: bool) -> Result<()> {
    let book = load_book(config)?;
    let toc = Toc::generate(&book)?;

    let output = match (json, pretty) {
        (true, true) => serde_json::to_string_pretty(&toc)?,
        (true, false) => serde_json::to_string(&toc)?,
        (false, _) => toc.to_text(),
    };
    println!("{}", output.trim_end());
    Ok(())
}
