//! Author credit output.

use crate::{cli::build::load_book, config::BookConfig, credits::render_authors};
use anyhow::Result;

/// Print the joined, hyperlinked author list for `ids`.
pub fn print_credits(config: &BookConfig, ids: &[String]) -> Result<()> {
    let book = load_book(config)?;
    println!("{}", render_authors(&book.contributors, ids)?);
    Ok(())
}
