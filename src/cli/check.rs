//! Reference checking without writing output.

use crate::{
    cli::build::load_book, config::BookConfig, log, render::RenderPass,
    utils::plural::plural_count,
};
use anyhow::{Result, bail};

/// Render every unit in memory and report every unresolved reference.
///
/// Unlike `build`, a failing unit does not stop the others from being checked.
pub fn check_book(config: &BookConfig) -> Result<()> {
    let book = load_book(config)?;
    let options = config.render_options();
    let errors = RenderPass::new(&book, &options).check_book();

    if errors.is_empty() {
        log!("check"; "{} ok", plural_count(book.order.len(), "unit"));
        return Ok(());
    }

    for error in &errors {
        log!("error"; "{}", error);
    }
    bail!("check failed with {}", plural_count(errors.len(), "error"))
}
