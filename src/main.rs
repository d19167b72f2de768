//! bookref - render a multi-chapter book with cross-references and numbering.

mod book;
mod cli;
mod config;
mod core;
mod counter;
mod credits;
mod data;
mod logger;
mod render;
mod toc;
mod utils;
mod xref;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::BookConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = BookConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_book(&config),
        Commands::Check { .. } => cli::check::check_book(&config),
        Commands::Toc { json, pretty } => cli::toc::print_toc(&config, *json, *pretty),
        Commands::Credits { ids } => cli::credits::print_credits(&config, ids),
    }
}
