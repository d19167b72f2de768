//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Book renderer with cross-references and sequential numbering
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: book.toml)
    #[arg(short = 'C', long, default_value = "book.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every unit and write the site
    #[command(visible_alias = "b")]
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        /// Fail on glossary keys missing from the glossary table
        #[arg(short = 'G', long)]
        strict_glossary: bool,
    },

    /// Resolve every reference without writing output
    #[command(visible_alias = "c")]
    Check {
        /// Fail on glossary keys missing from the glossary table
        #[arg(short = 'G', long)]
        strict_glossary: bool,
    },

    /// Print the table of contents
    #[command(visible_alias = "t")]
    Toc {
        /// Output JSON instead of text
        #[arg(short, long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long, requires = "json")]
        pretty: bool,
    },

    /// Print the author credit line for contributor ids
    Credits {
        /// Contributor identifiers, in credit order
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
