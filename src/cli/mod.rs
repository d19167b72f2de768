//! Command-line interface module.

mod args;
pub mod build;
pub mod check;
pub mod credits;
pub mod toc;

pub use args::{Cli, Commands};
