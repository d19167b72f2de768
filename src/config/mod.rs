//! Book configuration management.
//!
//! Handles loading and validating `book.toml` configuration files.
//!
//! # Sections
//!
//! | Section   | Purpose                                         |
//! |-----------|-------------------------------------------------|
//! | `[book]`  | Book metadata (title, deployment url)           |
//! | `[paths]` | Content, data and output directories            |
//! | `[build]` | Build behaviour (clean output, strict glossary) |

mod error;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
use util::{extract_url_path, find_config_file};

use crate::{
    cli::{Cli, Commands},
    log,
    render::RenderOptions,
    utils::path::normalize_path,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// sections
// ============================================================================

/// `[book]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookSection {
    pub title: String,
    /// Deployment URL; its path component becomes the link prefix.
    pub url: Option<String>,
}

/// `[paths]` section, relative to the directory holding `book.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub content: PathBuf,
    pub data: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            content: "content".into(),
            data: "_data".into(),
            output: "_site".into(),
        }
    }
}

/// `[build]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Remove the output directory before writing pages.
    pub clean: bool,
    /// Reject glossary keys missing from a loaded glossary table.
    pub strict_glossary: bool,
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing book.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Link prefix derived from `book.url`, e.g. `/my-book` (internal use only)
    #[serde(skip)]
    pub base_path: String,

    #[serde(default)]
    pub book: BookSection,

    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub build: BuildSection,
}

impl BookConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file; the project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            bail!(ConfigError::Validation(format!(
                "config file `{}` not found in this or any parent directory",
                cli.config.display()
            )));
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.finalize(&root, cli);
        config.validate()?;

        Ok(config)
    }

    /// Resolve paths, apply CLI overrides and derive the link prefix.
    fn finalize(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.paths.content, cli.content.as_ref());
        Self::update_option(&mut self.paths.output, cli.output.as_ref());
        self.normalize_paths(root);
        self.apply_command_options(cli);
        self.sync_base_path_from_url();
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Options for a render pass over this book.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            title: self.book.title.clone(),
            content_dir: self.paths.content.clone(),
            base_path: self.base_path.clone(),
            strict_glossary: self.build.strict_glossary,
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build {
                clean,
                strict_glossary,
            } => {
                self.build.clean |= *clean;
                self.build.strict_glossary |= *strict_glossary;
            }
            Commands::Check { strict_glossary } => {
                self.build.strict_glossary |= *strict_glossary;
            }
            Commands::Toc { .. } | Commands::Credits { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Derive `base_path` from `book.url`.
    ///
    /// `https://example.github.io/my-book/` yields `/my-book`; a bare host
    /// yields an empty prefix.
    fn sync_base_path_from_url(&mut self) {
        self.base_path = match self.book.url.as_deref().and_then(extract_url_path) {
            Some(path) if !path.is_empty() => format!("/{path}"),
            _ => String::new(),
        };
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.paths.content = normalize_path(&root.join(&self.paths.content));
        self.paths.data = normalize_path(&root.join(&self.paths.data));
        self.paths.output = normalize_path(&root.join(&self.paths.output));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if self.book.title.trim().is_empty() {
            diag.error_with_hint(
                "book.title",
                "book title must not be empty",
                "set `title = \"...\"` under [book]",
            );
        }

        if let Some(url) = &self.book.url
            && extract_url_path(url).is_none()
        {
            diag.error_with_hint(
                "book.url",
                format!("`{url}` is not a valid absolute URL"),
                "include the scheme, e.g. `https://example.org/book`",
            );
        }

        if self.paths.output == self.paths.content || self.paths.output == self.paths.data {
            diag.error_with_hint(
                "paths.output",
                "output directory overlaps an input directory",
                "use a dedicated directory such as `_site`",
            );
        }

        if !self.paths.data.is_dir() {
            diag.error(
                "paths.data",
                format!("data directory `{}` not found", self.paths.data.display()),
            );
        }

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("bookref").chain(args.iter().copied()))
    }

    fn finalized(content: &str, root: &Path, args: &[&str]) -> BookConfig {
        let (mut config, ignored) = BookConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty(), "unknown fields: {:?}", ignored);
        config.finalize(root, &cli(args));
        config
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(BookConfig::parse_with_ignored("[book\ntitle = \"My Book\"").is_err());
    }

    #[test]
    fn test_defaults() {
        let (config, _) = BookConfig::parse_with_ignored("[book]\ntitle = \"T\"").unwrap();
        assert_eq!(config.paths.content, PathBuf::from("content"));
        assert_eq!(config.paths.data, PathBuf::from("_data"));
        assert_eq!(config.paths.output, PathBuf::from("_site"));
        assert!(!config.build.clean);
        assert!(!config.build.strict_glossary);
        assert!(config.book.url.is_none());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[book]\ntitle = \"T\"\nsubtitle = \"x\"\n[unknown_section]\nfield = 1";
        let (config, ignored) = BookConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.book.title, "T");
        assert!(ignored.iter().any(|f| f.contains("subtitle")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_base_path_from_url() {
        let dir = TempDir::new().unwrap();
        let config = finalized(
            "[book]\ntitle = \"T\"\nurl = \"https://example.github.io/my-book/\"",
            dir.path(),
            &["build"],
        );
        assert_eq!(config.base_path, "/my-book");
        assert_eq!(config.render_options().base_path, "/my-book");

        let config = finalized(
            "[book]\ntitle = \"T\"\nurl = \"https://example.org\"",
            dir.path(),
            &["build"],
        );
        assert_eq!(config.base_path, "");
    }

    #[test]
    fn test_paths_resolved_against_root() {
        let dir = TempDir::new().unwrap();
        let config = finalized(
            "[book]\ntitle = \"T\"\n[paths]\ndata = \"data\"",
            dir.path(),
            &["check"],
        );
        let root = normalize_path(dir.path());
        assert_eq!(config.paths.data, root.join("data"));
        assert_eq!(config.paths.content, root.join("content"));
        assert_eq!(config.root, root);
    }

    #[test]
    fn test_cli_overrides() {
        let dir = TempDir::new().unwrap();
        let config = finalized(
            "[book]\ntitle = \"T\"",
            dir.path(),
            &["--output", "public", "build", "--clean", "--strict-glossary"],
        );
        assert!(config.build.clean);
        assert!(config.build.strict_glossary);
        assert!(config.paths.output.ends_with("public"));

        let config = finalized("[build]\nstrict_glossary = true", dir.path(), &["check"]);
        assert!(config.render_options().strict_glossary);
    }

    #[test]
    fn test_validate_collects_errors() {
        let dir = TempDir::new().unwrap();
        let config = finalized(
            "[book]\nurl = \"not a url\"\n[paths]\noutput = \"content\"",
            dir.path(),
            &["build"],
        );
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        let fields: Vec<_> = diag.errors().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["book.title", "book.url", "paths.output", "paths.data"]);
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("_data")).unwrap();
        let config = finalized("[book]\ntitle = \"T\"", dir.path(), &["build"]);
        assert!(config.validate().is_ok());
    }
}
