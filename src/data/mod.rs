//! Data loader: reads the book's tables from the data directory.
//!
//! Each table lives in `<data>/<name>.<ext>` where `ext` is one of `toml`,
//! `json`, `yml` or `yaml`. List tables may be a bare array (JSON, YAML) or
//! wrapped as `entries = [...]` (required for TOML, accepted everywhere).
//!
//! | Table          | Required | Record                        |
//! |----------------|----------|-------------------------------|
//! | `order`        | yes      | `{ chapters, appendices }`    |
//! | `units`        | yes      | `{ slug, title, ... }`        |
//! | `contributors` | no       | `{ github, personal, family }`|
//! | `references`   | no       | `{ key, title }`              |
//! | `glossary`     | no       | `{ key, term, def }`          |

pub mod error;

pub use error::DataError;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::book::{Book, OrderData, OrderingRegistry};
use crate::{debug, utils::plural::plural_count};

/// Extensions tried for each table, in priority order.
const EXTENSIONS: [&str; 4] = ["toml", "json", "yml", "yaml"];

/// A list table, either bare or wrapped in `entries`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Records<T> {
    Bare(Vec<T>),
    Table { entries: Vec<T> },
}

impl<T> Records<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Table { entries: items } => items,
        }
    }
}

/// Locate `<dir>/<name>.<ext>` for the first supported extension present.
pub fn find_table(dir: &Path, name: &str) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .find(|path| path.is_file())
}

/// Parse one data file, choosing the format from its extension.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content =
        fs::read_to_string(path).map_err(|err| DataError::Io(path.to_path_buf(), err))?;
    let parse_error = |message: String| DataError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.message().to_string())),
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Some("yml" | "yaml") => {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
        }
        _ => Err(DataError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn load_required<T: DeserializeOwned>(dir: &Path, name: &'static str) -> Result<T, DataError> {
    let path = find_table(dir, name).ok_or_else(|| DataError::NotFound {
        name,
        dir: dir.to_path_buf(),
    })?;
    debug!("data"; "loading {}", path.display());
    load_file(&path)
}

fn load_records<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<Vec<T>>, DataError> {
    let Some(path) = find_table(dir, name) else {
        return Ok(None);
    };
    debug!("data"; "loading {}", path.display());
    load_file::<Records<T>>(&path).map(|records| Some(records.into_vec()))
}

/// Load every table under `dir` into a [`Book`].
///
/// `order` and `units` must exist. Missing optional tables load as empty,
/// except the glossary, which stays `None` so glossary keys go unchecked.
pub fn load_book(dir: &Path) -> Result<Book, DataError> {
    let order: OrderData = load_required(dir, "order")?;
    let units: Records<_> = load_required(dir, "units")?;

    let mut book = Book::new(OrderingRegistry::from_data(order)?, units.into_vec())?;

    if let Some(records) = load_records(dir, "contributors")? {
        book = book.with_contributors(records)?;
    }
    if let Some(records) = load_records(dir, "references")? {
        book = book.with_references(records)?;
    }
    if let Some(records) = load_records(dir, "glossary")? {
        book = book.with_glossary(records)?;
    }

    debug!(
        "data";
        "{} in order, {}, {}",
        plural_count(book.order.len(), "unit"),
        plural_count(book.contributors.len(), "contributor"),
        plural_count(book.references.len(), "reference")
    );
    Ok(book)
}
