//! URL path type for canonical book URLs.
//!
//! Canonical URLs are site-root-relative and never carry the deployment
//! prefix. The prefix is applied only when an `href` is rendered.

use std::borrow::Borrow;
use std::sync::Arc;

use serde::Serialize;

/// Canonical URL of a page or an anchor inside a page
///
/// Invariants:
/// - Always starts with `/`
/// - Page URLs end with `/`
/// - Anchor URLs are a page URL followed by `#<fragment>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Page URL for a unit slug: `/<slug>/`.
    ///
    /// The slug is used verbatim; slugs are opaque tokens.
    pub fn page(slug: &str) -> Self {
        Self(Arc::from(format!("/{slug}/")))
    }

    /// Anchor URL inside a page: `/<page>/#<prefix>:<key>`.
    pub fn anchor(page: &str, prefix: &str, key: &str) -> Self {
        Self(Arc::from(format!("/{page}/#{prefix}:{key}")))
    }

    /// Site root: `/`.
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    /// Get the URL as a string slice.
    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Page part of the URL (everything before `#`).
    pub fn page_part(&self) -> &str {
        self.0.split('#').next().unwrap_or(&self.0)
    }

    /// Render as an `href` under a deployment base path.
    ///
    /// `base_path` is normalized to `/segment` form; an empty base path
    /// leaves the URL unchanged (Jekyll's `relative_url`).
    pub fn href(&self, base_path: &str) -> String {
        let base = base_path.trim_matches('/');
        if base.is_empty() {
            self.0.to_string()
        } else {
            format!("/{base}{}", self.0)
        }
    }

    /// Output file path relative to the output directory (`<slug>/index.html`).
    pub fn to_output_file(&self) -> std::path::PathBuf {
        let page = self.page_part().trim_matches('/');
        if page.is_empty() {
            std::path::PathBuf::from("index.html")
        } else {
            std::path::Path::new(page).join("index.html")
        }
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
