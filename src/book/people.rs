//! Contributor records.

use serde::Deserialize;

use super::table::Keyed;

/// A contributor, keyed by GitHub handle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contributor {
    pub github: String,
    #[serde(default)]
    pub personal: String,
    #[serde(default)]
    pub family: String,
    /// Profile link override; defaults to the GitHub profile.
    #[serde(default)]
    pub url: Option<String>,
}

impl Contributor {
    #[cfg(test)]
    pub fn new(github: &str, personal: &str, family: &str) -> Self {
        Self {
            github: github.to_string(),
            personal: personal.to_string(),
            family: family.to_string(),
            url: None,
        }
    }

    /// `"<personal> <family>"`, falling back to the handle when both are empty.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.personal, self.family);
        let name = name.trim();
        if name.is_empty() {
            self.github.clone()
        } else {
            name.to_string()
        }
    }

    pub fn profile_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("https://github.com/{}", self.github),
        }
    }
}

impl Keyed for Contributor {
    const TABLE: &'static str = "contributor";

    fn key(&self) -> &str {
        &self.github
    }
}
