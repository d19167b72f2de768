//! Reference target and numbered content kinds.

use std::fmt;

use serde::Serialize;

/// Kind of cross-reference target. Each kind is its own slug namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Numbered chapter (`/<slug>/`)
    Chapter,
    /// Lettered appendix (`/<slug>/`)
    Appendix,
    /// Glossary entry (`/glossary/#g:<key>`)
    Glossary,
    /// Bibliography entry (`/references/#b:<key>`)
    Bibliography,
}

impl TargetKind {
    /// Display name for this target kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Chapter => "chapter",
            Self::Appendix => "appendix",
            Self::Glossary => "glossary",
            Self::Bibliography => "bibliography",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of numbered content inside a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Figure,
    Table,
}

impl ContentKind {
    /// Display name for this content kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Figure => "figure",
            Self::Table => "table",
        }
    }

    /// Caption prefix (`Figure 3: ...`).
    pub fn caption_label(self) -> &'static str {
        match self {
            Self::Figure => "Figure",
            Self::Table => "Table",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_kind_names() {
        assert_eq!(TargetKind::Chapter.to_string(), "chapter");
        assert_eq!(TargetKind::Bibliography.name(), "bibliography");
    }

    #[test]
    fn test_caption_label() {
        assert_eq!(ContentKind::Figure.caption_label(), "Figure");
        assert_eq!(ContentKind::Table.caption_label(), "Table");
    }
}
