//! Toolbar markdown formats
//!
//! Each format is a template with a `$1` placeholder that is replaced by the
//! selected text.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the current selection
pub const SELECTION_PLACEHOLDER: &str = "$1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkdownFormat {
    Bold,
    Italic,
    Heading,
    Link,
    Code,
}

impl MarkdownFormat {
    pub fn template(self) -> &'static str {
        match self {
            MarkdownFormat::Bold => "**$1**",
            MarkdownFormat::Italic => "*$1*",
            MarkdownFormat::Heading => "# $1",
            MarkdownFormat::Link => "[$1](url)",
            MarkdownFormat::Code => "`$1`",
        }
    }
}

/// Replace the first placeholder in `template` with `selection`
pub fn fill_template(template: &str, selection: &str) -> String {
    template.replacen(SELECTION_PLACEHOLDER, selection, 1)
}
