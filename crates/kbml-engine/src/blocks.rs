//! Typed block values produced by segmentation.

use serde::Serialize;

/// One typed unit of parsed article content.
///
/// The segmenter reduces every construct of the authoring format to one of
/// these variants. The set is closed: the renderer matches exhaustively and
/// can therefore never fail on a block it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Markup that is already final: headings, rules, blockquotes, lists,
    /// paragraphs and escaped code fences. An empty string marks the inert
    /// result of an unrecognized directive.
    Html { html: String },
    /// Highlighted call-to-action panel (`:::callout` / `:::cta`).
    Callout { body: String },
    /// Severity-tinted notice panel (`:::notice type="warning"`).
    Notice {
        severity: NoticeSeverity,
        body: String,
    },
    /// Numbered step-by-step instructions (`:::steps`).
    Steps { items: Vec<String> },
    /// Tick-off checklist (`:::checklist`).
    Checklist { items: Vec<String> },
    /// Comparison table (`:::compare` or a markdown pipe table).
    ComparisonTable {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Block {
    /// Whether this block contributes nothing visible to the rendered page.
    pub fn is_inert(&self) -> bool {
        matches!(self, Block::Html { html } if html.is_empty())
    }
}

/// Notice severity, selected by the `type` attribute of a `:::notice`
/// directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    #[default]
    Info,
    Warning,
    Danger,
    Success,
}

impl NoticeSeverity {
    /// Parse the directive attribute value. Missing or unrecognized values
    /// fall back to `Info`.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("warning") => Self::Warning,
            Some("danger") => Self::Danger,
            Some("success") => Self::Success,
            _ => Self::Info,
        }
    }

    /// Stable class-name fragment used by the renderer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Success => "success",
        }
    }
}
