use serde::{Deserialize, Serialize};

pub mod compare;
pub mod config_file;
pub mod excerpt;
pub mod filter;
pub mod metrics;
pub mod session;
pub mod similarity;

// Re-export for convenience
pub use compare::{CompareOptions, capitalize_first, compare, compare_with};
pub use filter::{ChangeFilter, filter_records};
pub use metrics::Metrics;
pub use session::{CompareOutcome, Session};

/// Label shown wherever a topic was not found in a document.
pub const NOT_FOUND_LABEL: &str = "não encontrado";

/// The built-in topic list from the IPAJM investment-policy review.
///
/// Matching is case-insensitive, so the entries are stored lowercased;
/// display capitalization happens in [`ComparisonRecord::title`].
pub fn default_topics() -> Vec<String> {
    [
        "meta atuarial",
        "modelo de gestão",
        "alm",
        "governança",
        "segmentos",
        "limites",
        "liquidez",
        "rentabilidade",
        "cenário econômico",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Text extracted from one uploaded document.
///
/// Immutable once produced: re-uploading a document replaces the whole
/// value, never patches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentText {
    /// Where the text came from (filename or user-facing label).
    pub source: String,
    pub text: String,
    pub pages: usize,
    /// Character count (not bytes; the documents are Portuguese).
    pub chars: usize,
}

impl DocumentText {
    pub fn new(source: impl Into<String>, text: String, pages: usize) -> Self {
        let chars = text.chars().count();
        Self {
            source: source.into(),
            text,
            pages,
            chars,
        }
    }

    /// True for PDFs with no text layer (scanned images). Valid, not an error.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Lifecycle of one document slot (current or proposed).
///
/// A slot holds nothing, holds extracted text, or holds the reason
/// extraction failed. Failures stay in the slot so the other slot keeps
/// working independently.
#[derive(Debug, Clone, Default)]
pub enum Slot {
    #[default]
    Empty,
    Ready(DocumentText),
    Failed(String),
}

impl Slot {
    pub fn is_ready(&self) -> bool {
        matches!(self, Slot::Ready(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Slot::Ready(doc) => Some(&doc.text),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&DocumentText> {
        match self {
            Slot::Ready(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Slot::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Whether a topic keyword appears in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicPresence {
    Found,
    NotFound,
}

impl TopicPresence {
    /// Render as the reference UI does: the keyword itself when found,
    /// the not-found sentinel otherwise.
    pub fn label<'a>(&self, topic: &'a str) -> &'a str {
        match self {
            TopicPresence::Found => topic,
            TopicPresence::NotFound => NOT_FOUND_LABEL,
        }
    }
}

/// Presence verdict for one topic across the two documents.
///
/// `Unchanged` means presence did not change — a topic absent from both
/// documents is `Unchanged`. This compares presence, not phrasing; the
/// similarity fields on [`ComparisonRecord`] carry the phrasing signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remark {
    Unchanged,
    PossibleChange,
}

impl Remark {
    pub fn label(&self) -> &'static str {
        match self {
            Remark::Unchanged => "mantido",
            Remark::PossibleChange => "possível alteração",
        }
    }
}

/// How much the excerpt text around a topic differs between documents.
///
/// Thresholds follow the policy-review convention: similarity ≥ 0.95 is
/// no significant change, ≥ 0.7 moderate, below that significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeLevel {
    None,
    Moderate,
    Significant,
}

impl ChangeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeLevel::None => "sem alterações significativas",
            ChangeLevel::Moderate => "alterações moderadas",
            ChangeLevel::Significant => "alterações significativas",
        }
    }
}

/// One row of the comparison table, one per topic keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    /// The raw topic keyword as configured.
    pub topic: String,
    /// The keyword with its first character uppercased.
    pub title: String,
    pub current: TopicPresence,
    pub proposed: TopicPresence,
    pub remark: Remark,
    /// Context around the keyword in the current document, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_excerpt: Option<String>,
    /// Excerpt similarity in 0.0–1.0, when the topic was found in both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_level: Option<ChangeLevel>,
}

impl ComparisonRecord {
    pub fn current_label(&self) -> &str {
        self.current.label(&self.topic)
    }

    pub fn proposed_label(&self) -> &str {
        self.proposed.label(&self.topic)
    }

    pub fn changed(&self) -> bool {
        self.remark == Remark::PossibleChange
    }
}
