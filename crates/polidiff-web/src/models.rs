use polidiff_core::{ComparisonRecord, Metrics, Slot};
use serde::Serialize;

// ── Slot JSON ───────────────────────────────────────────────────────────

/// Per-slot outcome: extraction either produced text or failed with a
/// user-facing reason. A failed slot never hides the other slot's result.
#[derive(Debug, Clone, Serialize)]
pub struct SlotJson {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Slot> for SlotJson {
    fn from(slot: &Slot) -> Self {
        match slot {
            Slot::Empty => SlotJson {
                status: "empty".to_string(),
                source: None,
                pages: None,
                chars: None,
                error: None,
            },
            Slot::Ready(doc) => SlotJson {
                status: "ready".to_string(),
                source: Some(doc.source.clone()),
                pages: Some(doc.pages),
                chars: Some(doc.chars),
                error: None,
            },
            Slot::Failed(reason) => SlotJson {
                status: "failed".to_string(),
                source: None,
                pages: None,
                chars: None,
                error: Some(reason.clone()),
            },
        }
    }
}

// ── Record JSON ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RecordJson {
    pub topic: String,
    pub title: String,
    /// The keyword itself when found, "não encontrado" otherwise —
    /// the cells shown in the comparison table.
    pub current: String,
    pub proposed: String,
    pub remark: String,
    pub remark_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_excerpt: Option<String>,
}

impl From<&ComparisonRecord> for RecordJson {
    fn from(r: &ComparisonRecord) -> Self {
        let remark = match r.remark {
            polidiff_core::Remark::Unchanged => "unchanged",
            polidiff_core::Remark::PossibleChange => "possible_change",
        };
        RecordJson {
            topic: r.topic.clone(),
            title: r.title.clone(),
            current: r.current_label().to_string(),
            proposed: r.proposed_label().to_string(),
            remark: remark.to_string(),
            remark_label: r.remark.label().to_string(),
            similarity: r.similarity,
            change_level: r.change_level.map(|l| l.label().to_string()),
            current_excerpt: r.current_excerpt.clone(),
            proposed_excerpt: r.proposed_excerpt.clone(),
        }
    }
}

// ── Response envelopes ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub current: SlotJson,
    pub proposed: SlotJson,
    /// False when at least one slot failed; `records` is then empty.
    pub compared: bool,
    pub records: Vec<RecordJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Metrics>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use polidiff_core::{DocumentText, compare};

    #[test]
    fn slot_json_states() {
        let ready = SlotJson::from(&Slot::Ready(DocumentText::new(
            "2025.pdf",
            "texto".to_string(),
            3,
        )));
        assert_eq!(ready.status, "ready");
        assert_eq!(ready.pages, Some(3));
        assert!(ready.error.is_none());

        let failed = SlotJson::from(&Slot::Failed("arquivo corrompido".to_string()));
        assert_eq!(failed.status, "failed");
        assert_eq!(failed.error.as_deref(), Some("arquivo corrompido"));
    }

    #[test]
    fn record_json_renders_labels() {
        let topics = vec!["liquidez".to_string()];
        let records = compare("sem o termo", "reserva de liquidez", &topics);
        let json = RecordJson::from(&records[0]);
        assert_eq!(json.current, "não encontrado");
        assert_eq!(json.proposed, "liquidez");
        assert_eq!(json.remark, "possible_change");
        assert_eq!(json.remark_label, "possível alteração");
        assert!(json.similarity.is_none());
    }
}
