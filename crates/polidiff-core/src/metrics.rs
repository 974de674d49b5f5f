use serde::Serialize;

use crate::ComparisonRecord;

/// Summary statistics for a complete comparison run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub total_topics: usize,
    /// Records whose remark is a possible change.
    pub changed: usize,
    pub unchanged: usize,
    /// Mean excerpt similarity over records that have one. `None` when no
    /// record carries a similarity (topic found in at most one document).
    pub mean_similarity: Option<f64>,
    pub changed_pct: f64,
}

impl Metrics {
    pub fn from_records(records: &[ComparisonRecord]) -> Self {
        let total_topics = records.len();
        let changed = records.iter().filter(|r| r.changed()).count();

        let similarities: Vec<f64> = records.iter().filter_map(|r| r.similarity).collect();
        let mean_similarity = if similarities.is_empty() {
            None
        } else {
            Some(similarities.iter().sum::<f64>() / similarities.len() as f64)
        };

        let changed_pct = if total_topics == 0 {
            0.0
        } else {
            changed as f64 / total_topics as f64 * 100.0
        };

        Metrics {
            total_topics,
            changed,
            unchanged: total_topics - changed,
            mean_similarity,
            changed_pct,
        }
    }
}
