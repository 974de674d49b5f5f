use crate::{
    ChangeFilter, CompareOptions, ComparisonRecord, Slot, compare_with, filter::filter_records_by,
};

/// Outcome of a compare trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    /// Both slots were ready; the record list was regenerated wholesale.
    Compared { records: usize },
    /// At least one slot was not ready. Nothing ran; any previously
    /// computed records are untouched.
    NotReady {
        current_ready: bool,
        proposed_ready: bool,
    },
}

/// One review session: the two document slots, the topic list in effect,
/// and the last computed comparison.
///
/// Each slot has a single writer (its upload handler); the compare trigger
/// is the only point that reads both. Records live until the next trigger
/// or the end of the session and are never patched incrementally.
pub struct Session {
    current: Slot,
    proposed: Slot,
    topics: Vec<String>,
    options: CompareOptions,
    records: Vec<ComparisonRecord>,
}

impl Session {
    pub fn new(topics: Vec<String>, options: CompareOptions) -> Self {
        Self {
            current: Slot::Empty,
            proposed: Slot::Empty,
            topics,
            options,
            records: Vec::new(),
        }
    }

    pub fn with_default_topics() -> Self {
        Self::new(crate::default_topics(), CompareOptions::default())
    }

    /// Replace the current-policy slot wholesale.
    pub fn set_current(&mut self, slot: Slot) {
        self.current = slot;
    }

    /// Replace the proposed-policy slot wholesale.
    pub fn set_proposed(&mut self, slot: Slot) {
        self.proposed = slot;
    }

    pub fn current(&self) -> &Slot {
        &self.current
    }

    pub fn proposed(&self) -> &Slot {
        &self.proposed
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn records(&self) -> &[ComparisonRecord] {
        &self.records
    }

    /// The compare trigger. Guarded: runs only when both slots are ready,
    /// otherwise a no-op that leaves previous records untouched.
    pub fn run_compare(&mut self) -> CompareOutcome {
        let (Some(current), Some(proposed)) = (self.current.text(), self.proposed.text()) else {
            return CompareOutcome::NotReady {
                current_ready: self.current.is_ready(),
                proposed_ready: self.proposed.is_ready(),
            };
        };

        self.records = compare_with(current, proposed, &self.topics, &self.options);
        tracing::debug!(records = self.records.len(), "comparison regenerated");
        CompareOutcome::Compared {
            records: self.records.len(),
        }
    }

    /// Project the current records through the search box and change filter.
    pub fn filtered(&self, query: &str, change: ChangeFilter) -> Vec<&ComparisonRecord> {
        filter_records_by(&self.records, query, change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentText;

    fn ready(label: &str, text: &str) -> Slot {
        Slot::Ready(DocumentText::new(label, text.to_string(), 1))
    }

    #[test]
    fn compare_is_a_noop_until_both_slots_ready() {
        let mut session = Session::with_default_topics();
        assert_eq!(
            session.run_compare(),
            CompareOutcome::NotReady {
                current_ready: false,
                proposed_ready: false,
            }
        );
        assert!(session.records().is_empty());

        session.set_current(ready("2025.pdf", "meta atuarial"));
        assert_eq!(
            session.run_compare(),
            CompareOutcome::NotReady {
                current_ready: true,
                proposed_ready: false,
            }
        );
        assert!(session.records().is_empty());
    }

    #[test]
    fn noop_guard_preserves_previous_records() {
        let mut session = Session::with_default_topics();
        session.set_current(ready("2025.pdf", "meta atuarial"));
        session.set_proposed(ready("2026.pdf", "meta atuarial e liquidez"));
        session.run_compare();
        let before = session.records().to_vec();
        assert!(!before.is_empty());

        // Dropping one slot must not clear or alter the computed list.
        session.set_proposed(Slot::Empty);
        assert_eq!(
            session.run_compare(),
            CompareOutcome::NotReady {
                current_ready: true,
                proposed_ready: false,
            }
        );
        assert_eq!(session.records(), before.as_slice());
    }

    #[test]
    fn failed_slot_is_not_ready() {
        let mut session = Session::with_default_topics();
        session.set_current(Slot::Failed("não foi possível ler o arquivo".into()));
        session.set_proposed(ready("2026.pdf", "texto"));
        assert_eq!(
            session.run_compare(),
            CompareOutcome::NotReady {
                current_ready: false,
                proposed_ready: true,
            }
        );
        assert_eq!(
            session.current().failure(),
            Some("não foi possível ler o arquivo")
        );
    }

    #[test]
    fn records_are_replaced_wholesale() {
        let mut session = Session::with_default_topics();
        session.set_current(ready("2025.pdf", "liquidez"));
        session.set_proposed(ready("2026.pdf", "sem o termo"));
        session.run_compare();
        let liquidez_changed = session
            .records()
            .iter()
            .find(|r| r.topic == "liquidez")
            .unwrap()
            .changed();
        assert!(liquidez_changed);

        session.set_proposed(ready("2026-v2.pdf", "liquidez mantida"));
        let outcome = session.run_compare();
        assert_eq!(outcome, CompareOutcome::Compared { records: 9 });
        let liquidez = session
            .records()
            .iter()
            .find(|r| r.topic == "liquidez")
            .unwrap();
        assert!(!liquidez.changed());
    }

    #[test]
    fn empty_extraction_reports_all_not_found() {
        // Image-only PDF: valid empty text, not an error.
        let mut session = Session::with_default_topics();
        session.set_current(ready("scan.pdf", ""));
        session.set_proposed(ready("2026.pdf", "governança"));
        assert!(matches!(
            session.run_compare(),
            CompareOutcome::Compared { .. }
        ));
        assert!(
            session
                .records()
                .iter()
                .all(|r| r.current == crate::TopicPresence::NotFound)
        );
    }
}
