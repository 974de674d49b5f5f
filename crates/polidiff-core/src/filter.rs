use crate::ComparisonRecord;

/// Presence-change filter from the review UI's dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeFilter {
    #[default]
    All,
    Changed,
    Unchanged,
}

impl ChangeFilter {
    fn keeps(&self, record: &ComparisonRecord) -> bool {
        match self {
            ChangeFilter::All => true,
            ChangeFilter::Changed => record.changed(),
            ChangeFilter::Unchanged => !record.changed(),
        }
    }
}

/// View-layer projection over a computed record list: keep records whose
/// title contains `query` case-insensitively, preserving order. An empty
/// query keeps everything. Never mutates the underlying list.
pub fn filter_records<'a>(
    records: &'a [ComparisonRecord],
    query: &str,
) -> Vec<&'a ComparisonRecord> {
    filter_records_by(records, query, ChangeFilter::All)
}

/// [`filter_records`] with an additional changed/unchanged filter.
pub fn filter_records_by<'a>(
    records: &'a [ComparisonRecord],
    query: &str,
    change: ChangeFilter,
) -> Vec<&'a ComparisonRecord> {
    let query_lower = query.to_lowercase();
    records
        .iter()
        .filter(|r| query_lower.is_empty() || r.title.to_lowercase().contains(&query_lower))
        .filter(|r| change.keeps(r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compare, default_topics};

    fn sample() -> Vec<ComparisonRecord> {
        compare(
            "meta atuarial e governança",
            "meta atuarial, liquidez e rentabilidade",
            &default_topics(),
        )
    }

    #[test]
    fn empty_query_returns_full_list_in_order() {
        let records = sample();
        let filtered = filter_records(&records, "");
        assert_eq!(filtered.len(), records.len());
        for (kept, original) in filtered.iter().zip(&records) {
            assert_eq!(kept.topic, original.topic);
        }
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let records = sample();
        let filtered = filter_records(&records, "LIQUI");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Liquidez");
    }

    #[test]
    fn unmatched_query_returns_empty() {
        let records = sample();
        assert!(filter_records(&records, "inexistente").is_empty());
    }

    #[test]
    fn change_filter_splits_the_list() {
        let records = sample();
        let changed = filter_records_by(&records, "", ChangeFilter::Changed);
        let unchanged = filter_records_by(&records, "", ChangeFilter::Unchanged);
        assert_eq!(changed.len() + unchanged.len(), records.len());
        assert!(changed.iter().all(|r| r.changed()));
        assert!(unchanged.iter().all(|r| !r.changed()));
    }
}
