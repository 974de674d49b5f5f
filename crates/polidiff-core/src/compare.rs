use crate::{ChangeLevel, ComparisonRecord, Remark, TopicPresence, excerpt, similarity};

/// Tunables for the comparator. Defaults match the reference behavior.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Characters of context kept on each side of a keyword hit.
    pub excerpt_window_chars: usize,
    /// Similarity at or above this is "no significant change".
    pub unchanged_threshold: f64,
    /// Similarity at or above this (but below `unchanged_threshold`)
    /// is "moderate change".
    pub moderate_threshold: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            excerpt_window_chars: 500,
            unchanged_threshold: 0.95,
            moderate_threshold: 0.7,
        }
    }
}

impl CompareOptions {
    fn change_level(&self, similarity: f64) -> ChangeLevel {
        if similarity >= self.unchanged_threshold {
            ChangeLevel::None
        } else if similarity >= self.moderate_threshold {
            ChangeLevel::Moderate
        } else {
            ChangeLevel::Significant
        }
    }
}

/// Compare two extracted document texts against a topic list.
///
/// Pure and stateless: one record per topic, in the list's order, built
/// from scratch on every call. A topic is present when it appears as a
/// case-insensitive substring; the remark says whether *presence* changed
/// between the documents, so a topic absent from both is `Unchanged`.
pub fn compare(current: &str, proposed: &str, topics: &[String]) -> Vec<ComparisonRecord> {
    compare_with(current, proposed, topics, &CompareOptions::default())
}

/// [`compare`] with explicit options.
pub fn compare_with(
    current: &str,
    proposed: &str,
    topics: &[String],
    options: &CompareOptions,
) -> Vec<ComparisonRecord> {
    topics
        .iter()
        .map(|topic| {
            // A single matcher decides both presence and excerpts, so a
            // record never reports Found without an excerpt (or vice
            // versa) for topics with unusual case mappings.
            let current_excerpt = excerpt::around(current, topic, options.excerpt_window_chars);
            let proposed_excerpt = excerpt::around(proposed, topic, options.excerpt_window_chars);
            let in_current = presence(&current_excerpt);
            let in_proposed = presence(&proposed_excerpt);

            let remark = if in_current == in_proposed {
                Remark::Unchanged
            } else {
                Remark::PossibleChange
            };

            let similarity = match (&current_excerpt, &proposed_excerpt) {
                (Some(a), Some(b)) => Some(similarity::ratio(a, b)),
                _ => None,
            };
            let change_level = similarity.map(|s| options.change_level(s));

            ComparisonRecord {
                topic: topic.clone(),
                title: capitalize_first(topic),
                current: in_current,
                proposed: in_proposed,
                remark,
                current_excerpt,
                proposed_excerpt,
                similarity,
                change_level,
            }
        })
        .collect()
}

fn presence(excerpt: &Option<String>) -> TopicPresence {
    if excerpt.is_some() {
        TopicPresence::Found
    } else {
        TopicPresence::NotFound
    }
}

/// Uppercase the first character, leaving the rest untouched.
/// Unicode-aware ("governança" → "Governança", "ética" → "Ética").
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
