use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Extract the context around every case-insensitive occurrence of `topic`
/// in `text`, keeping up to `window` characters on each side of a hit.
///
/// Overlapping windows are merged so a cluster of nearby hits yields one
/// excerpt. Distinct excerpts are joined with a blank line. Returns `None`
/// when the topic does not occur.
pub fn around(text: &str, topic: &str, window: usize) -> Option<String> {
    if topic.is_empty() {
        return None;
    }
    // regex::escape makes the topic literal; (?i) gives Unicode-aware
    // case folding. This is the one matcher for topic hits: presence in
    // the comparator is derived from whether an excerpt exists.
    let pattern = Regex::new(&format!("(?i){}", regex::escape(topic))).ok()?;

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for m in pattern.find_iter(text) {
        let start = back_by_chars(text, m.start(), window);
        let end = forward_by_chars(text, m.end(), window);
        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => ranges.push((start, end)),
        }
    }

    if ranges.is_empty() {
        return None;
    }

    let excerpts: Vec<String> = ranges
        .iter()
        .map(|&(start, end)| normalize_whitespace(&text[start..end]))
        .collect();
    Some(excerpts.join("\n\n"))
}

/// Collapse runs of whitespace to single spaces and trim the edges.
/// Extracted PDF text is full of layout artifacts; excerpts read better flat.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Byte index `n` characters before `idx`, clamped to the start of `text`.
/// `idx` must lie on a char boundary.
fn back_by_chars(text: &str, idx: usize, n: usize) -> usize {
    text[..idx]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(idx)
}

/// Byte index `n` characters after `idx`, clamped to the end of `text`.
fn forward_by_chars(text: &str, idx: usize, n: usize) -> usize {
    text[idx..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| idx + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_topic_yields_none() {
        assert_eq!(around("texto sem o termo", "liquidez", 10), None);
        assert_eq!(around("qualquer texto", "", 10), None);
    }

    #[test]
    fn window_is_clamped_to_text_bounds() {
        let text = "meta atuarial";
        assert_eq!(around(text, "meta atuarial", 500).as_deref(), Some(text));
    }

    #[test]
    fn window_counts_characters_not_bytes() {
        // Multi-byte chars on both sides of the hit must not split a
        // char boundary when the window is applied.
        let text = "ãéíõú governança çãéíõ";
        let excerpt = around(text, "governança", 2).unwrap();
        assert_eq!(excerpt, "ú governança ç");
    }

    #[test]
    fn match_is_case_insensitive_including_diacritics() {
        let text = "A GOVERNANÇA do instituto";
        let excerpt = around(text, "governança", 3).unwrap();
        assert!(excerpt.contains("GOVERNANÇA"));
    }

    #[test]
    fn overlapping_hits_merge_into_one_excerpt() {
        let text = "liquidez e liquidez novamente";
        let excerpt = around(text, "liquidez", 50).unwrap();
        assert_eq!(excerpt, "liquidez e liquidez novamente");
        assert!(!excerpt.contains("\n\n"));
    }

    #[test]
    fn distant_hits_yield_separate_excerpts() {
        let filler = "x".repeat(200);
        let text = format!("limites {filler} limites");
        let excerpt = around(&text, "limites", 5).unwrap();
        assert_eq!(excerpt.matches("\n\n").count(), 1);
    }

    #[test]
    fn excerpt_whitespace_is_flattened() {
        let text = "meta\n\natuarial   de    6%";
        let excerpt = around(text, "meta", 100).unwrap();
        assert_eq!(excerpt, "meta atuarial de 6%");
    }
}
