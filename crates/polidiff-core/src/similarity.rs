/// Similarity ratio between two texts in 0.0–1.0.
///
/// Uses the Indel-based `rapidfuzz::fuzz::ratio`, the same family of
/// measure as Python's `SequenceMatcher.ratio()` which the original
/// policy-review tool used.
pub fn ratio(a: &str, b: &str) -> f64 {
    rapidfuzz::fuzz::ratio(a.chars(), b.chars())
}
