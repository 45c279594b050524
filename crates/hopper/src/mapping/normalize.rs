//! Header and synonym normalization.

/// Normalize a column name or synonym for matching: lower-case, trim, and
/// drop separators (spaces, underscores, hyphens) along with any other
/// non-alphanumeric character. "Order_Number", "order number", and
/// "ORDER-NUMBER" all normalize to "ordernumber".
pub fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Normalized edit-distance similarity in `[0, 1]`:
/// `1 − levenshtein(a, b) / max(len(a), len(b))`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - strsim::levenshtein(a, b) as f64 / max_len as f64
}
