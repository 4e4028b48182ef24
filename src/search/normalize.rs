//! Key and query normalization.
//!
//! Keys are normalized once when the index is built and queries go through the
//! same function, so case-insensitive matching reduces to a plain byte-wise
//! prefix test.

/// Normalizes a label or query into its search key form.
///
/// - Surrounding whitespace is trimmed
/// - Every character is lower-cased (Unicode-aware)
/// - Internal whitespace runs collapse to a single space
///
/// `"  Pack  Bit\tVector "` becomes `"pack bit vector"`.
pub fn normalize_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !key.is_empty() {
            key.push(' ');
        }
        key.extend(word.chars().flat_map(char::to_lowercase));
    }
    key
}
