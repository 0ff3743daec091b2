use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip accents: canonical decomposition, then drop the combining marks.
///
/// "Descripción" -> "Descripcion", "COMPOSICIÓN" -> "COMPOSICION".
pub fn normalize(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Accent-free upper-case form used for keyword comparisons.
pub fn normalize_upper(s: &str) -> String {
    normalize(s).to_uppercase()
}

/// Collapse every whitespace run to a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
