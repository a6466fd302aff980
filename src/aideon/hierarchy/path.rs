//! Normalisation of separator-delimited path strings.

/// Splits `raw` into its non-empty segments.
///
/// Surrounding whitespace and separator runs are ignored, as are empty
/// components produced by doubled separators.
pub fn segments(raw: &str, separator: char) -> Vec<&str> {
    raw.trim()
        .trim_matches(separator)
        .split(separator)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Returns the canonical form of `raw`, or `None` when nothing remains.
pub fn normalize(raw: &str, separator: char) -> Option<String> {
    let parts = segments(raw, separator);
    if parts.is_empty() {
        return None;
    }
    Some(join(&parts, separator))
}

/// Joins segments with the separator.
pub fn join<S: AsRef<str>>(parts: &[S], separator: char) -> String {
    let mut joined = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            joined.push(separator);
        }
        joined.push_str(part.as_ref());
    }
    joined
}
