//! Label helpers for the exposition format.
//!
//! Request paths become label values through [`normalize_path`]. The rule is
//! deliberately naive: `/user/123` and `/user/456` stay distinct series, so
//! label cardinality grows with the set of raw paths seen.

/// Separator that replaces `/` in normalized paths.
pub const PATH_SEPARATOR: char = '_';

/// Label used for the root path (and any path that normalizes to nothing).
///
/// Every other label has its slashes replaced, so `/` cannot collide with a
/// real path such as `/root`.
pub const ROOT_LABEL: &str = "/";

/// Turn a raw request path into a label-safe token.
///
/// Query and fragment are dropped, surrounding slashes trimmed, runs of
/// slashes collapsed, and the remaining slashes replaced with `_`.
/// Only the root label contains `/`, and it maps to itself, so normalizing
/// twice is a no-op.
pub fn normalize_path(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default();

    let mut out = String::with_capacity(path.len());
    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if !out.is_empty() {
            out.push(PATH_SEPARATOR);
        }
        out.push_str(seg);
    }

    if out.is_empty() {
        ROOT_LABEL.to_string()
    } else {
        out
    }
}

/// Escape a label value (`\`, `"`, newline).
pub fn escape_label_value(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
