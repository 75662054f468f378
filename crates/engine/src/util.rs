//! Internal helpers for input normalization.
//!
//! These utilities are **not** part of the public API.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine};

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Trim and collapse inner whitespace of a display name.
pub(crate) fn normalize_display_name(value: &str, label: &str) -> ResultEngine<String> {
    let out = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if out.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(out)
}

/// Comparison key for names: accents stripped, lower-case, punctuation
/// folded into single spaces. "Gírgola  Rosa" and "girgola-rosa" share a key.
pub(crate) fn normalize_name_key(value: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in value.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}
