//! # Localization
//!
//! Every piece of user-facing layer text (command, title, label) is a map
//! from language code to text. [`resolve`] picks the one to show.

use super::config::Localized;

/// Pick the text for `active`, falling back to `fallback` (the first
/// configured language), then to any non-blank value in code order.
///
/// A value counts only if it is non-blank after trimming, but the returned
/// text is the original, untrimmed value. Returns `""` when nothing
/// matches; callers supply their own last resort.
pub fn resolve<'a>(values: &'a Localized, active: &str, fallback: &str) -> &'a str {
    if values.is_empty() {
        return "";
    }

    non_blank(values, active)
        .or_else(|| non_blank(values, fallback))
        .or_else(|| {
            values
                .values()
                .map(String::as_str)
                .find(|value| !value.trim().is_empty())
        })
        .unwrap_or("")
}

fn non_blank<'a>(values: &'a Localized, code: &str) -> Option<&'a str> {
    if code.is_empty() {
        return None;
    }
    values
        .get(code)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}
