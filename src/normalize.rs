//! Name normalization.
//!
//! All three inventories and the reconciler join on a normalized key: the
//! display name with any trailing version number removed, lower-cased, and
//! reduced to ASCII letters and digits. The mapping is many-to-one, so
//! distinct products can collide and differently spelled names of the same
//! product can miss each other. Both are accepted.

use regex::Regex;
use std::sync::LazyLock;

/// A dotted version number and everything after it.
static VERSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d+.*").unwrap());

/// Normalize a display name into a join key.
///
/// An empty result is never a valid key; callers must skip it.
///
/// # Example
///
/// ```
/// use choco_adopt::normalize::normalize_name;
///
/// assert_eq!(normalize_name("Mozilla Firefox 118.0.1"), "mozillafirefox");
/// assert_eq!(normalize_name("mozilla-firefox"), "mozillafirefox");
/// ```
pub fn normalize_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let stripped = VERSION_SUFFIX.replace_all(name, "");
    stripped
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
