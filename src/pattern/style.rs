//! Style labels: `key=value` metadata attached to a pattern.

use std::collections::HashMap;

/// Value given to a style key that the winning pattern does not set.
pub const STYLE_WILDCARD: &str = "*";

/// Parse a `key=value;key=value` string.
///
/// Trailing empty `=` segments are dropped (`a=b=` reads as `a=b`). Groups
/// that then do not split into exactly one key and one value, or whose
/// trimmed key or value is empty, are ignored. Later keys overwrite
/// earlier ones.
pub fn parse_style_labels(styles: &str) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    for group in styles.split(';') {
        let mut parts: Vec<&str> = group.split('=').collect();
        while parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }
        let [key, value] = parts[..] else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if !key.is_empty() && !value.is_empty() {
            labels.insert(key.to_string(), value.to_string());
        }
    }
    labels
}
