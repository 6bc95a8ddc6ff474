//! Default values observed in the persistence artifact.

use std::collections::BTreeMap;

/// Field name → default-value text, first writer wins.
///
/// The persistence artifact is the source of truth for defaults; a later
/// read of the same field never replaces what the first read recorded.
#[derive(Debug, Clone, Default)]
pub struct DefaultValueTable {
    entries: BTreeMap<String, String>,
}

impl DefaultValueTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` for `field` if nothing is recorded yet.
    ///
    /// Returns `true` when the value was stored.
    pub fn record(&mut self, field: &str, text: &str) -> bool {
        if self.entries.contains_key(field) {
            return false;
        }
        self.entries.insert(field.to_string(), text.to_string());
        true
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip the punctuation the source syntax wraps around a default value.
///
/// Trims whitespace, then one layer of backticks, then one layer of double
/// quotes, so `` `"abc"` ``, `"abc"` and `abc` all compare equal.
#[must_use]
pub fn normalize_default(text: &str) -> &str {
    let text = text.trim();
    let text = strip_wrapping(text, '`').trim();
    strip_wrapping(text, '"')
}

fn strip_wrapping(text: &str, delim: char) -> &str {
    text.strip_prefix(delim)
        .and_then(|inner| inner.strip_suffix(delim))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins() {
        let mut table = DefaultValueTable::new();
        assert!(table.record("port", "80"));
        assert!(!table.record("port", "8080"));
        assert_eq!(table.get("port"), Some("80"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unknown_field_has_no_default() {
        let table = DefaultValueTable::new();
        assert_eq!(table.get("port"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn normalize_strips_quotes_and_backticks() {
        assert_eq!(normalize_default(" 80 "), "80");
        assert_eq!(normalize_default("\"eom\""), "eom");
        assert_eq!(normalize_default("`\"eom\"`"), "eom");
        assert_eq!(normalize_default("`80`"), "80");
        assert_eq!(normalize_default("\"\""), "");
    }

    #[test]
    fn normalize_leaves_unbalanced_text_alone() {
        assert_eq!(normalize_default("\"eom"), "\"eom");
        assert_eq!(normalize_default("`"), "`");
    }
}
