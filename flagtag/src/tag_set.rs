//! Parser for the `key:"value"` tag mini-language.
//!
//! A tag is a sequence of `key:"value"` pairs. Pairs may be spread across
//! several lines with arbitrary indentation, and a value may itself span
//! lines; everything between the quotes is kept verbatim. Malformed input
//! never fails, it simply yields whatever pairs were recognised.

use std::collections::HashMap;

/// Tag key naming the default value.
pub const DEFAULT: &str = "default";
/// Tag key holding the short help text shown next to a flag.
pub const DESCRIPTION: &str = "description";
/// Tag key naming an environment variable that overrides the default.
pub const ENV: &str = "env";
/// Tag key holding longer free-form help.
pub const HELP: &str = "help";
/// Tag key naming the long flag.
pub const LONG: &str = "long";
/// Tag key marking the leftover-argument field.
pub const POSITIONAL: &str = "positional";
/// Tag key naming the short flag.
pub const SHORT: &str = "short";

/// Key/value pairs parsed from a single field tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    entries: HashMap<String, String>,
}

impl TagSet {
    /// Parses a raw tag.
    ///
    /// Keys are trimmed of surrounding spaces when committed; values are
    /// stored exactly as written between the quotes.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtag::TagSet;
    ///
    /// let tags = TagSet::parse(r#"
    ///     long:"verbose"
    ///     short:"v""#);
    /// assert_eq!(tags.get("long"), Some("verbose"));
    /// assert_eq!(tags.get("short"), Some("v"));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut entries = HashMap::new();
        let mut key = String::new();
        let mut value = String::new();
        let mut in_key = true;
        let mut in_value = false;

        for ch in raw.chars() {
            if in_value {
                if ch == '"' {
                    entries.insert(key.trim_matches(' ').to_owned(), std::mem::take(&mut value));
                    key.clear();
                    in_value = false;
                    in_key = true;
                } else {
                    value.push(ch);
                }
                continue;
            }

            match ch {
                '\n' | '\r' => {}
                ':' => in_key = false,
                '"' => in_value = true,
                _ if in_key => key.push(ch),
                _ => value.push(ch),
            }
        }

        Self { entries }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value stored under `key`, or an empty string.
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Returns `true` when a value exists for `key`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of parsed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no pair was recognised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the parsed pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&str> for TagSet {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
