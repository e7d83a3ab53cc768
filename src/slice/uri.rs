//! Content identifier construction.
//!
//! A slice is addressed by `content://{authority}/{path}`. Authority and
//! path are raw user text; both are component-encoded when the identifier
//! is rendered, and neither is validated beyond that. Whether anything
//! actually lives at the identifier is the resolution layer's problem.

use std::fmt;

/// Fixed scheme for all slice identifiers.
pub const SCHEME: &str = "content";

/// A structured content identifier: scheme + authority + path.
///
/// Rebuilt from the input fields on every keystroke; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceUri {
    pub authority: String,
    pub path: String,
}

impl SliceUri {
    pub fn new(authority: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            path: path.into(),
        }
    }

    /// Non-empty path segments, split on `/`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for SliceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", SCHEME, urlencoding::encode(&self.authority))?;
        for segment in self.segments() {
            write!(f, "/{}", urlencoding::encode(segment))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_scenario_identifier() {
        let uri = SliceUri::new("com.example.provider", "item/1");
        assert_eq!(uri.to_string(), "content://com.example.provider/item/1");
    }

    #[test]
    fn construction_is_deterministic() {
        let a = SliceUri::new("com.example.weather", "today");
        let b = SliceUri::new("com.example.weather", "today");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn empty_fields_still_produce_an_identifier() {
        assert_eq!(SliceUri::new("", "").to_string(), "content://");
        assert_eq!(SliceUri::new("a", "").to_string(), "content://a");
        assert_eq!(SliceUri::new("", "p").to_string(), "content:///p");
    }

    #[test]
    fn components_are_encoded_with_separators_preserved() {
        let uri = SliceUri::new("with space", "a b/c?d");
        assert_eq!(uri.to_string(), "content://with%20space/a%20b/c%3Fd");
    }

    #[test]
    fn repeated_and_trailing_slashes_collapse() {
        let uri = SliceUri::new("auth", "/a//b/");
        assert_eq!(uri.to_string(), "content://auth/a/b");
        assert_eq!(uri.segments().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
