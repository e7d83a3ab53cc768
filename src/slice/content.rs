//! Slice content model.
//!
//! Providers serve slices as JSON documents. The model here is the small
//! renderable surface the viewer needs: a title, a list of rows, and an
//! optional compact shortcut form. Unknown fields are ignored so provider
//! documents can carry more than the viewer understands.

use anyhow::{Context, Result};
use serde::Deserialize;

/// A renderable slice document as served by a provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slice {
    pub title: String,
    #[serde(default)]
    pub rows: Vec<SliceRow>,
    #[serde(default)]
    pub shortcut: Option<Shortcut>,
}

/// One content row inside a slice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SliceRow {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Compact representation used by the shortcut display density.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shortcut {
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Slice {
    /// Parse a slice document from provider JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse slice document")
    }

    /// Row backing the small density: the first content row, or the slice
    /// title when the document has no rows.
    pub fn header_row(&self) -> SliceRow {
        self.rows.first().cloned().unwrap_or_else(|| SliceRow {
            title: self.title.clone(),
            subtitle: None,
            icon: None,
        })
    }

    /// Label + icon for the shortcut density, falling back to the title.
    pub fn shortcut_label(&self) -> (String, Option<String>) {
        match &self.shortcut {
            Some(s) => (s.label.clone(), s.icon.clone()),
            None => (self.title.clone(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let slice = Slice::from_json(r#"{"title": "Weather"}"#).unwrap();
        assert_eq!(slice.title, "Weather");
        assert!(slice.rows.is_empty());
        assert!(slice.shortcut.is_none());
    }

    #[test]
    fn parses_rows_and_shortcut() {
        let slice = Slice::from_json(
            r#"{
                "title": "Weather",
                "rows": [
                    {"title": "Today", "subtitle": "Sunny, 21C", "icon": "S"},
                    {"title": "Tomorrow"}
                ],
                "shortcut": {"label": "21C", "icon": "S"},
                "extra_field": 42
            }"#,
        )
        .unwrap();
        assert_eq!(slice.rows.len(), 2);
        assert_eq!(slice.rows[0].subtitle.as_deref(), Some("Sunny, 21C"));
        assert_eq!(slice.rows[1].subtitle, None);
        assert_eq!(slice.shortcut_label().0, "21C");
    }

    #[test]
    fn header_row_falls_back_to_title() {
        let slice = Slice::from_json(r#"{"title": "Bare"}"#).unwrap();
        assert_eq!(slice.header_row().title, "Bare");

        let slice = Slice::from_json(r#"{"title": "T", "rows": [{"title": "First"}]}"#).unwrap();
        assert_eq!(slice.header_row().title, "First");
    }

    #[test]
    fn missing_title_is_an_error() {
        assert!(Slice::from_json(r#"{"rows": []}"#).is_err());
        assert!(Slice::from_json("not json").is_err());
    }
}
