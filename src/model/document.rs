//! Document-level types.

use super::Table;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured snapshot of one scraped report page.
///
/// Serialized field names follow the persisted snapshot format
/// (`data/scraped_data.json`), so a snapshot written by an earlier deployment
/// reloads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Page title
    #[serde(rename = "page_title")]
    pub title: String,

    /// Headings in tag-level order (all h1s, then all h2s, ...)
    pub headings: Vec<Heading>,

    /// Paragraph texts, trimmed, empties dropped
    pub paragraphs: Vec<String>,

    /// List item texts, trimmed, empties dropped
    pub list_items: Vec<String>,

    /// Tables as raw header/row text
    pub tables: Vec<Table>,

    /// Raw numeric mentions such as "45 miljoen" or "12%"
    #[serde(rename = "numeric_data")]
    pub numeric_mentions: Vec<String>,

    /// Images referenced by the page
    pub images: Vec<Image>,

    /// Complete visible text content, used for topic extraction
    pub full_text: String,

    /// When this snapshot was scraped
    #[serde(rename = "last_updated")]
    pub fetched_at: DateTime<Utc>,
}

impl Document {
    /// Create a new empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            list_items: Vec::new(),
            tables: Vec::new(),
            numeric_mentions: Vec::new(),
            images: Vec::new(),
            full_text: String::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Check if the document carries no extracted content at all.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
            && self.paragraphs.is_empty()
            && self.list_items.is_empty()
            && self.tables.is_empty()
            && self.numeric_mentions.is_empty()
    }

    /// All prose fragments: paragraphs followed by list items.
    pub fn prose(&self) -> impl Iterator<Item = &str> {
        self.paragraphs
            .iter()
            .chain(self.list_items.iter())
            .map(String::as_str)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

/// A heading with its tag depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Tag depth, 1..=6
    pub level: u8,

    /// Trimmed heading text
    pub text: String,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// An image reference. Attribute values are kept as raw strings; the source
/// page does not guarantee numeric width/height.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image source URL
    pub src: String,

    /// Alternative text
    pub alt: String,

    /// Raw width attribute
    pub width: String,

    /// Raw height attribute
    pub height: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new("Voorjaarsnota 2024");
        assert!(doc.is_empty());
        assert_eq!(doc.title, "Voorjaarsnota 2024");
    }

    #[test]
    fn test_prose_order() {
        let mut doc = Document::new("t");
        doc.paragraphs.push("eerste".to_string());
        doc.list_items.push("tweede".to_string());

        let prose: Vec<&str> = doc.prose().collect();
        assert_eq!(prose, vec!["eerste", "tweede"]);
    }

    #[test]
    fn test_snapshot_field_names() {
        let doc = Document::new("Titel");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"page_title\""));
        assert!(json.contains("\"numeric_data\""));
        assert!(json.contains("\"last_updated\""));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut doc = Document::new("Financiële Ontwikkelingen");
        doc.paragraphs.push("€45 miljoen geïnvesteerd".to_string());
        doc.headings.push(Heading::new(2, "Duurzaamheid"));

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
