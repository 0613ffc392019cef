//! Document extraction from raw HTML.
//!
//! Pure transform from markup to [`Document`]; no network or caching concerns
//! live here.

use chrono::Utc;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::model::{Document, Heading, Image, Table};

/// Title used when the page carries no `<title>` element.
pub const DEFAULT_TITLE: &str = "Voorjaarsnota 2024 Dashboard";

/// Numeric mentions: a number optionally followed by a separator digit group,
/// then a unit or currency token. The full matched span is retained.
const MENTION_PATTERN: &str = r"\d+[.,]?\d*\s?(%|miljoen|duizend|euro|€)";

/// Extracts a structured [`Document`] from raw HTML.
pub struct DocumentExtractor {
    title: Selector,
    headings: Vec<(u8, Selector)>,
    paragraph: Selector,
    list_item: Selector,
    table: Selector,
    header_cell: Selector,
    row: Selector,
    data_cell: Selector,
    image: Selector,
    mention: Regex,
}

impl DocumentExtractor {
    /// Create a new extractor. Selector and regex literals are fixed, so
    /// construction is infallible.
    pub fn new() -> Self {
        let headings = (1..=6u8)
            .map(|level| (level, sel(&format!("h{level}"))))
            .collect();

        Self {
            title: sel("title"),
            headings,
            paragraph: sel("p"),
            list_item: sel("li"),
            table: sel("table"),
            header_cell: sel("th"),
            row: sel("tr"),
            data_cell: sel("td"),
            image: sel("img"),
            mention: Regex::new(MENTION_PATTERN).unwrap(),
        }
    }

    /// Parse raw markup into a [`Document`].
    pub fn extract(&self, raw: &str) -> Document {
        let dom = Html::parse_document(raw);
        let mut doc = Document::new(DEFAULT_TITLE);

        if let Some(el) = dom.select(&self.title).next() {
            let title = element_text(&el);
            if !title.is_empty() {
                doc.title = title;
            }
        }

        // Grouped by tag level: all h1s, then all h2s, and so on.
        for (level, selector) in &self.headings {
            for el in dom.select(selector) {
                doc.headings.push(Heading::new(*level, element_text(&el)));
            }
        }

        for el in dom.select(&self.paragraph) {
            let text = element_text(&el);
            if !text.is_empty() {
                doc.paragraphs.push(text);
            }
        }

        for el in dom.select(&self.list_item) {
            let text = element_text(&el);
            if !text.is_empty() {
                doc.list_items.push(text);
            }
        }

        for table_el in dom.select(&self.table) {
            doc.tables.push(self.extract_table(&table_el));
        }

        for img in dom.select(&self.image) {
            doc.images.push(Image {
                src: attr(&img, "src"),
                alt: attr(&img, "alt"),
                width: attr(&img, "width"),
                height: attr(&img, "height"),
            });
        }

        doc.full_text = dom.root_element().text().collect();
        doc.numeric_mentions = self
            .mention
            .find_iter(&doc.full_text)
            .map(|m| m.as_str().to_string())
            .collect();
        doc.fetched_at = Utc::now();

        log::debug!(
            "extracted document: {} headings, {} paragraphs, {} tables, {} mentions",
            doc.headings.len(),
            doc.paragraphs.len(),
            doc.tables.len(),
            doc.numeric_mentions.len()
        );

        doc
    }

    /// Rows with zero extractable data cells are dropped; the table itself is
    /// kept even when every row was dropped.
    fn extract_table(&self, table_el: &ElementRef<'_>) -> Table {
        let headers = table_el
            .select(&self.header_cell)
            .map(|th| element_text(&th))
            .collect();

        let rows = table_el
            .select(&self.row)
            .filter_map(|tr| {
                let cells: Vec<String> =
                    tr.select(&self.data_cell).map(|td| element_text(&td)).collect();
                if cells.is_empty() {
                    None
                } else {
                    Some(cells)
                }
            })
            .collect();

        Table { headers, rows }
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn sel(selector: &str) -> Selector {
    // Selector literals are known-valid.
    Selector::parse(selector).unwrap()
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn attr(el: &ElementRef<'_>, name: &str) -> String {
    el.value().attr(name).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head><title> Voorjaarsnota 2024 </title></head>
          <body>
            <h2>Voortgang</h2>
            <h1>Voorjaarsnota 2024</h1>
            <p>  Voor mobiliteit is €45 miljoen beschikbaar.  </p>
            <p>   </p>
            <ul><li>Bouw van 3.000 woningen</li><li></li></ul>
            <table>
              <tr><th>Programma</th><th>Budget (miljoen €)</th></tr>
              <tr><td>Wonen</td><td>150</td></tr>
              <tr><td></td><td></td></tr>
            </table>
            <img src="kaart.png" alt="Kaart van Rotterdam" width="640">
          </body>
        </html>"#;

    #[test]
    fn test_extract_title_and_headings() {
        let doc = DocumentExtractor::new().extract(PAGE);
        assert_eq!(doc.title, "Voorjaarsnota 2024");

        // h1 precedes h2 regardless of document order.
        assert_eq!(doc.headings[0], Heading::new(1, "Voorjaarsnota 2024"));
        assert_eq!(doc.headings[1], Heading::new(2, "Voortgang"));
    }

    #[test]
    fn test_extract_prose_drops_empties() {
        let doc = DocumentExtractor::new().extract(PAGE);
        assert_eq!(
            doc.paragraphs,
            vec!["Voor mobiliteit is €45 miljoen beschikbaar."]
        );
        assert_eq!(doc.list_items, vec!["Bouw van 3.000 woningen"]);
    }

    #[test]
    fn test_extract_table_rows() {
        let doc = DocumentExtractor::new().extract(PAGE);
        assert_eq!(doc.tables.len(), 1);

        let table = &doc.tables[0];
        assert_eq!(table.headers, vec!["Programma", "Budget (miljoen €)"]);
        // The header <tr> has no <td> cells and is dropped; the blank data
        // row still has two (empty) cells and survives.
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Wonen", "150"]);
    }

    #[test]
    fn test_all_empty_rows_keeps_table() {
        let html = "<table><tr><th>Kop</th></tr><tr></tr></table>";
        let doc = DocumentExtractor::new().extract(html);
        assert_eq!(doc.tables.len(), 1);
        assert!(doc.tables[0].rows.is_empty());
        assert_eq!(doc.tables[0].headers, vec!["Kop"]);
    }

    #[test]
    fn test_numeric_mentions_keep_full_span() {
        let doc = DocumentExtractor::new().extract(PAGE);
        assert!(doc
            .numeric_mentions
            .iter()
            .any(|m| m == "45 miljoen"));
    }

    #[test]
    fn test_images() {
        let doc = DocumentExtractor::new().extract(PAGE);
        assert_eq!(doc.images.len(), 1);
        assert_eq!(doc.images[0].src, "kaart.png");
        assert_eq!(doc.images[0].alt, "Kaart van Rotterdam");
        assert_eq!(doc.images[0].width, "640");
        assert_eq!(doc.images[0].height, "");
    }

    #[test]
    fn test_missing_title_falls_back() {
        let doc = DocumentExtractor::new().extract("<p>tekst</p>");
        assert_eq!(doc.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_full_text_contains_all_sections() {
        let doc = DocumentExtractor::new().extract(PAGE);
        assert!(doc.full_text.contains("Voortgang"));
        assert!(doc.full_text.contains("Wonen"));
        assert!(doc.full_text.contains("mobiliteit"));
    }
}
