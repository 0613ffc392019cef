//! Output rendering: plain-text reports and JSON for downstream consumers.

use std::fmt::Write as _;

use serde::Serialize;

use crate::analyze::{aggregate_bar, Analysis};
use crate::error::{Error, Result};
use crate::model::{Document, Outline, OutlineNode, Table};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct Report<'a> {
    document: &'a Document,
    analysis: &'a Analysis,
}

/// Serialize a document together with its analysis to JSON.
pub fn to_json(doc: &Document, analysis: &Analysis, format: JsonFormat) -> Result<String> {
    let report = Report {
        document: doc,
        analysis,
    };
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&report),
        JsonFormat::Compact => serde_json::to_string(&report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Format an amount in base euros for display.
///
/// Amounts of a million and up render in miljoen with one decimal, a thousand
/// and up in duizend, anything smaller as whole euros.
pub fn format_amount(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("€{:.1} miljoen", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("€{:.1} duizend", amount / 1_000.0)
    } else {
        format!("€{:.0}", amount)
    }
}

/// Normalize a table's rows to the table's column count.
///
/// Short rows are padded with empty cells, long rows truncated, so every row
/// lines up under the headers.
pub fn uniform_rows(table: &Table) -> Vec<Vec<String>> {
    let width = table.column_count();
    table
        .rows
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.resize(width, String::new());
            row
        })
        .collect()
}

fn write_outline(out: &mut String, node: &OutlineNode, depth: usize) {
    let _ = writeln!(out, "{}- {}", "  ".repeat(depth), node.text);
    for child in &node.children {
        write_outline(out, child, depth + 1);
    }
}

/// Render a human-readable report of a document and its analysis.
pub fn text_report(doc: &Document, analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", doc.title);
    let _ = writeln!(out, "Opgehaald: {}", doc.fetched_at.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out);

    let stats = &analysis.stats;
    let _ = writeln!(
        out,
        "Secties: {}  Paragrafen: {}  Lijstitems: {}  Tabellen: {}  Bedragen: {}",
        stats.sections,
        stats.paragraphs,
        stats.list_items,
        stats.tables,
        analysis.financial.len()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Structuur:");
    let outline = Outline::from_headings(&doc.title, &doc.headings);
    if outline.root.children.is_empty() {
        let _ = writeln!(out, "  Geen koppen beschikbaar");
    } else {
        for child in &outline.root.children {
            write_outline(&mut out, child, 1);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Budget per categorie:");
    let categories = aggregate_bar(&analysis.financial);
    if categories.is_empty() {
        let _ = writeln!(out, "  Geen financiële gegevens beschikbaar");
    } else {
        for cat in &categories {
            let _ = writeln!(out, "  {:<20} {}", cat.category, format_amount(cat.total));
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Onderwerpen:");
    if analysis.topics.is_empty() {
        let _ = writeln!(out, "  Geen onderwerpen beschikbaar");
    } else {
        for topic in &analysis.topics {
            let _ = writeln!(out, "  {:<20} {}", topic.term, topic.count);
        }
    }

    out
}
