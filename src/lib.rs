//! # notascope
//!
//! Scraper and analysis library for the Rotterdam Voorjaarsnota 2024 report.
//!
//! This library fetches the archived report page, extracts its structure
//! (headings, paragraphs, lists, tables, numeric mentions), and derives the
//! dashboard metrics: categorized financial amounts, topic frequencies, and
//! chart-ready aggregations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use notascope::{analyze, render, SnapshotStore};
//!
//! // Snapshot if present, otherwise fetch, otherwise built-in sample data.
//! let doc = SnapshotStore::new().fetch_or_load();
//! let analysis = analyze(&doc);
//! println!("{}", render::text_report(&doc, &analysis));
//! ```
//!
//! ## Features
//!
//! - **Resilient acquisition**: snapshot cache with network and sample fallback
//! - **Structure preservation**: headings, paragraphs, tables, lists, images
//! - **Financial extraction**: three heuristic strategies over tables, prose,
//!   and standalone numeric mentions
//! - **Dashboard aggregation**: bar and pie groupings plus per-table breakdowns
//! - **Periodic refresh**: scheduler re-runs the pipeline on an interval

pub mod analyze;
pub mod error;
pub mod model;
pub mod parser;
pub mod refresh;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use analyze::{
    aggregate_bar, aggregate_pie, analyze, parse_amount, table_breakdown, AggregatedCategory,
    Analysis, DocumentStats, FinancialEntry, FinancialExtractor, SourceKind, TableBreakdown,
    TopicCount, TopicExtractor,
};
pub use error::{Error, Result};
pub use model::{Document, Heading, Image, Outline, OutlineNode, Table};
pub use parser::DocumentExtractor;
pub use refresh::Refresher;
pub use render::JsonFormat;
pub use store::{sample_document, SnapshotStore, DEFAULT_SNAPSHOT_PATH, DEFAULT_URL};

/// Extract a structured document from raw HTML.
///
/// # Example
///
/// ```
/// use notascope::extract_document;
///
/// let doc = extract_document("<html><body><h1>Voortgang</h1></body></html>");
/// assert_eq!(doc.headings[0].text, "Voortgang");
/// ```
pub fn extract_document(html: &str) -> Document {
    DocumentExtractor::new().extract(html)
}
