//! Derivation of dashboard metrics from a scraped [`Document`].
//!
//! Everything in this module is a pure function of the current document and is
//! recomputed on every refresh tick; nothing is persisted incrementally.

mod aggregate;
mod financial;
mod topics;

pub use aggregate::{
    aggregate_bar, aggregate_pie, table_breakdown, AggregatedCategory, Slice, TableBreakdown,
};
pub use financial::{parse_amount, FinancialEntry, FinancialExtractor, SourceKind};
pub use topics::{TopicCount, TopicExtractor};

use crate::model::Document;
use serde::{Deserialize, Serialize};

/// Fixed fallback and overflow category name ("Other").
pub const OVERIG: &str = "Overig";

/// Counts shown on the dashboard's statistics cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of headings
    pub sections: usize,
    /// Number of paragraphs
    pub paragraphs: usize,
    /// Number of list items
    pub list_items: usize,
    /// Number of tables
    pub tables: usize,
}

impl DocumentStats {
    /// Compute the counts for a document.
    pub fn for_document(doc: &Document) -> Self {
        Self {
            sections: doc.headings.len(),
            paragraphs: doc.paragraphs.len(),
            list_items: doc.list_items.len(),
            tables: doc.tables.len(),
        }
    }
}

/// Combined analysis output for one refresh cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Categorized monetary amounts from all three passes, in pass order
    pub financial: Vec<FinancialEntry>,

    /// Top topics ranked by frequency
    pub topics: Vec<TopicCount>,

    /// Document statistics
    pub stats: DocumentStats,
}

/// Run the full analysis pipeline over a document.
///
/// Never fails: a document without usable content yields empty collections.
pub fn analyze(doc: &Document) -> Analysis {
    let financial = FinancialExtractor::new().extract(doc);
    let topics = TopicExtractor::new().extract(&doc.full_text);
    let stats = DocumentStats::for_document(doc);

    log::info!(
        "analysis complete: {} financial entries, {} topics",
        financial.len(),
        topics.len()
    );

    Analysis {
        financial,
        topics,
        stats,
    }
}
