//! Category aggregation for the chart widgets.
//!
//! Entries are grouped by exact category string, summed, and sorted
//! descending. The bar and pie variants differ only in how they cut the long
//! tail; "Overig" entries from the mention strategy are ordinary categories
//! here and fold like any other.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::{parse_amount, FinancialEntry, OVERIG};
use crate::model::Table;

/// Bar chart: keep the top categories outright.
const BAR_LIMIT: usize = 8;

/// Pie chart: above this many categories the tail folds into "Overig".
const PIE_LIMIT: usize = 5;

/// Pie chart: how many categories survive a fold.
const PIE_KEPT: usize = 4;

/// Per-table breakdown: above this many slices the tail folds.
const SLICE_LIMIT: usize = 7;

/// Per-table breakdown: how many slices survive a fold.
const SLICE_KEPT: usize = 6;

/// Fraction of parseable cells above which a column counts as numeric.
const NUMERIC_COLUMN_RATIO: f64 = 0.3;

/// One category with its summed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedCategory {
    /// Category label
    pub category: String,

    /// Sum of all entry amounts for this category
    pub total: f64,
}

/// Group, sum, and sort descending; ties keep first-seen category order.
fn totals(entries: &[FinancialEntry]) -> Vec<AggregatedCategory> {
    let mut categories: Vec<AggregatedCategory> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        match index.get(entry.category.as_str()) {
            Some(&i) => categories[i].total += entry.amount,
            None => {
                index.insert(&entry.category, categories.len());
                categories.push(AggregatedCategory {
                    category: entry.category.clone(),
                    total: entry.amount,
                });
            }
        }
    }

    categories.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    categories
}

/// Bar chart aggregation: top 8 categories, smallest dropped.
pub fn aggregate_bar(entries: &[FinancialEntry]) -> Vec<AggregatedCategory> {
    let mut categories = totals(entries);
    categories.truncate(BAR_LIMIT);
    categories
}

/// Pie chart aggregation: with more than 5 distinct categories, the top 4 are
/// kept and the remainder folds into a synthetic "Overig" slice (only created
/// when its sum is positive).
pub fn aggregate_pie(entries: &[FinancialEntry]) -> Vec<AggregatedCategory> {
    let mut categories = totals(entries);
    if categories.len() > PIE_LIMIT {
        let rest: f64 = categories[PIE_KEPT..].iter().map(|c| c.total).sum();
        categories.truncate(PIE_KEPT);
        if rest > 0.0 {
            categories.push(AggregatedCategory {
                category: OVERIG.to_string(),
                total: rest,
            });
        }
    }
    categories
}

/// One slice of a per-table breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    /// Row label
    pub label: String,

    /// Parsed value in base currency units
    pub value: f64,
}

/// The value distribution of a single table, ready for a pie widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBreakdown {
    /// Header of the column the labels came from
    pub label_column: String,

    /// Header of the column the values came from
    pub value_column: String,

    /// Slices sorted descending by value, long tail folded into "Overig"
    pub slices: Vec<Slice>,
}

/// Build a value breakdown for one table, if it has a usable numeric column.
///
/// A column is numeric when more than 30% of its cells parse; among those the
/// column with the most non-zero values wins. Labels come from the first
/// non-numeric column, falling back to row numbers. Rows with empty or purely
/// numeric labels and rows with zero values are skipped.
pub fn table_breakdown(table: &Table) -> Option<TableBreakdown> {
    if table.headers.is_empty() || table.rows.is_empty() {
        return None;
    }

    let column_count = table.headers.len();
    let row_count = table.rows.len() as f64;

    let numeric_columns: Vec<usize> = (0..column_count)
        .filter(|&col| {
            let parseable = table
                .rows
                .iter()
                .filter(|row| row.get(col).and_then(|cell| parse_amount(cell)).is_some())
                .count();
            parseable as f64 > row_count * NUMERIC_COLUMN_RATIO
        })
        .collect();

    // Best column: most non-zero values; the first such column wins a tie.
    let mut best: Option<(usize, usize)> = None;
    for &col in &numeric_columns {
        let non_zero = table
            .rows
            .iter()
            .filter(|row| {
                row.get(col)
                    .and_then(|cell| parse_amount(cell))
                    .is_some_and(|v| v != 0.0)
            })
            .count();
        let better = match best {
            None => true,
            Some((_, n)) => non_zero > n,
        };
        if better {
            best = Some((col, non_zero));
        }
    }
    let (value_col, non_zero) = best?;
    if non_zero == 0 {
        return None;
    }

    let label_col = (0..column_count).find(|col| !numeric_columns.contains(col));

    static NUMERIC_LABEL: OnceLock<Regex> = OnceLock::new();
    let numeric_label =
        NUMERIC_LABEL.get_or_init(|| Regex::new(r"^[-+]?\d+(?:\.\d+)?$").unwrap());

    let mut slices: Vec<Slice> = Vec::new();
    for (i, row) in table.rows.iter().enumerate() {
        let label = match label_col {
            Some(col) => row.get(col).map(|s| s.trim()).unwrap_or_default().to_string(),
            None => format!("Rij {}", i + 1),
        };
        if label.is_empty() || numeric_label.is_match(&label) {
            continue;
        }
        let Some(value) = row.get(value_col).and_then(|cell| parse_amount(cell)) else {
            continue;
        };
        if value == 0.0 {
            continue;
        }
        slices.push(Slice { label, value });
    }

    if slices.is_empty() {
        return None;
    }

    slices.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    if slices.len() > SLICE_LIMIT {
        let rest: f64 = slices[SLICE_KEPT..].iter().map(|s| s.value).sum();
        slices.truncate(SLICE_KEPT);
        if rest > 0.0 {
            slices.push(Slice {
                label: OVERIG.to_string(),
                value: rest,
            });
        }
    }

    Some(TableBreakdown {
        label_column: label_col
            .map(|col| table.headers[col].clone())
            .unwrap_or_default(),
        value_column: table.headers[value_col].clone(),
        slices,
    })
}
