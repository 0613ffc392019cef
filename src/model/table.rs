//! Table types.

use serde::{Deserialize, Serialize};

/// A table as extracted from the page.
///
/// Rows are raw: no width normalization is guaranteed at this stage.
/// Consumers that need fixed-width rows pad or truncate against the header
/// length themselves (see [`crate::render::uniform_rows`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header cell texts, possibly empty
    pub headers: Vec<String>,

    /// Data rows; each row holds the trimmed `<td>` texts of one `<tr>`
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from header and row string literals.
    pub fn from_strings<S: Into<String>>(
        headers: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<S>>,
    ) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count: header length, or the widest row when headers are absent.
    pub fn column_count(&self) -> usize {
        if self.headers.is_empty() {
            self.rows.iter().map(Vec::len).max().unwrap_or(0)
        } else {
            self.headers.len()
        }
    }

    /// Check if the table has neither headers nor rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}
