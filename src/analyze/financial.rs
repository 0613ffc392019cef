//! Financial-figure inference.
//!
//! Three independent heuristic strategies scan the structured document and
//! produce categorized monetary amounts: table columns with financial headers,
//! amount-plus-category phrases in prose, and bare numeric mentions. The
//! strategies overlap on purpose and their results are concatenated without
//! deduplication; downstream aggregation only needs category totals, so the
//! pipeline trades precision for recall.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::OVERIG;
use crate::model::Document;

/// Header terms that mark a table column as financial.
const FINANCIAL_HEADER_TERMS: [&str; 7] = [
    "budget",
    "bedrag",
    "miljoen",
    "euro",
    "€",
    "kosten",
    "investering",
];

/// Amount-plus-category phrases in prose, both word orders:
/// "€20 miljoen voor innovatie" and "voor de mobiliteit is €45 miljoen".
const PROSE_PATTERN: &str = concat!(
    r"(?i)",
    r"(?:€\s*)?(?P<amt>\d+(?:[.,]\d+)?)\s*(?P<unit>miljoen|mln|duizend|k)?",
    r"\s*(?:euro|€)?\s*(?:voor|aan|in|op)\s*(?P<cat>[^,.]+)",
    r"|",
    r"\b(?:voor|aan|in|op)\s+(?P<rcat>[^,.]*?)\s+is\s+",
    r"(?:€\s*)?(?P<ramt>\d+(?:[.,]\d+)?)\s*(?P<runit>miljoen|mln|duizend|k)?\s*(?:euro|€)?",
);

/// Leading amount in a numeric mention, anchored at the start.
const MENTION_PATTERN: &str =
    r"(?i)^(?:€\s*)?(?P<amt>\d+(?:[.,]\d+)?)\s*(?P<unit>miljoen|mln|duizend|k)?\s*(?:euro|€)?";

/// Where a financial entry was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A financial table column
    Table,
    /// A paragraph or list item
    Text,
    /// A numeric mention
    Numeric,
}

/// One categorized monetary amount with provenance.
///
/// `amount` is expressed in base currency units (euro-equivalent) after the
/// unit multiplier has been applied. Negative amounts pass through unfiltered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    /// Category label
    pub category: String,

    /// Amount in base currency units
    pub amount: f64,

    /// The raw text span the amount was parsed from
    pub source_text: String,

    /// Which strategy produced this entry
    pub source: SourceKind,
}

/// Runs the three extraction strategies over a document.
pub struct FinancialExtractor {
    prose: Regex,
    mention: Regex,
}

impl FinancialExtractor {
    /// Create a new extractor. Pattern literals are fixed, so construction is
    /// infallible.
    pub fn new() -> Self {
        Self {
            prose: Regex::new(PROSE_PATTERN).unwrap(),
            mention: Regex::new(MENTION_PATTERN).unwrap(),
        }
    }

    /// Extract financial entries from all strategies, concatenated in
    /// strategy order: table-derived, text-derived, mention-derived.
    ///
    /// A candidate that fails to parse is skipped individually; extraction
    /// never aborts the batch and an empty document yields an empty list.
    pub fn extract(&self, doc: &Document) -> Vec<FinancialEntry> {
        let mut entries = Vec::new();
        self.extract_from_tables(doc, &mut entries);
        self.extract_from_prose(doc, &mut entries);
        self.extract_from_mentions(doc, &mut entries);
        entries
    }

    /// Table pass: rows of tables whose header advertises a financial column.
    fn extract_from_tables(&self, doc: &Document, out: &mut Vec<FinancialEntry>) {
        for table in &doc.tables {
            if table.headers.is_empty() || table.rows.is_empty() {
                continue;
            }
            let Some(col) = financial_column(&table.headers) else {
                continue;
            };
            let header = &table.headers[col];

            for row in &table.rows {
                if row.len() <= col {
                    log::debug!("skipping short table row: {row:?}");
                    continue;
                }
                let cell = &row[col];
                match parse_cell_amount(cell, header) {
                    Some(amount) => out.push(FinancialEntry {
                        category: row[0].clone(),
                        amount,
                        source_text: cell.clone(),
                        source: SourceKind::Table,
                    }),
                    None => log::debug!("skipping unparsable amount cell: {cell:?}"),
                }
            }
        }
    }

    /// Prose pass: amount-plus-category phrases in paragraphs and list items.
    fn extract_from_prose(&self, doc: &Document, out: &mut Vec<FinancialEntry>) {
        for text in doc.prose() {
            for caps in self.prose.captures_iter(text) {
                let (amt, unit, cat) = if let Some(amt) = caps.name("amt") {
                    (amt, caps.name("unit"), caps.name("cat"))
                } else if let Some(amt) = caps.name("ramt") {
                    (amt, caps.name("runit"), caps.name("rcat"))
                } else {
                    continue;
                };

                let Ok(value) = amt.as_str().replace(',', ".").parse::<f64>() else {
                    log::debug!("skipping unparsable prose amount: {:?}", amt.as_str());
                    continue;
                };
                let multiplier = unit.map_or(1.0, |u| unit_multiplier(u.as_str()));
                let category = cat.map_or_else(String::new, |c| c.as_str().trim().to_string());

                out.push(FinancialEntry {
                    category,
                    amount: value * multiplier,
                    source_text: caps[0].to_string(),
                    source: SourceKind::Text,
                });
            }
        }
    }

    /// Mention pass: numeric mentions. No category inference is attempted;
    /// every entry is filed under "Overig".
    fn extract_from_mentions(&self, doc: &Document, out: &mut Vec<FinancialEntry>) {
        for mention in &doc.numeric_mentions {
            let Some(caps) = self.mention.captures(mention) else {
                log::debug!("skipping numeric mention without leading amount: {mention:?}");
                continue;
            };
            let Some(amt) = caps.name("amt") else {
                continue;
            };
            let Ok(value) = amt.as_str().replace(',', ".").parse::<f64>() else {
                continue;
            };
            let multiplier = caps.name("unit").map_or(1.0, |u| unit_multiplier(u.as_str()));

            out.push(FinancialEntry {
                category: OVERIG.to_string(),
                amount: value * multiplier,
                source_text: mention.clone(),
                source: SourceKind::Numeric,
            });
        }
    }
}

impl Default for FinancialExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// First column whose header text contains a financial term, case-insensitive.
fn financial_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.to_lowercase();
        FINANCIAL_HEADER_TERMS.iter().any(|term| h.contains(term))
    })
}

/// The numeric parse rule for table-style values.
///
/// European convention: `.` is a thousands separator and `,` the decimal
/// separator, so "1.234,5" becomes 1234.5. The substitution runs over the
/// whole string before the number search; multi-number strings are corrupted
/// by this, which is accepted (the first number of the transformed string
/// wins). Unit keywords multiply the result: miljoen/mln before duizend/k.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let normalized = raw.replace('.', "").replace(',', ".");
    let value: f64 = number_pattern().find(&normalized)?.as_str().parse().ok()?;
    Some(value * unit_multiplier(&normalized))
}

fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").unwrap())
}

/// Table cells inherit the unit advertised by their column header when the
/// cell itself carries none: "Budget 2024 (miljoen €)" with cell "150" means
/// 150 million. The cell's own unit wins when present.
fn parse_cell_amount(cell: &str, header: &str) -> Option<f64> {
    let normalized = cell.replace('.', "").replace(',', ".");
    let value: f64 = number_pattern().find(&normalized)?.as_str().parse().ok()?;

    let mut multiplier = unit_multiplier(&normalized);
    if multiplier == 1.0 {
        multiplier = header_unit_multiplier(header);
    }
    Some(value * multiplier)
}

/// Header units must stand alone as whole words. The substring checks used
/// for cell text are too loose here: "Kosten" contains a bare "k" but does
/// not advertise amounts in thousands.
fn header_unit_multiplier(header: &str) -> f64 {
    static MILLIONS: OnceLock<Regex> = OnceLock::new();
    static THOUSANDS: OnceLock<Regex> = OnceLock::new();
    let millions = MILLIONS.get_or_init(|| Regex::new(r"(?i)\b(?:miljoen|mln)\b").unwrap());
    let thousands = THOUSANDS.get_or_init(|| Regex::new(r"(?i)\b(?:duizend|k)\b").unwrap());

    if millions.is_match(header) {
        1_000_000.0
    } else if thousands.is_match(header) {
        1_000.0
    } else {
        1.0
    }
}

/// Unit multiplier from case-folded substring checks, miljoen/mln first.
fn unit_multiplier(s: &str) -> f64 {
    let s = s.to_lowercase();
    if s.contains("miljoen") || s.contains("mln") {
        1_000_000.0
    } else if s.contains("duizend") || s.contains('k') {
        1_000.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;

    fn doc_with_table(table: Table) -> Document {
        let mut doc = Document::new("t");
        doc.tables.push(table);
        doc
    }

    #[test]
    fn test_empty_document_yields_no_entries() {
        let entries = FinancialExtractor::new().extract(&Document::new("leeg"));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unit_multiplier_order() {
        assert_eq!(unit_multiplier("45 miljoen"), 1_000_000.0);
        assert_eq!(unit_multiplier("5 MLN"), 1_000_000.0);
        assert_eq!(unit_multiplier("10 duizend"), 1_000.0);
        assert_eq!(unit_multiplier("25k"), 1_000.0);
        // miljoen wins over the bare "k" it also contains
        assert_eq!(unit_multiplier("2,5 miljoenk"), 1_000_000.0);
        assert_eq!(unit_multiplier("150"), 1.0);
    }

    #[test]
    fn test_parse_amount_european_convention() {
        assert_eq!(parse_amount("1.234,5"), Some(1234.5));
        assert_eq!(parse_amount("€ 10 miljoen"), Some(10_000_000.0));
        assert_eq!(parse_amount("10,5 miljoen €"), Some(10_500_000.0));
        assert_eq!(parse_amount("-25"), Some(-25.0));
        assert_eq!(parse_amount("n.v.t."), None);
    }

    #[test]
    fn test_parse_amount_multi_number_corruption_is_preserved() {
        // "10.5 en 3.2" loses its dots before the search: first number is 105.
        assert_eq!(parse_amount("10.5 en 3.2"), Some(105.0));
    }

    #[test]
    fn test_table_pass_header_supplies_unit() {
        let table = Table::from_strings(
            ["Programma", "Budget 2024 (miljoen €)", "Verschil"],
            [vec!["Wonen", "150", "+25"]],
        );
        let entries = FinancialExtractor::new().extract(&doc_with_table(table));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "Wonen");
        assert_eq!(entries[0].amount, 150_000_000.0);
        assert_eq!(entries[0].source_text, "150");
        assert_eq!(entries[0].source, SourceKind::Table);
    }

    #[test]
    fn test_table_pass_cell_unit_beats_header() {
        let table = Table::from_strings(
            ["Post", "Bedrag (miljoen)"],
            [vec!["Onderhoud", "250 duizend"]],
        );
        let entries = FinancialExtractor::new().extract(&doc_with_table(table));
        assert_eq!(entries[0].amount, 250_000.0);
    }

    #[test]
    fn test_table_pass_kosten_header_is_not_a_unit() {
        let table = Table::from_strings(["Post", "Kosten (€)"], [vec!["Onderhoud", "150"]]);
        let entries = FinancialExtractor::new().extract(&doc_with_table(table));

        // "Kosten" marks the column as financial but carries no unit word;
        // the bare "k" inside it must not inflate plain amounts.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 150.0);
    }

    #[test]
    fn test_header_unit_requires_whole_word() {
        assert_eq!(header_unit_multiplier("Budget 2024 (miljoen €)"), 1_000_000.0);
        assert_eq!(header_unit_multiplier("Bedrag (k€)"), 1_000.0);
        assert_eq!(header_unit_multiplier("Kosten (€)"), 1.0);
        assert_eq!(header_unit_multiplier("Werkelijke kosten"), 1.0);
    }

    #[test]
    fn test_table_pass_skips_bad_rows() {
        let table = Table::from_strings(
            ["Programma", "Budget"],
            [
                vec!["Wonen", "150"],
                vec!["te kort"],
                vec!["Cultuur", "n.v.t."],
                vec!["Economie", "-70"],
            ],
        );
        let entries = FinancialExtractor::new().extract(&doc_with_table(table));

        let categories: Vec<&str> = entries.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["Wonen", "Economie"]);
        assert_eq!(entries[1].amount, -70.0);
    }

    #[test]
    fn test_table_pass_ignores_non_financial_tables() {
        let table = Table::from_strings(["Wijk", "Inwoners"], [vec!["Noord", "80000"]]);
        let entries = FinancialExtractor::new().extract(&doc_with_table(table));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_prose_pass_amount_first() {
        let mut doc = Document::new("t");
        doc.paragraphs.push(
            "De economische ontwikkeling wordt gestimuleerd met €20 miljoen voor innovatie \
             en ondernemerschap."
                .to_string(),
        );
        let entries = FinancialExtractor::new().extract(&doc);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 20_000_000.0);
        assert_eq!(entries[0].category, "innovatie en ondernemerschap");
        assert_eq!(entries[0].source, SourceKind::Text);
    }

    #[test]
    fn test_prose_pass_category_first() {
        let mut doc = Document::new("t");
        doc.paragraphs.push(
            "Voor het verbeteren van de mobiliteit is €45 miljoen beschikbaar gesteld.".to_string(),
        );
        let entries = FinancialExtractor::new().extract(&doc);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 45_000_000.0);
        assert!(entries[0].category.contains("mobiliteit"));
    }

    #[test]
    fn test_prose_pass_decimal_comma() {
        let mut doc = Document::new("t");
        doc.list_items
            .push("12,5 miljoen euro voor groenonderhoud".to_string());
        let entries = FinancialExtractor::new().extract(&doc);

        assert_eq!(entries[0].amount, 12_500_000.0);
        assert_eq!(entries[0].category, "groenonderhoud");
    }

    #[test]
    fn test_prose_pass_no_match_on_plain_prose() {
        let mut doc = Document::new("t");
        doc.paragraphs
            .push("Rotterdam investeert fors in de stad.".to_string());
        let entries = FinancialExtractor::new().extract(&doc);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_mention_pass_thousands_dot_reads_as_decimal() {
        let mut doc = Document::new("t");
        doc.numeric_mentions.push("3.000 woningen".to_string());
        let entries = FinancialExtractor::new().extract(&doc);

        // Fixed behavior: the simple decimal parse reads "3.000" as 3.0.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 3.0);
        assert_eq!(entries[0].category, OVERIG);
        assert_eq!(entries[0].source, SourceKind::Numeric);
        assert_eq!(entries[0].source_text, "3.000 woningen");
    }

    #[test]
    fn test_mention_pass_units() {
        let mut doc = Document::new("t");
        doc.numeric_mentions.push("€45 miljoen".to_string());
        doc.numeric_mentions.push("150 miljoen €".to_string());
        doc.numeric_mentions.push("15 km".to_string());
        let entries = FinancialExtractor::new().extract(&doc);

        assert_eq!(entries[0].amount, 45_000_000.0);
        assert_eq!(entries[1].amount, 150_000_000.0);
        // "km" satisfies the bare-"k" substring check; accepted noise.
        assert_eq!(entries[2].amount, 15_000.0);
    }

    #[test]
    fn test_pass_order_is_table_text_numeric() {
        let mut doc = Document::new("t");
        doc.tables.push(Table::from_strings(
            ["Programma", "Budget (miljoen €)"],
            [vec!["Wonen", "150"]],
        ));
        doc.paragraphs
            .push("€20 miljoen voor innovatie.".to_string());
        doc.numeric_mentions.push("30 miljoen".to_string());

        let entries = FinancialExtractor::new().extract(&doc);
        let kinds: Vec<SourceKind> = entries.iter().map(|e| e.source).collect();
        assert_eq!(
            kinds,
            vec![SourceKind::Table, SourceKind::Text, SourceKind::Numeric]
        );
    }
}
