// 📐 Schema Normalizer - Arbitrary export columns → canonical ledger shape
// Maps loosely-named columns into {Date, Description, Credits, Debits}

use crate::ledger::LedgerEntry;
use crate::money;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// CANONICAL COLUMNS
// ============================================================================

/// Canonical column roles recognized in an export header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalColumn {
    Date,
    Description,
    Credits,
    Debits,
    /// Single signed amount column; split into Credits/Debits downstream
    Amount,
}

/// Synonym table: lowercased header name → canonical role.
///
/// Kept as data rather than conditionals so the mapping can be tested in
/// isolation and extended without touching `normalize_csv`.
const COLUMN_SYNONYMS: &[(&str, CanonicalColumn)] = &[
    ("date", CanonicalColumn::Date),
    ("day", CanonicalColumn::Date),
    ("timestamp", CanonicalColumn::Date),
    ("time", CanonicalColumn::Date),
    ("description", CanonicalColumn::Description),
    ("details", CanonicalColumn::Description),
    ("note", CanonicalColumn::Description),
    ("memo", CanonicalColumn::Description),
    ("credit", CanonicalColumn::Credits),
    ("credits", CanonicalColumn::Credits),
    ("income", CanonicalColumn::Credits),
    ("received", CanonicalColumn::Credits),
    ("earnings", CanonicalColumn::Credits),
    ("debit", CanonicalColumn::Debits),
    ("debits", CanonicalColumn::Debits),
    ("fee", CanonicalColumn::Debits),
    ("fees", CanonicalColumn::Debits),
    ("spent", CanonicalColumn::Debits),
    ("charge", CanonicalColumn::Debits),
    ("amount", CanonicalColumn::Amount),
    ("net", CanonicalColumn::Amount),
    ("total", CanonicalColumn::Amount),
];

impl CanonicalColumn {
    /// Map a raw header name to its canonical role, case-insensitively.
    /// Unrecognized headers return None and are dropped.
    pub fn from_header(header: &str) -> Option<CanonicalColumn> {
        let lowered = header.trim().to_lowercase();
        COLUMN_SYNONYMS
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, column)| *column)
    }
}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Fatal input-shape error: the one condition that aborts a whole run.
///
/// A ledger without dates cannot be deduplicated or time-ranked, so a missing
/// Date column fails the import. Every other anomaly (bad money cells,
/// unparseable dates) is absorbed row-by-row instead.
#[derive(Debug, Clone)]
pub struct SchemaError {
    pub message: String,
}

impl SchemaError {
    fn missing_date() -> Self {
        SchemaError {
            message: "Could not find a Date column.".to_string(),
        }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "schema error: {}", self.message)
    }
}

impl std::error::Error for SchemaError {}

// ============================================================================
// DATE PARSING
// ============================================================================

/// Parse a date cell, trying formats in order (most specific first).
/// Date-only formats resolve to midnight.
fn parse_date_cell(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// Resolved header layout: index of each canonical column in the input.
/// When several input columns map to the same role, the first one wins.
#[derive(Debug, Default)]
struct ColumnLayout {
    date: Option<usize>,
    description: Option<usize>,
    credits: Option<usize>,
    debits: Option<usize>,
    amount: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut layout = ColumnLayout::default();

        for (idx, header) in headers.iter().enumerate() {
            let slot = match CanonicalColumn::from_header(header) {
                Some(CanonicalColumn::Date) => &mut layout.date,
                Some(CanonicalColumn::Description) => &mut layout.description,
                Some(CanonicalColumn::Credits) => &mut layout.credits,
                Some(CanonicalColumn::Debits) => &mut layout.debits,
                Some(CanonicalColumn::Amount) => &mut layout.amount,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        layout
    }

    /// The Amount split only applies when no dedicated money column exists
    fn uses_amount_split(&self) -> bool {
        self.credits.is_none() && self.debits.is_none() && self.amount.is_some()
    }
}

/// Normalize a raw CSV export into an ordered ledger.
///
/// Policy, in order:
/// 1. Headers map case-insensitively through the synonym table; unrecognized
///    columns are dropped.
/// 2. No Date column → `SchemaError` (the one fatal validation).
/// 3. No Description column → empty string per row, no failure.
/// 4. Rows whose date cell does not parse are dropped silently.
/// 5. If both Credits and Debits are absent but Amount exists, the signed
///    amount is split: positive → credits, negative → debits magnitude.
/// 6. Any still-missing money column defaults to zero.
///
/// Output preserves input order minus dropped rows.
pub fn normalize_csv(bytes: &[u8]) -> Result<Vec<LedgerEntry>, SchemaError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(_) => return Err(SchemaError::missing_date()),
    };

    let layout = ColumnLayout::from_headers(&headers);
    if layout.date.is_none() {
        return Err(SchemaError::missing_date());
    }

    let mut entries = Vec::new();

    for record in reader.records() {
        // Unreadable rows are unusable rows, same as unparseable dates
        let record = match record {
            Ok(record) => record,
            Err(_) => continue,
        };

        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));

        let date = match cell(layout.date).and_then(parse_date_cell) {
            Some(date) => date,
            None => continue,
        };

        let description = cell(layout.description).unwrap_or("").trim().to_string();

        let (credits, debits) = if layout.uses_amount_split() {
            let amount = money::parse_opt(cell(layout.amount));
            (amount.max(0.0), (-amount).max(0.0))
        } else {
            // Dedicated money columns are magnitudes; a stray parenthesized
            // negative clamps to zero so the ledger invariant holds
            (
                money::parse_opt(cell(layout.credits)).max(0.0),
                money::parse_opt(cell(layout.debits)).max(0.0),
            )
        };

        entries.push(LedgerEntry::new(date, description, credits, debits));
    }

    Ok(entries)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_table_date_variants() {
        for header in ["date", "Day", "TIMESTAMP", " time "] {
            assert_eq!(
                CanonicalColumn::from_header(header),
                Some(CanonicalColumn::Date),
                "header {:?} should map to Date",
                header
            );
        }
    }

    #[test]
    fn test_synonym_table_money_variants() {
        assert_eq!(
            CanonicalColumn::from_header("Earnings"),
            Some(CanonicalColumn::Credits)
        );
        assert_eq!(
            CanonicalColumn::from_header("Fees"),
            Some(CanonicalColumn::Debits)
        );
        assert_eq!(
            CanonicalColumn::from_header("Net"),
            Some(CanonicalColumn::Amount)
        );
    }

    #[test]
    fn test_synonym_table_unknown_header() {
        assert_eq!(CanonicalColumn::from_header("Account Number"), None);
    }

    #[test]
    fn test_normalize_basic_export() {
        let csv = "Date,Description,Credits,Debits\n\
                   2026-02-01,alice chat,$35.00,\n\
                   2026-02-02,bob video,$20.00,$1.50\n";

        let entries = normalize_csv(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "alice chat");
        assert_eq!(entries[0].credits, 35.0);
        assert_eq!(entries[0].debits, 0.0);
        assert_eq!(entries[1].debits, 1.5);
    }

    #[test]
    fn test_normalize_missing_date_column_fails() {
        let csv = "Description,Credits\nalice chat,$35.00\n";
        let result = normalize_csv(csv.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_missing_description_defaults_empty() {
        let csv = "Date,Credits\n2026-02-01,$35.00\n";
        let entries = normalize_csv(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "");
    }

    #[test]
    fn test_normalize_drops_unparseable_dates() {
        let csv = "Date,Description,Credits\n\
                   not-a-date,alice chat,$35.00\n\
                   2026-02-02,bob video,$20.00\n";

        let entries = normalize_csv(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "bob video");
    }

    #[test]
    fn test_normalize_amount_split_negative() {
        let csv = "Date,Description,Amount\n2026-02-01,platform fee,-20.00\n";
        let entries = normalize_csv(csv.as_bytes()).unwrap();

        assert_eq!(entries[0].credits, 0.0);
        assert_eq!(entries[0].debits, 20.0);
    }

    #[test]
    fn test_normalize_amount_split_positive() {
        let csv = "Date,Description,Amount\n2026-02-01,alice gift,$50.00\n";
        let entries = normalize_csv(csv.as_bytes()).unwrap();

        assert_eq!(entries[0].credits, 50.0);
        assert_eq!(entries[0].debits, 0.0);
    }

    #[test]
    fn test_normalize_amount_ignored_when_credits_present() {
        // Dedicated money column wins over the signed Amount column
        let csv = "Date,Credits,Amount\n2026-02-01,$10.00,-99.00\n";
        let entries = normalize_csv(csv.as_bytes()).unwrap();

        assert_eq!(entries[0].credits, 10.0);
        assert_eq!(entries[0].debits, 0.0);
    }

    #[test]
    fn test_normalize_clamps_negative_money_columns() {
        let csv = "Date,Description,Credits,Debits\n2026-02-01,alice chat,(2.00),$1.00\n";
        let entries = normalize_csv(csv.as_bytes()).unwrap();

        assert_eq!(entries[0].credits, 0.0);
        assert_eq!(entries[0].debits, 1.0);
    }

    #[test]
    fn test_normalize_preserves_input_order() {
        let csv = "Date,Description,Credits\n\
                   2026-02-03,third,1\n\
                   2026-02-01,first,2\n\
                   2026-02-02,second,3\n";

        let entries = normalize_csv(csv.as_bytes()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_normalize_mixed_date_formats() {
        let csv = "Timestamp,Memo,Income\n\
                   2026-02-01 14:30:00,alice chat,$5\n\
                   02/01/2026,bob text,$6\n";

        let entries = normalize_csv(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].date.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2026-02-01 14:30:00"
        );
        assert_eq!(
            entries[1].date.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2026-02-01 00:00:00"
        );
    }

    #[test]
    fn test_normalize_empty_input_fails_schema() {
        let result = normalize_csv(b"");
        assert!(result.is_err());
    }
}
