// 📒 Ledger - Canonical transactions + deduplication
// House rule: a transaction's identity is Date + Description + Credits + Debits

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Timestamp format used for dedupe keys and CSV export
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// LEDGER ENTRY
// ============================================================================

/// One normalized transaction.
///
/// Produced by `schema::normalize_csv` and immutable afterwards. Credits and
/// debits are both non-negative; a signed source amount is split so at most
/// one of the two is nonzero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDateTime,
    pub description: String,
    pub credits: f64,
    pub debits: f64,
}

impl LedgerEntry {
    pub fn new(date: NaiveDateTime, description: String, credits: f64, debits: f64) -> Self {
        LedgerEntry {
            date,
            description,
            credits,
            debits,
        }
    }

    /// Composite identity key for duplicate detection.
    ///
    /// Money fields are rounded to 2 decimals before keying, so sub-cent
    /// noise is invisible but genuinely different cent amounts stay distinct.
    /// Key equality is exact string equality - no fuzzy matching.
    pub fn dedupe_key(&self) -> String {
        format!(
            "{}||{}||{:.2}||{:.2}",
            self.date.format(DATE_FORMAT),
            self.description,
            self.credits,
            self.debits
        )
    }
}

// ============================================================================
// DEDUPLICATION
// ============================================================================

/// Remove exact repeats, keeping the first occurrence of each key.
///
/// Pure and order-preserving: surviving entries keep their relative input
/// order, and the input is never mutated. Empty input yields empty output.
pub fn dedupe(entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();

    for entry in entries {
        if seen.insert(entry.dedupe_key()) {
            unique.push(entry.clone());
        }
    }

    unique
}

// ============================================================================
// EXPORT
// ============================================================================

/// Serialize a deduped ledger back to CSV for download.
///
/// Columns: Date, Description, Credits, Debits. Dates are written in fixed
/// `YYYY-MM-DD HH:MM:SS` format.
pub fn write_csv(entries: &[LedgerEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["Date", "Description", "Credits", "Debits"])?;

    for entry in entries {
        writer.write_record([
            entry.date.format(DATE_FORMAT).to_string(),
            entry.description.clone(),
            format!("{:.2}", entry.credits),
            format!("{:.2}", entry.debits),
        ])?;
    }

    Ok(writer.into_inner()?)
}

// ============================================================================
// TESTS
// ============================================================================
