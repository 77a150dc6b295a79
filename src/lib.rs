// Whaler - Core Library
// CSV export in → normalized, deduplicated, ranked payer report out

pub mod money;
pub mod schema;      // Shape layer - column synonym mapping + SchemaError
pub mod ledger;      // Canonical entries + deduplication + CSV export
pub mod attribution; // Payer identity + category classification
pub mod report;      // Aggregation - ranking, shares, projections
pub mod pipeline;    // End-to-end run + content-hash memoization
pub mod demo;        // Built-in demonstration dataset

// Re-export commonly used types
pub use attribution::{attribute, attribute_all, AttributedEntry, Category};
pub use ledger::{dedupe, write_csv, LedgerEntry};
pub use pipeline::{analyze_csv, analyze_ledger, clean_ledger, content_hash, ReportCache};
pub use report::{aggregate, DailyBreakdown, RankedPayer, Report};
pub use schema::{normalize_csv, CanonicalColumn, SchemaError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
