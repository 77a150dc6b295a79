// 🏷️ Attribution - Payer identity + transaction-type category
// Both are derived from the free-text description field

use crate::ledger::LedgerEntry;
use serde::{Deserialize, Serialize};

/// Payer assigned when the description carries no usable token
pub const UNKNOWN_PAYER: &str = "Unknown";

// ============================================================================
// CATEGORY
// ============================================================================

/// Transaction-type category inferred from description keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Video,
    Gifts,
    Chat,
    Other,
}

impl Category {
    /// All categories, in rule-precedence order with Other last.
    /// Used to emit dense chart series with explicit zero cells.
    pub const ALL: [Category; 4] = [
        Category::Video,
        Category::Gifts,
        Category::Chat,
        Category::Other,
    ];

    pub fn name(&self) -> &str {
        match self {
            Category::Video => "Video",
            Category::Gifts => "Gifts",
            Category::Chat => "Chat",
            Category::Other => "Other",
        }
    }
}

/// Ordered keyword rules - first match wins.
///
/// The order is a policy choice, not an objective truth: a description
/// containing both "video" and "gift" classifies as Video. Keeping the rules
/// as data lets tests enumerate precedence cases directly.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Video, &["video", "facetime"]),
    (Category::Gifts, &["gift", "rose"]),
    (Category::Chat, &["chat", "message", "text"]),
];

/// Classify a description by case-insensitive keyword match.
/// No keyword hit → Other.
pub fn classify(description: &str) -> Category {
    let lowered = description.to_lowercase();

    for (category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return *category;
        }
    }

    Category::Other
}

// ============================================================================
// PAYER EXTRACTION
// ============================================================================

/// First whitespace-delimited token of the description is the payer name.
///
/// This is a simplifying heuristic tied to the export format at hand: any
/// export where the first token is not a username will misattribute every
/// row. Swap this function if the exports change.
pub fn extract_payer(description: &str) -> String {
    description
        .split_whitespace()
        .next()
        .map(|token| token.to_string())
        .unwrap_or_else(|| UNKNOWN_PAYER.to_string())
}

// ============================================================================
// ATTRIBUTED ENTRY
// ============================================================================

/// LedgerEntry plus the fields derived from its description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedEntry {
    pub entry: LedgerEntry,
    pub payer: String,
    pub category: Category,
}

/// Attribute one entry. Total function: always succeeds.
pub fn attribute(entry: LedgerEntry) -> AttributedEntry {
    let payer = extract_payer(&entry.description);
    let category = classify(&entry.description);
    AttributedEntry {
        entry,
        payer,
        category,
    }
}

/// Attribute a whole ledger, preserving order.
pub fn attribute_all(entries: Vec<LedgerEntry>) -> Vec<AttributedEntry> {
    entries.into_iter().map(attribute).collect()
}

// ============================================================================
// TESTS
// ============================================================================
