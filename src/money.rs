// 💰 Money Parser - Free-form monetary text → signed float
// Accepts $ strings, commas, parenthesized negatives, blanks

// ============================================================================
// PARSER
// ============================================================================

/// Parse a free-form money string into a signed float.
///
/// Handles the formats real exports actually contain:
/// - Currency symbol: "$1,234.56" → 1234.56
/// - Thousands separators: "2,000" → 2000.0
/// - Parenthesized negatives: "(12.34)" → -12.34
/// - Leading/trailing whitespace
///
/// Malformed or empty cells yield 0.0 instead of failing: a single bad cell
/// must never abort a whole import.
pub fn parse(raw: &str) -> f64 {
    let mut s = raw.trim().replace('$', "").replace(',', "");

    // Parentheses denote negatives, e.g. "(12.34)" → -12.34
    if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
        s = format!("-{}", &s[1..s.len() - 1]);
    }

    s.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parse an optional cell (missing column → 0.0).
pub fn parse_opt(raw: Option<&str>) -> f64 {
    raw.map(parse).unwrap_or(0.0)
}

// ============================================================================
// TESTS
// ============================================================================
