// 🐳 Report - Whale ranking, summary metrics, chart-ready series
// Groups attributed entries by payer and ranks by total credits

use crate::attribution::{AttributedEntry, Category};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// RANKED PAYER
// ============================================================================

/// One payer's aggregate position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPayer {
    /// 1-based rank, descending by total credits
    pub rank: usize,
    pub payer: String,
    pub total_credits: f64,
}

// ============================================================================
// DAILY BREAKDOWN
// ============================================================================

/// One (day, category) cell of the top payer's daily series.
/// Missing cells are emitted explicitly as 0.0 so the chart grid is dense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    pub day: NaiveDate,
    pub category: Category,
    pub credits: f64,
}

// ============================================================================
// REPORT
// ============================================================================

/// The full analysis output: the sole data contract with the view layer.
///
/// Always computed unredacted; any rank-blurring is a display-time transform
/// applied externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    // Summary metrics
    pub total_credits: f64,
    pub total_debits: f64,
    pub net: f64,
    pub transaction_count: usize,

    // Full ranking, descending by credits (ties keep first-seen order)
    pub ranking: Vec<RankedPayer>,

    /// Share of total credits held by ranks 1-3 (0 when total is 0)
    pub top_3_share: f64,

    /// Per-(day, category) credits for the rank-1 payer
    pub top_payer_daily: Vec<DailyBreakdown>,

    // Rate projections: linear extrapolation of the daily average,
    // not a forecast
    pub days_span: i64,
    pub daily_avg: f64,
    pub monthly_proj: f64,
    pub yearly_proj: f64,
}

impl Report {
    /// Ranks 1-10 (fewer if fewer payers exist).
    pub fn top_10(&self) -> &[RankedPayer] {
        &self.ranking[..self.ranking.len().min(10)]
    }

    /// Ranks 1-3 (fewer if fewer payers exist).
    pub fn top_3(&self) -> &[RankedPayer] {
        &self.ranking[..self.ranking.len().min(3)]
    }

    /// The #1 whale, if any entries existed.
    pub fn top_payer(&self) -> Option<&RankedPayer> {
        self.ranking.first()
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Aggregate attributed entries into a full report.
///
/// Per-payer ranking uses credits (earnings) only; debits appear in the
/// global summary. Empty input yields an all-zero report, never a panic.
pub fn aggregate(entries: &[AttributedEntry]) -> Report {
    // Group by payer, keeping first-encountered group order for tie stability
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    let mut total_credits = 0.0;
    let mut total_debits = 0.0;

    for attributed in entries {
        total_credits += attributed.entry.credits;
        total_debits += attributed.entry.debits;

        match group_index.get(&attributed.payer) {
            Some(&idx) => totals[idx].1 += attributed.entry.credits,
            None => {
                group_index.insert(attributed.payer.clone(), totals.len());
                totals.push((attributed.payer.clone(), attributed.entry.credits));
            }
        }
    }

    // Stable sort: equal totals keep their first-encountered order
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));

    let ranking: Vec<RankedPayer> = totals
        .into_iter()
        .enumerate()
        .map(|(idx, (payer, credits))| RankedPayer {
            rank: idx + 1,
            payer,
            total_credits: credits,
        })
        .collect();

    let top_3_credits: f64 = ranking.iter().take(3).map(|p| p.total_credits).sum();
    let top_3_share = if total_credits > 0.0 {
        top_3_credits / total_credits
    } else {
        0.0
    };

    let top_payer_daily = match ranking.first() {
        Some(top) => daily_breakdown(entries, &top.payer),
        None => Vec::new(),
    };

    let (days_span, daily_avg) = rate_basis(entries, total_credits);

    Report {
        total_credits,
        total_debits,
        net: total_credits - total_debits,
        transaction_count: entries.len(),
        ranking,
        top_3_share,
        top_payer_daily,
        days_span,
        daily_avg,
        monthly_proj: daily_avg * 30.0,
        yearly_proj: daily_avg * 365.0,
    }
}

/// Bucket one payer's entries by calendar day, split by category.
/// Every present day emits all four categories, zero-filled.
fn daily_breakdown(entries: &[AttributedEntry], payer: &str) -> Vec<DailyBreakdown> {
    let mut cells: HashMap<(NaiveDate, Category), f64> = HashMap::new();
    let mut days: Vec<NaiveDate> = Vec::new();

    for attributed in entries.iter().filter(|a| a.payer == payer) {
        let day = attributed.entry.date.date();
        if !days.contains(&day) {
            days.push(day);
        }
        *cells.entry((day, attributed.category)).or_insert(0.0) += attributed.entry.credits;
    }

    days.sort();

    let mut series = Vec::with_capacity(days.len() * Category::ALL.len());
    for day in days {
        for category in Category::ALL {
            series.push(DailyBreakdown {
                day,
                category,
                credits: cells.get(&(day, category)).copied().unwrap_or(0.0),
            });
        }
    }

    series
}

/// Days spanned by the ledger (floored at 1) and the daily credit average.
fn rate_basis(entries: &[AttributedEntry], total_credits: f64) -> (i64, f64) {
    let days: Vec<NaiveDate> = entries.iter().map(|a| a.entry.date.date()).collect();

    let span = match (days.iter().min(), days.iter().max()) {
        (Some(min), Some(max)) => ((*max - *min).num_days() + 1).max(1),
        _ => 1,
    };

    (span, total_credits / span as f64)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::attribute;
    use crate::ledger::LedgerEntry;
    use chrono::NaiveDate;

    fn attributed(date: &str, description: &str, credits: f64, debits: f64) -> AttributedEntry {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        attribute(LedgerEntry::new(date, description.to_string(), credits, debits))
    }

    #[test]
    fn test_ranking_descending_with_shares() {
        let entries = vec![
            attributed("2026-02-01", "alice chat", 100.0, 0.0),
            attributed("2026-02-01", "bob video", 50.0, 0.0),
            attributed("2026-02-02", "carol gift", 25.0, 0.0),
            attributed("2026-02-02", "dave text", 5.0, 0.0),
        ];

        let report = aggregate(&entries);

        let totals: Vec<f64> = report.ranking.iter().map(|p| p.total_credits).collect();
        assert_eq!(totals, vec![100.0, 50.0, 25.0, 5.0]);
        assert_eq!(report.ranking[0].rank, 1);
        assert_eq!(report.ranking[3].rank, 4);
        assert!((report.top_3_share - 175.0 / 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_ranking_ties_keep_first_seen_order() {
        let entries = vec![
            attributed("2026-02-01", "bob video", 50.0, 0.0),
            attributed("2026-02-01", "alice chat", 50.0, 0.0),
            attributed("2026-02-01", "carol gift", 80.0, 0.0),
        ];

        let report = aggregate(&entries);
        let payers: Vec<&str> = report.ranking.iter().map(|p| p.payer.as_str()).collect();
        assert_eq!(payers, vec!["carol", "bob", "alice"]);
    }

    #[test]
    fn test_per_payer_sums_match_global_total() {
        let entries = vec![
            attributed("2026-02-01", "alice chat", 12.5, 0.0),
            attributed("2026-02-02", "alice gift", 7.25, 0.0),
            attributed("2026-02-02", "bob video", 40.0, 2.0),
        ];

        let report = aggregate(&entries);
        let ranked_sum: f64 = report.ranking.iter().map(|p| p.total_credits).sum();
        assert!((ranked_sum - report.total_credits).abs() < 1e-9);
        assert_eq!(report.total_debits, 2.0);
        assert!((report.net - (report.total_credits - 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_yields_zero_report() {
        let report = aggregate(&[]);

        assert_eq!(report.total_credits, 0.0);
        assert_eq!(report.transaction_count, 0);
        assert!(report.ranking.is_empty());
        assert_eq!(report.top_3_share, 0.0);
        assert!(report.top_payer_daily.is_empty());
        assert_eq!(report.days_span, 1);
        assert_eq!(report.daily_avg, 0.0);
    }

    #[test]
    fn test_top_3_share_zero_when_total_zero() {
        let entries = vec![attributed("2026-02-01", "alice chat", 0.0, 5.0)];
        let report = aggregate(&entries);
        assert_eq!(report.top_3_share, 0.0);
    }

    #[test]
    fn test_single_day_projections() {
        let entries = vec![
            attributed("2026-02-01", "alice chat", 60.0, 0.0),
            attributed("2026-02-01", "bob video", 40.0, 0.0),
        ];

        let report = aggregate(&entries);
        assert_eq!(report.days_span, 1);
        assert_eq!(report.daily_avg, 100.0);
        assert_eq!(report.monthly_proj, 3000.0);
        assert_eq!(report.yearly_proj, 36500.0);
    }

    #[test]
    fn test_multi_day_span_is_inclusive() {
        let entries = vec![
            attributed("2026-02-01", "alice chat", 10.0, 0.0),
            attributed("2026-02-07", "alice chat", 4.0, 0.0),
        ];

        let report = aggregate(&entries);
        assert_eq!(report.days_span, 7);
        assert!((report.daily_avg - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_payer_daily_is_dense_and_zero_filled() {
        let entries = vec![
            attributed("2026-02-01", "alice video call", 30.0, 0.0),
            attributed("2026-02-01", "alice chat", 5.0, 0.0),
            attributed("2026-02-03", "alice gift", 12.0, 0.0),
            attributed("2026-02-02", "bob video", 1.0, 0.0),
        ];

        let report = aggregate(&entries);
        assert_eq!(report.top_payer().map(|p| p.payer.as_str()), Some("alice"));

        // Two days present for alice, four categories each
        assert_eq!(report.top_payer_daily.len(), 8);

        let feb1 = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let video = report
            .top_payer_daily
            .iter()
            .find(|c| c.day == feb1 && c.category == Category::Video)
            .unwrap();
        assert_eq!(video.credits, 30.0);

        let gifts_feb1 = report
            .top_payer_daily
            .iter()
            .find(|c| c.day == feb1 && c.category == Category::Gifts)
            .unwrap();
        assert_eq!(gifts_feb1.credits, 0.0);
    }

    #[test]
    fn test_top_10_slice_caps_at_ten() {
        let entries: Vec<AttributedEntry> = (0..15)
            .map(|i| {
                attributed(
                    "2026-02-01",
                    &format!("payer{} chat", i),
                    (15 - i) as f64,
                    0.0,
                )
            })
            .collect();

        let report = aggregate(&entries);
        assert_eq!(report.ranking.len(), 15);
        assert_eq!(report.top_10().len(), 10);
        assert_eq!(report.top_3().len(), 3);
    }
}
