// 🎬 Demo Data - Built-in dataset for a no-upload first run
// Deterministic: same anchor date → byte-identical ledger

use crate::ledger::{self, LedgerEntry};
use chrono::{NaiveDate, Utc};

const PAYERS: &[&str] = &[
    "Victor", "Ossium", "Aaron", "Mike", "Sam", "Jay", "Chris", "Derek", "Nate", "Rob",
];

const KINDS: &[&str] = &["video", "chat", "gift", "other"];

const DAYS: u32 = 14;
const ROWS_PER_DAY: u64 = 20;

/// splitmix64 step - a seeded mixer instead of a hasher, so the demo ledger
/// is identical across processes and platforms
fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Generate the demo ledger: 14 days ending today, 20 rows per day,
/// descriptions shaped like the real exports ("{payer} {kind} payment").
pub fn demo_ledger() -> Vec<LedgerEntry> {
    demo_ledger_from(Utc::now().date_naive())
}

/// Same generator with an explicit final day, for reproducible tests.
pub fn demo_ledger_from(last_day: NaiveDate) -> Vec<LedgerEntry> {
    let mut rows = Vec::with_capacity((DAYS as usize) * (ROWS_PER_DAY as usize));

    for day_offset in (0..DAYS).rev() {
        let day = last_day - chrono::Duration::days(day_offset as i64);

        for slot in 0..ROWS_PER_DAY {
            let seed = mix((day_offset as u64) << 8 | slot);

            let payer = PAYERS[(seed % PAYERS.len() as u64) as usize];
            let kind = KINDS[(mix(seed ^ 0x1) % KINDS.len() as u64) as usize];
            // 0.0 → 179.9 in tenths, like a plausible session charge
            let credits = (mix(seed ^ 0x2) % 1800) as f64 / 10.0;
            let hour = (mix(seed ^ 0x3) % 20) as u32;

            let date = match day.and_hms_opt(hour, 0, 0) {
                Some(date) => date,
                None => continue,
            };

            rows.push(LedgerEntry::new(
                date,
                format!("{} {} payment", payer, kind),
                credits,
                0.0,
            ));
        }
    }

    ledger::dedupe(&rows)
}

// ============================================================================
// TESTS
// ============================================================================
