// Whaler CLI - upload → results, no logins
// Prints the summary metrics and top-10 whale ranking for one CSV export

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

use whaler::{analyze_ledger, clean_ledger, demo, ledger, Report};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(2);
    }

    let json = args.iter().any(|a| a.as_str() == "--json");
    let export = args
        .iter()
        .position(|a| a.as_str() == "--export")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str);

    let (report, deduped) = if args[1] == "demo" {
        let rows = demo::demo_ledger();
        let report = analyze_ledger(rows.clone());
        (report, rows)
    } else {
        let path = Path::new(&args[1]);
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        // SchemaError is the one fatal input-shape failure; surface it and halt
        let deduped = match clean_ledger(&bytes) {
            Ok(rows) => rows,
            Err(err) => {
                eprintln!("❌ {}", err);
                process::exit(1);
            }
        };
        let report = analyze_ledger(deduped.clone());
        (report, deduped)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(out_path) = export {
        let bytes = ledger::write_csv(&deduped)?;
        fs::write(out_path, bytes)
            .with_context(|| format!("Failed to write export: {}", out_path))?;
        println!("\n⬇️  Deduped ledger written to {}", out_path);
    }

    Ok(())
}

fn print_usage() {
    eprintln!("🐳 WHALER - who's really paying you?");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  whaler <file.csv> [--json] [--export <out.csv>]");
    eprintln!("  whaler demo       [--json] [--export <out.csv>]");
}

fn print_report(report: &Report) {
    println!("🐳 WHALER Report");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("💵 Total Earnings:          ${:>12.2}", report.total_credits);
    println!("💸 Total Debits:            ${:>12.2}", report.total_debits);
    println!("🧮 Net:                     ${:>12.2}", report.net);
    println!("🔢 Transactions (deduped):   {:>12}", report.transaction_count);
    println!(
        "📈 Daily avg ${:.2} over {} day(s) → ${:.2}/mo, ${:.2}/yr (linear)",
        report.daily_avg, report.days_span, report.monthly_proj, report.yearly_proj
    );

    println!("\n🏆 Whale Ranking (Top 10)");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if report.ranking.is_empty() {
        println!("   (no payers found)");
    }
    for payer in report.top_10() {
        println!(
            "  #{:<3} {:<20} ${:>10.2}",
            payer.rank, payer.payer, payer.total_credits
        );
    }

    println!(
        "\n📊 Top 3 share of total earnings: {:.1}%",
        report.top_3_share * 100.0
    );

    if let Some(top) = report.top_payer() {
        println!("\n📅 Daily breakdown — {}", top.payer);
        for cell in &report.top_payer_daily {
            if cell.credits > 0.0 {
                println!(
                    "  {}  {:<6} ${:>9.2}",
                    cell.day,
                    cell.category.name(),
                    cell.credits
                );
            }
        }
    }
}
