// Colored terminal output for verdicts and connection tests.

use colored::Colorize;

use super::record::{CheckRecord, CheckResult};

/// Display a single check in one line.
pub fn display_check(index: Option<usize>, record: &CheckRecord) {
    let prefix = match index {
        Some(i) => format!("{:>4}. ", i + 1),
        None => "  ".to_string(),
    };
    println!(
        "{}{}  {:>5}  {}  {}",
        prefix,
        colorize_result(record.result),
        record.score.to_string(),
        format!("(threshold {:.2})", record.threshold).dimmed(),
        record.title_preview,
    );
}

/// Display a list of checks with a filtered/allowed summary.
pub fn display_checks(records: &[CheckRecord]) {
    if records.is_empty() {
        println!("No notifications to score.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Verdicts ({} notifications) ===", records.len()).bold()
    );
    println!();

    for (i, record) in records.iter().enumerate() {
        display_check(Some(i), record);
    }

    let filtered = records
        .iter()
        .filter(|r| r.result == CheckResult::Filtered)
        .count();
    println!();
    println!(
        "  {} filtered, {} allowed",
        filtered.to_string().yellow(),
        (records.len() - filtered).to_string().green()
    );
}

/// Display the outcome of a connection test.
pub fn display_connection_test(endpoint: &str, ok: bool) {
    if ok {
        println!("  {} {} responded with a valid score", "✓".green(), endpoint);
    } else {
        println!("  {} {} did not return a valid score", "✗".red(), endpoint);
        println!(
            "  {}",
            "Check the URL, key and model name. Run with RUST_LOG=notiscore=debug for details."
                .dimmed()
        );
    }
}

fn colorize_result(result: CheckResult) -> colored::ColoredString {
    match result {
        CheckResult::Filtered => "FILTER".yellow().bold(),
        CheckResult::Allowed => "ALLOW ".green(),
    }
}
