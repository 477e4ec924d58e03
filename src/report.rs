use std::fmt::Write as _;

use chrono::DateTime;

use crate::core::{ActivitySummary, Chain, ScanOutcome, TransferScan};

/// Render one scan outcome as terminal text. Pure string building — the
/// evaluator defines no formatting, colors, or layout.
pub fn render(address: &str, outcome: &ScanOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔎 Address: {address}");
    match outcome {
        ScanOutcome::InvalidAddress => {
            let _ = writeln!(out, "❌ Invalid address format.");
        }
        ScanOutcome::FetchFailed(message) => {
            let _ = writeln!(out, "❌ Error fetching data: {message}");
        }
        ScanOutcome::Report(summary) => render_summary(summary, &mut out),
    }
    out
}

fn render_summary(summary: &ActivitySummary, out: &mut String) {
    let _ = writeln!(out, "🔗 Type: {}", summary.chain);
    if summary.reported_as_scam {
        let _ = writeln!(out, "🚨 This address has been reported as a scam.");
    }
    let _ = writeln!(out, "🧾 Summary of Address Activity:");
    let _ = writeln!(out, "📥 Total Inward Transfers: {}", summary.inward_count);
    let _ = writeln!(out, "📤 Total Outward Transfers: {}", summary.outward_count);
    let _ = writeln!(out, "💰 Large Transactions: {}", summary.large_tx_count);
    if summary.chain == Chain::Bitcoin {
        let _ = writeln!(
            out,
            "🔀 High-Recipient Transactions: {}",
            summary.high_recipient_count
        );
    }
    let _ = writeln!(out, "📊 Total Transactions: {}", summary.transaction_count);
    let _ = writeln!(out, "🕓 Last Transaction: {}", format_last_seen(summary));
    if summary.chain == Chain::Ethereum {
        // undefined mean renders as 0
        let avg = summary.average_outgoing_value.unwrap_or(0.0) / summary.chain.unit_divisor();
        let _ = writeln!(
            out,
            "📈 Avg Outgoing Value ({}): {avg:.4}",
            summary.chain.unit_name()
        );
    }
    if summary.burst_activity {
        let _ = writeln!(out, "⚡ Burst activity detected (many txs in short time)");
    }
    if summary.behavior_scam {
        let _ = writeln!(out, "⚠️ Behavioral pattern suggests potential scam activity.");
    } else {
        let _ = writeln!(out, "✅ No suspicious behavior detected.");
    }
}

fn format_last_seen(summary: &ActivitySummary) -> String {
    match summary.last_transaction_time {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unavailable".to_string(),
    }
}

/// Render the wallet-level large-transfer listing.
pub fn render_large_transfers(address: &str, scan: &TransferScan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔎 Address: {address}");
    match scan {
        TransferScan::InvalidAddress => {
            let _ = writeln!(out, "❌ Invalid address format.");
        }
        TransferScan::FetchFailed(message) => {
            let _ = writeln!(out, "❌ Error fetching data: {message}");
        }
        TransferScan::Rows(chain, rows) => {
            let _ = writeln!(out, "🔗 Type: {chain}");
            for row in rows {
                let amount = row.amount as f64 / chain.unit_divisor();
                let when = DateTime::from_timestamp(row.timestamp, 0)
                    .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| row.timestamp.to_string());
                let _ = writeln!(
                    out,
                    "💰 {amount:.4} {} | {when} | {}",
                    chain.unit_name(),
                    row.txid
                );
            }
            let _ = writeln!(out, "Found {} large transfer(s)", rows.len());
        }
    }
    out
}
