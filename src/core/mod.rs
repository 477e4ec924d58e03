pub mod normalize;
pub mod pipeline;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chains the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chain {
    Bitcoin,
    Ethereum,
}

impl Chain {
    /// Smallest units per native coin (satoshis per BTC, wei per ETH).
    pub fn unit_divisor(&self) -> f64 {
        match self {
            Chain::Bitcoin => 100_000_000.0,
            Chain::Ethereum => 1e18,
        }
    }

    pub fn unit_name(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "BTC",
            Chain::Ethereum => "ETH",
        }
    }

    /// Stable lowercase key for cache rows and log lines.
    pub fn key(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "bitcoin",
            Chain::Ethereum => "ethereum",
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Bitcoin => write!(f, "Bitcoin"),
            Chain::Ethereum => write!(f, "Ethereum"),
        }
    }
}

/// Chain-agnostic view of one transaction, built per evaluation and
/// discarded afterwards.
///
/// For Bitcoin, `input_count`/`output_count` are the transaction's own
/// input/output counts and `recipient_count == output_count`. For Ethereum
/// they encode the target's role instead: `input_count` is 1 iff the target
/// sent the transaction, `output_count` is 1 iff it received it, and a
/// transaction is a single recipient event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTx {
    pub input_count: usize,
    pub output_count: usize,
    pub recipient_count: usize,
    /// Total value moved, in smallest units (sum of outputs for Bitcoin).
    pub value_transferred: u128,
    /// Largest single output in smallest units. Equals `value_transferred`
    /// for Ethereum, where a transaction has one output.
    pub max_output_value: u128,
    pub timestamp: i64,
}

/// Aggregate activity record for one address — the evaluator's sole output.
/// A pure function of the transaction list, the target address, the known
/// scam set, and the configured thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub chain: Chain,
    pub address: String,
    /// Incoming transfer legs. Bitcoin counts inputs across the history
    /// (the rawaddr payload does not attribute sender roles); Ethereum
    /// counts transactions received by the target.
    pub inward_count: u64,
    /// Outgoing transfer legs; Bitcoin counts outputs, Ethereum counts
    /// transactions sent by the target.
    pub outward_count: u64,
    /// Transactions exceeding the chain's per-transaction large-value
    /// threshold (any output for Bitcoin, outgoing side for Ethereum).
    pub large_tx_count: u64,
    /// Bitcoin only: transactions fanning out past the recipient threshold.
    pub high_recipient_count: u64,
    /// Mean outgoing value in smallest units. `None` when no outgoing
    /// transactions were attributable — rendered as 0, never a division.
    pub average_outgoing_value: Option<f64>,
    pub transaction_count: u64,
    /// Most recent timestamp in the examined window.
    pub last_transaction_time: Option<DateTime<Utc>>,
    pub burst_activity: bool,
    /// Exact membership in the externally supplied known-bad set.
    pub reported_as_scam: bool,
    /// Composed behavioral verdict.
    pub behavior_scam: bool,
}

impl ActivitySummary {
    /// True when any scam indicator fired.
    pub fn flagged(&self) -> bool {
        self.reported_as_scam || self.behavior_scam
    }
}

/// Outcome of scanning a single address. Every caller path is matched
/// exhaustively; failures are data, not crashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScanOutcome {
    Report(ActivitySummary),
    InvalidAddress,
    FetchFailed(String),
}

/// One row of the wallet-level large-transfer listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeTransfer {
    pub txid: String,
    pub timestamp: i64,
    /// Moved value in smallest units.
    pub amount: u128,
}

/// Outcome of the large-transfer listing mode for a single address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransferScan {
    Rows(Chain, Vec<LargeTransfer>),
    InvalidAddress,
    FetchFailed(String),
}
