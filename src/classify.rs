use std::sync::OnceLock;

use regex::Regex;

use crate::core::Chain;

/// `0x` followed by exactly 40 hex characters.
fn eth_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap())
}

/// Legacy Bitcoin address: `1` or `3`, then 25-34 Base58 characters
/// (no `0`, `O`, `I`, `l`).
fn btc_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[13][1-9A-HJ-NP-Za-km-z]{25,34}$").unwrap())
}

/// Classify an input string before any network work. `None` means the
/// string matches neither supported chain and must never reach the
/// evaluator.
pub fn classify(address: &str) -> Option<Chain> {
    if eth_pattern().is_match(address) {
        Some(Chain::Ethereum)
    } else if btc_pattern().is_match(address) {
        Some(Chain::Bitcoin)
    } else {
        None
    }
}
