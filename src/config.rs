use serde::Deserialize;
use std::path::Path;

use crate::core::Chain;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub scam_list: ScamListConfig,
    pub heuristics: HeuristicConfig,
    pub database: DatabaseConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub blockchain_info_url: String,
    pub etherscan_url: String,
    /// Injected via config — never hard-coded.
    pub etherscan_api_key: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScamListConfig {
    pub bitcoin_url: String,
    /// Optional Ethereum list. Unset disables scam-list matching on the
    /// Ethereum path.
    pub ethereum_url: Option<String>,
    pub refresh_hours: u64,
}

/// Threshold surface of the evaluator. Every cutoff the heuristics use is
/// overridable here.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Per-output large-value cutoff in satoshis (strict `>`).
    pub btc_large_output_sats: u64,
    /// Wallet-level per-transaction aggregate cutoff in satoshis, used only
    /// by the large-transfer listing (inclusive `>=`). Distinct from the
    /// per-output notion above.
    pub btc_large_transfer_sats: u64,
    /// Per-transaction large-value cutoff in wei, outgoing side (strict `>`).
    pub eth_large_tx_wei: u64,
    /// Listing-mode cutoff in wei (inclusive `>=`).
    pub eth_large_transfer_wei: u64,
    /// A Bitcoin transaction with more outputs than this is high-recipient.
    pub fan_out_threshold: usize,
    pub burst_window_secs: i64,
    pub burst_min_txs: u64,
    /// `behavior_scam` fires when `large_tx_count` exceeds this.
    pub large_tx_verdict_count: u64,
    /// Bitcoin only: `behavior_scam` fires when `high_recipient_count`
    /// exceeds this.
    pub high_recipient_verdict_count: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub cooldown_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            scam_list: ScamListConfig::default(),
            heuristics: HeuristicConfig::default(),
            database: DatabaseConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            blockchain_info_url: "https://blockchain.info".into(),
            etherscan_url: "https://api.etherscan.io/api".into(),
            etherscan_api_key: None,
            timeout_seconds: 30,
        }
    }
}

impl Default for ScamListConfig {
    fn default() -> Self {
        Self {
            bitcoin_url: "https://raw.githubusercontent.com/mitchellkrogza/Badd-Boyz-Bitcoin-Scammers/master/bitcoin-scammers.txt".into(),
            ethereum_url: None,
            refresh_hours: 24,
        }
    }
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            btc_large_output_sats: 1_000_000,
            btc_large_transfer_sats: 1_000_000, // 0.01 BTC
            eth_large_tx_wei: 1_000_000_000_000_000_000, // 1 ETH
            eth_large_transfer_wei: 1_000_000_000_000_000_000,
            fan_out_threshold: 10,
            burst_window_secs: 3600,
            burst_min_txs: 3,
            large_tx_verdict_count: 2,
            high_recipient_verdict_count: 2,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/scam_list_cache.db".into(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_seconds: 30,
        }
    }
}

impl HeuristicConfig {
    /// Per-transaction large-value cutoff for `large_tx_count`.
    pub fn large_tx_threshold(&self, chain: Chain) -> u128 {
        match chain {
            Chain::Bitcoin => self.btc_large_output_sats as u128,
            Chain::Ethereum => self.eth_large_tx_wei as u128,
        }
    }

    /// Wallet-level cutoff for the large-transfer listing.
    pub fn large_transfer_threshold(&self, chain: Chain) -> u128 {
        match chain {
            Chain::Bitcoin => self.btc_large_transfer_sats as u128,
            Chain::Ethereum => self.eth_large_transfer_wei as u128,
        }
    }
}

impl Config {
    /// Load config from a TOML file. Falls back to defaults if file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
