use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::{Duration, Utc};
use regex::Regex;

use crate::api::ExplorerClient;
use crate::config::ScamListConfig;
use crate::core::Chain;
use crate::db::SharedDatabase;

/// Base58 run shaped like a legacy Bitcoin address, for pulling addresses
/// out of the published list text.
fn btc_address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[13][1-9A-HJ-NP-Za-km-z]{25,34}\b").unwrap())
}

fn eth_address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b0x[0-9a-fA-F]{40}\b").unwrap())
}

/// Known scam addresses for one chain.
///
/// Matching is exact string membership, case-sensitive — Bitcoin addresses
/// are case-sensitive and no normalization is applied.
#[derive(Debug, Clone, Default)]
pub struct ScamList {
    addresses: HashSet<String>,
}

impl ScamList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_addresses<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            addresses: addresses.into_iter().collect(),
        }
    }

    /// Extract chain-shaped addresses from raw list text. Comment lines and
    /// surrounding noise are ignored; only address-shaped tokens survive.
    pub fn from_text(chain: Chain, text: &str) -> Self {
        let pattern = match chain {
            Chain::Bitcoin => btc_address_pattern(),
            Chain::Ethereum => eth_address_pattern(),
        };
        let addresses = pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        Self { addresses }
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Load the scam list for a chain, preferring a fresh cache.
///
/// Order: fresh cache → refetch (persisted on success) → stale cache →
/// empty set. List problems degrade the matcher, never the scan.
pub async fn load(
    chain: Chain,
    db: &SharedDatabase,
    client: &ExplorerClient,
    config: &ScamListConfig,
) -> ScamList {
    let url = match chain {
        Chain::Bitcoin => Some(config.bitcoin_url.as_str()),
        Chain::Ethereum => config.ethereum_url.as_deref(),
    };
    let Some(url) = url else {
        // Matching not configured for this chain
        return ScamList::empty();
    };

    let key = chain.key();
    let max_age = Duration::hours(config.refresh_hours as i64);
    match db.scam_list_fetched_at(key) {
        Ok(Some(fetched_at)) if Utc::now() - fetched_at < max_age => {
            match db.load_scam_list(key) {
                Ok(addresses) => {
                    tracing::info!("Using cached {key} scam list ({} addresses)", addresses.len());
                    return ScamList { addresses };
                }
                Err(e) => tracing::warn!("Failed to read cached {key} scam list: {e}"),
            }
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to read {key} scam list cache stamp: {e}"),
    }

    match client.scam_list_text(url).await {
        Ok(text) => {
            let list = ScamList::from_text(chain, &text);
            tracing::info!("Fetched {key} scam list: {} addresses", list.len());
            if let Err(e) = db.replace_scam_list(key, &list.addresses, Utc::now()) {
                tracing::warn!("Failed to cache {key} scam list: {e}");
            }
            list
        }
        Err(e) => {
            tracing::warn!("Failed to fetch {key} scam list: {e}, falling back to cache");
            let addresses = db.load_scam_list(key).unwrap_or_default();
            if addresses.is_empty() {
                tracing::warn!("No cached {key} scam list available, matching disabled");
            }
            ScamList { addresses }
        }
    }
}
