pub mod types;

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::ApiConfig;
use types::{BtcAddressHistory, BtcTx, EthTx};

/// Thin client over the public block-explorer APIs. Endpoints and the
/// Etherscan key are injected from config.
pub struct ExplorerClient {
    client: Client,
    blockchain_info_url: String,
    etherscan_url: String,
    etherscan_api_key: Option<String>,
}

impl ExplorerClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {e}, using default");
                Client::new()
            });
        Self {
            client,
            blockchain_info_url: config.blockchain_info_url.clone(),
            etherscan_url: config.etherscan_url.clone(),
            etherscan_api_key: config.etherscan_api_key.clone(),
        }
    }

    /// Fetch the full transaction history of a Bitcoin address.
    pub async fn btc_address_history(&self, address: &str) -> Result<Vec<BtcTx>, FetchError> {
        let url = format!("{}/rawaddr/{address}", self.blockchain_info_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::Http)?;
        let history: BtcAddressHistory = resp.json().await.map_err(FetchError::Http)?;
        Ok(history.txs)
    }

    /// Fetch the transaction list of an Ethereum address via Etherscan.
    pub async fn eth_address_history(&self, address: &str) -> Result<Vec<EthTx>, FetchError> {
        let mut url = format!(
            "{}?module=account&action=txlist&address={address}&startblock=0&endblock=99999999&sort=asc",
            self.etherscan_url
        );
        if let Some(ref key) = self.etherscan_api_key {
            url.push_str("&apikey=");
            url.push_str(key);
        }
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::Http)?;
        let envelope: Value = resp.json().await.map_err(FetchError::Http)?;
        parse_txlist_envelope(envelope)
    }

    /// Fetch the raw text of a published scam-address list.
    pub async fn scam_list_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::Http)?;
        resp.text().await.map_err(FetchError::Http)
    }
}

/// Unwrap Etherscan's `{status, message, result}` envelope.
///
/// Etherscan reports an empty account as `status: "0"` with
/// "No transactions found" — that is a valid, empty history, not a failure.
fn parse_txlist_envelope(envelope: Value) -> Result<Vec<EthTx>, FetchError> {
    let status = envelope
        .get("status")
        .and_then(|s| s.as_str())
        .unwrap_or("0");
    if status != "1" {
        let message = envelope
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unexpected Etherscan response");
        if message.eq_ignore_ascii_case("No transactions found") {
            return Ok(Vec::new());
        }
        return Err(FetchError::Api(message.to_string()));
    }
    let result = envelope.get("result").cloned().unwrap_or(Value::Null);
    serde_json::from_value(result)
        .map_err(|e| FetchError::Api(format!("unexpected txlist payload: {e}")))
}

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Api(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "HTTP error: {e}"),
            FetchError::Api(e) => write!(f, "API error: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}
