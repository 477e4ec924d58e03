use crate::api::types::{BtcTx, EthTx};
use crate::config::HeuristicConfig;
use crate::core::normalize::{NormalizeError, parse_numeric};
use crate::core::{Chain, LargeTransfer};

/// Wallet-level large-transfer listing.
///
/// A distinct "large" notion from the per-output rule behind
/// `large_tx_count`: a transaction qualifies when its total moved value
/// reaches the chain's transfer threshold (inclusive). Never folded into an
/// `ActivitySummary`.
pub fn btc_large_transfers(txs: &[BtcTx], config: &HeuristicConfig) -> Vec<LargeTransfer> {
    let threshold = config.large_transfer_threshold(Chain::Bitcoin);
    txs.iter()
        .filter_map(|tx| {
            let total: u128 = tx.outputs.iter().map(|o| o.value as u128).sum();
            (total >= threshold).then(|| LargeTransfer {
                txid: tx.hash.clone(),
                timestamp: tx.time,
                amount: total,
            })
        })
        .collect()
}

/// Ethereum variant. Numeric strings parse with the same hard-error rule as
/// normalization — a malformed record aborts the listing.
pub fn eth_large_transfers(
    txs: &[EthTx],
    config: &HeuristicConfig,
) -> Result<Vec<LargeTransfer>, NormalizeError> {
    let threshold = config.large_transfer_threshold(Chain::Ethereum);
    let mut rows = Vec::new();
    for tx in txs {
        let value: u128 = parse_numeric(&tx.value, "value", &tx.hash)?;
        let timestamp: i64 = parse_numeric(&tx.time_stamp, "timeStamp", &tx.hash)?;
        if value >= threshold {
            rows.push(LargeTransfer {
                txid: tx.hash.clone(),
                timestamp,
                amount: value,
            });
        }
    }
    Ok(rows)
}
