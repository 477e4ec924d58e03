use tracing::{debug, info, warn};

use crate::api::ExplorerClient;
use crate::classify;
use crate::config::HeuristicConfig;
use crate::core::normalize::{normalize_btc, normalize_eth};
use crate::core::{Chain, NormalizedTx, ScanOutcome, TransferScan};
use crate::heuristics::{HeuristicEngine, transfers};
use crate::scamlist::ScamList;

/// Scan one address: classify, fetch its history, normalize, evaluate.
///
/// Failures become data. An unclassifiable string yields `InvalidAddress`;
/// a fetch or decode failure yields `FetchFailed` with the message. A batch
/// caller never aborts on a single address.
pub async fn scan_address(
    address: &str,
    client: &ExplorerClient,
    engine: &HeuristicEngine,
    btc_scam_list: &ScamList,
    eth_scam_list: &ScamList,
) -> ScanOutcome {
    let Some(chain) = classify::classify(address) else {
        debug!("Address {address} matches no supported chain");
        return ScanOutcome::InvalidAddress;
    };

    match fetch_normalized(address, chain, client).await {
        Ok(txs) => {
            let scam_list = match chain {
                Chain::Bitcoin => btc_scam_list,
                Chain::Ethereum => eth_scam_list,
            };
            info!(
                "Evaluating {} {} transactions for {address}",
                txs.len(),
                chain.key()
            );
            ScanOutcome::Report(engine.evaluate(address, chain, &txs, scam_list))
        }
        Err(message) => {
            warn!("Fetch failed for {address}: {message}");
            ScanOutcome::FetchFailed(message)
        }
    }
}

async fn fetch_normalized(
    address: &str,
    chain: Chain,
    client: &ExplorerClient,
) -> Result<Vec<NormalizedTx>, String> {
    match chain {
        Chain::Bitcoin => client
            .btc_address_history(address)
            .await
            .map(|txs| txs.iter().map(normalize_btc).collect())
            .map_err(|e| e.to_string()),
        Chain::Ethereum => {
            let txs = client
                .eth_address_history(address)
                .await
                .map_err(|e| e.to_string())?;
            txs.iter()
                .map(|tx| normalize_eth(tx, address))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())
        }
    }
}

/// Listing mode: the wallet-level large transfers of one address.
pub async fn scan_large_transfers(
    address: &str,
    client: &ExplorerClient,
    config: &HeuristicConfig,
) -> TransferScan {
    let Some(chain) = classify::classify(address) else {
        return TransferScan::InvalidAddress;
    };

    let rows = match chain {
        Chain::Bitcoin => client
            .btc_address_history(address)
            .await
            .map(|txs| transfers::btc_large_transfers(&txs, config))
            .map_err(|e| e.to_string()),
        Chain::Ethereum => match client.eth_address_history(address).await {
            Ok(txs) => transfers::eth_large_transfers(&txs, config).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        },
    };

    match rows {
        Ok(rows) => TransferScan::Rows(chain, rows),
        Err(message) => {
            warn!("Fetch failed for {address}: {message}");
            TransferScan::FetchFailed(message)
        }
    }
}
