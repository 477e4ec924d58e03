pub mod transfers;
pub mod verdict;

use chrono::{DateTime, Utc};

use crate::config::HeuristicConfig;
use crate::core::{ActivitySummary, Chain, NormalizedTx};
use crate::scamlist::ScamList;

/// Applies the threshold heuristics to a normalized transaction history.
///
/// One forward pass accumulates every counter; only running sums and the
/// timestamp extremes are retained. No I/O happens here — the summary is a
/// pure function of the inputs and the configured thresholds.
pub struct HeuristicEngine {
    config: HeuristicConfig,
}

impl HeuristicEngine {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(
        &self,
        address: &str,
        chain: Chain,
        txs: &[NormalizedTx],
        scam_list: &ScamList,
    ) -> ActivitySummary {
        let large_threshold = self.config.large_tx_threshold(chain);

        let mut inward_count: u64 = 0;
        let mut outward_count: u64 = 0;
        let mut large_tx_count: u64 = 0;
        let mut high_recipient_count: u64 = 0;
        let mut outgoing_sum: u128 = 0;
        let mut outgoing_txs: u64 = 0;
        let mut min_ts: Option<i64> = None;
        let mut max_ts: Option<i64> = None;

        for tx in txs {
            match chain {
                Chain::Bitcoin => {
                    // Transfer legs: rawaddr does not attribute sender roles
                    inward_count += tx.input_count as u64;
                    outward_count += tx.output_count as u64;
                    if tx.max_output_value > large_threshold {
                        large_tx_count += 1;
                    }
                    if tx.recipient_count > self.config.fan_out_threshold {
                        high_recipient_count += 1;
                    }
                }
                Chain::Ethereum => {
                    if tx.output_count > 0 {
                        inward_count += 1;
                    }
                    if tx.input_count > 0 {
                        outward_count += 1;
                        outgoing_sum += tx.value_transferred;
                        outgoing_txs += 1;
                        if tx.value_transferred > large_threshold {
                            large_tx_count += 1;
                        }
                    }
                }
            }
            min_ts = Some(min_ts.map_or(tx.timestamp, |m| m.min(tx.timestamp)));
            max_ts = Some(max_ts.map_or(tx.timestamp, |m| m.max(tx.timestamp)));
        }

        let transaction_count = txs.len() as u64;
        let average_outgoing_value = if outgoing_txs > 0 {
            Some(outgoing_sum as f64 / outgoing_txs as f64)
        } else {
            None
        };
        let burst_activity =
            verdict::burst_detected(transaction_count, min_ts, max_ts, &self.config);
        let behavior_scam =
            verdict::compose(chain, large_tx_count, high_recipient_count, &self.config);

        ActivitySummary {
            chain,
            address: address.to_string(),
            inward_count,
            outward_count,
            large_tx_count,
            high_recipient_count,
            average_outgoing_value,
            transaction_count,
            last_transaction_time: max_ts.and_then(to_datetime),
            burst_activity,
            reported_as_scam: scam_list.contains(address),
            behavior_scam,
        }
    }
}

fn to_datetime(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETH: u128 = 1_000_000_000_000_000_000;
    const TARGET: &str = "0xAbC0000000000000000000000000000000000001";

    fn engine() -> HeuristicEngine {
        HeuristicEngine::new(HeuristicConfig::default())
    }

    fn btc_tx(input_count: usize, output_values: &[u64], timestamp: i64) -> NormalizedTx {
        NormalizedTx {
            input_count,
            output_count: output_values.len(),
            recipient_count: output_values.len(),
            value_transferred: output_values.iter().map(|&v| v as u128).sum(),
            max_output_value: output_values.iter().map(|&v| v as u128).max().unwrap_or(0),
            timestamp,
        }
    }

    fn eth_out(value: u128, timestamp: i64) -> NormalizedTx {
        NormalizedTx {
            input_count: 1,
            output_count: 0,
            recipient_count: 1,
            value_transferred: value,
            max_output_value: value,
            timestamp,
        }
    }

    fn eth_in(value: u128, timestamp: i64) -> NormalizedTx {
        NormalizedTx {
            input_count: 0,
            output_count: 1,
            recipient_count: 1,
            value_transferred: value,
            max_output_value: value,
            timestamp,
        }
    }

    #[test]
    fn empty_history_is_all_zeroes() {
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &[], &ScamList::empty());
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.inward_count, 0);
        assert_eq!(summary.outward_count, 0);
        assert_eq!(summary.large_tx_count, 0);
        assert_eq!(summary.average_outgoing_value, None);
        assert_eq!(summary.last_transaction_time, None);
        assert!(!summary.burst_activity);
        assert!(!summary.behavior_scam);
        assert!(!summary.reported_as_scam);
    }

    #[test]
    fn eth_large_tx_threshold_is_strict() {
        // 2.0, 1.5, 0.5 ETH outgoing: two exceed 1 ETH, verdict needs > 2
        let txs = vec![
            eth_out(2 * ETH, 100),
            eth_out(ETH + ETH / 2, 200),
            eth_out(ETH / 2, 300),
        ];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert_eq!(summary.large_tx_count, 2);
        assert!(!summary.behavior_scam);
    }

    #[test]
    fn eth_exactly_one_eth_is_not_large() {
        let txs = vec![eth_out(ETH, 100)];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert_eq!(summary.large_tx_count, 0);
    }

    #[test]
    fn eth_behavior_scam_after_three_large() {
        let txs = vec![
            eth_out(2 * ETH, 100),
            eth_out(3 * ETH, 200),
            eth_out(4 * ETH, 300),
        ];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert_eq!(summary.large_tx_count, 3);
        assert!(summary.behavior_scam);
    }

    #[test]
    fn eth_incoming_value_never_counts_as_large() {
        let txs = vec![eth_in(100 * ETH, 100), eth_in(100 * ETH, 200)];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert_eq!(summary.large_tx_count, 0);
        assert_eq!(summary.inward_count, 2);
        assert_eq!(summary.outward_count, 0);
    }

    #[test]
    fn eth_average_of_outgoing_values() {
        let txs = vec![eth_out(ETH, 100), eth_out(3 * ETH, 200), eth_in(50 * ETH, 300)];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        // incoming value excluded from the mean
        assert_eq!(summary.average_outgoing_value, Some(2.0 * ETH as f64));
    }

    #[test]
    fn eth_no_outgoing_means_undefined_average() {
        let txs = vec![eth_in(ETH, 100)];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert_eq!(summary.average_outgoing_value, None);
    }

    #[test]
    fn eth_neither_side_tx_only_counts_toward_totals() {
        let unrelated = NormalizedTx {
            input_count: 0,
            output_count: 0,
            recipient_count: 1,
            value_transferred: 9 * ETH,
            max_output_value: 9 * ETH,
            timestamp: 500,
        };
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &[unrelated], &ScamList::empty());
        assert_eq!(summary.inward_count, 0);
        assert_eq!(summary.outward_count, 0);
        assert_eq!(summary.transaction_count, 1);
        assert!(summary.last_transaction_time.is_some());
    }

    #[test]
    fn burst_within_one_hour() {
        let txs = vec![eth_in(1, 1000), eth_in(1, 1500), eth_in(1, 4000)];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert!(summary.burst_activity);
    }

    #[test]
    fn burst_spread_out() {
        let txs = vec![eth_in(1, 1000), eth_in(1, 5000), eth_in(1, 9000)];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert!(!summary.burst_activity);
    }

    #[test]
    fn burst_unordered_timestamps() {
        let txs = vec![eth_in(1, 4000), eth_in(1, 1000), eth_in(1, 1500)];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert!(summary.burst_activity);
    }

    #[test]
    fn last_transaction_time_is_most_recent() {
        let txs = vec![eth_in(1, 4000), eth_in(1, 9000), eth_in(1, 1500)];
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &txs, &ScamList::empty());
        assert_eq!(
            summary.last_transaction_time,
            DateTime::from_timestamp(9000, 0)
        );
    }

    #[test]
    fn btc_counts_transfer_legs() {
        let txs = vec![btc_tx(2, &[100, 200], 100), btc_tx(1, &[300], 200)];
        let summary = engine().evaluate("1Target", Chain::Bitcoin, &txs, &ScamList::empty());
        assert_eq!(summary.inward_count, 3);
        assert_eq!(summary.outward_count, 3);
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.average_outgoing_value, None);
    }

    #[test]
    fn btc_large_output_flags_tx_once() {
        // two outputs above threshold in one tx still count it once
        let txs = vec![btc_tx(1, &[2_000_000, 3_000_000, 10], 100)];
        let summary = engine().evaluate("1Target", Chain::Bitcoin, &txs, &ScamList::empty());
        assert_eq!(summary.large_tx_count, 1);
    }

    #[test]
    fn btc_output_at_threshold_is_not_large() {
        let txs = vec![btc_tx(1, &[1_000_000], 100)];
        let summary = engine().evaluate("1Target", Chain::Bitcoin, &txs, &ScamList::empty());
        assert_eq!(summary.large_tx_count, 0);
    }

    #[test]
    fn btc_fan_out_threshold_is_strict() {
        let eleven = vec![10u64; 11];
        let ten = vec![10u64; 10];
        let txs = vec![btc_tx(1, &eleven, 100), btc_tx(1, &ten, 200)];
        let summary = engine().evaluate("1Target", Chain::Bitcoin, &txs, &ScamList::empty());
        assert_eq!(summary.high_recipient_count, 1);
    }

    #[test]
    fn btc_fan_out_drives_verdict() {
        let eleven = vec![10u64; 11];
        let txs = vec![
            btc_tx(1, &eleven, 100),
            btc_tx(1, &eleven, 200),
            btc_tx(1, &eleven, 300),
        ];
        let summary = engine().evaluate("1Target", Chain::Bitcoin, &txs, &ScamList::empty());
        assert_eq!(summary.high_recipient_count, 3);
        assert!(summary.behavior_scam);
    }

    #[test]
    fn scam_list_membership_independent_of_history() {
        let list = ScamList::from_addresses(vec!["1ScamTarget".to_string()]);
        let summary = engine().evaluate("1ScamTarget", Chain::Bitcoin, &[], &list);
        assert!(summary.reported_as_scam);
        assert!(!summary.behavior_scam);
        assert!(summary.flagged());
    }

    #[test]
    fn scam_list_checked_for_ethereum_when_supplied() {
        let list = ScamList::from_addresses(vec![TARGET.to_string()]);
        let summary = engine().evaluate(TARGET, Chain::Ethereum, &[], &list);
        assert!(summary.reported_as_scam);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let txs = vec![eth_out(2 * ETH, 100), eth_in(ETH, 4000)];
        let list = ScamList::from_addresses(vec![TARGET.to_string()]);
        let first = engine().evaluate(TARGET, Chain::Ethereum, &txs, &list);
        let second = engine().evaluate(TARGET, Chain::Ethereum, &txs, &list);
        assert_eq!(first, second);
    }

    #[test]
    fn custom_fan_out_threshold() {
        let mut config = HeuristicConfig::default();
        config.fan_out_threshold = 2;
        let engine = HeuristicEngine::new(config);
        let txs = vec![btc_tx(1, &[1, 2, 3], 100)];
        let summary = engine.evaluate("1Target", Chain::Bitcoin, &txs, &ScamList::empty());
        assert_eq!(summary.high_recipient_count, 1);
    }
}
