use crate::config::HeuristicConfig;
use crate::core::Chain;

/// Burst: at least `burst_min_txs` transactions with the whole examined
/// window spanning less than `burst_window_secs`.
pub fn burst_detected(
    transaction_count: u64,
    min_ts: Option<i64>,
    max_ts: Option<i64>,
    config: &HeuristicConfig,
) -> bool {
    if transaction_count < config.burst_min_txs {
        return false;
    }
    match (min_ts, max_ts) {
        (Some(min), Some(max)) => max - min < config.burst_window_secs,
        _ => false,
    }
}

/// Compose the behavioral verdict from the accumulated counters. The count
/// cutoffs are policy constants (strict `>`), not derived values.
pub fn compose(
    chain: Chain,
    large_tx_count: u64,
    high_recipient_count: u64,
    config: &HeuristicConfig,
) -> bool {
    let large = large_tx_count > config.large_tx_verdict_count;
    match chain {
        Chain::Bitcoin => large || high_recipient_count > config.high_recipient_verdict_count,
        Chain::Ethereum => large,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HeuristicConfig {
        HeuristicConfig::default()
    }

    #[test]
    fn burst_within_window() {
        // span 3000s < 3600, count >= 3
        assert!(burst_detected(3, Some(1000), Some(4000), &config()));
    }

    #[test]
    fn burst_span_too_wide() {
        // span 8000s
        assert!(!burst_detected(3, Some(1000), Some(9000), &config()));
    }

    #[test]
    fn burst_span_exactly_window_is_not_burst() {
        assert!(!burst_detected(5, Some(0), Some(3600), &config()));
    }

    #[test]
    fn burst_needs_minimum_count() {
        assert!(!burst_detected(2, Some(1000), Some(1001), &config()));
    }

    #[test]
    fn burst_empty_window() {
        assert!(!burst_detected(0, None, None, &config()));
    }

    #[test]
    fn burst_custom_window() {
        let mut cfg = config();
        cfg.burst_window_secs = 100;
        assert!(!burst_detected(3, Some(0), Some(200), &cfg));
        assert!(burst_detected(3, Some(0), Some(99), &cfg));
    }

    #[test]
    fn verdict_requires_strictly_more_than_cutoff() {
        assert!(!compose(Chain::Ethereum, 2, 0, &config()));
        assert!(compose(Chain::Ethereum, 3, 0, &config()));
    }

    #[test]
    fn bitcoin_verdict_fires_on_fan_out_alone() {
        assert!(compose(Chain::Bitcoin, 0, 3, &config()));
        assert!(!compose(Chain::Bitcoin, 0, 2, &config()));
    }

    #[test]
    fn ethereum_verdict_ignores_fan_out() {
        assert!(!compose(Chain::Ethereum, 0, 100, &config()));
    }

    #[test]
    fn verdict_custom_cutoff() {
        let mut cfg = config();
        cfg.large_tx_verdict_count = 0;
        assert!(compose(Chain::Ethereum, 1, 0, &cfg));
    }
}
