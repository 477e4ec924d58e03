use crate::api::types::{BtcTx, EthTx};
use crate::core::NormalizedTx;

/// A numeric field in an upstream record that failed to parse.
///
/// Treated as a malformed upstream response: the caller aborts the
/// evaluation for that address rather than folding the value into the
/// aggregates as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeError {
    pub txid: String,
    pub field: &'static str,
    pub raw: String,
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "transaction {}: {} {:?} is not a valid integer",
            self.txid, self.field, self.raw
        )
    }
}

impl std::error::Error for NormalizeError {}

/// Normalize a Bitcoin transaction. Missing optional fields defaulted to
/// empty/zero at decode time, so this cannot fail.
pub fn normalize_btc(tx: &BtcTx) -> NormalizedTx {
    let value_transferred: u128 = tx.outputs.iter().map(|o| o.value as u128).sum();
    let max_output_value = tx
        .outputs
        .iter()
        .map(|o| o.value as u128)
        .max()
        .unwrap_or(0);
    NormalizedTx {
        input_count: tx.inputs.len(),
        output_count: tx.outputs.len(),
        recipient_count: tx.outputs.len(),
        value_transferred,
        max_output_value,
        timestamp: tx.time,
    }
}

/// Normalize an Ethereum transaction relative to the target address.
///
/// Hex addresses compare case-insensitively. The single `to` address makes
/// the transaction one recipient event.
pub fn normalize_eth(tx: &EthTx, target: &str) -> Result<NormalizedTx, NormalizeError> {
    let value: u128 = parse_numeric(&tx.value, "value", &tx.hash)?;
    let timestamp: i64 = parse_numeric(&tx.time_stamp, "timeStamp", &tx.hash)?;
    let sent = tx.from.eq_ignore_ascii_case(target);
    let received = tx.to.eq_ignore_ascii_case(target);
    Ok(NormalizedTx {
        input_count: sent as usize,
        output_count: received as usize,
        recipient_count: 1,
        value_transferred: value,
        max_output_value: value,
        timestamp,
    })
}

pub(crate) fn parse_numeric<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
    txid: &str,
) -> Result<T, NormalizeError> {
    raw.trim().parse().map_err(|_| NormalizeError {
        txid: txid.to_string(),
        field,
        raw: raw.to_string(),
    })
}
