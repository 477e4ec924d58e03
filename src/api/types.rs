use serde::Deserialize;

/// Envelope of blockchain.info's `rawaddr` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BtcAddressHistory {
    #[serde(default)]
    pub txs: Vec<BtcTx>,
}

/// One Bitcoin transaction as blockchain.info serves it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BtcTx {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub inputs: Vec<BtcInput>,
    #[serde(default, rename = "out")]
    pub outputs: Vec<BtcOutput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BtcInput {
    #[serde(default)]
    pub prev_out: Option<BtcPrevOut>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BtcPrevOut {
    #[serde(default)]
    pub addr: Option<String>,
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BtcOutput {
    #[serde(default)]
    pub addr: Option<String>,
    #[serde(default)]
    pub value: u64,
}

/// One Ethereum transaction from Etherscan's `txlist` action.
///
/// Etherscan serializes numeric fields as decimal strings; they are parsed
/// at the normalization boundary so a malformed value surfaces as an error
/// instead of silently becoming zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EthTx {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, rename = "timeStamp")]
    pub time_stamp: String,
}
