//! Scrypta (LYRA) chain records as returned by the Tatum explorer
//! endpoints. Explorer payloads vary between node versions, so most fields
//! are optional and unknown fields are ignored.

use serde::{Deserialize, Serialize};

// ==============================================================================
// Chain & Blocks
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryptaChainInfo {
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub blocks: Option<u64>,
    #[serde(default)]
    pub headers: Option<u64>,
    #[serde(default, rename = "bestblockhash")]
    pub best_block_hash: Option<String>,
    #[serde(default)]
    pub difficulty: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryptaBlock {
    pub hash: String,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub confirmations: Option<i64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default, rename = "merkleroot")]
    pub merkle_root: Option<String>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub bits: Option<String>,
    #[serde(default)]
    pub difficulty: Option<f64>,
    #[serde(default, rename = "previousblockhash")]
    pub previous_block_hash: Option<String>,
    #[serde(default, rename = "nextblockhash")]
    pub next_block_hash: Option<String>,
    #[serde(default)]
    pub txs: Vec<ScryptaTransaction>,
}

// ==============================================================================
// Transactions
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryptaTransaction {
    pub txid: String,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub locktime: Option<u64>,
    #[serde(default, rename = "blockhash")]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub confirmations: Option<i64>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default, rename = "blocktime")]
    pub block_time: Option<u64>,
    #[serde(default)]
    pub vin: Vec<ScryptaTxInput>,
    #[serde(default)]
    pub vout: Vec<ScryptaTxOutput>,
}

/// A transaction input; `txid`/`vout` are absent for coinbase inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryptaTxInput {
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub vout: Option<u32>,
    #[serde(default)]
    pub coinbase: Option<String>,
    #[serde(default)]
    pub sequence: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryptaTxOutput {
    pub value: f64,
    pub n: u32,
    #[serde(default, rename = "scriptPubKey")]
    pub script_pub_key: Option<ScryptaScriptPubKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryptaScriptPubKey {
    #[serde(default)]
    pub asm: Option<String>,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default, rename = "type")]
    pub script_type: Option<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
}

/// An unspent output owned by an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryptaUtxo {
    #[serde(alias = "hash")]
    pub txid: String,
    #[serde(alias = "index")]
    pub vout: u32,
    #[serde(default, alias = "value")]
    pub amount: Option<f64>,
    #[serde(default, rename = "scriptPubKey", alias = "script")]
    pub script_pub_key: Option<String>,
    #[serde(default)]
    pub block: Option<u64>,
}

// ==============================================================================
// Send Orders
// ==============================================================================

/// Spend every UTXO of `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScryptaSendOrderFromAddress {
    pub address: String,
    pub private_key: String,
}

/// Spend one specific UTXO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScryptaSendOrderFromUtxo {
    pub tx_hash: String,
    pub index: u32,
    pub private_key: String,
}

/// Recipient and amount in LYRA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryptaSendOrderTo {
    pub address: String,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn utxo_accepts_both_field_spellings() {
        let a: ScryptaUtxo = serde_json::from_value(json!({
            "txid": "aa", "vout": 1, "amount": 0.5, "scriptPubKey": "76a9", "block": 10
        }))
        .unwrap();
        let b: ScryptaUtxo =
            serde_json::from_value(json!({ "hash": "aa", "index": 1, "value": 0.5 })).unwrap();
        assert_eq!(a.txid, b.txid);
        assert_eq!(a.vout, b.vout);
        assert_eq!(a.amount, b.amount);
        assert_eq!(b.block, None);
    }

    #[test]
    fn coinbase_input_has_no_outpoint() {
        let tx: ScryptaTransaction = serde_json::from_value(json!({
            "txid": "cb",
            "vin": [{ "coinbase": "03a0860100", "sequence": 4294967295u64 }],
            "vout": [{ "value": 50.0, "n": 0, "scriptPubKey": { "type": "pubkeyhash", "addresses": ["LZ"] } }]
        }))
        .unwrap();
        assert!(tx.vin[0].txid.is_none());
        assert_eq!(tx.vout[0].script_pub_key.as_ref().unwrap().addresses, vec!["LZ"]);
    }

    #[test]
    fn send_orders_use_wire_names() {
        let order = ScryptaSendOrderFromUtxo {
            tx_hash: "aa".into(),
            index: 0,
            private_key: "Sp...".into(),
        };
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({ "txHash": "aa", "index": 0, "privateKey": "Sp..." })
        );
    }
}
