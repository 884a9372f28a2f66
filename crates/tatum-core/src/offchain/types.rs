//! Request bodies and responses of the off-chain withdrawal endpoints.
//!
//! Request records serialize straight into the endpoint's JSON body:
//! optional fields left as `None` are omitted from the wire.

use serde::{Deserialize, Serialize};

use crate::types::TokenAmount;

// ==============================================================================
// Responses
// ==============================================================================

/// Outcome of an off-chain withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffchainTransferResponse {
    /// Withdrawal id in the Tatum ledger.
    pub id: String,
    /// On-chain transaction id, once broadcast.
    #[serde(default)]
    pub tx_id: Option<String>,
    /// `false` when the withdrawal was broadcast but could not be completed
    /// in the ledger and needs manual completion.
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffchainAccountIdAddressPair {
    pub account_id: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffchainAccountIdTxIdPair {
    pub account_id: String,
    pub tx_id: String,
}

// ==============================================================================
// Shared Request Pieces
// ==============================================================================

/// Private key of one address funding a UTXO withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffchainAddressPrivateKeyPair {
    pub address: String,
    pub private_key: String,
}

/// Customer to create or reuse when a ledger account is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerCustomerOptions {
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounting_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_country: Option<String>,
}

impl LedgerCustomerOptions {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            accounting_currency: None,
            customer_country: None,
            provider_country: None,
        }
    }
}

// ==============================================================================
// Withdrawal Requests
// ==============================================================================

/// Withdrawal from a ledger account on Bitcoin, Bitcoin Cash or Litecoin.
///
/// Signing material is one of `mnemonic` + `xpub`, `key_pair`, or
/// `signature_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoTransfer {
    pub sender_account_id: String,
    pub address: String,
    pub amount: TokenAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<TokenAmount>,
    /// Split the withdrawal across several recipients; `address` then holds
    /// a comma separated list matching these amounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_amounts: Option<Vec<TokenAmount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_pair: Option<Vec<OffchainAddressPrivateKeyPair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_note: Option<String>,
}

impl UtxoTransfer {
    pub fn new(
        sender_account_id: impl Into<String>,
        address: impl Into<String>,
        amount: TokenAmount,
    ) -> Self {
        Self {
            sender_account_id: sender_account_id.into(),
            address: address.into(),
            amount,
            compliant: None,
            fee: None,
            multiple_amounts: None,
            key_pair: None,
            attr: None,
            mnemonic: None,
            signature_id: None,
            xpub: None,
            payment_id: None,
            sender_note: None,
        }
    }
}

/// Withdrawal of ETH or of an ERC20 token from a ledger account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EthereumTransfer {
    pub sender_account_id: String,
    pub address: String,
    pub amount: TokenAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_note: Option<String>,
}

impl EthereumTransfer {
    pub fn new(
        sender_account_id: impl Into<String>,
        address: impl Into<String>,
        amount: TokenAmount,
    ) -> Self {
        Self {
            sender_account_id: sender_account_id.into(),
            address: address.into(),
            amount,
            currency: None,
            nonce: None,
            compliant: None,
            private_key: None,
            signature_id: None,
            index: None,
            mnemonic: None,
            payment_id: None,
            sender_note: None,
        }
    }
}

/// Withdrawal of XLM or of a Stellar asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StellarTransfer {
    pub sender_account_id: String,
    /// Blockchain account the funds leave from.
    pub from_account: String,
    pub address: String,
    pub amount: TokenAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliant: Option<bool>,
    /// Memo attached to the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl StellarTransfer {
    pub fn new(
        sender_account_id: impl Into<String>,
        from_account: impl Into<String>,
        address: impl Into<String>,
        amount: TokenAmount,
    ) -> Self {
        Self {
            sender_account_id: sender_account_id.into(),
            from_account: from_account.into(),
            address: address.into(),
            amount,
            secret: None,
            signature_id: None,
            compliant: None,
            attr: None,
            payment_id: None,
            sender_note: None,
            issuer_account: None,
            token: None,
        }
    }
}

/// Withdrawal of XRP or of a Ripple issued currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RippleTransfer {
    pub sender_account_id: String,
    /// Blockchain account the funds leave from.
    pub account: String,
    pub address: String,
    pub amount: TokenAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliant: Option<bool>,
    /// Destination tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl RippleTransfer {
    pub fn new(
        sender_account_id: impl Into<String>,
        account: impl Into<String>,
        address: impl Into<String>,
        amount: TokenAmount,
    ) -> Self {
        Self {
            sender_account_id: sender_account_id.into(),
            account: account.into(),
            address: address.into(),
            amount,
            compliant: None,
            attr: None,
            source_tag: None,
            payment_id: None,
            secret: None,
            signature_id: None,
            sender_note: None,
            issuer_account: None,
            token: None,
        }
    }
}

/// Withdrawal of BNB or of a Binance Chain asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BnbTransfer {
    pub sender_account_id: String,
    pub address: String,
    pub amount: TokenAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliant: Option<bool>,
    /// Memo attached to the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_note: Option<String>,
}

impl BnbTransfer {
    pub fn new(
        sender_account_id: impl Into<String>,
        address: impl Into<String>,
        amount: TokenAmount,
    ) -> Self {
        Self {
            sender_account_id: sender_account_id.into(),
            address: address.into(),
            amount,
            compliant: None,
            attr: None,
            payment_id: None,
            private_key: None,
            signature_id: None,
            sender_note: None,
        }
    }
}

// ==============================================================================
// ERC20 Requests
// ==============================================================================

/// Declares an ERC20 token in the ledger (the contract is deployed
/// separately) and opens its first account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20TokenCreation {
    pub symbol: String,
    pub supply: String,
    pub description: String,
    pub base_pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<LedgerCustomerOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivation_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Erc20TokenCreation {
    pub fn new(
        symbol: impl Into<String>,
        supply: impl Into<String>,
        description: impl Into<String>,
        base_pair: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            supply: supply.into(),
            description: description.into(),
            base_pair: base_pair.into(),
            customer: None,
            accounting_currency: None,
            derivation_index: None,
            xpub: None,
            address: None,
        }
    }
}

/// Declares an ERC20 token in the ledger and deploys its contract in one
/// call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20TokenDeployment {
    pub symbol: String,
    pub supply: String,
    pub description: String,
    pub base_pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<LedgerCustomerOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivation_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
}

impl Erc20TokenDeployment {
    pub fn new(
        symbol: impl Into<String>,
        supply: impl Into<String>,
        description: impl Into<String>,
        base_pair: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            supply: supply.into(),
            description: description.into(),
            base_pair: base_pair.into(),
            customer: None,
            xpub: None,
            derivation_index: None,
            address: None,
            mnemonic: None,
            index: None,
            private_key: None,
            signature_id: None,
            nonce: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_util::amount;

    #[test]
    fn utxo_transfer_omits_unset_options() {
        let mut transfer = UtxoTransfer::new("acc-1", "mkx1", amount("0.001"));
        transfer.multiple_amounts = Some(vec![amount("0.0005"), amount("0.0005")]);
        transfer.key_pair = Some(vec![OffchainAddressPrivateKeyPair {
            address: "mkx0".into(),
            private_key: "cV...".into(),
        }]);

        assert_eq!(
            serde_json::to_value(&transfer).unwrap(),
            json!({
                "senderAccountId": "acc-1",
                "address": "mkx1",
                "amount": "0.001",
                "multipleAmounts": ["0.0005", "0.0005"],
                "keyPair": [{ "address": "mkx0", "privateKey": "cV..." }],
            })
        );
    }

    #[test]
    fn transfer_response_tolerates_missing_tx_id() {
        let resp: OffchainTransferResponse =
            serde_json::from_value(json!({ "id": "w-1", "completed": true })).unwrap();
        assert!(resp.tx_id.is_none());
        assert!(resp.completed);
    }

    #[test]
    fn customer_options_serialize_only_set_fields() {
        let mut customer = LedgerCustomerOptions::new("cust-9");
        customer.customer_country = Some("SK".into());
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({ "externalId": "cust-9", "customerCountry": "SK" })
        );
    }
}
