//! Value types shared by every Tatum client: chain identifiers, decimal
//! amounts, and the wallet/key/broadcast records common to all chains.

use std::str::FromStr;

use bitcoin::{Amount, Denomination};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

// ==============================================================================
// Chains
// ==============================================================================

/// A blockchain supported by the Tatum API, identified in URLs by its slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blockchain {
    Bitcoin,
    BitcoinCash,
    Litecoin,
    Ethereum,
    Scrypta,
    Stellar,
    Ripple,
    BinanceChain,
}

impl Blockchain {
    pub const ALL: [Blockchain; 8] = [
        Self::Bitcoin,
        Self::BitcoinCash,
        Self::Litecoin,
        Self::Ethereum,
        Self::Scrypta,
        Self::Stellar,
        Self::Ripple,
        Self::BinanceChain,
    ];

    /// Path segment used by the REST API for this chain.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Bitcoin => "bitcoin",
            Self::BitcoinCash => "bcash",
            Self::Litecoin => "litecoin",
            Self::Ethereum => "ethereum",
            Self::Scrypta => "scrypta",
            Self::Stellar => "xlm",
            Self::Ripple => "xrp",
            Self::BinanceChain => "bnb",
        }
    }
}

impl std::fmt::Display for Blockchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Blockchain {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|chain| chain.slug() == lowered)
            .ok_or_else(|| CoreError::InvalidArgument(format!("unknown blockchain `{s}`")))
    }
}

/// The UTXO-model chains that share the off-chain transfer endpoint shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtxoChain {
    Bitcoin,
    BitcoinCash,
    Litecoin,
}

impl UtxoChain {
    /// Credit cost of an off-chain withdrawal on this chain.
    pub fn transfer_credits(self) -> u32 {
        match self {
            Self::Bitcoin => 2,
            Self::BitcoinCash | Self::Litecoin => 10,
        }
    }
}

impl From<UtxoChain> for Blockchain {
    fn from(chain: UtxoChain) -> Self {
        match chain {
            UtxoChain::Bitcoin => Blockchain::Bitcoin,
            UtxoChain::BitcoinCash => Blockchain::BitcoinCash,
            UtxoChain::Litecoin => Blockchain::Litecoin,
        }
    }
}

// ==============================================================================
// Token Amount
// ==============================================================================

/// A non-negative decimal amount, carried on the wire as a plain decimal
/// string (`"0.0001"`) with `.` as separator and no exponent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAmount(String);

impl TokenAmount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TokenAmount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.splitn(2, '.');
        let whole = parts.next().unwrap_or_default();
        let frac = parts.next();

        let digits_only = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        let valid = digits_only(whole)
            && frac.map_or(true, digits_only)
            && !(whole.is_empty() && frac.map_or(true, str::is_empty));
        if !valid {
            return Err(CoreError::InvalidArgument(format!(
                "invalid decimal amount `{s}`"
            )));
        }
        Ok(Self(s.to_owned()))
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<Amount> for TokenAmount {
    fn from(value: Amount) -> Self {
        Self(value.to_string_in(Denomination::Bitcoin))
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ==============================================================================
// Shared Records
// ==============================================================================

/// A freshly generated (or restored) HD wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainWallet {
    pub mnemonic: String,
    pub xpub: String,
}

/// A private key derived from a mnemonic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TatumKey {
    pub key: String,
}

/// A deposit address derived from an xpub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TatumAddress {
    pub address: String,
}

/// Result of submitting a transaction to a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainResponse {
    #[serde(default)]
    pub tx_id: Option<String>,
    #[serde(default)]
    pub failed: bool,
}
