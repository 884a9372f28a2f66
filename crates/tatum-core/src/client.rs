//! The shared entry point: wraps one transport and hands it to every
//! per-area client, plus the wallet/key/address operations common to all
//! chains.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, CoreError};
use crate::offchain::OffChainBlockchainClient;
use crate::scrypta::ScryptaClient;
use crate::transport::{ApiRequest, HttpTransport, Params, TatumTransport, TransportConfig};
use crate::types::{Blockchain, BlockchainResponse, BlockchainWallet, TatumAddress, TatumKey};

/// Highest BIP-44 derivation index the API accepts (non-hardened range).
pub const MAX_DERIVATION_INDEX: u32 = (1 << 31) - 1;

/// Cheap-to-clone handle over a shared [`TatumTransport`].
#[derive(Clone)]
pub struct TatumClient {
    transport: Arc<dyn TatumTransport>,
}

impl TatumClient {
    pub fn new(transport: Arc<dyn TatumTransport>) -> Self {
        Self { transport }
    }

    /// Build a client over a fresh [`HttpTransport`].
    pub fn from_config(config: TransportConfig) -> Result<Self, CoreError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn transport(&self) -> &dyn TatumTransport {
        self.transport.as_ref()
    }

    pub fn credits_used(&self) -> u64 {
        self.transport.credits_used()
    }

    pub fn offchain(&self) -> OffChainBlockchainClient {
        OffChainBlockchainClient::new(self.clone())
    }

    pub fn scrypta(&self) -> ScryptaClient {
        ScryptaClient::new(self.clone())
    }

    /// Send `request` and decode the response body into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, CoreError> {
        let path = request.path();
        let raw = self.transport.send(request).await?;
        serde_json::from_value(raw).map_err(|e| {
            ApiError::InvalidResponse(format!("decode response of `{path}`: {e}")).into()
        })
    }

    /// Send `request` for an endpoint that only reports success.
    pub(crate) async fn call_unit(&self, request: ApiRequest) -> Result<(), CoreError> {
        self.transport.send(request).await.map(|_| ())
    }

    /// Send a transaction-submitting request; a response flagged `failed`
    /// becomes [`CoreError::TransactionFailed`].
    pub(crate) async fn submit(
        &self,
        request: ApiRequest,
    ) -> Result<BlockchainResponse, CoreError> {
        let response: BlockchainResponse = self.call(request).await?;
        if response.failed {
            return Err(CoreError::TransactionFailed {
                tx_id: response.tx_id,
            });
        }
        Ok(response)
    }

    /// Generate a BIP-44 HD wallet, or restore the xpub of `mnemonic`.
    /// 1 credit.
    pub async fn generate_wallet(
        &self,
        chain: Blockchain,
        mnemonic: Option<&str>,
    ) -> Result<BlockchainWallet, CoreError> {
        let mut params = Params::new();
        params.insert_optional("mnemonic", mnemonic)?;
        let request =
            ApiRequest::get(&format!("{}/wallet", chain.slug()), 1).with_params(params);
        self.call(request).await
    }

    /// Derive the private key at `index` of `mnemonic`. 1 credit.
    pub async fn generate_private_key(
        &self,
        chain: Blockchain,
        mnemonic: &str,
        index: u32,
    ) -> Result<TatumKey, CoreError> {
        check_derivation_index(index)?;
        let mut params = Params::new();
        params.insert("mnemonic", mnemonic)?.insert("index", index)?;
        let request =
            ApiRequest::post(&format!("{}/wallet/priv", chain.slug()), 1).with_params(params);
        self.call(request).await
    }

    /// Derive the deposit address at `index` of `xpub`. 1 credit.
    pub async fn generate_deposit_address(
        &self,
        chain: Blockchain,
        xpub: &str,
        index: u32,
    ) -> Result<TatumAddress, CoreError> {
        check_derivation_index(index)?;
        let request = ApiRequest::get(&format!("{}/address", chain.slug()), 1)
            .segment(xpub)?
            .segment(index)?;
        self.call(request).await
    }
}

pub(crate) fn check_derivation_index(index: u32) -> Result<(), CoreError> {
    if index > MAX_DERIVATION_INDEX {
        return Err(CoreError::InvalidArgument(format!(
            "derivation index {index} exceeds {MAX_DERIVATION_INDEX}"
        )));
    }
    Ok(())
}
