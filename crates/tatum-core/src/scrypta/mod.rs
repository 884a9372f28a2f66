//! Scrypta (LYRA) blockchain endpoints.

pub mod types;

pub use types::{
    ScryptaBlock, ScryptaChainInfo, ScryptaScriptPubKey, ScryptaSendOrderFromAddress,
    ScryptaSendOrderFromUtxo, ScryptaSendOrderTo, ScryptaTransaction, ScryptaTxInput,
    ScryptaTxOutput, ScryptaUtxo,
};

use futures::future::try_join_all;
use serde::Deserialize;
use tracing::debug;

use crate::client::TatumClient;
use crate::error::{ApiError, CoreError};
use crate::transport::{ApiRequest, Params};
use crate::types::{Blockchain, BlockchainResponse, BlockchainWallet, TatumAddress, TatumKey};

/// Largest page the explorer list endpoints accept.
pub const MAX_PAGE_SIZE: u32 = 50;

const INFO: &str = "scrypta/info";
const BLOCK: &str = "scrypta/block";
const BLOCK_HASH: &str = "scrypta/block/hash";
const TRANSACTION: &str = "scrypta/transaction";
const TRANSACTIONS_BY_ADDRESS: &str = "scrypta/transaction/address";
const UTXO: &str = "scrypta/utxo";
const BROADCAST: &str = "scrypta/broadcast";

/// Paging for the address history and UTXO listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1..=50
    pub page_size: u32,
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Page {
    fn to_params(self) -> Result<Params, CoreError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(CoreError::InvalidArgument(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        let mut params = Params::new();
        params
            .insert("pageSize", self.page_size)?
            .insert("offset", self.offset)?;
        Ok(params)
    }
}

/// Client for the `scrypta/*` endpoints. Every read costs 1 credit, every
/// submission 2.
#[derive(Clone)]
pub struct ScryptaClient {
    tatum: TatumClient,
}

impl ScryptaClient {
    pub fn new(tatum: TatumClient) -> Self {
        Self { tatum }
    }

    // ==========================================================================
    // Wallet
    // ==========================================================================

    pub async fn generate_wallet(
        &self,
        mnemonic: Option<&str>,
    ) -> Result<BlockchainWallet, CoreError> {
        self.tatum.generate_wallet(Blockchain::Scrypta, mnemonic).await
    }

    pub async fn generate_private_key(
        &self,
        mnemonic: &str,
        index: u32,
    ) -> Result<TatumKey, CoreError> {
        self.tatum
            .generate_private_key(Blockchain::Scrypta, mnemonic, index)
            .await
    }

    pub async fn generate_deposit_address(
        &self,
        xpub: &str,
        index: u32,
    ) -> Result<TatumAddress, CoreError> {
        self.tatum
            .generate_deposit_address(Blockchain::Scrypta, xpub, index)
            .await
    }

    // ==========================================================================
    // Explorer
    // ==========================================================================

    pub async fn get_blockchain_information(&self) -> Result<ScryptaChainInfo, CoreError> {
        self.tatum.call(ApiRequest::get(INFO, 1)).await
    }

    /// Hash of the block at height `block_id`.
    pub async fn get_block_hash(&self, block_id: u64) -> Result<String, CoreError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BlockHashResponse {
            Bare(String),
            Wrapped { hash: String },
        }

        let raw: BlockHashResponse = self
            .tatum
            .call(ApiRequest::get(BLOCK_HASH, 1).segment(block_id)?)
            .await?;
        let hash = match raw {
            BlockHashResponse::Bare(hash) | BlockHashResponse::Wrapped { hash } => hash,
        };
        if hash.is_empty() {
            let message = format!("empty hash for block {block_id}");
            return Err(ApiError::InvalidResponse(message).into());
        }
        Ok(hash)
    }

    /// Block by hash or by height.
    pub async fn get_block(&self, hash_or_height: &str) -> Result<ScryptaBlock, CoreError> {
        self.tatum
            .call(ApiRequest::get(BLOCK, 1).segment(hash_or_height)?)
            .await
    }

    pub async fn get_transaction_by_hash(
        &self,
        hash: &str,
    ) -> Result<ScryptaTransaction, CoreError> {
        self.tatum
            .call(ApiRequest::get(TRANSACTION, 1).segment(hash)?)
            .await
    }

    /// Fetch several transactions concurrently, in request order. Fails on
    /// the first error.
    pub async fn get_transactions_by_hashes(
        &self,
        hashes: &[&str],
    ) -> Result<Vec<ScryptaTransaction>, CoreError> {
        try_join_all(hashes.iter().map(|hash| self.get_transaction_by_hash(hash))).await
    }

    pub async fn get_transactions_by_address(
        &self,
        address: &str,
        page: Page,
    ) -> Result<Vec<ScryptaTransaction>, CoreError> {
        let params = page.to_params()?;
        let request = ApiRequest::get(TRANSACTIONS_BY_ADDRESS, 1)
            .segment(address)?
            .with_params(params);
        self.tatum.call(request).await
    }

    pub async fn get_spendable_utxo(
        &self,
        address: &str,
        page: Page,
    ) -> Result<Vec<ScryptaUtxo>, CoreError> {
        let params = page.to_params()?;
        let request = ApiRequest::get(UTXO, 1)
            .segment(address)?
            .with_params(params);
        self.tatum.call(request).await
    }

    /// A single output of `txhash`, if it is still unspent.
    pub async fn get_transaction_utxo(
        &self,
        txhash: &str,
        index: u32,
    ) -> Result<ScryptaUtxo, CoreError> {
        let request = ApiRequest::get(UTXO, 1)
            .segment(txhash)?
            .segment(index)?;
        self.tatum.call(request).await
    }

    // ==========================================================================
    // Submission
    // ==========================================================================

    /// Build, sign and broadcast a LYRA transfer server-side. Funds come
    /// from whole addresses, specific UTXOs, or both; at least one source
    /// and one recipient are required. 2 credits.
    pub async fn send(
        &self,
        from_address: &[ScryptaSendOrderFromAddress],
        from_utxo: &[ScryptaSendOrderFromUtxo],
        to: &[ScryptaSendOrderTo],
    ) -> Result<BlockchainResponse, CoreError> {
        if from_address.is_empty() && from_utxo.is_empty() {
            return Err(CoreError::InvalidArgument(
                "either fromUTXO or fromAddress must be present".to_owned(),
            ));
        }
        if to.is_empty() {
            return Err(CoreError::InvalidArgument(
                "at least one recipient is required".to_owned(),
            ));
        }

        debug!(
            from_addresses = from_address.len(),
            from_utxos = from_utxo.len(),
            recipients = to.len(),
            "scrypta send"
        );
        let mut params = Params::new();
        params
            .insert("to", to)?
            .insert_optional("fromAddress", non_empty(from_address))?
            .insert_optional("fromUTXO", non_empty(from_utxo))?;
        self.tatum
            .submit(ApiRequest::post(TRANSACTION, 2).with_params(params))
            .await
    }

    /// Broadcast a signed transaction. `signature_id` completes a pending
    /// request of an external signing service. 2 credits.
    pub async fn broadcast(
        &self,
        tx_data: &str,
        signature_id: Option<&str>,
    ) -> Result<BlockchainResponse, CoreError> {
        let mut params = Params::new();
        params
            .insert("txData", tx_data)?
            .insert_optional("signatureId", signature_id)?;
        self.tatum
            .submit(ApiRequest::post(BROADCAST, 2).with_params(params))
            .await
    }
}

fn non_empty<T>(items: &[T]) -> Option<&[T]> {
    (!items.is_empty()).then_some(items)
}
