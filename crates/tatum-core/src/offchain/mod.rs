//! Off-chain ledger withdrawals and token registration.
//!
//! Every operation debits or registers something in the Tatum ledger and,
//! for withdrawals, lets the service build, sign and broadcast the
//! blockchain transaction.

pub mod types;

pub use types::{
    BnbTransfer, Erc20TokenCreation, Erc20TokenDeployment, EthereumTransfer, LedgerCustomerOptions,
    OffchainAccountIdAddressPair, OffchainAccountIdTxIdPair, OffchainAddressPrivateKeyPair,
    OffchainTransferResponse, RippleTransfer, StellarTransfer, UtxoTransfer,
};

use tracing::debug;

use crate::client::{check_derivation_index, TatumClient};
use crate::error::CoreError;
use crate::transport::{ApiRequest, Params};
use crate::types::{Blockchain, UtxoChain};

const ETHEREUM_TRANSFER: &str = "offchain/ethereum/transfer";
const ERC20_CREATE: &str = "offchain/ethereum/erc20";
const ERC20_DEPLOY: &str = "offchain/ethereum/erc20/deploy";
const ERC20_TRANSFER: &str = "offchain/ethereum/erc20/transfer";
const XLM_TRANSFER: &str = "offchain/xlm/transfer";
const XLM_ASSET: &str = "offchain/xlm/asset";
const XRP_TRANSFER: &str = "offchain/xrp/transfer";
const XRP_ASSET: &str = "offchain/xrp/asset";
const BNB_TRANSFER: &str = "offchain/bnb/transfer";
const BNB_ASSET: &str = "offchain/bnb/asset";

/// Client for the `offchain/*` endpoints.
#[derive(Clone)]
pub struct OffChainBlockchainClient {
    tatum: TatumClient,
}

impl OffChainBlockchainClient {
    pub fn new(tatum: TatumClient) -> Self {
        Self { tatum }
    }

    // ==========================================================================
    // UTXO chains
    // ==========================================================================

    /// Withdraw from a ledger account on any of the UTXO chains.
    pub async fn send_utxo(
        &self,
        chain: UtxoChain,
        transfer: &UtxoTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        let slug = Blockchain::from(chain).slug();
        debug!(chain = slug, sender = %transfer.sender_account_id, "off-chain utxo transfer");
        let request = ApiRequest::post(
            &format!("offchain/{slug}/transfer"),
            chain.transfer_credits(),
        )
        .with_params(Params::from_record(transfer)?);
        self.tatum.call(request).await
    }

    /// 2 credits.
    pub async fn send_bitcoin(
        &self,
        transfer: &UtxoTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        self.send_utxo(UtxoChain::Bitcoin, transfer).await
    }

    /// 10 credits.
    pub async fn send_bitcoin_cash(
        &self,
        transfer: &UtxoTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        self.send_utxo(UtxoChain::BitcoinCash, transfer).await
    }

    /// 10 credits.
    pub async fn send_litecoin(
        &self,
        transfer: &UtxoTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        self.send_utxo(UtxoChain::Litecoin, transfer).await
    }

    // ==========================================================================
    // Ethereum & ERC20
    // ==========================================================================

    /// Withdraw ETH. 4 credits.
    pub async fn send_ethereum(
        &self,
        transfer: &EthereumTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        check_optional_index(transfer.index)?;
        let request =
            ApiRequest::post(ETHEREUM_TRANSFER, 4).with_params(Params::from_record(transfer)?);
        self.tatum.call(request).await
    }

    /// Register an ERC20 token in the ledger without deploying it. The
    /// contract address must be set later with
    /// [`set_erc20_token_contract_address`](Self::set_erc20_token_contract_address).
    /// 2 credits.
    pub async fn create_erc20_token(
        &self,
        token: &Erc20TokenCreation,
    ) -> Result<OffchainAccountIdAddressPair, CoreError> {
        check_optional_index(token.derivation_index)?;
        let request =
            ApiRequest::post(ERC20_CREATE, 2).with_params(Params::from_record(token)?);
        self.tatum.call(request).await
    }

    /// Register an ERC20 token and deploy its contract. 2 credits.
    pub async fn deploy_erc20_token(
        &self,
        token: &Erc20TokenDeployment,
    ) -> Result<OffchainAccountIdTxIdPair, CoreError> {
        check_optional_index(token.derivation_index)?;
        check_optional_index(token.index)?;
        let request =
            ApiRequest::post(ERC20_DEPLOY, 2).with_params(Params::from_record(token)?);
        self.tatum.call(request).await
    }

    /// Bind a previously created token symbol to its deployed contract.
    /// 2 credits.
    pub async fn set_erc20_token_contract_address(
        &self,
        address: &str,
        symbol: &str,
    ) -> Result<(), CoreError> {
        let request = ApiRequest::post(ERC20_CREATE, 2)
            .segment(symbol)?
            .segment(address)?;
        self.tatum.call_unit(request).await
    }

    /// Withdraw an ERC20 token. 4 credits.
    pub async fn send_erc20_token(
        &self,
        transfer: &EthereumTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        check_optional_index(transfer.index)?;
        let request =
            ApiRequest::post(ERC20_TRANSFER, 4).with_params(Params::from_record(transfer)?);
        self.tatum.call(request).await
    }

    // ==========================================================================
    // Stellar, Ripple, Binance Chain
    // ==========================================================================

    /// 10 credits.
    pub async fn send_stellar(
        &self,
        transfer: &StellarTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        let request =
            ApiRequest::post(XLM_TRANSFER, 10).with_params(Params::from_record(transfer)?);
        self.tatum.call(request).await
    }

    /// Register a Stellar asset issued by `issuer_account`. 2 credits.
    pub async fn create_xlm_asset(
        &self,
        issuer_account: &str,
        token: &str,
        base_pair: &str,
    ) -> Result<(), CoreError> {
        self.create_issued_asset(XLM_ASSET, issuer_account, token, base_pair)
            .await
    }

    /// 10 credits.
    pub async fn send_ripple(
        &self,
        transfer: &RippleTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        let request =
            ApiRequest::post(XRP_TRANSFER, 10).with_params(Params::from_record(transfer)?);
        self.tatum.call(request).await
    }

    /// Register a Ripple issued currency. 2 credits.
    pub async fn create_xrp_asset(
        &self,
        issuer_account: &str,
        token: &str,
        base_pair: &str,
    ) -> Result<(), CoreError> {
        self.create_issued_asset(XRP_ASSET, issuer_account, token, base_pair)
            .await
    }

    /// 10 credits.
    pub async fn send_bnb(
        &self,
        transfer: &BnbTransfer,
    ) -> Result<OffchainTransferResponse, CoreError> {
        let request =
            ApiRequest::post(BNB_TRANSFER, 10).with_params(Params::from_record(transfer)?);
        self.tatum.call(request).await
    }

    /// Register a Binance Chain asset. 2 credits.
    pub async fn create_bnb_asset(&self, token: &str, base_pair: &str) -> Result<(), CoreError> {
        let mut params = Params::new();
        params.insert("token", token)?.insert("basePair", base_pair)?;
        let request = ApiRequest::post(BNB_ASSET, 2).with_params(params);
        self.tatum.call_unit(request).await
    }

    async fn create_issued_asset(
        &self,
        path: &str,
        issuer_account: &str,
        token: &str,
        base_pair: &str,
    ) -> Result<(), CoreError> {
        let mut params = Params::new();
        params
            .insert("issuerAccount", issuer_account)?
            .insert("token", token)?
            .insert("basePair", base_pair)?;
        let request = ApiRequest::post(path, 2).with_params(params);
        self.tatum.call_unit(request).await
    }
}

fn check_optional_index(index: Option<u32>) -> Result<(), CoreError> {
    index.map_or(Ok(()), check_derivation_index)
}
