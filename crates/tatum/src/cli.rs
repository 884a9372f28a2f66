use clap::{Args, Parser, Subcommand};

use tatum_core::transport::DEFAULT_BASE_URL;
use tatum_core::Blockchain;

/// tatum: command-line client for the Tatum blockchain REST API.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Tatum API key.
    #[arg(long, env = "TATUM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Tatum v3 API.
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "TATUM_API_URL")]
    pub api_url: String,

    /// Maximum outbound requests per second (unlimited if omitted).
    #[arg(long, env = "TATUM_RPS")]
    pub rps: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate an HD wallet, or restore the xpub of an existing mnemonic.
    Wallet {
        chain: Blockchain,
        #[arg(long)]
        mnemonic: Option<String>,
    },

    /// Derive a private key from a mnemonic.
    PrivateKey {
        chain: Blockchain,
        #[arg(long)]
        mnemonic: String,
        #[arg(long)]
        index: u32,
    },

    /// Derive a deposit address from an xpub.
    Address {
        chain: Blockchain,
        xpub: String,
        index: u32,
    },

    /// Scrypta (LYRA) explorer and broadcast endpoints.
    #[command(subcommand)]
    Scrypta(ScryptaCommand),

    /// Off-chain ledger token registration.
    #[command(subcommand)]
    Offchain(OffchainCommand),
}

#[derive(Subcommand)]
pub enum ScryptaCommand {
    /// Chain tip and node information.
    Info,
    /// Hash of the block at a height.
    BlockHash { height: u64 },
    /// Block by hash or height.
    Block { hash_or_height: String },
    /// One or more transactions by hash.
    Tx {
        #[arg(required = true)]
        hashes: Vec<String>,
    },
    /// Transaction history of an address.
    AddressTxs {
        address: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Spendable outputs of an address.
    Utxos {
        address: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// A single unspent output.
    Utxo { txhash: String, index: u32 },
    /// Broadcast a signed raw transaction.
    Broadcast {
        tx_data: String,
        #[arg(long)]
        signature_id: Option<String>,
    },
}

#[derive(Args)]
pub struct PageArgs {
    /// Page size, 1 to 50.
    #[arg(long, default_value = "50")]
    pub page_size: u32,

    #[arg(long, default_value = "0")]
    pub offset: u64,
}

#[derive(Subcommand)]
pub enum OffchainCommand {
    /// Bind an ERC20 symbol to its deployed contract address.
    SetErc20Address { symbol: String, address: String },
    /// Register a Stellar asset.
    CreateXlmAsset {
        issuer: String,
        token: String,
        base_pair: String,
    },
    /// Register a Ripple issued currency.
    CreateXrpAsset {
        issuer: String,
        token: String,
        base_pair: String,
    },
    /// Register a Binance Chain asset.
    CreateBnbAsset { token: String, base_pair: String },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn chain_argument_parses_slug() {
        let cli = Cli::try_parse_from(["tatum", "--api-key", "k", "wallet", "LITECOIN"]).unwrap();
        match cli.command {
            Command::Wallet { chain, mnemonic } => {
                assert_eq!(chain, Blockchain::Litecoin);
                assert!(mnemonic.is_none());
            }
            _ => panic!("expected wallet subcommand"),
        }
    }

    #[test]
    fn unknown_chain_is_rejected() {
        assert!(Cli::try_parse_from(["tatum", "wallet", "dogecoin"]).is_err());
    }

    #[test]
    fn scrypta_tx_requires_a_hash() {
        assert!(Cli::try_parse_from(["tatum", "scrypta", "tx"]).is_err());
        let cli = Cli::try_parse_from(["tatum", "scrypta", "tx", "aa", "bb"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Scrypta(ScryptaCommand::Tx { ref hashes }) if hashes.len() == 2
        ));
    }

    #[test]
    fn page_defaults_apply() {
        let cli = Cli::try_parse_from(["tatum", "scrypta", "utxos", "LZ"]).unwrap();
        match cli.command {
            Command::Scrypta(ScryptaCommand::Utxos { page, .. }) => {
                assert_eq!(page.page_size, 50);
                assert_eq!(page.offset, 0);
            }
            _ => panic!("expected utxos subcommand"),
        }
    }
}
