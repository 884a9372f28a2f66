mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use serde::Serialize;

use tatum_core::scrypta::Page;
use tatum_core::{TatumClient, TransportConfig};

use cli::{Cli, Command, OffchainCommand, ScryptaCommand};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let config = TransportConfig {
        base_url: args.api_url.clone(),
        api_key: args.api_key.clone(),
        request_timeout: Duration::from_secs(args.timeout_secs),
        requests_per_second: args.rps,
        ..TransportConfig::default()
    };
    let client = TatumClient::from_config(config).context("configure Tatum client")?;

    let result = run(&client, args.command).await;
    tracing::info!(credits = client.credits_used(), "API credits used");
    result
}

async fn run(client: &TatumClient, command: Command) -> eyre::Result<()> {
    match command {
        Command::Wallet { chain, mnemonic } => {
            let wallet = client
                .generate_wallet(chain, mnemonic.as_deref())
                .await
                .wrap_err_with(|| format!("generate {chain} wallet"))?;
            print_json(&wallet)
        }
        Command::PrivateKey {
            chain,
            mnemonic,
            index,
        } => {
            let key = client
                .generate_private_key(chain, &mnemonic, index)
                .await
                .wrap_err_with(|| format!("derive {chain} private key {index}"))?;
            print_json(&key)
        }
        Command::Address { chain, xpub, index } => {
            let address = client
                .generate_deposit_address(chain, &xpub, index)
                .await
                .wrap_err_with(|| format!("derive {chain} address {index}"))?;
            print_json(&address)
        }
        Command::Scrypta(command) => run_scrypta(client, command).await,
        Command::Offchain(command) => run_offchain(client, command).await,
    }
}

async fn run_scrypta(client: &TatumClient, command: ScryptaCommand) -> eyre::Result<()> {
    let scrypta = client.scrypta();
    match command {
        ScryptaCommand::Info => {
            print_json(&scrypta.get_blockchain_information().await.context("scrypta info")?)
        }
        ScryptaCommand::BlockHash { height } => {
            let hash = scrypta
                .get_block_hash(height)
                .await
                .wrap_err_with(|| format!("hash of block {height}"))?;
            print_json(&hash)
        }
        ScryptaCommand::Block { hash_or_height } => {
            let block = scrypta
                .get_block(&hash_or_height)
                .await
                .wrap_err_with(|| format!("block {hash_or_height}"))?;
            print_json(&block)
        }
        ScryptaCommand::Tx { hashes } => {
            let refs: Vec<&str> = hashes.iter().map(String::as_str).collect();
            let txs = scrypta
                .get_transactions_by_hashes(&refs)
                .await
                .context("fetch transactions")?;
            match txs.as_slice() {
                [single] => print_json(single),
                _ => print_json(&txs),
            }
        }
        ScryptaCommand::AddressTxs { address, page } => {
            let page = Page {
                page_size: page.page_size,
                offset: page.offset,
            };
            let txs = scrypta
                .get_transactions_by_address(&address, page)
                .await
                .wrap_err_with(|| format!("transactions of {address}"))?;
            print_json(&txs)
        }
        ScryptaCommand::Utxos { address, page } => {
            let page = Page {
                page_size: page.page_size,
                offset: page.offset,
            };
            let utxos = scrypta
                .get_spendable_utxo(&address, page)
                .await
                .wrap_err_with(|| format!("spendable outputs of {address}"))?;
            print_json(&utxos)
        }
        ScryptaCommand::Utxo { txhash, index } => {
            let utxo = scrypta
                .get_transaction_utxo(&txhash, index)
                .await
                .wrap_err_with(|| format!("output {txhash}:{index}"))?;
            print_json(&utxo)
        }
        ScryptaCommand::Broadcast {
            tx_data,
            signature_id,
        } => {
            let response = scrypta
                .broadcast(&tx_data, signature_id.as_deref())
                .await
                .context("broadcast scrypta transaction")?;
            print_json(&response)
        }
    }
}

async fn run_offchain(client: &TatumClient, command: OffchainCommand) -> eyre::Result<()> {
    let offchain = client.offchain();
    match command {
        OffchainCommand::SetErc20Address { symbol, address } => offchain
            .set_erc20_token_contract_address(&address, &symbol)
            .await
            .wrap_err_with(|| format!("bind {symbol} to {address}"))?,
        OffchainCommand::CreateXlmAsset {
            issuer,
            token,
            base_pair,
        } => offchain
            .create_xlm_asset(&issuer, &token, &base_pair)
            .await
            .wrap_err_with(|| format!("create XLM asset {token}"))?,
        OffchainCommand::CreateXrpAsset {
            issuer,
            token,
            base_pair,
        } => offchain
            .create_xrp_asset(&issuer, &token, &base_pair)
            .await
            .wrap_err_with(|| format!("create XRP asset {token}"))?,
        OffchainCommand::CreateBnbAsset { token, base_pair } => offchain
            .create_bnb_asset(&token, &base_pair)
            .await
            .wrap_err_with(|| format!("create BNB asset {token}"))?,
    }
    print_json(&serde_json::json!({ "success": true }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize response")?;
    println!("{text}");
    Ok(())
}
