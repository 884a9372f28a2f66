pub mod client;
pub mod error;
pub mod offchain;
pub mod scrypta;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_util;

pub use client::TatumClient;
pub use error::{ApiError, CoreError};
pub use transport::TransportConfig;
pub use types::{Blockchain, TokenAmount, UtxoChain};
