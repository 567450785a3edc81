//! GeroWallet E2E Common Library
//!
//! Shared infrastructure for the harness: environment-driven configuration,
//! Cardano textual helpers, static test data, and the Blockfrost client used
//! for out-of-band transaction confirmation.

pub mod blockfrost;
pub mod cardano;
pub mod config;
pub mod error;
pub mod testdata;

pub use blockfrost::BlockfrostClient;
pub use cardano::{
    ada_to_lovelace, format_ada, generate_mnemonic, is_valid_cardano_address, is_valid_pool_id,
    is_valid_stake_address, is_valid_tx_hash, lovelace_to_ada, parse_ada_amount,
};
pub use config::{HarnessConfig, Network};
pub use error::{Error, Result};

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
