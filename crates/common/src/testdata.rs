//! Static test data and timeout policy
//!
//! Everything a spec feeds into the flow drivers that is not derived from
//! the live UI: wallet descriptors, transfer amounts, known preprod pools,
//! and the timeout table.

use std::time::Duration;

use crate::config::HarnessConfig;

/// Non-persisted wallet identity used to drive onboarding
#[derive(Debug, Clone)]
pub struct WalletDescriptor {
    pub name: String,
    pub mnemonic: String,
    pub password: String,
}

impl WalletDescriptor {
    /// Primary (funded) test wallet, if its mnemonic is configured
    pub fn primary(config: &HarnessConfig) -> Option<Self> {
        config.wallet_1_mnemonic.as_ref().map(|mnemonic| Self {
            name: config.wallet_1_name.clone(),
            mnemonic: mnemonic.clone(),
            password: config.wallet_password.clone(),
        })
    }

    /// Secondary test wallet for transfer targets, if configured
    pub fn secondary(config: &HarnessConfig) -> Option<Self> {
        config.wallet_2_mnemonic.as_ref().map(|mnemonic| Self {
            name: config.wallet_2_name.clone(),
            mnemonic: mnemonic.clone(),
            password: config.wallet_password.clone(),
        })
    }

    /// Throwaway wallet with a freshly generated 24-word phrase
    pub fn ephemeral(name: &str, config: &HarnessConfig) -> Self {
        Self {
            name: name.to_string(),
            mnemonic: crate::cardano::generate_mnemonic(),
            password: config.wallet_password.clone(),
        }
    }

    /// Word count of the mnemonic phrase (12, 15, or 24 in practice)
    pub fn word_count(&self) -> usize {
        self.mnemonic.split_whitespace().count()
    }
}

/// Transfer amounts in ADA
pub mod amounts {
    /// Minimum useful transfer: 1 ADA plus fee headroom
    pub const MIN_TRANSFER: f64 = 1.5;
    pub const SMALL_TRANSFER: f64 = 5.0;
    pub const MEDIUM_TRANSFER: f64 = 10.0;
    /// Delegation needs the 2 ADA deposit plus fees
    pub const MIN_STAKING_BALANCE: f64 = 5.0;
}

/// Known preprod addresses and pools safe to send test funds to
pub mod known {
    /// Faucet return address on preprod
    pub const RECIPIENT: &str = "addr_test1qz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3jcu5d8ps7zex2k2xt3uqxgjqnnj83ws8lhrn648jjxtwq2ytjqp";

    /// 15-word restore phrase exercised by the restore spec
    pub const RESTORE_PHRASE_15: &str =
        "manage metal also spy ignore sick trip frequent simple blade bright stool pencil neither can";

    /// Preprod pool used by delegation specs. Override with a live pool
    /// id when the placeholder retires.
    pub const POOL_1: &str =
        "pool1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq";
}

/// Timeout table.
///
/// Dashboard waits are long because key derivation happens inside the
/// extension after submit and routinely takes tens of seconds.
pub mod timeouts {
    use std::time::Duration;

    pub const EXTENSION_LOAD: Duration = Duration::from_secs(30);
    pub const WALLET_CREATION: Duration = Duration::from_secs(30);
    pub const WALLET_RESTORE: Duration = Duration::from_secs(60);
    pub const WALLET_LOGIN: Duration = Duration::from_secs(30);
    pub const TRANSACTION_BUILD: Duration = Duration::from_secs(15);
    pub const TRANSACTION_SUBMIT: Duration = Duration::from_secs(30);
    /// Blockchain confirmation is minutes, not seconds
    pub const TRANSACTION_CONFIRMATION: Duration = Duration::from_secs(300);
    pub const BALANCE_UPDATE: Duration = Duration::from_secs(60);
    pub const STAKING_OPERATION: Duration = Duration::from_secs(30);
    pub const DAPP_CONNECTION: Duration = Duration::from_secs(15);

    /// Short bound used when probing optional UI that may simply not exist
    pub const OPTIONAL_PROBE: Duration = Duration::from_secs(2);
    /// Default bound for ordinary element waits
    pub const UI_STEP: Duration = Duration::from_secs(10);
}

/// Confirmation polling policy against Blockfrost
pub const CONFIRMATION_ATTEMPTS: usize = 30;
pub const CONFIRMATION_INTERVAL: Duration = Duration::from_secs(10);

/// Error copy the wallet renders that specs assert on
pub mod expected_errors {
    pub const INVALID_PASSWORD: &str = "Invalid password";
    pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds";
    pub const INVALID_ADDRESS: &str = "Invalid address";
}
