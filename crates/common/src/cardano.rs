//! Cardano textual helpers
//!
//! Shape checks and unit conversions for values scraped from the wallet UI.
//! Nothing here is cryptographic: addresses, hashes, and pool ids are
//! treated as opaque strings with a known textual shape.

use bip39::Mnemonic;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lovelace per ADA
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

static MAINNET_ADDR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^addr1[a-z0-9]{98}$").expect("static regex"));
static TESTNET_ADDR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^addr_test1[a-z0-9]{98}$").expect("static regex"));
static MAINNET_STAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^stake1[a-z0-9]{53}$").expect("static regex"));
static TESTNET_STAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^stake_test1[a-z0-9]{53}$").expect("static regex"));
static TX_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-fA-F0-9]{64}$").expect("static regex"));
static POOL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pool1[a-z0-9]{51}$").expect("static regex"));
static AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*\.?\d*").expect("static regex"));

/// Payment address shape check: mainnet `addr1...` or testnet `addr_test1...`
pub fn is_valid_cardano_address(address: &str) -> bool {
    MAINNET_ADDR.is_match(address) || TESTNET_ADDR.is_match(address)
}

/// Stake address shape check: `stake1...` or `stake_test1...`
pub fn is_valid_stake_address(address: &str) -> bool {
    MAINNET_STAKE.is_match(address) || TESTNET_STAKE.is_match(address)
}

/// Transaction hash shape check: 64 hex characters, case-insensitive
pub fn is_valid_tx_hash(hash: &str) -> bool {
    TX_HASH.is_match(hash)
}

/// Pool id shape check: `pool1` followed by 51 bech32 characters
pub fn is_valid_pool_id(pool_id: &str) -> bool {
    POOL_ID.is_match(pool_id)
}

/// Convert lovelace to ADA
pub fn lovelace_to_ada(lovelace: u64) -> f64 {
    lovelace as f64 / LOVELACE_PER_ADA as f64
}

/// Convert ADA to lovelace, truncating sub-lovelace fractions
pub fn ada_to_lovelace(ada: f64) -> u64 {
    (ada * LOVELACE_PER_ADA as f64).floor() as u64
}

/// Format an ADA amount for display
pub fn format_ada(ada: f64, decimals: usize) -> String {
    format!("{ada:.decimals$}")
}

/// Generate a fresh 24-word mnemonic (256-bit strength).
///
/// The phrase is test input only; the extension under test does its own
/// validation and derivation.
pub fn generate_mnemonic() -> String {
    Mnemonic::generate(24)
        .expect("24 is a supported word count")
        .to_string()
}

/// Extract the first decimal run from rendered balance text.
///
/// Thousands separators are stripped; text with no numeric run yields
/// `0.0` rather than an error, matching how an empty or still-syncing
/// balance widget renders.
pub fn parse_ada_amount(text: &str) -> f64 {
    AMOUNT
        .find(text)
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .unwrap_or(0.0)
}
