//! Harness configuration
//!
//! All process-environment reads happen here, once. The resulting
//! [`HarnessConfig`] is immutable and handed down through fixture
//! composition; no other module touches `std::env` for configuration.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Target Cardano network for the wallet under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    Mainnet,
    #[default]
    Preprod,
    Preview,
}

impl Network {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "mainnet" => Some(Network::Mainnet),
            "preprod" => Some(Network::Preprod),
            "preview" => Some(Network::Preview),
            _ => None,
        }
    }

    /// Display label as it appears in the extension's network chooser
    pub fn label(&self) -> &'static str {
        match self {
            Network::Mainnet => "Cardano Mainnet",
            Network::Preprod => "Preprod",
            Network::Preview => "Preview",
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::Mainnet)
    }
}

/// Immutable harness configuration assembled from the environment
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Filesystem path of the built extension bundle
    pub extension_path: PathBuf,

    /// Network the wallet should be pointed at during onboarding
    pub network: Network,

    /// Blockfrost base URL for out-of-band confirmation
    pub blockfrost_url: String,

    /// Blockfrost project key, sent as the `project_id` header
    pub blockfrost_api_key: String,

    /// Testnet faucet endpoint
    pub faucet_url: String,

    /// Public page used to probe the injected dApp connector
    pub dapp_url: String,

    /// Spending password shared by all test wallets
    pub wallet_password: String,

    /// Primary (funded) test wallet mnemonic, if configured
    pub wallet_1_mnemonic: Option<String>,

    /// Display name of the primary test wallet
    pub wallet_1_name: String,

    /// Secondary test wallet mnemonic, if configured
    pub wallet_2_mnemonic: Option<String>,

    /// Display name of the secondary test wallet
    pub wallet_2_name: String,

    /// Directory for failure screenshots and reports
    pub artifacts_dir: PathBuf,
}

impl HarnessConfig {
    /// Build the configuration from the process environment.
    ///
    /// Required variables are `EXTENSION_PATH` and `BLOCKFROST_API_KEY`;
    /// a missing one is a setup failure that aborts before any UI step.
    /// Everything else has a preprod-flavored default.
    pub fn from_env() -> Result<Self> {
        let extension_path = PathBuf::from(require_var("EXTENSION_PATH")?);
        let blockfrost_api_key = require_var("BLOCKFROST_API_KEY")?;

        let network = match env::var("CARDANO_NETWORK") {
            Ok(raw) => Network::parse(&raw).ok_or(Error::InvalidEnv {
                var: "CARDANO_NETWORK",
                value: raw,
            })?,
            Err(_) => Network::default(),
        };

        let config = Self {
            extension_path,
            network,
            blockfrost_url: var_or(
                "BLOCKFROST_URL",
                "https://cardano-preprod.blockfrost.io/api/v0",
            ),
            blockfrost_api_key,
            faucet_url: var_or(
                "FAUCET_URL",
                "https://faucet.preprod.world.dev.cardano.org/send-money",
            ),
            dapp_url: var_or("DAPP_URL", "https://example.com"),
            wallet_password: var_or("TEST_WALLET_PASSWORD", "TestPassword123!"),
            wallet_1_mnemonic: nonempty_var("TEST_WALLET_1_MNEMONIC"),
            wallet_1_name: var_or("TEST_WALLET_1_NAME", "Test Wallet 1"),
            wallet_2_mnemonic: nonempty_var("TEST_WALLET_2_MNEMONIC"),
            wallet_2_name: var_or("TEST_WALLET_2_NAME", "Test Wallet 2"),
            artifacts_dir: PathBuf::from(var_or("GERO_ARTIFACTS_DIR", "test-results")),
        };

        config.verify_extension_bundle()?;
        Ok(config)
    }

    /// Minimal configuration for diagnostic tools that only need a
    /// browser with the extension loaded — no indexing API, no wallet
    /// credentials.
    pub fn for_extension(extension_path: PathBuf) -> Result<Self> {
        let config = Self {
            extension_path,
            network: Network::default(),
            blockfrost_url: String::new(),
            blockfrost_api_key: String::new(),
            faucet_url: String::new(),
            dapp_url: String::new(),
            wallet_password: String::new(),
            wallet_1_mnemonic: None,
            wallet_1_name: String::new(),
            wallet_2_mnemonic: None,
            wallet_2_name: String::new(),
            artifacts_dir: PathBuf::from("test-results"),
        };
        config.verify_extension_bundle()?;
        Ok(config)
    }

    /// Check the extension bundle looks like a built extension before
    /// launching anything.
    fn verify_extension_bundle(&self) -> Result<()> {
        if !self.extension_path.is_dir() {
            return Err(Error::ExtensionNotFound(
                self.extension_path.display().to_string(),
            ));
        }
        if !self.extension_path.join("manifest.json").is_file() {
            return Err(Error::ManifestMissing(
                self.extension_path.display().to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the primary funded wallet is configured. Funded-wallet
    /// suites skip (explicitly) when this is false.
    pub fn has_funded_wallet(&self) -> bool {
        self.wallet_1_mnemonic.is_some()
    }

    /// Directory where session profile directories are created
    pub fn profiles_dir(&self) -> PathBuf {
        env::temp_dir().join("gero-e2e-profiles")
    }
}

fn require_var(name: &'static str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingEnv(name)),
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn nonempty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_parse_accepts_known_labels() {
        assert_eq!(Network::parse("preprod"), Some(Network::Preprod));
        assert_eq!(Network::parse("Mainnet"), Some(Network::Mainnet));
        assert_eq!(Network::parse("PREVIEW"), Some(Network::Preview));
        assert_eq!(Network::parse("devnet"), None);
    }

    #[test]
    fn network_labels_match_ui_copy() {
        assert_eq!(Network::Mainnet.label(), "Cardano Mainnet");
        assert_eq!(Network::Preprod.label(), "Preprod");
        assert!(!Network::Preprod.is_mainnet());
    }
}
