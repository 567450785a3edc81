//! Blockfrost indexing-API client
//!
//! Used only for out-of-band verification: confirming a scraped
//! transaction id actually landed on chain, and cross-checking address
//! balances. Never drives the UI.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::cardano::lovelace_to_ada;

/// One UTxO entry as returned by `/addresses/{address}/utxos`
#[derive(Debug, Clone, Deserialize)]
pub struct Utxo {
    pub tx_hash: String,
    pub output_index: u32,
    pub amount: Vec<UtxoAmount>,
}

/// One asset quantity inside a UTxO
#[derive(Debug, Clone, Deserialize)]
pub struct UtxoAmount {
    pub unit: String,
    pub quantity: String,
}

/// Thin client over the Blockfrost HTTP API
#[derive(Debug, Clone)]
pub struct BlockfrostClient {
    base_url: String,
    project_id: String,
    client: reqwest::Client,
}

impl BlockfrostClient {
    /// Create a client for the given base URL and project key
    pub fn new(base_url: impl Into<String>, project_id: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            client,
        })
    }

    /// Create a client from harness configuration
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        Self::new(&config.blockfrost_url, &config.blockfrost_api_key)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header("project_id", &self.project_id)
    }

    /// Poll until the transaction is visible on chain.
    ///
    /// Outcome semantics, deliberately asymmetric:
    /// - `200` — confirmed, returns `true` immediately.
    /// - `404` — not yet indexed; sleep `interval` and retry.
    /// - any other status — explicit rejection, terminal `false`.
    /// - transport error — transient; sleep and retry.
    ///
    /// Exhausting `max_attempts` yields `false`, never an error, so
    /// callers must check the return value.
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: &str,
        max_attempts: usize,
        interval: Duration,
    ) -> bool {
        let path = format!("/txs/{tx_hash}");

        for attempt in 1..=max_attempts {
            match self.get(&path).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!("transaction confirmed: {tx_hash}");
                    return true;
                }
                Ok(resp) if resp.status() == StatusCode::NOT_FOUND => {
                    debug!("awaiting confirmation ({attempt}/{max_attempts}): {tx_hash}");
                }
                Ok(resp) => {
                    warn!(
                        "confirmation check rejected with {} for {tx_hash}",
                        resp.status()
                    );
                    return false;
                }
                Err(e) => {
                    warn!("confirmation check transport error (will retry): {e}");
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(interval).await;
            }
        }

        warn!("transaction not confirmed after {max_attempts} attempts: {tx_hash}");
        false
    }

    /// Fetch the UTxO set for an address
    pub async fn address_utxos(&self, address: &str) -> Result<Vec<Utxo>> {
        let path = format!("/addresses/{address}/utxos");
        let resp = self.get(&path).send().await?;

        // A never-used address indexes as 404; treat it as empty.
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !resp.status().is_success() {
            return Err(Error::BlockfrostStatus {
                status: resp.status().as_u16(),
                url: path,
            });
        }

        Ok(resp.json().await?)
    }

    /// Sum the lovelace across an address's UTxOs, in ADA
    pub async fn address_balance(&self, address: &str) -> Result<f64> {
        let utxos = self.address_utxos(address).await?;
        let lovelace: u64 = utxos
            .iter()
            .flat_map(|u| &u.amount)
            .filter(|a| a.unit == "lovelace")
            .filter_map(|a| a.quantity.parse::<u64>().ok())
            .sum();
        Ok(lovelace_to_ada(lovelace))
    }
}

/// Ask the testnet faucet to fund an address. Boolean outcome: the
/// faucet is rate-limited and flaky, and specs only ever warn on `false`.
pub async fn request_faucet_funds(faucet_url: &str, address: &str) -> bool {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!("faucet client build failed: {e}");
            return false;
        }
    };

    match client
        .post(faucet_url)
        .json(&serde_json::json!({ "address": address }))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            debug!("faucet funds requested for {address}");
            true
        }
        Ok(resp) => {
            warn!("faucet request failed: {}", resp.status());
            false
        }
        Err(e) => {
            warn!("faucet request error: {e}");
            false
        }
    }
}
