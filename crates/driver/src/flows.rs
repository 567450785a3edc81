//! Transaction and staking flow driver
//!
//! Modal-dialog flows for value transfer and stake operations, layered
//! on the wallet driver. Each submission is a real state-changing action
//! against the extension (and possibly the network): none of these
//! operations is idempotent, and the harness never retries a submitted
//! transaction — a failure mid-flow surfaces as-is.

use std::ops::Deref;

use tracing::{debug, info};

use gero_common::cardano::parse_ada_amount;
use gero_common::testdata::timeouts;

use crate::dom::{self, DomSurface};
use crate::error::{DriverError, DriverResult};
use crate::roles;
use crate::wallet::WalletDriver;

/// Extends [`WalletDriver`] with Cardano transaction and staking flows
pub struct CardanoDriver<S> {
    wallet: WalletDriver<S>,
}

impl<S> Deref for CardanoDriver<S> {
    type Target = WalletDriver<S>;

    fn deref(&self) -> &Self::Target {
        &self.wallet
    }
}

impl<S: DomSurface> CardanoDriver<S> {
    pub fn new(wallet: WalletDriver<S>) -> Self {
        Self { wallet }
    }

    /// Send ADA and return the scraped transaction id.
    pub async fn send_transaction(
        &self,
        to_address: &str,
        amount_ada: f64,
        password: &str,
    ) -> DriverResult<String> {
        info!("sending {amount_ada} ADA to {}...", &to_address[..to_address.len().min(20)]);

        let surface = self.surface();
        dom::click_role(surface, &roles::send_button(), timeouts::UI_STEP).await?;
        dom::wait_for(surface, &roles::send_form(), timeouts::TRANSACTION_BUILD).await?;

        dom::fill_role(
            surface,
            &roles::recipient_input(),
            to_address,
            timeouts::UI_STEP,
        )
        .await?;
        dom::fill_role(
            surface,
            &roles::amount_input(),
            &format_amount(amount_ada),
            timeouts::UI_STEP,
        )
        .await?;
        dom::click_role(surface, &roles::next_button(), timeouts::UI_STEP).await?;

        dom::wait_for(
            surface,
            &roles::confirm_transaction_screen(),
            timeouts::TRANSACTION_BUILD,
        )
        .await?;
        dom::fill_role(
            surface,
            &roles::password_inputs(),
            password,
            timeouts::UI_STEP,
        )
        .await?;
        dom::click_last_role(surface, &roles::confirm_send_button(), timeouts::UI_STEP).await?;

        dom::wait_for(
            surface,
            &roles::transaction_success(),
            timeouts::TRANSACTION_SUBMIT,
        )
        .await?;
        let tx_hash = self.scrape_tx_hash().await?;

        info!("transaction sent: {tx_hash}");
        Ok(tx_hash)
    }

    /// Read the dashboard balance. Text with no numeric run (an empty or
    /// still-syncing widget) reads as `0.0`, not an error.
    pub async fn check_balance(&self) -> DriverResult<f64> {
        let text = dom::text_of(
            self.surface(),
            &roles::balance_display(),
            timeouts::UI_STEP,
        )
        .await?;
        let balance = parse_ada_amount(&text);
        debug!("wallet balance: {balance} ADA");
        Ok(balance)
    }

    /// Delegate to a stake pool and return the scraped transaction id.
    pub async fn delegate_stake(&self, pool_id: &str, password: &str) -> DriverResult<String> {
        info!("delegating to pool {}...", &pool_id[..pool_id.len().min(20)]);

        let surface = self.surface();
        self.open_staking_page().await?;

        dom::fill_role(
            surface,
            &roles::pool_search_input(),
            pool_id,
            timeouts::UI_STEP,
        )
        .await?;
        dom::click_role(surface, &roles::delegate_button(), timeouts::UI_STEP).await?;

        dom::wait_for(
            surface,
            &roles::confirm_delegation_screen(),
            timeouts::STAKING_OPERATION,
        )
        .await?;
        dom::fill_role(
            surface,
            &roles::password_inputs(),
            password,
            timeouts::UI_STEP,
        )
        .await?;
        dom::click_last_role(surface, &roles::confirm_delegate_button(), timeouts::UI_STEP)
            .await?;

        dom::wait_for(
            surface,
            &roles::delegation_success(),
            timeouts::TRANSACTION_SUBMIT,
        )
        .await?;
        let tx_hash = self.scrape_tx_hash().await?;

        info!("delegation submitted: {tx_hash}");
        Ok(tx_hash)
    }

    /// Withdraw accumulated staking rewards and return the scraped
    /// transaction id.
    pub async fn withdraw_rewards(&self, password: &str) -> DriverResult<String> {
        info!("withdrawing staking rewards");

        let surface = self.surface();
        self.open_staking_page().await?;

        dom::click_role(surface, &roles::withdraw_button(), timeouts::UI_STEP).await?;

        dom::wait_for(
            surface,
            &roles::confirm_withdrawal_screen(),
            timeouts::STAKING_OPERATION,
        )
        .await?;
        dom::fill_role(
            surface,
            &roles::password_inputs(),
            password,
            timeouts::UI_STEP,
        )
        .await?;
        dom::click_last_role(surface, &roles::confirm_withdraw_button(), timeouts::UI_STEP)
            .await?;

        dom::wait_for(
            surface,
            &roles::withdrawal_success(),
            timeouts::TRANSACTION_SUBMIT,
        )
        .await?;
        let tx_hash = self.scrape_tx_hash().await?;

        info!("withdrawal submitted: {tx_hash}");
        Ok(tx_hash)
    }

    /// Navigate to the staking page
    pub async fn open_staking_page(&self) -> DriverResult<()> {
        let surface = self.surface();
        dom::click_role(surface, &roles::staking_button(), timeouts::UI_STEP).await?;
        dom::wait_for(surface, &roles::staking_page(), timeouts::UI_STEP).await?;
        Ok(())
    }

    /// Whether the staking page reports an existing delegation
    pub async fn delegation_active(&self) -> DriverResult<Option<String>> {
        let surface = self.surface();
        if dom::appears(
            surface,
            &roles::delegation_status(),
            timeouts::OPTIONAL_PROBE,
        )
        .await?
        {
            let status =
                dom::text_of(surface, &roles::delegation_status(), timeouts::OPTIONAL_PROBE)
                    .await?;
            return Ok(Some(status));
        }
        Ok(None)
    }

    async fn scrape_tx_hash(&self) -> DriverResult<String> {
        let text = dom::text_of(
            self.surface(),
            &roles::tx_hash_display(),
            timeouts::UI_STEP,
        )
        .await?;
        if text.is_empty() {
            return Err(DriverError::NotFound(
                "transaction id in success message".to_string(),
            ));
        }
        Ok(text)
    }
}

/// Render an amount the way a user would type it: no trailing zeros
/// beyond what the value needs.
fn format_amount(amount_ada: f64) -> String {
    if amount_ada.fract() == 0.0 {
        format!("{amount_ada:.0}")
    } else {
        format!("{amount_ada}")
    }
}
