//! Wallet onboarding flow driver
//!
//! Walks the onboarding state machine by UI polling:
//! `welcome → network chooser → create/restore branch → details form →
//! (optional consent) → submitting → dashboard`. Required steps are
//! polled to a bounded timeout; optional steps (network chooser, consent
//! checkboxes, confirmation field) are probed and skipped when absent.

use std::time::Duration;

use tracing::{debug, info};

use gero_common::config::Network;
use gero_common::testdata::{timeouts, WalletDescriptor};

use crate::dom::{self, DomSurface};
use crate::error::{DriverError, DriverResult};
use crate::roles;

/// Upper bound on carousel advancement before giving up on a finish
/// control ever appearing
const CAROUSEL_MAX_PAGES: usize = 12;

/// Settle delay after actions that trigger a client-side route change
const SETTLE: Duration = Duration::from_secs(1);

/// Probe window for the address display before falling back to "Receive"
const ADDRESS_PROBE: Duration = Duration::from_secs(5);

/// Drives wallet creation, restore, login, and address lookup
pub struct WalletDriver<S> {
    surface: S,
    network: Network,
}

impl<S: DomSurface> WalletDriver<S> {
    pub fn new(surface: S, network: Network) -> Self {
        Self { surface, network }
    }

    /// The DOM surface, for specs that drive partial flows directly
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Create a wallet and land on the dashboard.
    ///
    /// The dashboard wait is long: the extension derives keys after
    /// submit and routinely takes tens of seconds.
    pub async fn create_wallet(&self, wallet: &WalletDescriptor) -> DriverResult<()> {
        info!("creating wallet: {}", wallet.name);

        self.begin_onboarding().await?;
        dom::click_role(&self.surface, &roles::create_branch(), timeouts::UI_STEP).await?;

        self.fill_phrase_if_asked(&wallet.mnemonic).await?;
        self.fill_name_and_passwords(&wallet.name, &wallet.password, &wallet.password)
            .await?;
        self.accept_consents().await?;
        self.submit().await?;

        dom::wait_for(&self.surface, &roles::dashboard(), timeouts::WALLET_CREATION).await?;
        self.dismiss_onboarding_carousel().await?;

        info!("wallet created: {}", wallet.name);
        Ok(())
    }

    /// Restore a wallet from its mnemonic and land on the dashboard.
    ///
    /// The phrase length selector (12/15/24) is derived from the word
    /// count; each word goes through the autocomplete input targeting
    /// the first still-empty slot.
    pub async fn restore_wallet(&self, wallet: &WalletDescriptor) -> DriverResult<()> {
        info!("restoring wallet: {}", wallet.name);

        self.begin_onboarding().await?;
        dom::click_role(&self.surface, &roles::restore_branch(), timeouts::UI_STEP).await?;
        self.fill_phrase_words(&wallet.mnemonic).await?;
        self.fill_name_and_passwords(&wallet.name, &wallet.password, &wallet.password)
            .await?;
        self.accept_consents().await?;
        self.submit().await?;

        // The terminal marker differs between create and restore builds
        // (Dashboard vs Portfolio copy); the role unions both.
        dom::wait_for(&self.surface, &roles::dashboard(), timeouts::WALLET_RESTORE).await?;
        self.dismiss_onboarding_carousel().await?;

        info!("wallet restored: {}", wallet.name);
        Ok(())
    }

    /// Unlock an existing wallet
    pub async fn login_wallet(&self, password: &str) -> DriverResult<()> {
        info!("logging into wallet");

        dom::wait_for(&self.surface, &roles::login_screen(), timeouts::UI_STEP).await?;
        dom::fill_role(
            &self.surface,
            &roles::password_inputs(),
            password,
            timeouts::UI_STEP,
        )
        .await?;
        dom::click_role(&self.surface, &roles::login_button(), timeouts::UI_STEP).await?;
        dom::wait_for(&self.surface, &roles::dashboard(), timeouts::WALLET_LOGIN).await?;

        info!("login successful");
        Ok(())
    }

    /// Best-effort lock: tries dedicated lock controls, then the
    /// settings menu. Reports whether a login screen resulted; callers
    /// with access to the session can fall back to the welcome route.
    pub async fn lock_wallet(&self) -> DriverResult<bool> {
        if dom::click_if_visible(
            &self.surface,
            &roles::lock_control(),
            timeouts::OPTIONAL_PROBE,
        )
        .await?
        {
            tokio::time::sleep(SETTLE).await;
            return self.is_login_screen().await;
        }

        if dom::click_if_visible(
            &self.surface,
            &roles::settings_button(),
            timeouts::OPTIONAL_PROBE,
        )
        .await?
            && dom::click_if_visible(
                &self.surface,
                &roles::settings_lock_option(),
                timeouts::OPTIONAL_PROBE,
            )
            .await?
        {
            tokio::time::sleep(SETTLE).await;
            return self.is_login_screen().await;
        }

        debug!("no lock control found");
        Ok(false)
    }

    /// Whether a password prompt is currently visible
    pub async fn is_login_screen(&self) -> DriverResult<bool> {
        dom::appears(
            &self.surface,
            &roles::login_screen(),
            timeouts::OPTIONAL_PROBE,
        )
        .await
    }

    /// Read the wallet's receive address, opening the receive view if
    /// the address is not already on screen.
    pub async fn get_wallet_address(&self) -> DriverResult<String> {
        if dom::appears(&self.surface, &roles::address_display(), ADDRESS_PROBE).await? {
            return dom::text_of(&self.surface, &roles::address_display(), ADDRESS_PROBE).await;
        }

        if dom::click_if_visible(
            &self.surface,
            &roles::receive_button(),
            timeouts::OPTIONAL_PROBE,
        )
        .await?
        {
            tokio::time::sleep(SETTLE).await;
            if dom::appears(&self.surface, &roles::address_display(), ADDRESS_PROBE).await? {
                return dom::text_of(&self.surface, &roles::address_display(), ADDRESS_PROBE)
                    .await;
            }
        }

        Err(DriverError::NotFound(
            "wallet address display".to_string(),
        ))
    }

    // ---- flow steps, exposed for specs that drive partial flows ----

    /// Welcome screen, best-effort network selection, and the
    /// create/import entry point
    pub async fn begin_onboarding(&self) -> DriverResult<()> {
        dom::wait_for(&self.surface, &roles::welcome_screen(), timeouts::UI_STEP).await?;
        self.select_network_if_offered().await?;
        dom::click_if_visible(
            &self.surface,
            &roles::onboarding_entry(),
            timeouts::OPTIONAL_PROBE,
        )
        .await?;
        Ok(())
    }

    /// Choose the restore branch (for specs that stop mid-flow)
    pub async fn choose_restore(&self) -> DriverResult<()> {
        dom::click_role(&self.surface, &roles::restore_branch(), timeouts::UI_STEP).await
    }

    /// Select the target network if the chooser is present. Absence is
    /// tolerated: the chooser only exists on first-run builds.
    pub async fn select_network_if_offered(&self) -> DriverResult<()> {
        if dom::click_if_visible(
            &self.surface,
            &roles::network_chooser(),
            timeouts::OPTIONAL_PROBE,
        )
        .await?
        {
            let picked = dom::click_if_visible(
                &self.surface,
                &roles::network_option(self.network),
                timeouts::OPTIONAL_PROBE,
            )
            .await?;
            if picked {
                debug!("selected network {}", self.network.label());
                tokio::time::sleep(SETTLE).await;
            } else {
                debug!(
                    "network chooser opened but {} not offered",
                    self.network.label()
                );
            }
        }
        Ok(())
    }

    /// Fill the whole phrase through the per-word autocomplete inputs,
    /// after picking the matching length selector.
    pub async fn fill_phrase_words(&self, mnemonic: &str) -> DriverResult<()> {
        let words: Vec<&str> = mnemonic.split_whitespace().collect();

        let picked = dom::click_if_visible(
            &self.surface,
            &roles::phrase_length_option(words.len()),
            timeouts::OPTIONAL_PROBE,
        )
        .await?;
        if !picked {
            debug!(
                "phrase length selector absent; assuming the form accepts {} words",
                words.len()
            );
        }

        let query =
            dom::wait_for(&self.surface, &roles::mnemonic_word_input(), timeouts::UI_STEP)
                .await?;
        for (i, word) in words.iter().enumerate() {
            self.fill_next_word(&query, word, i, words.len()).await?;
        }
        Ok(())
    }

    async fn fill_next_word(
        &self,
        query: &crate::dom::Query,
        word: &str,
        index: usize,
        total: usize,
    ) -> DriverResult<()> {
        let deadline = tokio::time::Instant::now() + timeouts::UI_STEP;
        loop {
            if self.surface.fill_first_empty(query, word).await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(DriverError::timeout(
                    format!("empty mnemonic input (word {} of {total})", index + 1),
                    timeouts::UI_STEP,
                ));
            }
            tokio::time::sleep(dom::POLL_INTERVAL).await;
        }
    }

    /// Fill the phrase textarea when the form shows one; create-branch
    /// builds that generate their own phrase simply do not render it.
    pub async fn fill_phrase_if_asked(&self, mnemonic: &str) -> DriverResult<()> {
        match dom::fill_role(
            &self.surface,
            &roles::mnemonic_textarea(),
            mnemonic,
            timeouts::OPTIONAL_PROBE,
        )
        .await
        {
            Ok(()) => Ok(()),
            Err(DriverError::Timeout { .. }) => {
                debug!("no phrase input on this form");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Fill display name, password, and the confirmation field. A build
    /// without a confirmation field is tolerated.
    pub async fn fill_name_and_passwords(
        &self,
        name: &str,
        password: &str,
        confirmation: &str,
    ) -> DriverResult<()> {
        dom::fill_role(
            &self.surface,
            &roles::wallet_name_input(),
            name,
            timeouts::UI_STEP,
        )
        .await?;
        dom::fill_role_nth(
            &self.surface,
            &roles::password_inputs(),
            0,
            password,
            timeouts::UI_STEP,
        )
        .await?;
        match dom::fill_role_nth(
            &self.surface,
            &roles::password_inputs(),
            1,
            confirmation,
            timeouts::OPTIONAL_PROBE,
        )
        .await
        {
            Ok(()) => Ok(()),
            Err(DriverError::Timeout { .. }) => {
                debug!("no password confirmation field");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Check every consent checkbox the form shows; none is fine
    pub async fn accept_consents(&self) -> DriverResult<()> {
        if dom::appears(
            &self.surface,
            &roles::consent_checkboxes(),
            timeouts::OPTIONAL_PROBE,
        )
        .await?
        {
            if let Some(query) =
                dom::resolve(&self.surface, &roles::consent_checkboxes()).await?
            {
                let toggled = self.surface.set_checked_all(&query, true).await?;
                debug!("checked {toggled} consent checkbox(es)");
            }
        }
        Ok(())
    }

    /// Submit the details form (last matching button: submit controls
    /// render after navigation buttons with the same caption)
    pub async fn submit(&self) -> DriverResult<()> {
        dom::click_last_role(&self.surface, &roles::submit_button(), timeouts::UI_STEP).await
    }

    /// Whether the submit control is currently disabled
    pub async fn submit_disabled(&self) -> DriverResult<bool> {
        let query =
            dom::wait_for(&self.surface, &roles::submit_button(), timeouts::UI_STEP).await?;
        Ok(self.surface.is_disabled(&query).await?.unwrap_or(false))
    }

    /// Whether a form-level error is visible within the probe window
    pub async fn form_error_visible(&self, probe: Duration) -> DriverResult<bool> {
        dom::appears(&self.surface, &roles::form_error(), probe).await
    }

    /// Dismiss the post-creation onboarding carousel by advancing until
    /// a finish control appears, bounded by [`CAROUSEL_MAX_PAGES`]. No
    /// carousel at all is fine; a carousel that never offers a finish
    /// control is a failure.
    pub async fn dismiss_onboarding_carousel(&self) -> DriverResult<()> {
        if !dom::appears(&self.surface, &roles::carousel(), timeouts::OPTIONAL_PROBE).await? {
            return Ok(());
        }

        for _ in 0..CAROUSEL_MAX_PAGES {
            if dom::click_if_visible(
                &self.surface,
                &roles::carousel_finish(),
                timeouts::OPTIONAL_PROBE,
            )
            .await?
            {
                debug!("onboarding carousel finished");
                return Ok(());
            }
            if !dom::click_if_visible(
                &self.surface,
                &roles::carousel_next(),
                timeouts::OPTIONAL_PROBE,
            )
            .await?
                && !dom::appears(&self.surface, &roles::carousel(), timeouts::OPTIONAL_PROBE)
                    .await?
            {
                // carousel closed on its own
                return Ok(());
            }
        }

        Err(DriverError::timeout(
            "onboarding carousel finish control",
            timeouts::OPTIONAL_PROBE * CAROUSEL_MAX_PAGES as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::{FakeNode, FakeSurface};
    use crate::dom::Query;

    fn driver(surface: FakeSurface) -> WalletDriver<FakeSurface> {
        WalletDriver::new(surface, Network::Preprod)
    }

    fn onboarding_surface() -> FakeSurface {
        let surface = FakeSurface::new();
        surface.present(Query::css(r#"[data-testid="welcome-screen"]"#));
        surface.present(Query::text("button", "Create or Import Seed Phrase"));
        surface.present(Query::text("button", "Create Wallet"));
        surface.present(Query::text("button", "Restore Wallet"));
        surface.present(Query::placeholder("input", "name"));
        surface.insert(
            Query::css(r#"input[type="password"]"#),
            FakeNode {
                count: 2,
                ..Default::default()
            },
        );
        surface.insert(
            Query::css(r#"input[type="checkbox"]"#),
            FakeNode {
                count: 3,
                ..Default::default()
            },
        );
        surface.present(Query::text("button", "Create"));
        surface.present(Query::css(r#"[data-testid="dashboard"]"#));
        surface
    }

    #[tokio::test(start_paused = true)]
    async fn create_wallet_walks_the_state_machine() {
        let surface = onboarding_surface();
        let driver = driver(surface);
        let wallet = WalletDescriptor {
            name: "Unit Wallet".into(),
            mnemonic: "abandon ability able about above absent absorb abstract absurd abuse access accident".into(),
            password: "TestPassword123!".into(),
        };

        driver.create_wallet(&wallet).await.unwrap();

        let actions = driver.surface().actions();
        let entry = actions
            .iter()
            .position(|a| a.contains("Create or Import Seed Phrase"))
            .expect("entry point clicked");
        let branch = actions
            .iter()
            .position(|a| a.contains("Create Wallet"))
            .expect("create branch clicked");
        let name = actions
            .iter()
            .position(|a| a.contains("=Unit Wallet"))
            .expect("name filled");
        let consent = actions
            .iter()
            .position(|a| a.starts_with("set_checked"))
            .expect("consents checked");
        let submit = actions
            .iter()
            .position(|a| a.starts_with("click_last"))
            .expect("form submitted");
        assert!(entry < branch && branch < name && name < consent && consent < submit);
    }

    #[tokio::test(start_paused = true)]
    async fn create_fills_both_password_fields() {
        let surface = onboarding_surface();
        let driver = driver(surface);
        let wallet = WalletDescriptor {
            name: "W".into(),
            mnemonic: "word ".repeat(12).trim().to_string(),
            password: "secret".into(),
        };

        driver.create_wallet(&wallet).await.unwrap();

        let actions = driver.surface().actions();
        assert!(actions.iter().any(|a| a.starts_with("fill[0]:") && a.ends_with("=secret")));
        assert!(actions.iter().any(|a| a.starts_with("fill[1]:") && a.ends_with("=secret")));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_create_branch_times_out() {
        let surface = FakeSurface::new();
        surface.present(Query::css(r#"[data-testid="welcome-screen"]"#));
        let driver = driver(surface);
        let wallet = WalletDescriptor {
            name: "W".into(),
            mnemonic: "word".into(),
            password: "p".into(),
        };

        let err = driver.create_wallet(&wallet).await.unwrap_err();
        assert!(matches!(err, DriverError::Timeout { .. }));
        assert!(err.to_string().contains("create wallet branch"));
    }

    #[tokio::test(start_paused = true)]
    async fn restore_selects_length_and_fills_each_word() {
        let surface = onboarding_surface();
        surface.present(Query::text("button", "15 words"));
        surface.insert(
            Query::css(r#"input[type="text"]"#),
            FakeNode {
                count: 15,
                ..Default::default()
            },
        );
        let driver = driver(surface);
        let wallet = WalletDescriptor {
            name: "Restored".into(),
            mnemonic: gero_common::testdata::known::RESTORE_PHRASE_15.into(),
            password: "TestPassword123!".into(),
        };

        driver.restore_wallet(&wallet).await.unwrap();

        let actions = driver.surface().actions();
        assert!(actions.iter().any(|a| a.contains("15 words")));
        let word_fills = actions
            .iter()
            .filter(|a| a.starts_with("fill_first_empty"))
            .count();
        assert_eq!(word_fills, 15);
        assert!(actions.iter().any(|a| a.ends_with("=manage")));
        assert!(actions.iter().any(|a| a.ends_with("=can")));
    }

    #[tokio::test(start_paused = true)]
    async fn network_chooser_absence_is_tolerated() {
        let surface = onboarding_surface();
        let driver = driver(surface);

        driver.begin_onboarding().await.unwrap();

        let actions = driver.surface().actions();
        assert!(!actions.iter().any(|a| a.contains("Cardano Mainnet")));
    }

    #[tokio::test(start_paused = true)]
    async fn carousel_is_dismissed_via_finish_control() {
        let surface = FakeSurface::new();
        surface.present(Query::css(".v-dialog"));
        surface.present(Query::text("button", "Finish"));
        let driver = driver(surface);

        driver.dismiss_onboarding_carousel().await.unwrap();

        let actions = driver.surface().actions();
        assert!(actions.iter().any(|a| a.contains("Finish")));
    }

    #[tokio::test(start_paused = true)]
    async fn carousel_without_finish_control_is_a_failure() {
        let surface = FakeSurface::new();
        surface.present(Query::css(".v-dialog"));
        surface.present(Query::text("button", "Next"));
        let driver = driver(surface);

        let err = driver.dismiss_onboarding_carousel().await.unwrap_err();
        assert!(matches!(err, DriverError::Timeout { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn absent_carousel_is_fine() {
        let surface = FakeSurface::new();
        let driver = driver(surface);
        driver.dismiss_onboarding_carousel().await.unwrap();
        assert!(driver.surface().actions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn login_waits_for_dashboard() {
        let surface = FakeSurface::new();
        surface.insert(
            Query::css(r#"input[type="password"]"#),
            FakeNode {
                count: 1,
                ..Default::default()
            },
        );
        surface.present(Query::text("button", "Login"));
        surface.insert(
            Query::css(r#"[data-testid="dashboard"]"#),
            FakeNode {
                count: 1,
                appear_after: 3,
                ..Default::default()
            },
        );
        let driver = driver(surface);

        driver.login_wallet("TestPassword123!").await.unwrap();

        let actions = driver.surface().actions();
        assert!(actions.iter().any(|a| a.contains("Login")));
    }

    #[tokio::test(start_paused = true)]
    async fn address_lookup_falls_back_to_receive_view() {
        let surface = FakeSurface::new();
        surface.present(Query::text("button", "Receive"));
        surface.insert(
            Query::css(r#"[data-testid="wallet-address"]"#),
            FakeNode {
                count: 1,
                text: Some("  addr_test1qztest  ".into()),
                // appears only after the receive view opens
                appear_after: 25,
                ..Default::default()
            },
        );
        let driver = driver(surface);

        let address = driver.get_wallet_address().await.unwrap();
        assert_eq!(address, "addr_test1qztest");
        assert!(driver
            .surface()
            .actions()
            .iter()
            .any(|a| a.contains("Receive")));
    }

    #[tokio::test(start_paused = true)]
    async fn address_lookup_reports_not_found() {
        let surface = FakeSurface::new();
        let driver = driver(surface);

        let err = driver.get_wallet_address().await.unwrap_err();
        assert!(matches!(err, DriverError::NotFound(_)));
    }
}
