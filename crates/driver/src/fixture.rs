//! Fixture composition
//!
//! Capabilities layer in dependency order: session → extension identity →
//! pages → domain operations. Each fixture owns the layer below it and
//! exposes only the operations it adds, so a spec asks for exactly the
//! capability set it needs.
//!
//! Fixtures serialize on a process-wide lock: two simultaneous sessions
//! would race on wallet and profile state, so concurrency is structurally
//! disallowed rather than locked around.

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::Page;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use gero_common::config::HarnessConfig;
use gero_common::testdata::WalletDescriptor;

use crate::artifacts::ArtifactSink;
use crate::console;
use crate::dom::PageSurface;
use crate::error::DriverResult;
use crate::flows::CardanoDriver;
use crate::session::ExtensionSession;
use crate::wallet::WalletDriver;

static SUITE_LOCK: Lazy<Arc<Mutex<()>>> = Lazy::new(|| Arc::new(Mutex::new(())));

/// Base layer: a live browser session with the extension resolved
pub struct ExtensionFixture {
    config: HarnessConfig,
    session: ExtensionSession,
    artifacts: ArtifactSink,
    _serial: OwnedMutexGuard<()>,
}

impl ExtensionFixture {
    /// Acquire the suite lock, then launch a fresh session
    pub async fn acquire(config: HarnessConfig) -> DriverResult<Self> {
        let serial = SUITE_LOCK.clone().lock_owned().await;
        let artifacts = ArtifactSink::new(&config)?;
        let session = ExtensionSession::launch(&config).await?;
        Ok(Self {
            config,
            session,
            artifacts,
            _serial: serial,
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn session(&self) -> &ExtensionSession {
        &self.session
    }

    pub fn artifacts(&self) -> &ArtifactSink {
        &self.artifacts
    }

    pub fn extension_id(&self) -> &str {
        self.session.extension_id()
    }

    pub fn url_for(&self, relative: &str) -> String {
        self.session.url_for(relative)
    }

    /// Tear down the session; the suite lock releases afterwards
    pub async fn close(self) -> DriverResult<()> {
        self.session.close().await
    }
}

/// Wallet layer: the options page plus onboarding/login operations
pub struct WalletFixture {
    ext: ExtensionFixture,
    page: Page,
    driver: WalletDriver<PageSurface>,
}

impl Deref for WalletFixture {
    type Target = ExtensionFixture;

    fn deref(&self) -> &Self::Target {
        &self.ext
    }
}

impl WalletFixture {
    /// Build on a fresh extension fixture: open the options page and
    /// attach console capture.
    pub async fn acquire(config: HarnessConfig) -> DriverResult<Self> {
        let ext = ExtensionFixture::acquire(config).await?;
        let page = ext.session().open_options_page().await?;
        console::attach(&page).await?;
        let network = ext.config().network;
        let driver = WalletDriver::new(PageSurface::new(page.clone()), network);
        Ok(Self { ext, page, driver })
    }

    /// The options page (main wallet interface)
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The underlying flow driver, for specs driving partial flows
    pub fn driver(&self) -> &WalletDriver<PageSurface> {
        &self.driver
    }

    pub async fn create_wallet(&self, wallet: &WalletDescriptor) -> DriverResult<()> {
        self.driver.create_wallet(wallet).await
    }

    pub async fn restore_wallet(&self, wallet: &WalletDescriptor) -> DriverResult<()> {
        self.driver.restore_wallet(wallet).await
    }

    pub async fn login_wallet(&self, password: &str) -> DriverResult<()> {
        self.driver.login_wallet(password).await
    }

    pub async fn get_wallet_address(&self) -> DriverResult<String> {
        self.driver.get_wallet_address().await
    }

    /// Lock via UI controls, falling back to the welcome route when the
    /// build exposes no lock control at all.
    pub async fn lock_wallet(&self) -> DriverResult<bool> {
        if self.driver.lock_wallet().await? {
            return Ok(true);
        }
        debug!("falling back to welcome route navigation");
        self.ext
            .session()
            .navigate(&self.page, "index.html#/welcome")
            .await?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        self.driver.is_login_screen().await
    }

    /// Screenshot the options page on failure (best-effort)
    pub async fn capture_failure(&self, name: &str) {
        self.ext.artifacts().capture_failure(&self.page, name).await;
    }

    pub async fn close(self) -> DriverResult<()> {
        self.ext.close().await
    }
}

/// Cardano layer: transaction and staking operations
pub struct CardanoFixture {
    wallet: WalletFixture,
    driver: CardanoDriver<PageSurface>,
}

impl Deref for CardanoFixture {
    type Target = WalletFixture;

    fn deref(&self) -> &Self::Target {
        &self.wallet
    }
}

impl CardanoFixture {
    pub async fn acquire(config: HarnessConfig) -> DriverResult<Self> {
        let wallet = WalletFixture::acquire(config).await?;
        let network = wallet.config().network;
        let surface = PageSurface::new(wallet.page().clone());
        let driver = CardanoDriver::new(WalletDriver::new(surface, network));
        Ok(Self { wallet, driver })
    }

    /// The underlying Cardano flow driver
    pub fn cardano(&self) -> &CardanoDriver<PageSurface> {
        &self.driver
    }

    pub async fn send_transaction(
        &self,
        to_address: &str,
        amount_ada: f64,
        password: &str,
    ) -> DriverResult<String> {
        self.driver
            .send_transaction(to_address, amount_ada, password)
            .await
    }

    pub async fn check_balance(&self) -> DriverResult<f64> {
        self.driver.check_balance().await
    }

    pub async fn delegate_stake(&self, pool_id: &str, password: &str) -> DriverResult<String> {
        self.driver.delegate_stake(pool_id, password).await
    }

    pub async fn withdraw_rewards(&self, password: &str) -> DriverResult<String> {
        self.driver.withdraw_rewards(password).await
    }

    pub async fn close(self) -> DriverResult<()> {
        self.wallet.close().await
    }
}
