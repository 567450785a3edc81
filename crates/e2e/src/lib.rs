//! Spec support for the GeroWallet E2E suites
//!
//! Browser suites are opt-in: they need a real Chromium, the built
//! extension bundle, and (for funded flows) testnet credentials. The
//! gate is `GERO_E2E=1`; an opted-in but misconfigured environment
//! aborts with a diagnostic before any UI step runs.
//!
//! Every precondition-not-met path in a spec is an explicit [`skip!`]
//! with a reported reason — never a silent pass.

use std::sync::{Once, OnceLock};

use gero_common::HarnessConfig;
use gero_driver::session::purge_stale_profiles;

static CONFIG: OnceLock<HarnessConfig> = OnceLock::new();
static TRACING: Once = Once::new();

/// Whether the browser suites are enabled for this run
pub fn e2e_enabled() -> bool {
    std::env::var("GERO_E2E").map(|v| v == "1").unwrap_or(false)
}

/// Initialize tracing once per test binary
pub fn init() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// The run's harness configuration.
///
/// Built once; the first access also purges profile directories left
/// behind by earlier runs (the suite-level cleanup pass). A missing
/// required variable panics with a diagnostic, failing every test in
/// the binary before any browser launches.
pub fn config() -> HarnessConfig {
    CONFIG
        .get_or_init(|| {
            let config = HarnessConfig::from_env().unwrap_or_else(|e| {
                panic!(
                    "E2E setup failed: {e}\n\
                     Required: EXTENSION_PATH (built extension bundle), BLOCKFROST_API_KEY.\n\
                     Optional: CARDANO_NETWORK, BLOCKFROST_URL, TEST_WALLET_1_MNEMONIC, \
                     TEST_WALLET_PASSWORD, DAPP_URL, GERO_ARTIFACTS_DIR."
                )
            });
            if let Err(e) = purge_stale_profiles(&config) {
                tracing::warn!("stale profile cleanup failed: {e}");
            }
            config
        })
        .clone()
}

/// Skip the current test with a reported reason.
#[macro_export]
macro_rules! skip {
    ($($arg:tt)*) => {{
        eprintln!("[SKIP] {}", format_args!($($arg)*));
        return;
    }};
}

/// Skip unless the browser suites are opted in via `GERO_E2E=1`.
#[macro_export]
macro_rules! require_e2e {
    () => {
        if !$crate::e2e_enabled() {
            $crate::skip!(
                "browser suite disabled; run with GERO_E2E=1 and a configured environment"
            );
        }
    };
}
