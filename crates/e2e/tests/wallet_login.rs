//! Wallet login and authentication suite
//!
//! Each case starts from a freshly created wallet, then exercises the
//! lock/unlock cycle. Builds without a lock feature skip explicitly.

use std::time::Duration;

use gero_common::testdata::WalletDescriptor;
use gero_driver::dom;
use gero_driver::roles;
use gero_driver::{CardanoFixture, WalletFixture};
use gero_e2e::{require_e2e, skip};

const SETTLE: Duration = Duration::from_secs(1);
const ERROR_PROBE: Duration = Duration::from_secs(3);

async fn fixture_with_wallet() -> WalletFixture {
    let fixture = WalletFixture::acquire(gero_e2e::config())
        .await
        .expect("wallet fixture");
    let wallet = WalletDescriptor::ephemeral("Login Test Wallet", fixture.config());
    fixture.create_wallet(&wallet).await.expect("wallet setup");
    fixture
}

#[tokio::test]
async fn logs_in_with_correct_password() {
    require_e2e!();
    gero_e2e::init();

    let fixture = fixture_with_wallet().await;

    let locked = fixture.lock_wallet().await.expect("lock attempt");
    if !locked {
        // no lock feature and auto-login keeps the dashboard up; that is
        // its own valid outcome, but the unlock path was not exercised
        fixture.close().await.expect("teardown");
        skip!("wallet build has no lock feature (auto-login active)");
    }

    let password = fixture.config().wallet_password.clone();
    if let Err(e) = fixture.login_wallet(&password).await {
        fixture.capture_failure("login").await;
        panic!("login failed: {e}");
    }

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn rejects_incorrect_password() {
    require_e2e!();
    gero_e2e::init();

    let fixture = fixture_with_wallet().await;

    if !fixture.lock_wallet().await.expect("lock attempt") {
        fixture.close().await.expect("teardown");
        skip!("wallet build has no lock feature; incorrect-password path not exercisable");
    }

    let driver = fixture.driver();
    let surface = driver.surface();
    dom::fill_role(
        surface,
        &roles::password_inputs(),
        "WrongPassword123!",
        Duration::from_secs(10),
    )
    .await
    .expect("password fill");
    dom::click_role(surface, &roles::login_button(), Duration::from_secs(10))
        .await
        .expect("login click");
    tokio::time::sleep(SETTLE).await;

    // either an error renders or the password prompt survives
    let errored = driver
        .form_error_visible(ERROR_PROBE)
        .await
        .expect("error probe");
    let still_locked = driver.is_login_screen().await.expect("login probe");
    if !errored && !still_locked {
        fixture.capture_failure("wrong-password").await;
        panic!("wrong password appears to have unlocked the wallet");
    }

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn maintains_session_across_navigation() {
    require_e2e!();
    gero_e2e::init();

    let fixture = fixture_with_wallet().await;
    let driver = fixture.driver();
    let surface = driver.surface();

    let navigated = dom::click_if_visible(
        surface,
        &roles::staking_button(),
        Duration::from_secs(3),
    )
    .await
    .expect("staking probe");
    if !navigated {
        fixture.close().await.expect("teardown");
        skip!("staking navigation not present on this build");
    }
    tokio::time::sleep(SETTLE).await;

    // in-wallet navigation must not demand a re-login
    let locked = driver.is_login_screen().await.expect("login probe");
    assert!(!locked, "navigation to staking forced a re-login");

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn handles_multiple_login_attempts() {
    require_e2e!();
    gero_e2e::init();

    let fixture = fixture_with_wallet().await;

    if !fixture.lock_wallet().await.expect("lock attempt") {
        fixture.close().await.expect("teardown");
        skip!("wallet build has no lock feature; retry path not exercisable");
    }

    let driver = fixture.driver();
    let surface = driver.surface();
    for wrong in ["Wrong1", "Wrong2"] {
        dom::fill_role(
            surface,
            &roles::password_inputs(),
            wrong,
            Duration::from_secs(10),
        )
        .await
        .expect("password fill");
        dom::click_role(surface, &roles::login_button(), Duration::from_secs(10))
            .await
            .expect("login click");
        tokio::time::sleep(SETTLE).await;
    }

    let password = fixture.config().wallet_password.clone();
    if let Err(e) = fixture.login_wallet(&password).await {
        fixture.capture_failure("login-retry").await;
        panic!("login after failed attempts did not succeed: {e}");
    }

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn displays_wallet_information_after_login() {
    require_e2e!();
    gero_e2e::init();

    let fixture = CardanoFixture::acquire(gero_e2e::config())
        .await
        .expect("cardano fixture");
    let wallet = WalletDescriptor::ephemeral("Login Info Wallet", fixture.config());
    fixture.create_wallet(&wallet).await.expect("wallet setup");

    match fixture.check_balance().await {
        Ok(balance) => {
            assert!(balance >= 0.0);
            tracing::info!("wallet balance displayed: {balance} ADA");
        }
        Err(e) => {
            // a fresh wallet can still be syncing; the dashboard itself
            // was already asserted by create_wallet
            tracing::warn!("balance not yet available: {e}");
        }
    }

    fixture.close().await.expect("teardown");
}
