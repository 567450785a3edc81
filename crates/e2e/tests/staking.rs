//! Staking operations suite
//!
//! Delegation and reward withdrawal against a funded preprod wallet.
//! A wallet that is already delegated, or short of the deposit, skips
//! with a reason rather than quietly passing.

use std::time::Duration;

use gero_common::cardano::is_valid_tx_hash;
use gero_common::testdata::{amounts, known, WalletDescriptor};
use gero_driver::dom;
use gero_driver::roles;
use gero_driver::CardanoFixture;
use gero_e2e::{require_e2e, skip};

const SYNC_WAIT: Duration = Duration::from_secs(10);

async fn funded_fixture() -> Option<CardanoFixture> {
    let config = gero_e2e::config();
    let wallet = WalletDescriptor::primary(&config)?;

    let fixture = CardanoFixture::acquire(config).await.expect("cardano fixture");
    fixture
        .restore_wallet(&wallet)
        .await
        .expect("funded wallet restore");
    tokio::time::sleep(SYNC_WAIT).await;
    Some(fixture)
}

#[tokio::test]
async fn navigates_to_staking_page() {
    require_e2e!();
    gero_e2e::init();

    let Some(fixture) = funded_fixture().await else {
        skip!("TEST_WALLET_1_MNEMONIC not configured; staking suite not exercisable");
    };

    if let Err(e) = fixture.cardano().open_staking_page().await {
        fixture.capture_failure("staking-navigation").await;
        panic!("staking page did not load: {e}");
    }

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn displays_pool_list() {
    require_e2e!();
    gero_e2e::init();

    let Some(fixture) = funded_fixture().await else {
        skip!("TEST_WALLET_1_MNEMONIC not configured; staking suite not exercisable");
    };

    fixture
        .cardano()
        .open_staking_page()
        .await
        .expect("staking page");
    tokio::time::sleep(Duration::from_secs(3)).await;

    let surface = fixture.driver().surface();
    let listed = dom::appears(surface, &roles::pool_list_entry(), Duration::from_secs(3))
        .await
        .expect("pool list probe");
    if !listed {
        fixture.close().await.expect("teardown");
        skip!("no pool entries matched the known selectors; list may require a search first");
    }

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn searches_for_stake_pool() {
    require_e2e!();
    gero_e2e::init();

    let Some(fixture) = funded_fixture().await else {
        skip!("TEST_WALLET_1_MNEMONIC not configured; staking suite not exercisable");
    };

    fixture
        .cardano()
        .open_staking_page()
        .await
        .expect("staking page");

    let surface = fixture.driver().surface();
    let searchable = dom::appears(surface, &roles::pool_search_input(), Duration::from_secs(2))
        .await
        .expect("search probe");
    if !searchable {
        fixture.close().await.expect("teardown");
        skip!("pool search input not found on this build");
    }

    dom::fill_role(
        surface,
        &roles::pool_search_input(),
        "GERO",
        Duration::from_secs(10),
    )
    .await
    .expect("search fill");
    tokio::time::sleep(Duration::from_secs(2)).await;

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn delegates_to_stake_pool() {
    require_e2e!();
    gero_e2e::init();

    let Some(fixture) = funded_fixture().await else {
        skip!("TEST_WALLET_1_MNEMONIC not configured; staking suite not exercisable");
    };

    let balance = fixture.check_balance().await.expect("balance read");
    if balance < amounts::MIN_STAKING_BALANCE {
        fixture.close().await.expect("teardown");
        skip!(
            "insufficient balance ({balance} ADA) for the delegation deposit; need {} ADA",
            amounts::MIN_STAKING_BALANCE
        );
    }

    fixture
        .cardano()
        .open_staking_page()
        .await
        .expect("staking page");
    tokio::time::sleep(Duration::from_secs(3)).await;

    if let Some(status) = fixture
        .cardano()
        .delegation_active()
        .await
        .expect("delegation probe")
    {
        fixture.close().await.expect("teardown");
        skip!("wallet already delegated ({status}); re-delegation intentionally not exercised");
    }

    let password = fixture.config().wallet_password.clone();
    let tx_hash = match fixture.delegate_stake(known::POOL_1, &password).await {
        Ok(hash) => hash,
        Err(e) => {
            fixture.capture_failure("delegate-stake").await;
            panic!("delegation failed: {e}");
        }
    };
    assert!(
        is_valid_tx_hash(&tx_hash),
        "scraped delegation id has the wrong shape: {tx_hash:?}"
    );

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn withdraws_staking_rewards() {
    require_e2e!();
    gero_e2e::init();

    let Some(fixture) = funded_fixture().await else {
        skip!("TEST_WALLET_1_MNEMONIC not configured; staking suite not exercisable");
    };

    fixture
        .cardano()
        .open_staking_page()
        .await
        .expect("staking page");
    tokio::time::sleep(Duration::from_secs(3)).await;

    if fixture
        .cardano()
        .delegation_active()
        .await
        .expect("delegation probe")
        .is_none()
    {
        fixture.close().await.expect("teardown");
        skip!("wallet is not delegated; no rewards to withdraw");
    }

    let surface = fixture.driver().surface();
    let withdrawable = dom::appears(surface, &roles::withdraw_button(), Duration::from_secs(3))
        .await
        .expect("withdraw probe");
    if !withdrawable {
        fixture.close().await.expect("teardown");
        skip!("no withdraw control (no rewards accumulated yet)");
    }

    let password = fixture.config().wallet_password.clone();
    let tx_hash = match fixture.withdraw_rewards(&password).await {
        Ok(hash) => hash,
        Err(e) => {
            fixture.capture_failure("withdraw-rewards").await;
            panic!("withdrawal failed: {e}");
        }
    };
    assert!(
        is_valid_tx_hash(&tx_hash),
        "scraped withdrawal id has the wrong shape: {tx_hash:?}"
    );

    fixture.close().await.expect("teardown");
}
