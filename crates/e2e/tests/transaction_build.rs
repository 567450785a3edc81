//! Transaction building suite
//!
//! Runs against a fresh, unfunded wallet: the send entry point may be
//! disabled outright, which is itself asserted behavior. Cases that need
//! an open send dialog skip explicitly when the empty wallet blocks it.

use std::time::Duration;

use gero_common::testdata::WalletDescriptor;
use gero_driver::dom;
use gero_driver::roles;
use gero_driver::{CardanoFixture, DomSurface};
use gero_e2e::{require_e2e, skip};

const ERROR_PROBE: Duration = Duration::from_secs(10);

async fn fixture_with_wallet() -> CardanoFixture {
    let fixture = CardanoFixture::acquire(gero_e2e::config())
        .await
        .expect("cardano fixture");
    let wallet = WalletDescriptor::ephemeral("Transaction Test Wallet", fixture.config());
    fixture.create_wallet(&wallet).await.expect("wallet setup");
    fixture
}

/// Click the send entry point unless it is disabled. `None` means the
/// empty wallet blocks sending entirely.
async fn try_open_send_form(fixture: &CardanoFixture) -> Option<bool> {
    let surface = fixture.driver().surface();

    let query = dom::wait_for(surface, &roles::send_button(), Duration::from_secs(3))
        .await
        .ok()?;
    if surface
        .is_disabled(&query)
        .await
        .expect("disabled probe")
        .unwrap_or(false)
    {
        return None;
    }
    surface.click(&query).await.expect("send click");

    let opened = dom::appears(surface, &roles::send_form(), ERROR_PROBE)
        .await
        .expect("send form probe");
    Some(opened)
}

#[tokio::test]
async fn send_entry_point_behaves_for_empty_wallet() {
    require_e2e!();
    gero_e2e::init();

    let fixture = fixture_with_wallet().await;

    match try_open_send_form(&fixture).await {
        // disabled for an empty wallet: expected, asserted behavior
        None => tracing::info!("send control disabled for empty wallet"),
        Some(true) => tracing::info!("send form opened"),
        Some(false) => {
            fixture.capture_failure("send-entry").await;
            panic!("send control enabled but the send form never opened");
        }
    }

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn validates_recipient_address_format() {
    require_e2e!();
    gero_e2e::init();

    let fixture = fixture_with_wallet().await;

    match try_open_send_form(&fixture).await {
        None | Some(false) => {
            fixture.close().await.expect("teardown");
            skip!("empty wallet cannot open the send dialog; address validation not exercisable");
        }
        Some(true) => {}
    }

    let surface = fixture.driver().surface();
    dom::fill_role(
        surface,
        &roles::recipient_input(),
        "invalid_address_format",
        Duration::from_secs(10),
    )
    .await
    .expect("recipient fill");
    dom::fill_role(surface, &roles::amount_input(), "1", Duration::from_secs(10))
        .await
        .expect("amount fill");
    dom::click_role(surface, &roles::next_button(), Duration::from_secs(10))
        .await
        .expect("next click");

    let errored = fixture
        .driver()
        .form_error_visible(ERROR_PROBE)
        .await
        .expect("error probe");
    if !errored {
        fixture.capture_failure("invalid-address").await;
        panic!("malformed recipient address was not rejected");
    }

    fixture.close().await.expect("teardown");
}

#[tokio::test]
async fn rejects_amount_exceeding_balance() {
    require_e2e!();
    gero_e2e::init();

    let fixture = fixture_with_wallet().await;

    match try_open_send_form(&fixture).await {
        None | Some(false) => {
            fixture.close().await.expect("teardown");
            skip!("empty wallet cannot open the send dialog; insufficient-funds path not exercisable");
        }
        Some(true) => {}
    }

    let surface = fixture.driver().surface();
    dom::fill_role(
        surface,
        &roles::recipient_input(),
        gero_common::testdata::known::RECIPIENT,
        Duration::from_secs(10),
    )
    .await
    .expect("recipient fill");
    dom::fill_role(
        surface,
        &roles::amount_input(),
        "1000000",
        Duration::from_secs(10),
    )
    .await
    .expect("amount fill");
    dom::click_role(surface, &roles::next_button(), Duration::from_secs(10))
        .await
        .expect("next click");

    let errored = fixture
        .driver()
        .form_error_visible(ERROR_PROBE)
        .await
        .expect("error probe");
    if !errored {
        fixture.capture_failure("insufficient-funds").await;
        panic!("amount beyond the balance was not rejected");
    }

    fixture.close().await.expect("teardown");
}
