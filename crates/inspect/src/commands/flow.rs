//! Step-by-step onboarding walk with a full dump at each step

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;

use gero_common::config::Network;
use gero_driver::dom::{self, PageSurface};
use gero_driver::{roles, ExtensionSession};

use crate::dump;

pub async fn execute(session: &ExtensionSession) -> anyhow::Result<()> {
    let page = session.open_page("index.html").await?;
    tokio::time::sleep(Duration::from_secs(3)).await;

    let surface = PageSurface::new(page.clone());
    let probe = Duration::from_secs(2);

    log_state(&page, "1-initial-welcome-screen").await?;

    println!("\n>>> Clicking network selector...");
    if dom::click_if_visible(&surface, &roles::network_chooser(), Duration::from_secs(5)).await? {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        log_state(&page, "2-network-selector-opened").await?;

        println!("\n>>> Selecting preprod network...");
        if dom::click_if_visible(&surface, &roles::network_option(Network::Preprod), probe)
            .await?
        {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            log_state(&page, "3-preprod-selected").await?;
        } else {
            println!("preprod option not found");
        }
    }

    println!("\n>>> Opening create/import entry point...");
    if dom::click_if_visible(&surface, &roles::onboarding_entry(), Duration::from_secs(5)).await? {
        tokio::time::sleep(Duration::from_secs(2)).await;
        log_state(&page, "4-after-create-import-click").await?;

        println!("\n>>> Clicking the create branch...");
        if dom::click_if_visible(&surface, &roles::create_branch(), probe).await? {
            tokio::time::sleep(Duration::from_secs(2)).await;
            log_state(&page, "5-after-create-wallet-click").await?;
        } else {
            println!("create branch control not visible");
        }
    }

    Ok(())
}

async fn log_state(page: &Page, step: &str) -> anyhow::Result<()> {
    println!("\n\n{}", "=".repeat(60));
    println!("STEP: {step}");
    println!("{}", "=".repeat(60));

    let path = PathBuf::from(format!("inspect-{step}.png"));
    page.save_screenshot(ScreenshotParams::builder().build(), &path)
        .await?;
    println!("Screenshot: {}", path.display());

    let all_buttons = dump::buttons(page, "button").await?;
    dump::print_buttons("All buttons", &all_buttons);

    let overlay_buttons = dump::buttons(
        page,
        ".v-overlay button, .v-dialog button, [role=\"dialog\"] button",
    )
    .await?;
    dump::print_buttons("Buttons in overlays", &overlay_buttons);

    let inputs = dump::inputs(page).await?;
    dump::print_inputs("Visible inputs", &inputs);

    let textareas = dump::textareas(page).await?;
    dump::print_inputs("Visible textareas", &textareas);

    println!(
        "\nVisible overlays/dialogs: {}",
        dump::overlay_count(page).await?
    );

    Ok(())
}
