//! Phrase-length button dump on the restore form

use std::time::Duration;

use gero_common::config::Network;
use gero_driver::dom::{self, PageSurface};
use gero_driver::{roles, ExtensionSession};

use crate::dump;

pub async fn execute(session: &ExtensionSession) -> anyhow::Result<()> {
    let page = session.open_page("index.html").await?;
    tokio::time::sleep(Duration::from_secs(3)).await;

    let surface = PageSurface::new(page.clone());
    let probe = Duration::from_secs(2);

    if dom::click_if_visible(&surface, &roles::network_chooser(), probe).await? {
        tokio::time::sleep(Duration::from_secs(1)).await;
        if dom::click_if_visible(&surface, &roles::network_option(Network::Preprod), probe)
            .await?
        {
            println!("Selected preprod network");
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    dom::click_role(&surface, &roles::onboarding_entry(), Duration::from_secs(10)).await?;
    tokio::time::sleep(Duration::from_secs(2)).await;

    dom::click_role(&surface, &roles::restore_branch(), Duration::from_secs(10)).await?;
    tokio::time::sleep(Duration::from_secs(2)).await;

    println!("\n=== Restore form buttons (phrase length candidates) ===");
    let buttons = dump::buttons(&page, "button").await?;
    dump::print_buttons("Buttons", &buttons);

    let inputs = dump::inputs(&page).await?;
    dump::print_inputs("Visible inputs", &inputs);

    Ok(())
}
