//! Welcome-screen and overlay dump

use std::time::Duration;

use gero_driver::dom::{self, PageSurface};
use gero_driver::{roles, ExtensionSession};

use crate::dump;

pub async fn execute(session: &ExtensionSession) -> anyhow::Result<()> {
    let page = session.open_page("index.html").await?;
    println!("Opened {}", session.url_for("index.html"));

    // give the app time to mount
    tokio::time::sleep(Duration::from_secs(5)).await;

    println!("\n=== WELCOME SCREEN ===");
    let buttons = dump::buttons(&page, "button").await?;
    dump::print_buttons("Buttons", &buttons);

    let surface = PageSurface::new(page.clone());
    let clicked = dom::click_if_visible(
        &surface,
        &roles::onboarding_entry(),
        Duration::from_secs(2),
    )
    .await?;

    if clicked {
        tokio::time::sleep(Duration::from_secs(3)).await;

        println!("\n=== AFTER OPENING CREATE/IMPORT ===");
        println!("Visible overlays/dialogs: {}", dump::overlay_count(&page).await?);

        let overlay_buttons =
            dump::buttons(&page, ".v-overlay button, .v-dialog button").await?;
        dump::print_buttons("Buttons inside overlays", &overlay_buttons);

        for (i, text) in dump::overlay_text(&page).await?.iter().enumerate() {
            println!("  overlay {i} text: {text:?}");
        }
    } else {
        println!("\nCreate/import entry point not found on this build");
    }

    Ok(())
}
