//! Extension session lifecycle
//!
//! Launches Chromium with a throwaway profile and the wallet extension
//! force-loaded, then discovers the extension's runtime identifier from
//! its background service worker target. Extensions only load in headed
//! mode, so sessions always launch with a window.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use gero_common::config::HarnessConfig;
use gero_common::testdata::timeouts;

use crate::error::{DriverError, DriverResult};

/// How often target discovery re-polls for the background worker
const TARGET_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// A running browser with the extension active
pub struct ExtensionSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    profile_dir: PathBuf,
    extension_id: String,
}

impl ExtensionSession {
    /// Launch a browser session with a fresh profile and the extension
    /// loaded, and resolve the extension id. A browser that cannot start
    /// is a hard setup failure.
    pub async fn launch(config: &HarnessConfig) -> DriverResult<Self> {
        let profiles_root = config.profiles_dir();
        std::fs::create_dir_all(&profiles_root)?;
        let profile_dir = tempfile::Builder::new()
            .prefix("profile-")
            .tempdir_in(&profiles_root)?
            .into_path();

        let extension = config.extension_path.display();
        let browser_config = BrowserConfig::builder()
            .with_head()
            .window_size(1280, 720)
            .user_data_dir(&profile_dir)
            .args(vec![
                format!("--disable-extensions-except={extension}"),
                format!("--load-extension={extension}"),
                "--no-sandbox".to_string(),
                "--disable-setuid-sandbox".to_string(),
            ])
            .build()
            .map_err(DriverError::Setup)?;

        info!("launching browser with extension from {extension}");
        let (mut browser, mut handler) = Browser::launch(browser_config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler stopped: {e}");
                    break;
                }
            }
        });

        let extension_id =
            Self::resolve_extension_id(&mut browser, timeouts::EXTENSION_LOAD).await?;
        info!("extension loaded with id {extension_id}");

        Ok(Self {
            browser,
            handler_task,
            profile_dir,
            extension_id,
        })
    }

    /// Poll CDP targets until the extension's background service worker
    /// registers, then extract the identifier from its URL.
    async fn resolve_extension_id(
        browser: &mut Browser,
        timeout: Duration,
    ) -> DriverResult<String> {
        let deadline = Instant::now() + timeout;
        loop {
            let targets = browser.fetch_targets().await?;
            if let Some(id) = targets
                .iter()
                .find_map(|t| extension_id_from_target(&t.r#type, &t.url))
            {
                return Ok(id);
            }
            if Instant::now() >= deadline {
                return Err(DriverError::timeout(
                    "extension background service worker",
                    timeout,
                ));
            }
            debug!("no extension target yet, re-polling");
            tokio::time::sleep(TARGET_POLL_INTERVAL).await;
        }
    }

    /// The resolved extension identifier
    pub fn extension_id(&self) -> &str {
        &self.extension_id
    }

    /// The session's profile directory (deleted by the suite-level
    /// cleanup pass, not by this session)
    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    /// Build a navigable URL into an extension-internal page.
    ///
    /// A single leading `/` on the input is stripped so both
    /// `options.html` and `/options.html` yield the same URL.
    pub fn url_for(&self, relative: &str) -> String {
        extension_url(&self.extension_id, relative)
    }

    /// Open a new page on an extension-internal document
    pub async fn open_page(&self, relative: &str) -> DriverResult<Page> {
        let url = self.url_for(relative);
        debug!("opening extension page {url}");
        let page = self.browser.new_page(url).await?;
        page.wait_for_navigation().await?;
        Ok(page)
    }

    /// Open the options page (the main wallet interface)
    pub async fn open_options_page(&self) -> DriverResult<Page> {
        self.open_page("options.html").await
    }

    /// Open the action popup
    pub async fn open_popup(&self) -> DriverResult<Page> {
        self.open_page("popup.html").await
    }

    /// Open the side panel document
    pub async fn open_side_panel(&self) -> DriverResult<Page> {
        self.open_page("sidepanel.html").await
    }

    /// Open an ordinary web page in the same context (dApp probing)
    pub async fn open_external_page(&self, url: &str) -> DriverResult<Page> {
        debug!("opening external page {url}");
        let page = self.browser.new_page(url).await?;
        page.wait_for_navigation().await?;
        Ok(page)
    }

    /// Navigate an existing page to an extension-internal route
    pub async fn navigate(&self, page: &Page, relative: &str) -> DriverResult<()> {
        page.goto(self.url_for(relative)).await?;
        page.wait_for_navigation().await?;
        Ok(())
    }

    /// Close the browser, releasing all pages. The profile directory is
    /// left behind for [`purge_stale_profiles`].
    pub async fn close(mut self) -> DriverResult<()> {
        info!("closing browser session");
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}

impl Drop for ExtensionSession {
    fn drop(&mut self) {
        // Browser's own Drop reaps the child; just stop the event pump.
        self.handler_task.abort();
    }
}

fn extension_url(id: &str, relative: &str) -> String {
    let relative = relative.strip_prefix('/').unwrap_or(relative);
    format!("chrome-extension://{id}/{relative}")
}

fn extension_id_from_target(kind: &str, url: &str) -> Option<String> {
    if kind != "service_worker" && kind != "background_page" {
        return None;
    }
    let rest = url.strip_prefix("chrome-extension://")?;
    let id = rest.split('/').next()?;
    (!id.is_empty()).then(|| id.to_string())
}

/// Suite-level cleanup: delete every profile directory left behind by
/// earlier sessions. Call only when no session is running.
pub fn purge_stale_profiles(config: &HarnessConfig) -> DriverResult<usize> {
    let root = config.profiles_dir();
    if !root.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in walkdir::WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
    {
        match std::fs::remove_dir_all(entry.path()) {
            Ok(()) => {
                debug!("removed stale profile {}", entry.path().display());
                removed += 1;
            }
            Err(e) => warn!("failed to remove {}: {e}", entry.path().display()),
        }
    }

    if removed > 0 {
        info!("purged {removed} stale profile director{}", if removed == 1 { "y" } else { "ies" });
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKER_URL: &str =
        "chrome-extension://abcdefghijklmnopqrstuvwxyzabcdef/background.js";

    #[test]
    fn extension_id_extracted_from_worker_url() {
        let id = extension_id_from_target("service_worker", WORKER_URL);
        assert_eq!(id.as_deref(), Some("abcdefghijklmnopqrstuvwxyzabcdef"));
    }

    #[test]
    fn background_page_targets_also_match() {
        let id = extension_id_from_target("background_page", WORKER_URL);
        assert!(id.is_some());
    }

    #[test]
    fn url_builder_strips_one_leading_slash() {
        assert_eq!(
            extension_url("abc", "options.html"),
            "chrome-extension://abc/options.html"
        );
        assert_eq!(
            extension_url("abc", "/options.html"),
            "chrome-extension://abc/options.html"
        );
        // only a single separator is stripped
        assert_eq!(
            extension_url("abc", "//options.html"),
            "chrome-extension://abc//options.html"
        );
    }

    #[test]
    fn ordinary_pages_are_ignored() {
        assert!(extension_id_from_target("page", WORKER_URL).is_none());
        assert!(extension_id_from_target("service_worker", "https://example.com/x").is_none());
        assert!(extension_id_from_target("service_worker", "chrome-extension://").is_none());
    }
}
