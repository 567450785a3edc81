//! Failure artifacts
//!
//! Screenshots written under the configured artifacts directory with
//! timestamped names. Failure capture is best-effort: a broken page must
//! not mask the original error.

use std::path::{Path, PathBuf};

use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use tracing::{info, warn};

use gero_common::config::HarnessConfig;

use crate::error::DriverResult;

/// Writes screenshots into the artifacts directory
#[derive(Debug, Clone)]
pub struct ArtifactSink {
    dir: PathBuf,
}

impl ArtifactSink {
    /// Create the sink, ensuring the directory exists
    pub fn new(config: &HarnessConfig) -> DriverResult<Self> {
        let dir = config.artifacts_dir.join("screenshots");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Take a timestamped full-page screenshot
    pub async fn screenshot(&self, page: &Page, name: &str) -> DriverResult<PathBuf> {
        let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S%3f");
        let path = self.dir.join(format!("{name}-{timestamp}.png"));
        page.save_screenshot(
            ScreenshotParams::builder().full_page(true).build(),
            &path,
        )
        .await?;
        info!("screenshot saved: {}", path.display());
        Ok(path)
    }

    /// Screenshot on failure, swallowing capture errors
    pub async fn capture_failure(&self, page: &Page, name: &str) {
        if let Err(e) = self.screenshot(page, name).await {
            warn!("failure screenshot for {name} could not be captured: {e}");
        }
    }
}
