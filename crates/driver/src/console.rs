//! Console and page-error capture
//!
//! Browser console output and uncaught page exceptions are forwarded to
//! tracing for diagnosis. Capture never fails a test by itself; only a
//! later assertion on the resulting UI state does.

use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, EventConsoleApiCalled, EventExceptionThrown, RemoteObject,
};
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::{debug, error, warn};

use crate::error::DriverResult;

/// Attach console and exception listeners to a page. The spawned tasks
/// end when the page (and its event streams) close.
pub async fn attach(page: &Page) -> DriverResult<()> {
    let mut console_events = page.event_listener::<EventConsoleApiCalled>().await?;
    tokio::spawn(async move {
        while let Some(event) = console_events.next().await {
            let text = format_args_preview(&event.args);
            if is_noise(&text) {
                continue;
            }
            match &event.r#type {
                ConsoleApiCalledType::Error => error!("[page console] {text}"),
                ConsoleApiCalledType::Warning => warn!("[page console] {text}"),
                _ => debug!("[page console] {text}"),
            }
        }
    });

    let mut exception_events = page.event_listener::<EventExceptionThrown>().await?;
    tokio::spawn(async move {
        while let Some(event) = exception_events.next().await {
            let details = &event.exception_details;
            let message = details
                .exception
                .as_ref()
                .and_then(|e| e.description.clone())
                .unwrap_or_else(|| details.text.clone());
            error!("[page exception] {message}");
        }
    });

    Ok(())
}

fn format_args_preview(args: &[RemoteObject]) -> String {
    args.iter()
        .map(|arg| match (&arg.value, &arg.description) {
            (Some(value), _) => value.to_string(),
            (None, Some(description)) => description.clone(),
            _ => String::from("<object>"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// DevTools banner chatter and extension housekeeping logs drown out
// everything else at debug level.
fn is_noise(text: &str) -> bool {
    text.contains("DevTools") || text.contains("chrome-extension://")
}
