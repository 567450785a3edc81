//! DOM capability lookup
//!
//! The extension UI exposes no stable automation ids, so every logical
//! control is resolved through a union of fallback queries ([`UiRole`]).
//! Flow drivers are generic over [`DomSurface`], which is implemented for
//! a live CDP page ([`PageSurface`]) and, in unit tests, by a scripted
//! fake. Adding a fallback selector is a one-line change in [`crate::roles`].

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{DriverError, DriverResult};

/// Poll interval for UI waits
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One selector alternative for locating an element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Query {
    /// Plain CSS selector
    Css { selector: String },
    /// Elements of `tag` whose visible text contains `needle` (case-insensitive)
    Text { tag: String, needle: String },
    /// Elements of `tag` whose placeholder contains `needle` (case-insensitive)
    Placeholder { tag: String, needle: String },
}

impl Query {
    pub fn css(selector: impl Into<String>) -> Self {
        Query::Css {
            selector: selector.into(),
        }
    }

    pub fn text(tag: impl Into<String>, needle: impl Into<String>) -> Self {
        Query::Text {
            tag: tag.into(),
            needle: needle.into(),
        }
    }

    pub fn placeholder(tag: impl Into<String>, needle: impl Into<String>) -> Self {
        Query::Placeholder {
            tag: tag.into(),
            needle: needle.into(),
        }
    }

    /// Human-readable form for error messages
    pub fn describe(&self) -> String {
        match self {
            Query::Css { selector } => format!("css `{selector}`"),
            Query::Text { tag, needle } => format!("{tag} with text \"{needle}\""),
            Query::Placeholder { tag, needle } => {
                format!("{tag} with placeholder \"{needle}\"")
            }
        }
    }
}

/// A named UI capability with fallback queries, tried in order
#[derive(Debug, Clone)]
pub struct UiRole {
    pub name: &'static str,
    pub alternatives: Vec<Query>,
}

impl UiRole {
    pub fn new(name: &'static str, alternatives: impl IntoIterator<Item = Query>) -> Self {
        Self {
            name,
            alternatives: alternatives.into_iter().collect(),
        }
    }
}

/// Minimal surface the flow drivers need from a page.
///
/// Action methods return whether a matching element was found; locating
/// nothing is not an error at this level because callers distinguish
/// required steps (polled, then timeout) from tolerated-absent ones.
#[async_trait]
pub trait DomSurface: Send + Sync {
    /// Number of visible elements matching the query
    async fn count(&self, query: &Query) -> DriverResult<usize>;

    /// Click the first visible match
    async fn click(&self, query: &Query) -> DriverResult<bool>;

    /// Click the last visible match (submit-style buttons render after
    /// navigation buttons with the same caption)
    async fn click_last(&self, query: &Query) -> DriverResult<bool>;

    /// Fill the n-th visible match, dispatching input/change events
    async fn fill_nth(&self, query: &Query, index: usize, value: &str) -> DriverResult<bool>;

    /// Fill the first visible match that has an empty value, committing
    /// with an Enter keystroke (autocomplete-style word inputs)
    async fn fill_first_empty(&self, query: &Query, value: &str) -> DriverResult<bool>;

    /// Bring every visible match to the requested checked state; returns
    /// how many were toggled
    async fn set_checked_all(&self, query: &Query, checked: bool) -> DriverResult<usize>;

    /// Text content of the first visible match
    async fn text(&self, query: &Query) -> DriverResult<Option<String>>;

    /// Disabled state of the first visible match, `None` when absent
    async fn is_disabled(&self, query: &Query) -> DriverResult<Option<bool>>;
}

/// Resolve a role to its first alternative with a visible match
pub async fn resolve<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
) -> DriverResult<Option<Query>> {
    for query in &role.alternatives {
        if surface.count(query).await? > 0 {
            return Ok(Some(query.clone()));
        }
    }
    Ok(None)
}

/// Poll until the role resolves, or time out
pub async fn wait_for<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
    timeout: Duration,
) -> DriverResult<Query> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(query) = resolve(surface, role).await? {
            return Ok(query);
        }
        if Instant::now() >= deadline {
            return Err(DriverError::timeout(role.name, timeout));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Whether the role resolves within the probe window
pub async fn appears<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
    probe: Duration,
) -> DriverResult<bool> {
    match wait_for(surface, role, probe).await {
        Ok(_) => Ok(true),
        Err(DriverError::Timeout { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Wait for the role, then click its first match
pub async fn click_role<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
    timeout: Duration,
) -> DriverResult<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(query) = resolve(surface, role).await? {
            // the element can detach between resolve and click; retry
            if surface.click(&query).await? {
                return Ok(());
            }
        }
        if Instant::now() >= deadline {
            return Err(DriverError::timeout(role.name, timeout));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Wait for the role, then click its last match
pub async fn click_last_role<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
    timeout: Duration,
) -> DriverResult<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(query) = resolve(surface, role).await? {
            if surface.click_last(&query).await? {
                return Ok(());
            }
        }
        if Instant::now() >= deadline {
            return Err(DriverError::timeout(role.name, timeout));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Click the role if it shows up within the probe window; absence is
/// tolerated and reported as `false`
pub async fn click_if_visible<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
    probe: Duration,
) -> DriverResult<bool> {
    match wait_for(surface, role, probe).await {
        Ok(query) => {
            surface.click(&query).await?;
            Ok(true)
        }
        Err(DriverError::Timeout { .. }) => {
            debug!("optional control absent, skipping: {}", role.name);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Wait for the role, then fill its n-th match
pub async fn fill_role_nth<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
    index: usize,
    value: &str,
    timeout: Duration,
) -> DriverResult<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(query) = resolve(surface, role).await? {
            if surface.fill_nth(&query, index, value).await? {
                return Ok(());
            }
        }
        if Instant::now() >= deadline {
            return Err(DriverError::timeout(role.name, timeout));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Wait for the role, then fill its first match
pub async fn fill_role<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
    value: &str,
    timeout: Duration,
) -> DriverResult<()> {
    fill_role_nth(surface, role, 0, value, timeout).await
}

/// Wait for the role and return its text content, trimmed
pub async fn text_of<S: DomSurface + ?Sized>(
    surface: &S,
    role: &UiRole,
    timeout: Duration,
) -> DriverResult<String> {
    let query = wait_for(surface, role, timeout).await?;
    let text = surface.text(&query).await?.unwrap_or_default();
    Ok(text.trim().to_string())
}

/// Live surface over a chromiumoxide page.
///
/// Every operation runs as injected JavaScript: matches are filtered to
/// visible elements, text/placeholder needles are case-insensitive, and
/// nested matches collapse to the innermost element so a text needle
/// resolves to the control rather than its container. Fills go through
/// the native value setter and dispatch input/change events, which the
/// extension's framework bindings require.
#[derive(Clone)]
pub struct PageSurface {
    page: Page,
}

impl PageSurface {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// The underlying page, for navigation and artifact capture
    pub fn page(&self) -> &Page {
        &self.page
    }

    fn script(&self, query: &Query, body: &str) -> DriverResult<String> {
        let q = serde_json::to_string(query)?;
        Ok(format!(
            r#"(() => {{
  const q = {q};
  const isVisible = (el) => {{
    if (!(el instanceof Element)) return false;
    const style = window.getComputedStyle(el);
    if (style.display === 'none' || style.visibility === 'hidden') return false;
    return el.getClientRects().length > 0;
  }};
  let els;
  if (q.kind === 'css') {{
    els = Array.from(document.querySelectorAll(q.selector));
  }} else {{
    const scope = q.tag === '*' ? 'body *' : q.tag;
    els = Array.from(document.querySelectorAll(scope));
    const needle = q.needle.toLowerCase();
    if (q.kind === 'text') {{
      els = els.filter((el) => (el.textContent || '').toLowerCase().includes(needle));
    }} else {{
      els = els.filter((el) =>
        (el.getAttribute('placeholder') || '').toLowerCase().includes(needle));
    }}
  }}
  els = els.filter(isVisible);
  els = els.filter((el) => !els.some((other) => other !== el && el.contains(other)));
  {body}
}})()"#
        ))
    }

    async fn eval<T: serde::de::DeserializeOwned>(
        &self,
        query: &Query,
        body: &str,
    ) -> DriverResult<T> {
        let script = self.script(query, body)?;
        let result = self.page.evaluate(script).await?;
        Ok(result.into_value()?)
    }
}

const FILL_SNIPPET: &str = r#"
  const proto = el instanceof HTMLTextAreaElement
    ? HTMLTextAreaElement.prototype
    : HTMLInputElement.prototype;
  const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
  setter.call(el, value);
  el.dispatchEvent(new Event('input', { bubbles: true }));
  el.dispatchEvent(new Event('change', { bubbles: true }));
"#;

#[async_trait]
impl DomSurface for PageSurface {
    async fn count(&self, query: &Query) -> DriverResult<usize> {
        self.eval(query, "return els.length;").await
    }

    async fn click(&self, query: &Query) -> DriverResult<bool> {
        self.eval(
            query,
            "if (!els.length) return false; els[0].click(); return true;",
        )
        .await
    }

    async fn click_last(&self, query: &Query) -> DriverResult<bool> {
        self.eval(
            query,
            "if (!els.length) return false; els[els.length - 1].click(); return true;",
        )
        .await
    }

    async fn fill_nth(&self, query: &Query, index: usize, value: &str) -> DriverResult<bool> {
        let value = serde_json::to_string(value)?;
        let body = format!(
            r#"
  if (els.length <= {index}) return false;
  const el = els[{index}];
  const value = {value};
{FILL_SNIPPET}
  return true;"#
        );
        self.eval(query, &body).await
    }

    async fn fill_first_empty(&self, query: &Query, value: &str) -> DriverResult<bool> {
        let value = serde_json::to_string(value)?;
        let body = format!(
            r#"
  const el = els.find((e) => !e.value);
  if (!el) return false;
  const value = {value};
{FILL_SNIPPET}
  el.dispatchEvent(new KeyboardEvent('keydown', {{ key: 'Enter', bubbles: true }}));
  el.dispatchEvent(new KeyboardEvent('keyup', {{ key: 'Enter', bubbles: true }}));
  return true;"#
        );
        self.eval(query, &body).await
    }

    async fn set_checked_all(&self, query: &Query, checked: bool) -> DriverResult<usize> {
        let body = format!(
            r#"
  let toggled = 0;
  for (const el of els) {{
    if (el.checked !== {checked}) {{ el.click(); toggled += 1; }}
  }}
  return toggled;"#
        );
        self.eval(query, &body).await
    }

    async fn text(&self, query: &Query) -> DriverResult<Option<String>> {
        self.eval(query, "return els.length ? els[0].textContent : null;")
            .await
    }

    async fn is_disabled(&self, query: &Query) -> DriverResult<Option<bool>> {
        self.eval(
            query,
            r#"
  if (!els.length) return null;
  const el = els[0];
  return el.disabled === true || el.getAttribute('aria-disabled') === 'true';"#,
        )
        .await
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeSurface;
    use super::*;

    fn role(queries: impl IntoIterator<Item = Query>) -> UiRole {
        UiRole::new("test-role", queries)
    }

    #[tokio::test]
    async fn resolve_tries_alternatives_in_order() {
        let surface = FakeSurface::new();
        surface.present(Query::css(".second"));
        let role = role([Query::css(".first"), Query::css(".second")]);

        let resolved = resolve(&surface, &role).await.unwrap();
        assert_eq!(resolved, Some(Query::css(".second")));
    }

    #[tokio::test]
    async fn wait_for_times_out_with_role_name() {
        let surface = FakeSurface::new();
        let role = role([Query::css(".never")]);

        let err = wait_for(&surface, &role, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::Timeout { .. }));
        assert!(err.to_string().contains("test-role"));
    }

    #[tokio::test]
    async fn wait_for_picks_up_late_elements() {
        let surface = FakeSurface::new();
        surface.insert(
            Query::css(".late"),
            super::fake::FakeNode {
                count: 1,
                appear_after: 2,
                ..Default::default()
            },
        );
        let role = role([Query::css(".late")]);

        let query = wait_for(&surface, &role, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(query, Query::css(".late"));
    }

    #[tokio::test]
    async fn click_if_visible_tolerates_absence() {
        let surface = FakeSurface::new();
        let role = role([Query::css(".optional")]);

        let clicked = click_if_visible(&surface, &role, Duration::from_millis(50))
            .await
            .unwrap();
        assert!(!clicked);
        assert!(surface.actions().is_empty());
    }

    #[tokio::test]
    async fn fill_first_empty_targets_next_open_slot() {
        let surface = FakeSurface::new();
        surface.insert(
            Query::css("input.word"),
            super::fake::FakeNode {
                count: 3,
                ..Default::default()
            },
        );
        let q = Query::css("input.word");

        assert!(surface.fill_first_empty(&q, "abandon").await.unwrap());
        assert!(surface.fill_first_empty(&q, "ability").await.unwrap());
        let actions = surface.actions();
        assert_eq!(actions.len(), 2);
        assert!(actions[0].ends_with("=abandon"));
        assert!(actions[1].ends_with("=ability"));
    }

    #[test]
    fn query_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Query::text("button", "Send")).unwrap();
        assert!(json.contains(r#""kind":"text""#));
        assert!(json.contains(r#""needle":"Send""#));
    }
}
