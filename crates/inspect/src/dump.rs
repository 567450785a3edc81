//! DOM dump helpers
//!
//! Raw element listings printed to stdout. These intentionally bypass the
//! role registry: their whole point is discovering what the registry
//! should say next.

use chromiumoxide::Page;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ButtonInfo {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct InputInfo {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub placeholder: Option<String>,
    pub visible: bool,
}

const VISIBLE_FN: &str = r#"
  const isVisible = (el) =>
    el.getClientRects().length > 0 &&
    window.getComputedStyle(el).visibility !== 'hidden';
"#;

async fn eval<T: serde::de::DeserializeOwned>(page: &Page, body: &str) -> anyhow::Result<T> {
    let script = format!("(() => {{\n{VISIBLE_FN}\n{body}\n}})()");
    Ok(page.evaluate(script).await?.into_value()?)
}

/// Every `<button>` on the page, matching `selector` scope
pub async fn buttons(page: &Page, selector: &str) -> anyhow::Result<Vec<ButtonInfo>> {
    let selector = serde_json::to_string(selector)?;
    eval(
        page,
        &format!(
            r#"
  return Array.from(document.querySelectorAll({selector})).map((el) => ({{
    text: (el.textContent || '').trim(),
    visible: isVisible(el),
  }}));"#
        ),
    )
    .await
}

/// Visible `<input>` elements with type and placeholder
pub async fn inputs(page: &Page) -> anyhow::Result<Vec<InputInfo>> {
    eval(
        page,
        r#"
  return Array.from(document.querySelectorAll('input')).filter(isVisible).map((el) => ({
    type: el.getAttribute('type'),
    placeholder: el.getAttribute('placeholder'),
    visible: true,
  }));"#,
    )
    .await
}

/// Visible `<textarea>` placeholders
pub async fn textareas(page: &Page) -> anyhow::Result<Vec<InputInfo>> {
    eval(
        page,
        r#"
  return Array.from(document.querySelectorAll('textarea')).filter(isVisible).map((el) => ({
    type: null,
    placeholder: el.getAttribute('placeholder'),
    visible: true,
  }));"#,
    )
    .await
}

/// Count of visible overlay/dialog containers
pub async fn overlay_count(page: &Page) -> anyhow::Result<usize> {
    eval(
        page,
        r#"
  return Array.from(
    document.querySelectorAll('.v-overlay, .v-dialog, .modal, [role="dialog"]')
  ).filter(isVisible).length;"#,
    )
    .await
}

/// Text content of each overlay, truncated
pub async fn overlay_text(page: &Page) -> anyhow::Result<Vec<String>> {
    eval(
        page,
        r#"
  return Array.from(document.querySelectorAll('.v-overlay, .v-dialog')).map((el) =>
    (el.textContent || '').slice(0, 200));"#,
    )
    .await
}

pub fn print_buttons(label: &str, buttons: &[ButtonInfo]) {
    println!("\n{label} ({}):", buttons.len());
    for (i, b) in buttons.iter().enumerate() {
        println!("  {i}. \"{}\" (visible: {})", b.text, b.visible);
    }
}

pub fn print_inputs(label: &str, inputs: &[InputInfo]) {
    println!("\n{label} ({}):", inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        println!(
            "  {i}. type=\"{}\", placeholder=\"{}\"",
            input.kind.as_deref().unwrap_or("-"),
            input.placeholder.as_deref().unwrap_or("-"),
        );
    }
}
