//! UI role registry
//!
//! Every selector union the flow drivers rely on, in one place. The
//! wallet ships no automation ids, so each role carries the fallbacks
//! observed against real builds; extending a role is a one-line change
//! here and nowhere else.

use gero_common::config::Network;

use crate::dom::{Query, UiRole};

// ---- onboarding -----------------------------------------------------------

pub fn welcome_screen() -> UiRole {
    UiRole::new(
        "welcome screen",
        [
            Query::css(r#"[data-testid="welcome-screen"]"#),
            Query::css(".welcome-container"),
            Query::text("button", "Create or Import Seed Phrase"),
        ],
    )
}

pub fn network_chooser() -> UiRole {
    UiRole::new(
        "network chooser",
        [
            Query::text("button", "Cardano Mainnet"),
            Query::css(r#"[data-testid="network-selector"]"#),
        ],
    )
}

pub fn network_option(network: Network) -> UiRole {
    UiRole::new(
        "network option",
        [
            Query::text(".v-list-item", network.label()),
            Query::text("li", network.label()),
        ],
    )
}

pub fn onboarding_entry() -> UiRole {
    UiRole::new(
        "create/import entry point",
        [
            Query::text("button", "Create or Import Seed Phrase"),
            Query::text("button", "Import Wallet"),
            Query::text("button", "Restore Wallet"),
        ],
    )
}

pub fn create_branch() -> UiRole {
    UiRole::new(
        "create wallet branch",
        [
            Query::text("button", "Create Wallet"),
            Query::text(r#"[role="button"]"#, "Create Wallet"),
            Query::text("*", "Create Wallet"),
        ],
    )
}

pub fn restore_branch() -> UiRole {
    UiRole::new(
        "restore wallet branch",
        [
            Query::text("button", "Restore Wallet"),
            Query::text("button", "Import Wallet"),
            Query::text("*", "Restore Wallet"),
        ],
    )
}

pub fn phrase_length_option(word_count: usize) -> UiRole {
    UiRole::new(
        "phrase length option",
        [
            Query::text("button", format!("{word_count} words")),
            Query::text("button", format!("{word_count}")),
        ],
    )
}

pub fn mnemonic_textarea() -> UiRole {
    UiRole::new(
        "mnemonic phrase input",
        [
            Query::css("textarea"),
            Query::placeholder("input", "phrase"),
        ],
    )
}

pub fn mnemonic_word_input() -> UiRole {
    UiRole::new(
        "mnemonic word input",
        [
            Query::css(r#"input[type="text"]"#),
            Query::placeholder("input", "word"),
        ],
    )
}

pub fn wallet_name_input() -> UiRole {
    UiRole::new(
        "wallet name input",
        [
            Query::placeholder("input", "name"),
            Query::css(r#"input[type="text"]"#),
        ],
    )
}

pub fn password_inputs() -> UiRole {
    UiRole::new("password inputs", [Query::css(r#"input[type="password"]"#)])
}

pub fn consent_checkboxes() -> UiRole {
    UiRole::new(
        "consent checkboxes",
        [Query::css(r#"input[type="checkbox"]"#)],
    )
}

pub fn submit_button() -> UiRole {
    UiRole::new(
        "onboarding submit",
        [
            Query::text("button", "Create"),
            Query::text("button", "Import"),
            Query::text("button", "Restore"),
            Query::css(r#"button[type="submit"]"#),
        ],
    )
}

pub fn form_error() -> UiRole {
    UiRole::new(
        "form error",
        [
            Query::css(".error"),
            Query::css(".error-message"),
            Query::css(r#"[role="alert"]"#),
        ],
    )
}

// ---- onboarding carousel --------------------------------------------------

pub fn carousel() -> UiRole {
    UiRole::new(
        "onboarding carousel",
        [
            Query::css(".v-dialog"),
            Query::css(r#"[role="dialog"]"#),
            Query::css(".v-overlay"),
        ],
    )
}

pub fn carousel_next() -> UiRole {
    UiRole::new(
        "carousel next",
        [
            Query::text("button", "Next"),
            Query::text("button", "Continue"),
        ],
    )
}

pub fn carousel_finish() -> UiRole {
    UiRole::new(
        "carousel finish",
        [
            Query::text("button", "Finish"),
            Query::text("button", "Got it"),
            Query::text("button", "Done"),
        ],
    )
}

// ---- dashboard / login ----------------------------------------------------

pub fn dashboard() -> UiRole {
    UiRole::new(
        "dashboard",
        [
            Query::css(r#"[data-testid="dashboard"]"#),
            Query::css(".dashboard-container"),
            Query::text("h1", "Dashboard"),
            Query::text("*", "Portfolio"),
        ],
    )
}

pub fn login_screen() -> UiRole {
    UiRole::new(
        "login screen",
        [
            Query::css(r#"[data-testid="login-screen"]"#),
            Query::css(".login-container"),
            Query::css(r#"input[type="password"]"#),
        ],
    )
}

pub fn login_button() -> UiRole {
    UiRole::new(
        "login button",
        [
            Query::text("button", "Login"),
            Query::text("button", "Unlock"),
            Query::css(r#"button[type="submit"]"#),
        ],
    )
}

pub fn lock_control() -> UiRole {
    UiRole::new(
        "lock control",
        [
            Query::css(r#"button[aria-label*="lock" i]"#),
            Query::text("button", "Lock"),
            Query::css(r#"[data-testid="lock-wallet"]"#),
            Query::css(".lock-button"),
        ],
    )
}

pub fn settings_button() -> UiRole {
    UiRole::new(
        "settings button",
        [
            Query::text("button", "Settings"),
            Query::css(r#"[aria-label="Settings"]"#),
            Query::css(".settings-icon"),
        ],
    )
}

pub fn settings_lock_option() -> UiRole {
    UiRole::new("settings lock option", [Query::text("*", "lock")])
}

// ---- balance / addresses --------------------------------------------------

pub fn balance_display() -> UiRole {
    UiRole::new(
        "balance display",
        [
            Query::css(r#"[data-testid="wallet-balance"]"#),
            Query::css(".balance"),
            Query::css(".total-balance"),
        ],
    )
}

pub fn address_display() -> UiRole {
    UiRole::new(
        "address display",
        [
            Query::css(r#"[data-testid="wallet-address"]"#),
            Query::css(".wallet-address"),
            Query::css(".receive-address"),
        ],
    )
}

pub fn receive_button() -> UiRole {
    UiRole::new("receive button", [Query::text("button", "Receive")])
}

// ---- transactions ---------------------------------------------------------

pub fn send_button() -> UiRole {
    UiRole::new(
        "send button",
        [Query::text("button", "Send"), Query::text("a", "Send")],
    )
}

pub fn send_form() -> UiRole {
    UiRole::new(
        "send form",
        [
            Query::css(r#"[data-testid="send-form"]"#),
            Query::css(".send-container"),
            Query::text("*", "Quick Send"),
            Query::text("*", "Recipient Address"),
        ],
    )
}

pub fn recipient_input() -> UiRole {
    UiRole::new(
        "recipient input",
        [
            Query::placeholder("input", "address"),
            Query::placeholder("textarea", "address"),
        ],
    )
}

pub fn amount_input() -> UiRole {
    UiRole::new(
        "amount input",
        [
            Query::css(r#"input[type="number"]"#),
            Query::placeholder("input", "amount"),
        ],
    )
}

pub fn next_button() -> UiRole {
    UiRole::new(
        "next button",
        [
            Query::text("button", "Next"),
            Query::text("button", "Continue"),
        ],
    )
}

pub fn confirm_transaction_screen() -> UiRole {
    UiRole::new(
        "transaction confirmation",
        [
            Query::css(r#"[data-testid="confirm-transaction"]"#),
            Query::css(".confirm-container"),
        ],
    )
}

pub fn confirm_send_button() -> UiRole {
    UiRole::new(
        "confirm send",
        [
            Query::text("button", "Confirm"),
            Query::text("button", "Send"),
        ],
    )
}

pub fn transaction_success() -> UiRole {
    UiRole::new(
        "transaction success",
        [
            Query::css(r#"[data-testid="transaction-success"]"#),
            Query::css(".success-message"),
            Query::css(".tx-hash"),
        ],
    )
}

pub fn tx_hash_display() -> UiRole {
    UiRole::new(
        "transaction hash",
        [
            Query::css(r#"[data-testid="tx-hash"]"#),
            Query::css(".tx-hash"),
            Query::css("code"),
        ],
    )
}

pub fn history_button() -> UiRole {
    UiRole::new(
        "history button",
        [
            Query::text("button", "Transactions"),
            Query::text("a", "Transactions"),
            Query::css(r#"[href*="transactions"]"#),
        ],
    )
}

// ---- staking --------------------------------------------------------------

pub fn staking_button() -> UiRole {
    UiRole::new(
        "staking button",
        [
            Query::text("button", "Staking"),
            Query::text("a", "Staking"),
            Query::css(r#"[href*="staking"]"#),
        ],
    )
}

pub fn staking_page() -> UiRole {
    UiRole::new(
        "staking page",
        [
            Query::css(r#"[data-testid="staking-page"]"#),
            Query::css(".staking-container"),
        ],
    )
}

pub fn pool_search_input() -> UiRole {
    UiRole::new(
        "pool search input",
        [
            Query::placeholder("input", "pool"),
            Query::placeholder("input", "search"),
        ],
    )
}

pub fn pool_list_entry() -> UiRole {
    UiRole::new(
        "pool list entry",
        [
            Query::css(r#"[data-testid="pool-card"]"#),
            Query::css(".pool-item"),
            Query::css(".stake-pool"),
        ],
    )
}

pub fn delegate_button() -> UiRole {
    UiRole::new(
        "delegate button",
        [
            Query::text("button", "Delegate"),
            Query::text("button", "Select"),
        ],
    )
}

pub fn delegation_status() -> UiRole {
    UiRole::new(
        "delegation status",
        [
            Query::css(r#"[data-testid="delegation-status"]"#),
            Query::css(".delegation-info"),
            Query::css(".current-pool"),
            Query::text("*", "delegated to"),
        ],
    )
}

pub fn confirm_delegation_screen() -> UiRole {
    UiRole::new(
        "delegation confirmation",
        [
            Query::css(r#"[data-testid="confirm-delegation"]"#),
            Query::css(".confirm-container"),
        ],
    )
}

pub fn confirm_delegate_button() -> UiRole {
    UiRole::new(
        "confirm delegate",
        [
            Query::text("button", "Confirm"),
            Query::text("button", "Delegate"),
        ],
    )
}

pub fn delegation_success() -> UiRole {
    UiRole::new(
        "delegation success",
        [
            Query::css(r#"[data-testid="delegation-success"]"#),
            Query::css(".success-message"),
        ],
    )
}

pub fn withdraw_button() -> UiRole {
    UiRole::new("withdraw button", [Query::text("button", "Withdraw")])
}

pub fn confirm_withdrawal_screen() -> UiRole {
    UiRole::new(
        "withdrawal confirmation",
        [
            Query::css(r#"[data-testid="confirm-withdrawal"]"#),
            Query::css(".confirm-container"),
        ],
    )
}

pub fn confirm_withdraw_button() -> UiRole {
    UiRole::new(
        "confirm withdraw",
        [
            Query::text("button", "Confirm"),
            Query::text("button", "Withdraw"),
        ],
    )
}

pub fn withdrawal_success() -> UiRole {
    UiRole::new(
        "withdrawal success",
        [
            Query::css(r#"[data-testid="withdrawal-success"]"#),
            Query::css(".success-message"),
        ],
    )
}
