//! GeroWallet E2E Driver
//!
//! Drives a real Chromium with the GeroWallet extension force-loaded and
//! walks its UI through onboarding, transaction, and staking flows.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Fixture composition                     │
//! ├────────────────────────────────────────────────────────────┤
//! │  ExtensionFixture                                          │
//! │    ├── ExtensionSession (profile, browser, extension id)   │
//! │    └── ArtifactSink (failure screenshots)                  │
//! │  WalletFixture: ExtensionFixture +                         │
//! │    ├── options page + console capture                      │
//! │    └── WalletDriver (create/restore/login/address)         │
//! │  CardanoFixture: WalletFixture +                           │
//! │    └── CardanoDriver (send/balance/delegate/withdraw)      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flow drivers never talk to the page directly: every element lookup
//! goes through a [`dom::DomSurface`], with all fallback selector unions
//! collected in [`roles`]. Unit tests substitute a scripted fake surface.

pub mod artifacts;
pub mod console;
pub mod dom;
pub mod error;
pub mod fixture;
pub mod flows;
pub mod roles;
pub mod session;
pub mod wallet;

pub use dom::{DomSurface, PageSurface, Query, UiRole};
pub use error::{DriverError, DriverResult};
pub use fixture::{CardanoFixture, ExtensionFixture, WalletFixture};
pub use flows::CardanoDriver;
pub use session::ExtensionSession;
pub use wallet::WalletDriver;
