//! GeroWallet UI inspector and test-wallet setup
//!
//! Opens the live extension UI and dumps DOM structure (buttons, inputs,
//! overlays) so new selector fallbacks can be reverse-engineered when a
//! wallet build changes its markup. Also generates fresh test-wallet
//! mnemonics for the E2E environment.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod commands;
mod dump;

use commands::{buttons, flow, setup, ui};

/// DOM inspector for the GeroWallet extension UI
#[derive(Parser)]
#[command(name = "gero-inspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the built extension bundle (required for browser commands)
    #[arg(long, env = "EXTENSION_PATH", global = true)]
    extension: Option<PathBuf>,

    /// Keep the browser open after dumping, for manual poking
    #[arg(long, global = true)]
    hold: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the welcome screen and the create/import overlay
    Ui,

    /// Walk to the restore form and dump the phrase-length buttons
    Buttons,

    /// Step through the whole onboarding flow, dumping state and taking
    /// a screenshot at each step
    Flow,

    /// Generate fresh test-wallet mnemonics (no browser)
    SetupWallets(setup::SetupArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    if let Commands::SetupWallets(args) = &cli.command {
        return setup::execute(args);
    }

    let extension = cli
        .extension
        .context("extension bundle required: pass --extension or set EXTENSION_PATH")?;
    let config = gero_common::HarnessConfig::for_extension(extension)?;
    let session = gero_driver::ExtensionSession::launch(&config).await?;
    println!("Extension ID: {}", session.extension_id());

    let result = match cli.command {
        Commands::Ui => ui::execute(&session).await,
        Commands::Buttons => buttons::execute(&session).await,
        Commands::Flow => flow::execute(&session).await,
        Commands::SetupWallets(_) => unreachable!("handled above"),
    };

    if cli.hold {
        println!("\nBrowser stays open for manual inspection. Press Ctrl+C to close.");
        tokio::signal::ctrl_c().await?;
    }

    session.close().await?;
    result
}
