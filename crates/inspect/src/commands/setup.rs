//! Test-wallet generation
//!
//! Produces fresh 24-word mnemonics for the primary and secondary test
//! wallets and records them for the E2E environment. Preprod only:
//! these phrases go into env files and logs, never near real funds.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use gero_common::cardano::generate_mnemonic;

#[derive(Args)]
pub struct SetupArgs {
    /// Where to write the generated wallet record
    #[arg(long, default_value = "config/test-wallets.json")]
    output: PathBuf,
}

pub fn execute(args: &SetupArgs) -> anyhow::Result<()> {
    println!("Generating test wallet mnemonics...\n");

    let wallets = [
        ("Test Wallet 1 (Primary)", generate_mnemonic()),
        ("Test Wallet 2 (Secondary)", generate_mnemonic()),
    ];

    println!("{}", "=".repeat(80));
    for (name, mnemonic) in &wallets {
        println!("\n{name}");
        println!("{}", "-".repeat(80));
        println!("Mnemonic ({} words):", mnemonic.split_whitespace().count());
        println!("{mnemonic}");
    }
    println!("\n{}", "=".repeat(80));

    let record = json!({
        "generated": chrono::Utc::now().to_rfc3339(),
        "network": "preprod",
        "wallets": wallets.iter().enumerate().map(|(i, (name, mnemonic))| json!({
            "id": i + 1,
            "name": name,
            "mnemonic": mnemonic,
            "note": "Fund from the preprod faucet: https://docs.cardano.org/cardano-testnet/tools/faucet",
        })).collect::<Vec<_>>(),
    });

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.output, serde_json::to_string_pretty(&record)?)?;
    println!("\nWallet record written to {}", args.output.display());

    println!("\nNext steps:");
    println!("  1. Export the phrases for the suites:");
    println!("       TEST_WALLET_1_MNEMONIC=\"{}\"", wallets[0].1);
    println!("       TEST_WALLET_2_MNEMONIC=\"{}\"", wallets[1].1);
    println!("  2. Restore wallet 1 in the extension and copy its address");
    println!("  3. Fund it from the preprod faucet and wait a couple of minutes");
    println!("  4. Run the suites: GERO_E2E=1 cargo test -p gero-e2e");
    println!("\nIMPORTANT: preprod test wallets only. Never reuse these phrases with real funds.");

    Ok(())
}
