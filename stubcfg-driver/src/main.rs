//! stubcfg - stub-window and extraction schedule tool
//!
//! Logs go to stderr so stdout carries only the rendered output.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use stubcfg_driver::{run, Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stubcfg=info,stubcfg_driver=info,stubcfg_common=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Build identification right after tracing init
    info!(
        "stubcfg v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli = Cli::parse();
    let rendered = run(cli)?;
    println!("{}", rendered);

    Ok(())
}
