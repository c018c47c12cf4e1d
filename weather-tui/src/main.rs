//! Binary crate for the `weather` lookup widget.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The terminal widget (input, event loop, rendering)

use clap::Parser;

mod app;
mod cli;
mod input;
mod logging;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        }
    };

    let cmd = cli::Cli::parse();
    cmd.run().await
}
