//! Terminal client for CodeArena coding battles.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin codearena-client -- --backend-url http://localhost:4000
//! ```

use clap::Parser;
use codearena_client::config::Cli;
use codearena_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &cli.log_level);

    if let Err(e) = codearena_client::run_client(cli).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
