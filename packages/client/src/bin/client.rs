//! Terminal chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin randchat-client -- --user-id 42 --name Alice
//! ```

use clap::Parser;
use randchat_client::cli::Cli;
use randchat_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &cli.log_level);

    // Run the client
    if let Err(e) = randchat_client::run_client(cli).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
