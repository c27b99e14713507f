//! Terminal client for an anonymous random-partner chat service.
//!
//! The client finds a chat partner through the backend's HTTP API, then lets
//! the user talk in the matched room. Incoming messages arrive over a
//! WebSocket pub/sub gateway.
//!
//! Layers:
//! - [`domain`]: data shapes and ports
//! - [`usecase`]: find partner, send message, leave room
//! - [`infrastructure`]: HTTP, WebSocket, and platform adapters
//! - [`ui`]: router, store, views, and bootstrap

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

use std::sync::Arc;

use crate::{
    cli::Cli,
    infrastructure::Store,
    ui::{App, AppError, Router, RustylineTerminal},
};

/// Build the app from command-line arguments and run it on the terminal.
pub async fn run_client(cli: Cli) -> Result<(), AppError> {
    let config = cli.app_config()?;
    tracing::info!(
        api = config.api_base_url(),
        realtime = config.realtime_url(),
        "Starting client"
    );

    let mut builder = App::builder()
        .use_store(Arc::new(Store::new()))
        .use_router(Router::new())
        .use_platform(cli.platform()?)
        .provide_config(config)
        .with_search_prefill(cli.search_prefill()?);
    if cli.no_realtime {
        builder = builder.without_realtime();
    }
    let mut app = builder.build().await?;

    let mut terminal = RustylineTerminal::new()?;
    app.mount(&mut terminal, &cli.start_path).await
}
