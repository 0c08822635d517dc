use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::app::{build_app, AppState};
use crate::config::Config;
use crate::domain::use_case::load_shift_book_use_case;
use crate::gateway::json_file_snapshot_store::JsonFileSnapshotStore;
use crate::gateway::webhook_dispatch_gateway::WebhookDispatchGateway;

mod app;
mod config;
mod controller;
mod domain;
mod gateway;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let snapshot_store = JsonFileSnapshotStore::open(&config.data_dir).await?;
    let dispatch_gateway = WebhookDispatchGateway::new(
        config.webhook_url.clone(),
        config
            .category_webhooks
            .iter()
            .cloned()
            .collect::<HashMap<_, _>>(),
        config.dispatch_timeout(),
    )?;
    let shift_book = load_shift_book_use_case(&snapshot_store).await;

    let app = build_app(AppState {
        shift_book: Arc::new(shift_book),
        snapshot_store,
        dispatch_gateway,
        auto_dispatch: Arc::new(config.auto_dispatch.iter().copied().collect()),
    })
    .layer(CompressionLayer::new())
    .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        address = %config.bind,
        webhook = %config.webhook_url,
        "Listening to new connections"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
