use std::collections::BTreeSet;
use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::controller;
use crate::domain::entity::{Category, ShiftBook};
use crate::gateway::json_file_snapshot_store::JsonFileSnapshotStore;
use crate::gateway::webhook_dispatch_gateway::WebhookDispatchGateway;

#[derive(Clone, Debug)]
pub struct AppState {
    pub shift_book: Arc<ShiftBook>,
    pub snapshot_store: JsonFileSnapshotStore,
    pub dispatch_gateway: WebhookDispatchGateway,
    pub auto_dispatch: Arc<BTreeSet<Category>>,
}

pub fn build_app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(controller::root))
        .nest(
            "/api/v1",
            Router::new()
                .route("/summary", get(controller::get_summary::get_summary))
                .route(
                    "/ledgers/:category",
                    get(controller::get_ledger::get_ledger)
                        .delete(controller::clear_ledger::clear_ledger),
                )
                .route(
                    "/ledgers/:category/entries",
                    post(controller::add_entry::add_entry),
                )
                .route(
                    "/ledgers/:category/entries/:index",
                    put(controller::edit_entry::edit_entry)
                        .delete(controller::delete_entry::delete_entry),
                )
                .route(
                    "/ledgers/:category/entries/:index/dispatch",
                    post(controller::dispatch_entry::dispatch_entry),
                )
                .route(
                    "/ledgers/:category/dispatch",
                    post(controller::dispatch_ledger::dispatch_ledger),
                )
                .route(
                    "/cash",
                    get(controller::cash_count::get_cash_count)
                        .delete(controller::cash_count::clear_cash_count),
                )
                .route(
                    "/cash/:denomination",
                    put(controller::cash_count::set_cash_count),
                ),
        )
        .with_state(app_state)
}
