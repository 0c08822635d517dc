use axum::extract::State;
use axum::{debug_handler, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::controller::{ledger_response, parse_category, JsonError, LedgerResponse, PathParams};
use crate::domain::use_case::{dispatch_entry_use_case, DispatchOutcome};

#[derive(Serialize, Debug)]
pub struct DispatchResponse {
    pub outcome: DispatchOutcome,
    pub ledger: LedgerResponse,
}

/// The dispatch runs in its own task, so a client that disconnects while the
/// webhook is answering does not cut the request short.
#[debug_handler]
pub async fn dispatch_entry(
    State(app_state): State<AppState>,
    PathParams((category, index)): PathParams<(String, usize)>,
) -> Result<Json<DispatchResponse>, JsonError<'static>> {
    let category = parse_category(&category)?;
    let state = app_state.clone();
    let outcome = tokio::spawn(async move {
        dispatch_entry_use_case(
            &state.snapshot_store,
            &state.dispatch_gateway,
            state.shift_book.ledger(category),
            index,
        )
        .await
    })
    .await
    .map_err(anyhow::Error::from)??;
    Ok(Json(DispatchResponse {
        outcome,
        ledger: ledger_response(&app_state, category).await,
    }))
}
