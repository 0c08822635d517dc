use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::controller::{
    auto_dispatch, ledger_response, parse_category, JsonError, LedgerResponse, PathParams,
};
use crate::domain::use_case::clear_ledger_use_case;

/// Clearing an auto-dispatch category sends the now empty list.
pub async fn clear_ledger(
    State(app_state): State<AppState>,
    PathParams(category): PathParams<String>,
) -> Result<Json<LedgerResponse>, JsonError<'static>> {
    let category = parse_category(&category)?;
    clear_ledger_use_case(
        &app_state.snapshot_store,
        app_state.shift_book.ledger(category),
    )
    .await;
    let sync = auto_dispatch(&app_state, category).await;
    Ok(Json(ledger_response(&app_state, category).await.with_sync(sync)))
}
