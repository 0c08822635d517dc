use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::controller::{ledger_response, parse_category, JsonError, PathParams};
use crate::controller::dispatch_entry::DispatchResponse;
use crate::domain::use_case::dispatch_ledger_use_case;

pub async fn dispatch_ledger(
    State(app_state): State<AppState>,
    PathParams(category): PathParams<String>,
) -> Result<Json<DispatchResponse>, JsonError<'static>> {
    let category = parse_category(&category)?;
    let outcome = dispatch_ledger_use_case(
        &app_state.snapshot_store,
        &app_state.dispatch_gateway,
        app_state.shift_book.ledger(category),
    )
    .await?;
    Ok(Json(DispatchResponse {
        outcome,
        ledger: ledger_response(&app_state, category).await,
    }))
}
