use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::controller::{ledger_response, parse_category, JsonError, LedgerResponse, PathParams};

pub async fn get_ledger(
    State(app_state): State<AppState>,
    PathParams(category): PathParams<String>,
) -> Result<Json<LedgerResponse>, JsonError<'static>> {
    let category = parse_category(&category)?;
    Ok(Json(ledger_response(&app_state, category).await))
}
