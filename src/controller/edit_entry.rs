use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::controller::{
    ledger_response, parse_category, JsonBody, JsonError, LedgerResponse, PathParams,
};
use crate::controller::add_entry::EntryRequest;
use crate::domain::use_case::edit_entry_use_case;

pub async fn edit_entry(
    State(app_state): State<AppState>,
    PathParams((category, index)): PathParams<(String, usize)>,
    JsonBody(request): JsonBody<EntryRequest>,
) -> Result<Json<LedgerResponse>, JsonError<'static>> {
    let category = parse_category(&category)?;
    edit_entry_use_case(
        &app_state.snapshot_store,
        app_state.shift_book.ledger(category),
        index,
        &request.value.as_input(),
    )
    .await?;
    Ok(Json(ledger_response(&app_state, category).await))
}
