use axum::extract::State;
use axum::http::StatusCode;
use axum::{debug_handler, Json};
use serde::Deserialize;

use crate::app::AppState;
use crate::controller::{
    auto_dispatch, ledger_response, parse_category, JsonBody, JsonError, LedgerResponse,
    PathParams, RawInput,
};
use crate::domain::use_case::add_entry_use_case;

#[derive(Deserialize, Debug)]
pub struct EntryRequest {
    pub value: RawInput,
}

#[debug_handler]
pub async fn add_entry(
    State(app_state): State<AppState>,
    PathParams(category): PathParams<String>,
    JsonBody(request): JsonBody<EntryRequest>,
) -> Result<(StatusCode, Json<LedgerResponse>), JsonError<'static>> {
    let category = parse_category(&category)?;
    add_entry_use_case(
        &app_state.snapshot_store,
        app_state.shift_book.ledger(category),
        &request.value.as_input(),
    )
    .await?;
    let sync = auto_dispatch(&app_state, category).await;
    Ok((
        StatusCode::CREATED,
        Json(ledger_response(&app_state, category).await.with_sync(sync)),
    ))
}
