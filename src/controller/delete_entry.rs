use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::controller::{
    auto_dispatch, ledger_response, parse_category, JsonError, LedgerResponse, PathParams,
};
use crate::domain::use_case::delete_entry_use_case;

pub async fn delete_entry(
    State(app_state): State<AppState>,
    PathParams((category, index)): PathParams<(String, usize)>,
) -> Result<Json<LedgerResponse>, JsonError<'static>> {
    let category = parse_category(&category)?;
    let (_, remaining) = delete_entry_use_case(
        &app_state.snapshot_store,
        app_state.shift_book.ledger(category),
        index,
    )
    .await?;
    let sync = if remaining == 0 {
        None
    } else {
        auto_dispatch(&app_state, category).await
    };
    Ok(Json(ledger_response(&app_state, category).await.with_sync(sync)))
}
