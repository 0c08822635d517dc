use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::controller::{CashCountResponse, JsonBody, JsonError, PathParams, RawInput};
use crate::domain::use_case::{clear_cash_count_use_case, set_cash_count_use_case};

#[derive(Deserialize, Debug)]
pub struct CashCountRequest {
    count: RawInput,
}

pub async fn get_cash_count(State(app_state): State<AppState>) -> Json<CashCountResponse> {
    Json(CashCountResponse::from(
        &*app_state.shift_book.cash_count().lock().await,
    ))
}

pub async fn set_cash_count(
    State(app_state): State<AppState>,
    PathParams(denomination): PathParams<u32>,
    JsonBody(request): JsonBody<CashCountRequest>,
) -> Result<Json<CashCountResponse>, JsonError<'static>> {
    let cash_count = set_cash_count_use_case(
        &app_state.snapshot_store,
        app_state.shift_book.cash_count(),
        denomination,
        &request.count.as_input(),
    )
    .await?;
    Ok(Json(CashCountResponse::from(&cash_count)))
}

pub async fn clear_cash_count(State(app_state): State<AppState>) -> Json<CashCountResponse> {
    let cash_count =
        clear_cash_count_use_case(&app_state.snapshot_store, app_state.shift_book.cash_count())
            .await;
    Json(CashCountResponse::from(&cash_count))
}
