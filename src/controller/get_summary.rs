use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::domain::use_case::{get_summary_use_case, ShiftSummary};

pub async fn get_summary(State(app_state): State<AppState>) -> Json<ShiftSummary> {
    Json(get_summary_use_case(&app_state.shift_book).await)
}
