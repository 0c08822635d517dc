use std::borrow::Cow;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::app::AppState;
use crate::domain::entity::{
    CashCount, CashCountError, Category, DispatchStatus, Ledger, LedgerError, DENOMINATIONS,
};
use crate::domain::gateway::DispatchError;
use crate::domain::use_case::{sync_ledger_use_case, DispatchEntryError};

pub mod add_entry;
pub mod cash_count;
pub mod clear_ledger;
pub mod delete_entry;
pub mod dispatch_entry;
pub mod dispatch_ledger;
pub mod edit_entry;
pub mod get_ledger;
pub mod get_summary;

pub async fn root() -> &'static str {
    "Arqueo"
}

#[derive(Debug)]
pub struct JsonError<'a> {
    status: StatusCode,
    message: Cow<'a, str>,
}

impl<'a> JsonError<'a> {
    pub fn new(status: StatusCode, message: Cow<'a, str>) -> Self {
        Self { status, message }
    }

    pub fn not_found(message: Cow<'a, str>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: Cow<'a, str>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unprocessable_entity(message: Cow<'a, str>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn bad_gateway(message: Cow<'a, str>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl IntoResponse for JsonError<'_> {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<anyhow::Error> for JsonError<'_> {
    fn from(value: anyhow::Error) -> Self {
        error!(err = ?value, "Unexpected error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unexpected error: {value}").into(),
        )
    }
}

impl From<LedgerError> for JsonError<'_> {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::Validation(_) => Self::unprocessable_entity(value.to_string().into()),
            LedgerError::EntryNotFound(_) => Self::not_found(value.to_string().into()),
            LedgerError::EntryBusy(_) => Self::conflict(value.to_string().into()),
        }
    }
}

impl From<DispatchError> for JsonError<'_> {
    fn from(value: DispatchError) -> Self {
        Self::bad_gateway(value.to_string().into())
    }
}

impl From<DispatchEntryError> for JsonError<'_> {
    fn from(value: DispatchEntryError) -> Self {
        match value {
            DispatchEntryError::Ledger(err) => err.into(),
            DispatchEntryError::Dispatch(err) => err.into(),
        }
    }
}

impl From<CashCountError> for JsonError<'_> {
    fn from(value: CashCountError) -> Self {
        Self::not_found(value.to_string().into())
    }
}

impl From<JsonRejection> for JsonError<'_> {
    fn from(value: JsonRejection) -> Self {
        Self::new(value.status(), value.body_text().into())
    }
}

impl From<PathRejection> for JsonError<'_> {
    fn from(value: PathRejection) -> Self {
        Self::new(value.status(), value.body_text().into())
    }
}

pub type ApiError = JsonError<'static>;

/// [`Json`] whose rejections are reported as a [`JsonError`] body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// [`axum::extract::Path`] whose rejections are reported as a [`JsonError`]
/// body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParams<T>(pub T);

/// Unknown categories are reported as missing resources rather than as
/// malformed paths.
pub fn parse_category(category: &str) -> Result<Category, JsonError<'static>> {
    category
        .parse()
        .map_err(|err: anyhow::Error| JsonError::not_found(err.to_string().into()))
}

/// Amounts arrive either as typed text or as JSON numbers.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum RawInput {
    Text(String),
    Number(f64),
}

impl RawInput {
    pub fn as_input(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Number(number) => Cow::Owned(number.to_string()),
        }
    }
}

/// Formats an amount as Argentine pesos, e.g. `$ 1.234,50`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits: Vec<char> = (cents / 100).to_string().chars().collect();
    let integer_part = digits
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(".");
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("$ {sign}{integer_part},{:02}", cents % 100)
}

#[derive(Serialize, Debug)]
pub struct EntryResponse {
    index: usize,
    value: f64,
    display: String,
    status: DispatchStatus,
    sent: bool,
    dispatching: bool,
}

#[derive(Serialize, Debug)]
pub struct LedgerResponse {
    category: Category,
    label: &'static str,
    entries: Vec<EntryResponse>,
    total: f64,
    total_display: String,
    count: usize,
    unsent_count: usize,
    /// Present when the category re-sends its whole list after a change.
    #[serde(skip_serializing_if = "Option::is_none")]
    sync: Option<SyncReport>,
}

impl LedgerResponse {
    pub fn with_sync(mut self, sync: Option<SyncReport>) -> Self {
        self.sync = sync;
        self
    }
}

impl From<&Ledger> for LedgerResponse {
    fn from(ledger: &Ledger) -> Self {
        Self {
            category: ledger.category(),
            label: ledger.category().label(),
            entries: ledger
                .entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| EntryResponse {
                    index,
                    value: entry.value().amount(),
                    display: format_currency(entry.value().amount()),
                    status: entry.status(),
                    sent: entry.sent(),
                    dispatching: entry.dispatching(),
                })
                .collect(),
            total: ledger.total(),
            total_display: format_currency(ledger.total()),
            count: ledger.count(),
            unsent_count: ledger.unsent_count(),
            sync: None,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct SyncReport {
    delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Re-sends the whole list of an auto-dispatch category. A failed sync never
/// undoes the change that triggered it.
pub async fn auto_dispatch(app_state: &AppState, category: Category) -> Option<SyncReport> {
    if !app_state.auto_dispatch.contains(&category) {
        return None;
    }
    let result = sync_ledger_use_case(
        &app_state.snapshot_store,
        &app_state.dispatch_gateway,
        app_state.shift_book.ledger(category),
    )
    .await;
    Some(match result {
        Ok(()) => SyncReport {
            delivered: true,
            error: None,
        },
        Err(err) => SyncReport {
            delivered: false,
            error: Some(err.to_string()),
        },
    })
}

pub async fn ledger_response(app_state: &AppState, category: Category) -> LedgerResponse {
    LedgerResponse::from(&*app_state.shift_book.ledger(category).lock().await)
}

#[derive(Serialize, Debug)]
pub struct DenominationResponse {
    denomination: u32,
    count: u32,
    subtotal: u64,
    subtotal_display: String,
}

#[derive(Serialize, Debug)]
pub struct CashCountResponse {
    denominations: Vec<DenominationResponse>,
    total: u64,
    total_display: String,
}

impl From<&CashCount> for CashCountResponse {
    fn from(cash_count: &CashCount) -> Self {
        Self {
            denominations: DENOMINATIONS
                .iter()
                .map(|denomination| DenominationResponse {
                    denomination: *denomination,
                    count: cash_count.count(*denomination),
                    subtotal: cash_count.subtotal(*denomination),
                    subtotal_display: format_currency(cash_count.subtotal(*denomination) as f64),
                })
                .collect(),
            total: cash_count.total(),
            total_display: format_currency(cash_count.total() as f64),
        }
    }
}
