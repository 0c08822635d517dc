use tokio::sync::Mutex;
use tracing::info;

use crate::domain::entity::{CashCount, CashCountError};
use crate::domain::gateway::SnapshotStore;
use crate::domain::use_case::persist_cash_count;

pub async fn set_cash_count_use_case(
    store: &impl SnapshotStore,
    cash_count: &Mutex<CashCount>,
    denomination: u32,
    raw_input: &str,
) -> Result<CashCount, CashCountError> {
    let mut cash_count = cash_count.lock().await;
    cash_count.set_count(denomination, raw_input)?;
    persist_cash_count(store, &cash_count).await;
    Ok(cash_count.clone())
}

pub async fn clear_cash_count_use_case(
    store: &impl SnapshotStore,
    cash_count: &Mutex<CashCount>,
) -> CashCount {
    let mut cash_count = cash_count.lock().await;
    cash_count.clear();
    persist_cash_count(store, &cash_count).await;
    info!("Cash count cleared");
    cash_count.clone()
}
