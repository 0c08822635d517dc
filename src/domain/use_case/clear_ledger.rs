use tokio::sync::Mutex;

use crate::domain::entity::Ledger;
use crate::domain::gateway::SnapshotStore;
use crate::domain::use_case::persist_ledger;

pub async fn clear_ledger_use_case(store: &impl SnapshotStore, ledger: &Mutex<Ledger>) {
    let mut ledger = ledger.lock().await;
    ledger.clear();
    persist_ledger(store, &ledger).await;
}
