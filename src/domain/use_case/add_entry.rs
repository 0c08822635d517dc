use tokio::sync::Mutex;

use crate::domain::entity::{Ledger, LedgerEntry, LedgerError};
use crate::domain::gateway::SnapshotStore;
use crate::domain::use_case::persist_ledger;

pub async fn add_entry_use_case(
    store: &impl SnapshotStore,
    ledger: &Mutex<Ledger>,
    raw_input: &str,
) -> Result<LedgerEntry, LedgerError> {
    let mut ledger = ledger.lock().await;
    let entry = ledger.add(raw_input)?.clone();
    persist_ledger(store, &ledger).await;
    Ok(entry)
}
