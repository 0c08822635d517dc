use tokio::sync::Mutex;

use crate::domain::entity::{Ledger, LedgerEntry, LedgerError};
use crate::domain::gateway::SnapshotStore;
use crate::domain::use_case::persist_ledger;

pub async fn edit_entry_use_case(
    store: &impl SnapshotStore,
    ledger: &Mutex<Ledger>,
    index: usize,
    raw_input: &str,
) -> Result<LedgerEntry, LedgerError> {
    let mut ledger = ledger.lock().await;
    let entry = ledger.edit(index, raw_input)?.clone();
    persist_ledger(store, &ledger).await;
    Ok(entry)
}

#[cfg(test)]
mod test {
    use anyhow::Result;

    use super::*;
    use crate::app::test::{InMemorySnapshotStore, RecordingGateway};
    use crate::domain::entity::Category;
    use crate::domain::use_case::{add_entry_use_case, dispatch_entry_use_case};

    #[tokio_shared_rt::test(shared)]
    async fn edit_after_dispatch_makes_the_entry_sendable_again() -> Result<()> {
        let store = InMemorySnapshotStore::default();
        let gateway = RecordingGateway::default();
        let ledger = Mutex::new(Ledger::new(Category::Qr));
        add_entry_use_case(&store, &ledger, "100").await?;
        dispatch_entry_use_case(&store, &gateway, &ledger, 0).await?;

        let entry = edit_entry_use_case(&store, &ledger, 0, "200").await?;

        assert_eq!(200.0, entry.value().amount());
        assert!(!entry.sent());
        assert!(!entry.dispatching());
        assert_eq!(
            Some(r#"[{"value":200.0,"sent":false}]"#.to_string()),
            store.snapshot("qrTransactions")
        );
        Ok(())
    }

    #[tokio_shared_rt::test(shared)]
    async fn invalid_edit_keeps_the_previous_value() -> Result<()> {
        let store = InMemorySnapshotStore::default();
        let ledger = Mutex::new(Ledger::new(Category::Cheques));
        add_entry_use_case(&store, &ledger, "100").await?;

        let result = edit_entry_use_case(&store, &ledger, 0, "-100").await;

        assert!(matches!(result, Err(LedgerError::Validation(_))));
        assert_eq!(100.0, ledger.lock().await.total());
        Ok(())
    }
}
