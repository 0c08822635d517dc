use tokio::sync::Mutex;

use crate::domain::entity::{Ledger, LedgerEntry, LedgerError};
use crate::domain::gateway::SnapshotStore;
use crate::domain::use_case::persist_ledger;

/// Returns the removed entry and how many entries remained right after it was
/// removed.
pub async fn delete_entry_use_case(
    store: &impl SnapshotStore,
    ledger: &Mutex<Ledger>,
    index: usize,
) -> Result<(LedgerEntry, usize), LedgerError> {
    let mut ledger = ledger.lock().await;
    let removed = ledger.delete(index)?;
    persist_ledger(store, &ledger).await;
    Ok((removed, ledger.count()))
}

#[cfg(test)]
mod test {
    use anyhow::Result;

    use super::*;
    use crate::app::test::InMemorySnapshotStore;
    use crate::domain::entity::Category;
    use crate::domain::use_case::add_entry_use_case;

    #[tokio_shared_rt::test(shared)]
    async fn delete_removes_by_index() -> Result<()> {
        let store = InMemorySnapshotStore::default();
        let ledger = Mutex::new(Ledger::new(Category::Transferencias));
        add_entry_use_case(&store, &ledger, "10").await?;
        add_entry_use_case(&store, &ledger, "20").await?;

        let (removed, remaining) = delete_entry_use_case(&store, &ledger, 0).await?;

        assert_eq!(20.0, removed.value().amount());
        assert_eq!(1, remaining);
        assert_eq!(
            Some(r#"[{"value":10.0,"sent":false}]"#.to_string()),
            store.snapshot("transferenciaTransactions")
        );
        assert!(matches!(
            delete_entry_use_case(&store, &ledger, 1).await,
            Err(LedgerError::EntryNotFound(1))
        ));
        Ok(())
    }

    #[tokio_shared_rt::test(shared)]
    async fn deleting_the_last_entry_leaves_none() -> Result<()> {
        let store = InMemorySnapshotStore::default();
        let ledger = Mutex::new(Ledger::new(Category::Debitos));
        add_entry_use_case(&store, &ledger, "10").await?;

        let (_, remaining) = delete_entry_use_case(&store, &ledger, 0).await?;

        assert_eq!(0, remaining);
        Ok(())
    }
}
