use crate::domain::entity::{Category, ShiftBook};
use crate::domain::gateway::SnapshotStore;
use crate::domain::use_case::{load_cash_count, load_ledger};

/// Rebuilds the shift from the stored snapshots. Unreadable snapshots start
/// empty instead of failing the start-up.
pub async fn load_shift_book_use_case(store: &impl SnapshotStore) -> ShiftBook {
    let mut ledgers = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        ledgers.push(load_ledger(store, category).await);
    }
    ShiftBook::new(ledgers, load_cash_count(store).await)
}
