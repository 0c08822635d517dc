pub use add_entry::add_entry_use_case;
pub use cash_count::{clear_cash_count_use_case, set_cash_count_use_case};
pub use clear_ledger::clear_ledger_use_case;
pub use delete_entry::delete_entry_use_case;
pub use dispatch_entry::{dispatch_entry_use_case, DispatchEntryError};
pub use dispatch_ledger::{dispatch_ledger_use_case, sync_ledger_use_case};
pub use edit_entry::edit_entry_use_case;
pub use get_summary::{get_summary_use_case, CategorySummary, ShiftSummary};
pub use load_shift_book::load_shift_book_use_case;

use serde::Serialize;
use tracing::{error, warn};

use super::entity::{decode_ledger, encode_ledger, CashCount, Category, Ledger};
use super::entity::CASH_COUNT_STORAGE_KEY;
use super::gateway::{SnapshotStore, SnapshotStoreError};

mod add_entry;
mod cash_count;
mod clear_ledger;
mod delete_entry;
mod dispatch_entry;
mod dispatch_ledger;
mod edit_entry;
mod get_summary;
mod load_shift_book;

#[derive(Serialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Sent,
    /// Nothing was transmitted: the entry was already sent or in flight, or
    /// the ledger was empty.
    Skipped,
}

/// The in-memory ledger stays authoritative when a write fails; the next
/// mutation rewrites the whole snapshot anyway.
async fn persist_ledger(store: &impl SnapshotStore, ledger: &Ledger) {
    let category = ledger.category();
    let result = match encode_ledger(ledger) {
        Ok(contents) => store.save(category.storage_key(), &contents).await,
        Err(err) => Err(SnapshotStoreError::Other(err.into())),
    };
    if let Err(err) = result {
        error!(%category, %err, "Failed to persist ledger snapshot");
    }
}

async fn persist_cash_count(store: &impl SnapshotStore, cash_count: &CashCount) {
    let result = match cash_count.encode() {
        Ok(contents) => store.save(CASH_COUNT_STORAGE_KEY, &contents).await,
        Err(err) => Err(SnapshotStoreError::Other(err.into())),
    };
    if let Err(err) = result {
        error!(%err, "Failed to persist cash count snapshot");
    }
}

async fn load_ledger(store: &impl SnapshotStore, category: Category) -> Ledger {
    match store.load(category.storage_key()).await {
        Ok(Some(contents)) => decode_ledger(category, &contents),
        Ok(None) => Ledger::new(category),
        Err(err) => {
            warn!(%category, %err, "Cannot read ledger snapshot, starting empty");
            Ledger::new(category)
        }
    }
}

async fn load_cash_count(store: &impl SnapshotStore) -> CashCount {
    match store.load(CASH_COUNT_STORAGE_KEY).await {
        Ok(Some(contents)) => CashCount::decode(&contents),
        Ok(None) => CashCount::default(),
        Err(err) => {
            warn!(%err, "Cannot read cash count snapshot, starting empty");
            CashCount::default()
        }
    }
}
