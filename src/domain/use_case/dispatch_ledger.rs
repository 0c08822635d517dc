use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::entity::{BulkDispatchTicket, DispatchPayload, Ledger};
use crate::domain::gateway::{DispatchError, DispatchGateway, SnapshotStore};
use crate::domain::use_case::{persist_ledger, DispatchOutcome};
use crate::utils::utc_now;

/// Sends every entry in one request. All-or-nothing: on failure no entry
/// changes, on success every carried entry is marked sent, including those
/// that were already sent individually.
pub async fn dispatch_ledger_use_case(
    store: &impl SnapshotStore,
    gateway: &impl DispatchGateway,
    ledger: &Mutex<Ledger>,
) -> Result<DispatchOutcome, DispatchError> {
    let ticket = ledger.lock().await.bulk_ticket();
    if ticket.is_empty() {
        return Ok(DispatchOutcome::Skipped);
    }
    send_bulk(store, gateway, ledger, ticket).await?;
    Ok(DispatchOutcome::Sent)
}

/// Like [`dispatch_ledger_use_case`] but also reports an empty ledger, so the
/// webhook learns when a category was cleared.
pub async fn sync_ledger_use_case(
    store: &impl SnapshotStore,
    gateway: &impl DispatchGateway,
    ledger: &Mutex<Ledger>,
) -> Result<(), DispatchError> {
    let ticket = ledger.lock().await.bulk_ticket();
    send_bulk(store, gateway, ledger, ticket).await
}

async fn send_bulk(
    store: &impl SnapshotStore,
    gateway: &impl DispatchGateway,
    ledger: &Mutex<Ledger>,
    ticket: BulkDispatchTicket,
) -> Result<(), DispatchError> {
    let category = ticket.category;
    if let Err(err) = gateway
        .dispatch(&DispatchPayload::bulk(&ticket, utc_now()))
        .await
    {
        warn!(%category, count = ticket.count(), %err, "Bulk dispatch failed");
        return Err(err);
    }

    let mut ledger = ledger.lock().await;
    let marked = ledger.complete_bulk_dispatch(&ticket);
    persist_ledger(store, &ledger).await;
    info!(%category, count = ticket.count(), marked, "Ledger dispatched");
    Ok(())
}
