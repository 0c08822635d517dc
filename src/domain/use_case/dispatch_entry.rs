use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::domain::entity::{DispatchPayload, DispatchTicket, Ledger, LedgerError};
use crate::domain::gateway::{DispatchError, DispatchGateway, SnapshotStore};
use crate::domain::use_case::{persist_ledger, DispatchOutcome};
use crate::utils::utc_now;

#[derive(Debug, Error)]
pub enum DispatchEntryError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Sends a single entry. The ledger lock is released while the request is in
/// flight; the entry's `Sending` state keeps a second dispatch of the same
/// entry from going out meanwhile. If this future is dropped before the
/// request settles, the entry goes back to `Unsent`.
pub async fn dispatch_entry_use_case(
    store: &impl SnapshotStore,
    gateway: &impl DispatchGateway,
    ledger: &Mutex<Ledger>,
    index: usize,
) -> Result<DispatchOutcome, DispatchEntryError> {
    let Some(mut in_flight) = InFlight::begin(ledger, index).await? else {
        debug!(index, "Entry already sent or in flight");
        return Ok(DispatchOutcome::Skipped);
    };
    in_flight.persist(store).await;
    in_flight.unlock();

    let result = gateway
        .dispatch(&DispatchPayload::single(&in_flight.ticket, utc_now()))
        .await;

    if !in_flight.settle(result.is_ok()).await {
        debug!(
            category = %in_flight.ticket.category,
            entry_id = %in_flight.ticket.entry_id,
            "Entry was removed or settled while its dispatch was in flight"
        );
    }
    in_flight.persist(store).await;
    let ticket = in_flight.ticket.clone();
    drop(in_flight);

    match result {
        Ok(()) => {
            info!(category = %ticket.category, value = %ticket.value, "Entry dispatched");
            Ok(DispatchOutcome::Sent)
        }
        Err(err) => {
            warn!(category = %ticket.category, value = %ticket.value, %err, "Entry dispatch failed");
            Err(err.into())
        }
    }
}

/// An entry moved to `Sending`. Dropping it before [`InFlight::settle`]
/// returns the entry to `Unsent`.
struct InFlight<'a> {
    ledger: &'a Mutex<Ledger>,
    locked: Option<MutexGuard<'a, Ledger>>,
    ticket: DispatchTicket,
    settled: bool,
}

impl<'a> InFlight<'a> {
    async fn begin(ledger: &'a Mutex<Ledger>, index: usize) -> Result<Option<Self>, LedgerError> {
        let mut locked = ledger.lock().await;
        let Some(ticket) = locked.begin_dispatch(index)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            ledger,
            locked: Some(locked),
            ticket,
            settled: false,
        }))
    }

    async fn persist(&self, store: &impl SnapshotStore) {
        if let Some(locked) = &self.locked {
            persist_ledger(store, locked).await;
        }
    }

    fn unlock(&mut self) {
        self.locked = None;
    }

    /// Relocks the ledger and applies the outcome. Returns whether it was
    /// applied.
    async fn settle(&mut self, delivered: bool) -> bool {
        let mut locked = self.ledger.lock().await;
        self.settled = true;
        let applied = locked.complete_dispatch(&self.ticket, delivered);
        self.locked = Some(locked);
        applied
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let reverted = match self.locked.as_mut() {
            Some(locked) => Some(locked.complete_dispatch(&self.ticket, false)),
            None => self
                .ledger
                .try_lock()
                .ok()
                .map(|mut locked| locked.complete_dispatch(&self.ticket, false)),
        };
        match reverted {
            Some(true) => warn!(
                category = %self.ticket.category,
                value = %self.ticket.value,
                "Dispatch abandoned before it settled, entry is unsent again"
            ),
            Some(false) => {}
            None => error!(
                category = %self.ticket.category,
                entry_id = %self.ticket.entry_id,
                "Dispatch abandoned while the ledger was locked, entry stays in flight"
            ),
        }
    }
}
