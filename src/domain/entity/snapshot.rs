use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::entity::{Category, DispatchStatus, Ledger, LedgerEntry, MonetaryValue};

/// Persisted shape of one entry.
#[derive(Serialize, Debug, PartialEq)]
struct StoredEntry {
    value: MonetaryValue,
    sent: bool,
}

/// Every shape an entry has been persisted in. Older snapshots are a bare
/// list of numbers, written before dispatch tracking existed.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum StoredEntryFormat {
    Legacy(f64),
    Tracked { value: f64, sent: Option<bool> },
}

impl StoredEntryFormat {
    fn value(&self) -> f64 {
        match self {
            Self::Legacy(value) => *value,
            Self::Tracked { value, .. } => *value,
        }
    }

    fn sent(&self) -> bool {
        match self {
            Self::Legacy(_) => false,
            Self::Tracked { sent, .. } => sent.unwrap_or(false),
        }
    }
}

pub fn encode_ledger(ledger: &Ledger) -> serde_json::Result<String> {
    let stored: Vec<StoredEntry> = ledger
        .entries()
        .iter()
        .map(|entry| StoredEntry {
            value: entry.value(),
            sent: entry.sent(),
        })
        .collect();
    serde_json::to_string(&stored)
}

/// Never fails: a snapshot that is not a JSON list loads as an empty ledger,
/// and unreadable or invalid elements are dropped one by one. A dispatch that
/// was in flight when the snapshot was written cannot be resumed, so no entry
/// comes back as `Sending`.
pub fn decode_ledger(category: Category, contents: &str) -> Ledger {
    let stored = match serde_json::from_str::<Vec<Value>>(contents) {
        Ok(stored) => stored,
        Err(err) => {
            warn!(%category, %err, "Discarding unreadable ledger snapshot");
            return Ledger::new(category);
        }
    };
    let entries = stored
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match decode_entry(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(%category, position, %err, "Dropping invalid entry from ledger snapshot");
                None
            }
        })
        .collect();
    Ledger::from_entries(category, entries)
}

fn decode_entry(item: Value) -> anyhow::Result<LedgerEntry> {
    let item: StoredEntryFormat = serde_json::from_value(item)?;
    let value = MonetaryValue::new(item.value())?;
    let status = if item.sent() {
        DispatchStatus::Sent
    } else {
        DispatchStatus::Unsent
    };
    Ok(LedgerEntry::with_status(value, status))
}
