use std::fmt::Display;

use serde::Serialize;
use ulid::Ulid;

use crate::domain::entity::MonetaryValue;

/// Identity of an entry for as long as it lives in memory. Never persisted:
/// snapshots only carry the value and whether it was sent.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EntryId(Ulid);

impl EntryId {
    pub fn generate() -> Self {
        Self(Ulid::new())
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Unsent,
    Sending,
    Sent,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LedgerEntry {
    id: EntryId,
    value: MonetaryValue,
    status: DispatchStatus,
}

impl LedgerEntry {
    pub fn new(value: MonetaryValue) -> Self {
        Self::with_status(value, DispatchStatus::Unsent)
    }

    pub(crate) fn with_status(value: MonetaryValue, status: DispatchStatus) -> Self {
        Self {
            id: EntryId::generate(),
            value,
            status,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn value(&self) -> MonetaryValue {
        self.value
    }

    pub fn status(&self) -> DispatchStatus {
        self.status
    }

    pub fn sent(&self) -> bool {
        self.status == DispatchStatus::Sent
    }

    pub fn dispatching(&self) -> bool {
        self.status == DispatchStatus::Sending
    }

    /// A changed amount was never transmitted, whatever happened before.
    pub(crate) fn replace_value(&mut self, value: MonetaryValue) {
        self.value = value;
        self.status = DispatchStatus::Unsent;
    }

    pub(crate) fn set_status(&mut self, status: DispatchStatus) {
        self.status = status;
    }
}
