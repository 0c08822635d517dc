use thiserror::Error;

use crate::domain::entity::{
    Category, DispatchStatus, EntryId, LedgerEntry, MonetaryValue, ValidationError,
};

/// Ordered tallies of one category, newest first.
///
/// Totals are never stored: [`Ledger::total`] and [`Ledger::count`] are
/// recomputed from the entries on every call.
#[derive(Debug, Clone)]
pub struct Ledger {
    category: Category,
    entries: Vec<LedgerEntry>,
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No entry at index {0}")]
    EntryNotFound(usize),
    #[error("Entry at index {0} is being dispatched")]
    EntryBusy(usize),
}

/// Proof that an entry was moved to `Sending`. Completion looks the entry up
/// by id, so indices may shift while the request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchTicket {
    pub category: Category,
    pub entry_id: EntryId,
    pub value: MonetaryValue,
}

/// The exact list of values carried by one bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDispatchTicket {
    pub category: Category,
    pub entries: Vec<(EntryId, MonetaryValue)>,
}

impl BulkDispatchTicket {
    pub fn values(&self) -> Vec<MonetaryValue> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value.amount()).sum()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Ledger {
    pub fn new(category: Category) -> Self {
        Self::from_entries(category, Vec::new())
    }

    pub fn from_entries(category: Category, entries: Vec<LedgerEntry>) -> Self {
        Self { category, entries }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Result<&LedgerEntry, LedgerError> {
        self.entries
            .get(index)
            .ok_or(LedgerError::EntryNotFound(index))
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.value().amount()).sum()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unsent_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.sent()).count()
    }

    pub fn add(&mut self, raw_input: &str) -> Result<&LedgerEntry, LedgerError> {
        let value = MonetaryValue::parse(raw_input)?;
        self.entries.insert(0, LedgerEntry::new(value));
        Ok(&self.entries[0])
    }

    pub fn edit(&mut self, index: usize, raw_input: &str) -> Result<&LedgerEntry, LedgerError> {
        let value = MonetaryValue::parse(raw_input)?;
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LedgerError::EntryNotFound(index))?;
        if entry.dispatching() {
            return Err(LedgerError::EntryBusy(index));
        }
        entry.replace_value(value);
        Ok(entry)
    }

    pub fn delete(&mut self, index: usize) -> Result<LedgerEntry, LedgerError> {
        if index >= self.entries.len() {
            return Err(LedgerError::EntryNotFound(index));
        }
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves the entry to `Sending`. Returns `None` when it is already sent
    /// or already being sent, in which case nothing must be transmitted.
    pub fn begin_dispatch(&mut self, index: usize) -> Result<Option<DispatchTicket>, LedgerError> {
        let category = self.category;
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LedgerError::EntryNotFound(index))?;
        if entry.status() != DispatchStatus::Unsent {
            return Ok(None);
        }
        entry.set_status(DispatchStatus::Sending);
        Ok(Some(DispatchTicket {
            category,
            entry_id: entry.id(),
            value: entry.value(),
        }))
    }

    /// Settles a single dispatch. Returns whether the outcome was applied: it
    /// is dropped when the entry is gone or no longer `Sending` (a bulk
    /// dispatch settled it first).
    pub fn complete_dispatch(&mut self, ticket: &DispatchTicket, delivered: bool) -> bool {
        let Some(entry) = self.find_mut(ticket.entry_id) else {
            return false;
        };
        if entry.status() != DispatchStatus::Sending {
            return false;
        }
        entry.set_status(if delivered {
            DispatchStatus::Sent
        } else {
            DispatchStatus::Unsent
        });
        true
    }

    pub fn bulk_ticket(&self) -> BulkDispatchTicket {
        BulkDispatchTicket {
            category: self.category,
            entries: self
                .entries
                .iter()
                .map(|entry| (entry.id(), entry.value()))
                .collect(),
        }
    }

    /// Marks every entry carried by a delivered bulk request as sent, unless
    /// its value changed since the request was built. Returns how many
    /// entries were marked.
    pub fn complete_bulk_dispatch(&mut self, ticket: &BulkDispatchTicket) -> usize {
        let mut marked = 0;
        for (entry_id, value) in &ticket.entries {
            if let Some(entry) = self.find_mut(*entry_id) {
                if entry.value() == *value {
                    entry.set_status(DispatchStatus::Sent);
                    marked += 1;
                }
            }
        }
        marked
    }

    fn find_mut(&mut self, entry_id: EntryId) -> Option<&mut LedgerEntry> {
        self.entries.iter_mut().find(|entry| entry.id() == entry_id)
    }
}

#[cfg(test)]
pub mod test {
    use fake::Fake;

    use super::*;

    pub fn fake_amount() -> String {
        format!("{:.2}", (1.0..100_000.0).fake::<f64>())
    }

    pub fn ledger_with(category: Category, amounts: &[&str]) -> Ledger {
        let mut ledger = Ledger::new(category);
        for amount in amounts.iter().rev() {
            ledger.add(amount).expect("a valid amount");
        }
        ledger
    }

    fn values(ledger: &Ledger) -> Vec<f64> {
        ledger
            .entries()
            .iter()
            .map(|entry| entry.value().amount())
            .collect()
    }

    #[test]
    fn add_prepends_and_keeps_aggregates_in_sync() -> anyhow::Result<()> {
        let mut ledger = Ledger::new(Category::Qr);
        ledger.add("100")?;
        ledger.add("250.5")?;
        assert_eq!(vec![250.5, 100.0], values(&ledger));
        assert_eq!(350.5, ledger.total());
        assert_eq!(2, ledger.count());
        Ok(())
    }

    #[test]
    fn add_rejects_invalid_input_without_mutation() {
        let mut ledger = ledger_with(Category::Varios, &["10"]);
        for raw in ["0", "-3", "abc", "", "NaN"] {
            assert!(ledger.add(raw).is_err());
        }
        assert_eq!(vec![10.0], values(&ledger));
    }

    #[test]
    fn add_then_delete_returns_to_empty() -> anyhow::Result<()> {
        let mut ledger = Ledger::new(Category::Cheques);
        ledger.add("50")?;
        assert_eq!((50.0, 1), (ledger.total(), ledger.count()));
        ledger.delete(0)?;
        assert_eq!((0.0, 0), (ledger.total(), ledger.count()));
        Ok(())
    }

    #[test]
    fn edit_replaces_value_and_clears_sent() -> anyhow::Result<()> {
        let mut ledger = ledger_with(Category::Qr, &["100"]);
        let ticket = ledger.begin_dispatch(0)?.expect("an unsent entry");
        assert!(ledger.complete_dispatch(&ticket, true));
        assert!(ledger.entry(0)?.sent());

        ledger.edit(0, "200")?;
        let entry = ledger.entry(0)?;
        assert_eq!(200.0, entry.value().amount());
        assert!(!entry.sent());
        assert!(!entry.dispatching());
        Ok(())
    }

    #[test]
    fn edit_is_forbidden_while_sending() -> anyhow::Result<()> {
        let mut ledger = ledger_with(Category::Qr, &["100"]);
        ledger.begin_dispatch(0)?;
        assert_eq!(Err(LedgerError::EntryBusy(0)), ledger.edit(0, "300").map(|_| ()));
        assert_eq!(100.0, ledger.entry(0)?.value().amount());
        assert!(ledger.entry(0)?.dispatching());
        Ok(())
    }

    #[test]
    fn edit_and_delete_report_missing_indices() {
        let mut ledger = ledger_with(Category::Qr, &["1"]);
        assert_eq!(
            Err(LedgerError::EntryNotFound(3)),
            ledger.edit(3, "2").map(|_| ())
        );
        assert_eq!(Err(LedgerError::EntryNotFound(1)), ledger.delete(1).map(|_| ()));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut ledger = ledger_with(Category::Debitos, &["1", "2"]);
        ledger.clear();
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(0.0, ledger.total());
    }

    #[test]
    fn begin_dispatch_skips_sent_and_sending_entries() -> anyhow::Result<()> {
        let mut ledger = ledger_with(Category::Qr, &["1", "2"]);
        let ticket = ledger.begin_dispatch(0)?.expect("an unsent entry");
        assert_eq!(None, ledger.begin_dispatch(0)?);

        ledger.complete_dispatch(&ticket, true);
        assert_eq!(None, ledger.begin_dispatch(0)?);
        assert!(ledger.begin_dispatch(1)?.is_some());
        Ok(())
    }

    #[test]
    fn failed_dispatch_returns_entry_to_unsent() -> anyhow::Result<()> {
        let mut ledger = ledger_with(Category::PagosMunicipales, &["75"]);
        let ticket = ledger.begin_dispatch(0)?.expect("an unsent entry");
        assert!(ledger.complete_dispatch(&ticket, false));
        let entry = ledger.entry(0)?;
        assert_eq!(DispatchStatus::Unsent, entry.status());
        assert!(ledger.begin_dispatch(0)?.is_some());
        Ok(())
    }

    #[test]
    fn completion_follows_the_entry_when_indices_shift() -> anyhow::Result<()> {
        let mut ledger = ledger_with(Category::Qr, &["10"]);
        let ticket = ledger.begin_dispatch(0)?.expect("an unsent entry");
        ledger.add("99")?;
        assert!(ledger.complete_dispatch(&ticket, true));
        assert!(!ledger.entry(0)?.sent());
        assert!(ledger.entry(1)?.sent());
        Ok(())
    }

    #[test]
    fn completion_for_a_deleted_entry_is_ignored() -> anyhow::Result<()> {
        let mut ledger = ledger_with(Category::Qr, &["10", "20"]);
        let ticket = ledger.begin_dispatch(0)?.expect("an unsent entry");
        ledger.delete(0)?;
        assert!(!ledger.complete_dispatch(&ticket, true));
        assert!(!ledger.entry(0)?.sent());
        Ok(())
    }

    #[test]
    fn bulk_dispatch_marks_every_carried_entry() -> anyhow::Result<()> {
        let mut ledger = ledger_with(Category::Transferencias, &["10", "20", "30"]);
        let single = ledger.begin_dispatch(1)?.expect("an unsent entry");
        let ticket = ledger.bulk_ticket();
        assert_eq!(60.0, ticket.total());
        assert_eq!(3, ticket.count());

        assert_eq!(3, ledger.complete_bulk_dispatch(&ticket));
        assert!(ledger.entries().iter().all(LedgerEntry::sent));
        // the individual failure arriving afterwards must not undo the bulk
        assert!(!ledger.complete_dispatch(&single, false));
        assert!(ledger.entry(1)?.sent());
        Ok(())
    }

    #[test]
    fn bulk_dispatch_skips_entries_added_or_edited_in_flight() -> anyhow::Result<()> {
        let mut ledger = ledger_with(Category::Qr, &["10", "20"]);
        let ticket = ledger.bulk_ticket();
        ledger.add("5")?;
        ledger.edit(2, "21")?;

        assert_eq!(1, ledger.complete_bulk_dispatch(&ticket));
        let sent: Vec<bool> = ledger.entries().iter().map(LedgerEntry::sent).collect();
        assert_eq!(vec![false, true, false], sent);
        Ok(())
    }

    #[test]
    fn total_matches_sum_after_random_mutations() -> anyhow::Result<()> {
        let mut ledger = Ledger::new(Category::Varios);
        for step in 0..40 {
            match step % 4 {
                0 | 1 => {
                    ledger.add(&fake_amount())?;
                }
                2 if !ledger.is_empty() => {
                    ledger.edit(step % ledger.count(), &fake_amount())?;
                }
                _ if !ledger.is_empty() => {
                    ledger.delete(0)?;
                }
                _ => {}
            }
            let expected: f64 = values(&ledger).iter().sum();
            assert_eq!(expected, ledger.total());
            assert_eq!(ledger.entries().len(), ledger.count());
        }
        Ok(())
    }
}
