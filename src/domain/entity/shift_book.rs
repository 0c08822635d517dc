use std::collections::BTreeMap;

use tokio::sync::Mutex;

use crate::domain::entity::{CashCount, Category, Ledger};

/// Everything tallied during a shift: one ledger per category plus the cash
/// count. Each ledger has its own lock, so a slow operation on one category
/// never blocks another.
#[derive(Debug)]
pub struct ShiftBook {
    ledgers: [Mutex<Ledger>; Category::ALL.len()],
    cash_count: Mutex<CashCount>,
}

impl ShiftBook {
    /// Categories missing from `ledgers` start empty.
    pub fn new(ledgers: impl IntoIterator<Item = Ledger>, cash_count: CashCount) -> Self {
        let mut ledgers: BTreeMap<Category, Ledger> = ledgers
            .into_iter()
            .map(|ledger| (ledger.category(), ledger))
            .collect();
        Self {
            ledgers: Category::ALL.map(|category| {
                Mutex::new(
                    ledgers
                        .remove(&category)
                        .unwrap_or_else(|| Ledger::new(category)),
                )
            }),
            cash_count: Mutex::new(cash_count),
        }
    }

    pub fn ledger(&self, category: Category) -> &Mutex<Ledger> {
        &self.ledgers[category as usize]
    }

    pub fn ledgers(&self) -> impl Iterator<Item = &Mutex<Ledger>> {
        self.ledgers.iter()
    }

    pub fn cash_count(&self) -> &Mutex<CashCount> {
        &self.cash_count
    }
}

impl Default for ShiftBook {
    fn default() -> Self {
        Self::new(Vec::<Ledger>::new(), CashCount::default())
    }
}
