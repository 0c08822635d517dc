use serde::Serialize;

use crate::domain::entity::{Category, ShiftBook};

#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct CategorySummary {
    pub category: Category,
    pub label: &'static str,
    pub total: f64,
    pub count: usize,
    pub unsent_count: usize,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct ShiftSummary {
    pub categories: Vec<CategorySummary>,
    pub cash_total: u64,
    pub grand_total: f64,
}

/// Totals per category plus the counted cash. Ledgers are locked one at a
/// time, so the figures of different categories may come from slightly
/// different instants.
pub async fn get_summary_use_case(shift_book: &ShiftBook) -> ShiftSummary {
    let mut categories = Vec::with_capacity(Category::ALL.len());
    for ledger in shift_book.ledgers() {
        let ledger = ledger.lock().await;
        categories.push(CategorySummary {
            category: ledger.category(),
            label: ledger.category().label(),
            total: ledger.total(),
            count: ledger.count(),
            unsent_count: ledger.unsent_count(),
        });
    }
    let cash_total = shift_book.cash_count().lock().await.total();
    let grand_total =
        categories.iter().map(|summary| summary.total).sum::<f64>() + cash_total as f64;
    ShiftSummary {
        categories,
        cash_total,
        grand_total,
    }
}
