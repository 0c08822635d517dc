pub use cash_count::{CashCount, CashCountError, CASH_COUNT_STORAGE_KEY, DENOMINATIONS};
pub use category::Category;
pub use dispatch_payload::DispatchPayload;
pub use entry::{DispatchStatus, EntryId, LedgerEntry};
pub use ledger::{BulkDispatchTicket, DispatchTicket, Ledger, LedgerError};
pub use monetary_value::{MonetaryValue, ValidationError};
pub use shift_book::ShiftBook;
pub use snapshot::{decode_ledger, encode_ledger};

mod cash_count;
mod category;
mod dispatch_payload;
mod entry;
pub(crate) mod ledger;
mod monetary_value;
mod shift_book;
mod snapshot;
