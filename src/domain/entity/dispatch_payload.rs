use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entity::{BulkDispatchTicket, Category, DispatchTicket, MonetaryValue};

/// Body posted to the automation webhook.
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum DispatchPayload {
    Single {
        category: Category,
        value: MonetaryValue,
        timestamp: DateTime<Utc>,
    },
    Bulk {
        category: Category,
        values: Vec<MonetaryValue>,
        total: f64,
        count: usize,
        timestamp: DateTime<Utc>,
    },
}

impl DispatchPayload {
    pub fn single(ticket: &DispatchTicket, timestamp: DateTime<Utc>) -> Self {
        Self::Single {
            category: ticket.category,
            value: ticket.value,
            timestamp,
        }
    }

    pub fn bulk(ticket: &BulkDispatchTicket, timestamp: DateTime<Utc>) -> Self {
        Self::Bulk {
            category: ticket.category,
            values: ticket.values(),
            total: ticket.total(),
            count: ticket.count(),
            timestamp,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Single { category, .. } => *category,
            Self::Bulk { category, .. } => *category,
        }
    }
}
