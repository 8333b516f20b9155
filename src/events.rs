use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{BorrowerId, InstallmentId, LoanId, RepaymentId};

/// all events that can be emitted by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    LoanCreated {
        loan_id: LoanId,
        borrower_id: BorrowerId,
        principal: Money,
        term_count: u32,
        processed_at: NaiveDate,
    },
    LoanSettled {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },

    // repayment events
    RepaymentReceived {
        loan_id: LoanId,
        repayment_id: RepaymentId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    InstallmentSettled {
        loan_id: LoanId,
        installment_id: InstallmentId,
        applied: Money,
        due_date: NaiveDate,
    },
    InstallmentPartiallySettled {
        loan_id: LoanId,
        installment_id: InstallmentId,
        applied: Money,
        outstanding: Money,
        due_date: NaiveDate,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn absorb(&mut self, other: &mut EventStore) {
        self.events.append(&mut other.events);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
