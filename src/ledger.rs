use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::allocation::allocate;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::loan::{Loan, ReceivedRepayment};
use crate::money::Money;
use crate::schedule::build_schedule;
use crate::store::{LedgerStore, LoanRecord};
use crate::types::{BorrowerId, LoanId, LoanStatus};

/// ledger service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// how many times a repayment is retried after a version conflict before
    /// the conflict surfaces to the caller
    pub max_commit_attempts: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_commit_attempts: 3,
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_commit_attempts == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "max_commit_attempts must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// lending ledger service: issues loans and allocates incoming repayments
pub struct Ledger<S: LedgerStore> {
    store: S,
    config: LedgerConfig,
    events: EventStore,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: LedgerConfig::default(),
            events: EventStore::new(),
        }
    }

    pub fn with_config(store: S, config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            events: EventStore::new(),
        })
    }

    /// issue a loan and its installment schedule as one atomic write
    ///
    /// the principal is spread across `term_count` monthly installments, with
    /// the integer-division remainder carried by the final one. the first
    /// installment falls due one month after `processed_at`.
    pub fn create_loan(
        &mut self,
        borrower_id: BorrowerId,
        principal: Money,
        currency_code: &str,
        term_count: u32,
        processed_at: NaiveDate,
    ) -> Result<LoanRecord> {
        if !principal.is_positive() {
            return Err(LedgerError::InvalidPrincipal { amount: principal });
        }
        if term_count == 0 {
            return Err(LedgerError::InvalidTermCount { terms: term_count });
        }

        let loan = Loan::new(borrower_id, principal, currency_code, term_count, processed_at);
        let installments = build_schedule(
            loan.id,
            principal,
            currency_code,
            term_count,
            processed_at,
        )?;

        self.store.insert_loan(loan.clone(), installments)?;

        self.events.emit(Event::LoanCreated {
            loan_id: loan.id,
            borrower_id,
            principal,
            term_count,
            processed_at,
        });
        debug!(loan_id = %loan.id, %principal, term_count, "loan issued");

        self.fresh(loan.id)
    }

    /// record a repayment and allocate it across the loan's installments
    ///
    /// the payment is written to the ledger trail unconditionally, then
    /// allocated against non-repaid installments in due-date order, and
    /// finally subtracted from the loan's outstanding balance, which clamps
    /// at zero and flips the loan to repaid. the whole operation commits
    /// atomically; on a version conflict with a concurrent repayment the
    /// read-allocate-commit cycle is retried from a fresh read.
    ///
    /// a payment exceeding the total outstanding is accepted: the excess is
    /// absorbed by the clamp and not tracked per-installment. callers wanting
    /// a reject-or-credit overpayment policy must enforce it themselves.
    /// there is no idempotency key, so re-submitting the same payment
    /// double-applies it.
    pub fn apply_repayment(
        &mut self,
        loan_id: LoanId,
        amount: Money,
        currency_code: &str,
        received_at: DateTime<Utc>,
    ) -> Result<LoanRecord> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidRepaymentAmount { amount });
        }

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let versioned = self.store.load_loan(loan_id)?;
            let mut loan = versioned.loan;
            let mut installments = versioned.installments;
            let mut staged = EventStore::new();

            let entry = ReceivedRepayment::new(loan_id, amount, currency_code, received_at);
            staged.emit(Event::RepaymentReceived {
                loan_id,
                repayment_id: entry.id,
                amount,
                timestamp: received_at,
            });

            let outcome = allocate(&mut installments, amount, &mut staged);
            let changed = installments
                .iter()
                .filter(|i| outcome.touched.contains(&i.id))
                .cloned()
                .collect();

            let was_settled = loan.is_settled();
            loan.outstanding_amount -= amount;
            if !loan.outstanding_amount.is_positive() {
                loan.outstanding_amount = Money::ZERO;
                loan.status = LoanStatus::Repaid;
                if !was_settled {
                    staged.emit(Event::LoanSettled {
                        loan_id,
                        timestamp: received_at,
                    });
                }
            }

            match self
                .store
                .commit_repayment(versioned.version, loan, changed, entry)
            {
                Ok(()) => {
                    self.events.absorb(&mut staged);
                    debug!(loan_id = %loan_id, %amount, attempt, "repayment committed");
                    return self.fresh(loan_id);
                }
                Err(LedgerError::CommitConflict { .. })
                    if attempt < self.config.max_commit_attempts =>
                {
                    debug!(loan_id = %loan_id, attempt, "commit conflict, retrying");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// drain events collected since the last call
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// re-read a loan with its refreshed installment collection
    fn fresh(&self, loan_id: LoanId) -> Result<LoanRecord> {
        let versioned = self.store.load_loan(loan_id)?;
        Ok(LoanRecord {
            loan: versioned.loan,
            installments: versioned.installments,
        })
    }
}
