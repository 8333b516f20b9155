use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};
use crate::loan::{Installment, Loan, ReceivedRepayment};
use crate::types::LoanId;

/// a loan together with its installment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan: Loan,
    pub installments: Vec<Installment>,
}

/// a loan record plus the version its state was read at
#[derive(Debug, Clone)]
pub struct VersionedLoan {
    pub loan: Loan,
    pub installments: Vec<Installment>,
    pub version: u64,
}

/// transactional persistence seam for the ledger
///
/// each method is all-or-nothing: a failed call leaves no partial state
/// behind. `commit_repayment` performs a compare-and-swap on the loan's
/// version so that concurrent writers to the same loan cannot lose updates.
pub trait LedgerStore: Send + Sync {
    /// atomically persist a loan with its full installment schedule
    fn insert_loan(&self, loan: Loan, installments: Vec<Installment>) -> Result<()>;

    /// read a loan, its installments, and its current version
    fn load_loan(&self, id: LoanId) -> Result<VersionedLoan>;

    /// atomically persist the ledger entry, the changed installment rows, and
    /// the loan row, provided the stored version still matches
    fn commit_repayment(
        &self,
        expected_version: u64,
        loan: Loan,
        changed: Vec<Installment>,
        repayment: ReceivedRepayment,
    ) -> Result<()>;
}

impl<S: LedgerStore + ?Sized> LedgerStore for Arc<S> {
    fn insert_loan(&self, loan: Loan, installments: Vec<Installment>) -> Result<()> {
        (**self).insert_loan(loan, installments)
    }

    fn load_loan(&self, id: LoanId) -> Result<VersionedLoan> {
        (**self).load_loan(id)
    }

    fn commit_repayment(
        &self,
        expected_version: u64,
        loan: Loan,
        changed: Vec<Installment>,
        repayment: ReceivedRepayment,
    ) -> Result<()> {
        (**self).commit_repayment(expected_version, loan, changed, repayment)
    }
}

#[derive(Debug)]
struct StoredLoan {
    loan: Loan,
    installments: Vec<Installment>,
    repayments: Vec<ReceivedRepayment>,
    version: u64,
}

/// in-memory ledger store with per-loan versioning
#[derive(Debug, Default)]
pub struct MemoryStore {
    loans: Mutex<HashMap<LoanId, StoredLoan>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<LoanId, StoredLoan>>> {
        self.loans.lock().map_err(|_| LedgerError::StorageFailure {
            message: "loan store mutex poisoned".to_string(),
        })
    }

    /// audit read of a loan's immutable repayment trail, in arrival order
    pub fn received_repayments(&self, loan_id: LoanId) -> Result<Vec<ReceivedRepayment>> {
        let loans = self.lock()?;
        let stored = loans
            .get(&loan_id)
            .ok_or(LedgerError::LoanNotFound { id: loan_id })?;
        Ok(stored.repayments.clone())
    }
}

impl LedgerStore for MemoryStore {
    fn insert_loan(&self, loan: Loan, installments: Vec<Installment>) -> Result<()> {
        let mut loans = self.lock()?;
        if loans.contains_key(&loan.id) {
            return Err(LedgerError::StorageFailure {
                message: format!("loan {} already exists", loan.id),
            });
        }

        loans.insert(
            loan.id,
            StoredLoan {
                loan,
                installments,
                repayments: Vec::new(),
                version: 0,
            },
        );
        Ok(())
    }

    fn load_loan(&self, id: LoanId) -> Result<VersionedLoan> {
        let loans = self.lock()?;
        let stored = loans.get(&id).ok_or(LedgerError::LoanNotFound { id })?;
        Ok(VersionedLoan {
            loan: stored.loan.clone(),
            installments: stored.installments.clone(),
            version: stored.version,
        })
    }

    fn commit_repayment(
        &self,
        expected_version: u64,
        loan: Loan,
        changed: Vec<Installment>,
        repayment: ReceivedRepayment,
    ) -> Result<()> {
        let mut loans = self.lock()?;
        let stored = loans
            .get_mut(&loan.id)
            .ok_or(LedgerError::LoanNotFound { id: loan.id })?;

        if stored.version != expected_version {
            return Err(LedgerError::CommitConflict { id: loan.id });
        }

        for row in changed {
            let slot = stored
                .installments
                .iter_mut()
                .find(|i| i.id == row.id)
                .ok_or_else(|| LedgerError::StorageFailure {
                    message: format!("unknown installment {} on loan {}", row.id, loan.id),
                })?;
            *slot = row;
        }

        stored.repayments.push(repayment);
        stored.loan = loan;
        stored.version += 1;
        Ok(())
    }
}
