use thiserror::Error;

use crate::money::Money;
use crate::types::LoanId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid principal amount: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid term count: {terms}")]
    InvalidTermCount {
        terms: u32,
    },

    #[error("invalid repayment amount: {amount}")]
    InvalidRepaymentAmount {
        amount: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("commit conflict on loan {id}")]
    CommitConflict {
        id: LoanId,
    },

    #[error("storage failure: {message}")]
    StorageFailure {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
