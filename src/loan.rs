use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::types::{BorrowerId, InstallmentId, InstallmentStatus, LoanId, LoanStatus, RepaymentId};

/// loan aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub borrower_id: BorrowerId,
    pub principal: Money,
    pub currency_code: String,
    pub term_count: u32,
    pub processed_at: NaiveDate,
    pub outstanding_amount: Money,
    pub status: LoanStatus,
}

impl Loan {
    /// create a new active loan with its full principal outstanding
    pub fn new(
        borrower_id: BorrowerId,
        principal: Money,
        currency_code: &str,
        term_count: u32,
        processed_at: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            borrower_id,
            principal,
            currency_code: currency_code.to_string(),
            term_count,
            processed_at,
            outstanding_amount: principal,
            status: LoanStatus::Due,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status == LoanStatus::Repaid
    }
}

/// one scheduled portion of a loan's principal, due on a specific date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub id: InstallmentId,
    pub loan_id: LoanId,
    /// fixed at creation, never mutated afterwards
    pub amount: Money,
    pub outstanding_amount: Money,
    pub currency_code: String,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
}

impl Installment {
    /// create a new installment with its full amount outstanding
    pub fn new(loan_id: LoanId, amount: Money, currency_code: &str, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            loan_id,
            amount,
            outstanding_amount: amount,
            currency_code: currency_code.to_string(),
            due_date,
            status: InstallmentStatus::Due,
        }
    }

    /// status implied by the outstanding range: zero is repaid, below the
    /// amount is partial, equal to the amount is due
    pub fn status_for(outstanding: Money, amount: Money) -> InstallmentStatus {
        if outstanding.is_zero() {
            InstallmentStatus::Repaid
        } else if outstanding < amount {
            InstallmentStatus::Partial
        } else {
            InstallmentStatus::Due
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status == InstallmentStatus::Repaid
    }
}

/// immutable record of a received payment, independent of its allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedRepayment {
    pub id: RepaymentId,
    pub loan_id: LoanId,
    pub amount: Money,
    pub currency_code: String,
    pub received_at: DateTime<Utc>,
}

impl ReceivedRepayment {
    pub fn new(
        loan_id: LoanId,
        amount: Money,
        currency_code: &str,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            loan_id,
            amount,
            currency_code: currency_code.to_string(),
            received_at,
        }
    }
}
