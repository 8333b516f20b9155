use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a scheduled installment
pub type InstallmentId = Uuid;

/// unique identifier for a received repayment
pub type RepaymentId = Uuid;

/// opaque identity of the loan's owner, issued by the caller
pub type BorrowerId = Uuid;

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// active with a positive outstanding balance
    Due,
    /// outstanding balance reached zero, terminal
    Repaid,
}

/// scheduled installment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// nothing allocated yet, outstanding equals the installment amount
    Due,
    /// partially allocated, outstanding strictly between zero and the amount
    Partial,
    /// fully allocated, terminal
    Repaid,
}
