/// serializable views of a loan and its schedule
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::store::LoanRecord;
use crate::types::{BorrowerId, InstallmentId, InstallmentStatus, LoanId, LoanStatus};

/// serializable view of a loan and its installment schedule
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub borrower_id: BorrowerId,
    pub status: LoanStatus,
    pub currency_code: String,
    pub processed_at: NaiveDate,
    pub principal: Money,
    pub outstanding_amount: Money,
    pub term_count: u32,
    pub installments: Vec<InstallmentView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InstallmentView {
    pub id: InstallmentId,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub outstanding_amount: Money,
    pub status: InstallmentStatus,
}

impl LoanView {
    pub fn from_record(record: &LoanRecord) -> Self {
        LoanView {
            id: record.loan.id,
            borrower_id: record.loan.borrower_id,
            status: record.loan.status,
            currency_code: record.loan.currency_code.clone(),
            processed_at: record.loan.processed_at,
            principal: record.loan.principal,
            outstanding_amount: record.loan.outstanding_amount,
            term_count: record.loan.term_count,
            installments: record
                .installments
                .iter()
                .map(|i| InstallmentView {
                    id: i.id,
                    due_date: i.due_date,
                    amount: i.amount,
                    outstanding_amount: i.outstanding_amount,
                    status: i.status,
                })
                .collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
