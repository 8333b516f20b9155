use chrono::{Months, NaiveDate};

use crate::errors::{LedgerError, Result};
use crate::loan::Installment;
use crate::money::Money;
use crate::types::LoanId;

/// generate the installment schedule for a loan
///
/// principal is floor-divided across the term and the division remainder is
/// added to the final installment, so the installment amounts always sum to
/// the principal exactly. the first installment falls due one month after the
/// processing date, not on the processing date itself.
pub fn build_schedule(
    loan_id: LoanId,
    principal: Money,
    currency_code: &str,
    term_count: u32,
    processed_at: NaiveDate,
) -> Result<Vec<Installment>> {
    if term_count == 0 {
        return Err(LedgerError::InvalidTermCount { terms: term_count });
    }

    let (base, remainder) = principal.split_even(term_count);

    let mut installments = Vec::with_capacity(term_count as usize);
    for i in 1..=term_count {
        let amount = if i == term_count {
            base + remainder
        } else {
            base
        };

        let due_date = processed_at
            .checked_add_months(Months::new(i))
            .ok_or_else(|| LedgerError::InvalidDate {
                message: format!("due date overflow at installment {}", i),
            })?;

        installments.push(Installment::new(loan_id, amount, currency_code, due_date));
    }

    Ok(installments)
}
