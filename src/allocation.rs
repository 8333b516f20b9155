use crate::events::{Event, EventStore};
use crate::loan::Installment;
use crate::money::Money;
use crate::types::{InstallmentId, InstallmentStatus};

/// outcome of one allocation walk
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    /// portion of the payment consumed by installments
    pub applied: Money,
    /// leftover once every installment is exhausted
    pub unallocated: Money,
    /// installments mutated by the walk, in allocation order
    pub touched: Vec<InstallmentId>,
}

/// allocate a payment across outstanding installments, earliest due date first
///
/// each installment is either fully settled (outstanding drops to zero) or
/// partially settled (outstanding reduced by whatever remains of the payment),
/// and the walk stops as soon as the payment is consumed. installments already
/// repaid are skipped. the `amount` field of an installment is never changed.
pub fn allocate(
    installments: &mut [Installment],
    amount: Money,
    events: &mut EventStore,
) -> AllocationResult {
    let mut order: Vec<usize> = (0..installments.len())
        .filter(|&i| !installments[i].is_settled())
        .collect();
    order.sort_by_key(|&i| installments[i].due_date);

    let mut remaining = amount;
    let mut touched = Vec::new();

    for index in order {
        if !remaining.is_positive() {
            break;
        }

        let installment = &mut installments[index];
        let owed = installment.outstanding_amount;

        if remaining >= owed {
            installment.outstanding_amount = Money::ZERO;
            installment.status = InstallmentStatus::Repaid;
            remaining -= owed;

            events.emit(Event::InstallmentSettled {
                loan_id: installment.loan_id,
                installment_id: installment.id,
                applied: owed,
                due_date: installment.due_date,
            });
        } else {
            installment.outstanding_amount = owed - remaining;
            installment.status = InstallmentStatus::Partial;

            events.emit(Event::InstallmentPartiallySettled {
                loan_id: installment.loan_id,
                installment_id: installment.id,
                applied: remaining,
                outstanding: installment.outstanding_amount,
                due_date: installment.due_date,
            });

            remaining = Money::ZERO;
        }

        touched.push(installment.id);
    }

    AllocationResult {
        applied: amount - remaining,
        unallocated: remaining,
        touched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn installment(amount: i64, due: (i32, u32, u32)) -> Installment {
        Installment::new(
            Uuid::new_v4(),
            Money::from_minor(amount),
            "EUR",
            NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
        )
    }

    #[test]
    fn test_allocates_earliest_due_first() {
        // deliberately out of creation order
        let mut installments = vec![
            installment(300, (2024, 4, 1)),
            installment(300, (2024, 2, 1)),
            installment(300, (2024, 3, 1)),
        ];
        let mut events = EventStore::new();

        let result = allocate(&mut installments, Money::from_minor(450), &mut events);

        // february settles in full before march is touched
        assert_eq!(installments[1].status, InstallmentStatus::Repaid);
        assert_eq!(installments[2].status, InstallmentStatus::Partial);
        assert_eq!(installments[2].outstanding_amount, Money::from_minor(150));
        assert_eq!(installments[0].status, InstallmentStatus::Due);
        assert_eq!(installments[0].outstanding_amount, Money::from_minor(300));

        assert_eq!(result.applied, Money::from_minor(450));
        assert_eq!(result.unallocated, Money::ZERO);
        assert_eq!(result.touched, vec![installments[1].id, installments[2].id]);
    }

    #[test]
    fn test_partial_allocation_touches_one_row() {
        let mut installments = vec![
            installment(300, (2024, 2, 1)),
            installment(300, (2024, 3, 1)),
        ];
        let mut events = EventStore::new();

        let result = allocate(&mut installments, Money::from_minor(100), &mut events);

        assert_eq!(installments[0].status, InstallmentStatus::Partial);
        assert_eq!(installments[0].outstanding_amount, Money::from_minor(200));
        assert_eq!(installments[1].status, InstallmentStatus::Due);
        assert_eq!(result.touched.len(), 1);
        assert_eq!(events.events().len(), 1);
    }

    #[test]
    fn test_exact_settlement() {
        let mut installments = vec![
            installment(300, (2024, 2, 1)),
            installment(300, (2024, 3, 1)),
            installment(400, (2024, 4, 1)),
        ];
        let mut events = EventStore::new();

        let result = allocate(&mut installments, Money::from_minor(1_000), &mut events);

        for installment in &installments {
            assert_eq!(installment.status, InstallmentStatus::Repaid);
            assert_eq!(installment.outstanding_amount, Money::ZERO);
        }
        assert_eq!(result.applied, Money::from_minor(1_000));
        assert_eq!(result.unallocated, Money::ZERO);
    }

    #[test]
    fn test_overpayment_leaves_unallocated_remainder() {
        let mut installments = vec![installment(300, (2024, 2, 1))];
        let mut events = EventStore::new();

        let result = allocate(&mut installments, Money::from_minor(500), &mut events);

        assert_eq!(installments[0].status, InstallmentStatus::Repaid);
        assert_eq!(result.applied, Money::from_minor(300));
        assert_eq!(result.unallocated, Money::from_minor(200));
    }

    #[test]
    fn test_repaid_rows_are_skipped() {
        let mut settled = installment(300, (2024, 2, 1));
        settled.outstanding_amount = Money::ZERO;
        settled.status = InstallmentStatus::Repaid;

        let mut installments = vec![settled, installment(300, (2024, 3, 1))];
        let mut events = EventStore::new();

        let result = allocate(&mut installments, Money::from_minor(300), &mut events);

        assert_eq!(result.touched, vec![installments[1].id]);
        assert_eq!(installments[1].status, InstallmentStatus::Repaid);
    }

    #[test]
    fn test_partial_rows_resume_from_their_outstanding() {
        let mut partial = installment(300, (2024, 2, 1));
        partial.outstanding_amount = Money::from_minor(120);
        partial.status = InstallmentStatus::Partial;

        let mut installments = vec![partial, installment(300, (2024, 3, 1))];
        let mut events = EventStore::new();

        let result = allocate(&mut installments, Money::from_minor(200), &mut events);

        assert_eq!(installments[0].status, InstallmentStatus::Repaid);
        assert_eq!(installments[1].status, InstallmentStatus::Partial);
        assert_eq!(installments[1].outstanding_amount, Money::from_minor(220));
        assert_eq!(result.applied, Money::from_minor(200));
    }

    #[test]
    fn test_installment_amounts_never_change() {
        let mut installments = vec![
            installment(300, (2024, 2, 1)),
            installment(300, (2024, 3, 1)),
        ];
        let mut events = EventStore::new();

        allocate(&mut installments, Money::from_minor(450), &mut events);

        for installment in &installments {
            assert_eq!(installment.amount, Money::from_minor(300));
        }
    }
}
