/// lifecycle - complete loan lifecycle from issuance to settlement
use std::sync::Arc;

use lending_ledger_rs::chrono::{NaiveDate, TimeZone, Utc};
use lending_ledger_rs::{Ledger, LoanStatus, MemoryStore, Money, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== loan lifecycle ===\n");

    let store = Arc::new(MemoryStore::new());
    let mut ledger = Ledger::new(Arc::clone(&store));

    // 1. issuance
    println!("1. issuance phase");
    println!("-----------------");
    let record = ledger.create_loan(
        Uuid::new_v4(),
        Money::from_minor(100_000), // 1000.00 over 3 installments
        "EUR",
        3,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    )?;
    let loan_id = record.loan.id;

    println!("  status: {:?}", record.loan.status);
    println!("  outstanding: {}", record.loan.outstanding_amount);
    for installment in &record.installments {
        println!(
            "  installment due {}: {}",
            installment.due_date, installment.amount
        );
    }

    // 2. normal servicing (two exact installment payments)
    println!("\n2. servicing phase");
    println!("------------------");
    for month in 2..=3 {
        let received_at = Utc
            .with_ymd_and_hms(2024, month, 15, 9, 0, 0)
            .unwrap();
        let record = ledger.apply_repayment(
            loan_id,
            Money::from_minor(33_333),
            "EUR",
            received_at,
        )?;
        println!(
            "  {}: paid 33333, outstanding {}",
            received_at.format("%Y-%m-%d"),
            record.loan.outstanding_amount
        );
    }

    // 3. underpayment leaves a partial installment
    println!("\n3. partial payment phase");
    println!("------------------------");
    let record = ledger.apply_repayment(
        loan_id,
        Money::from_minor(10_000),
        "EUR",
        Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap(),
    )?;
    for installment in &record.installments {
        println!(
            "  installment due {}: {:?}, outstanding {}",
            installment.due_date, installment.status, installment.outstanding_amount
        );
    }

    // 4. final payoff
    println!("\n4. payoff phase");
    println!("---------------");
    let payoff = record.loan.outstanding_amount;
    let record = ledger.apply_repayment(
        loan_id,
        payoff,
        "EUR",
        Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap(),
    )?;
    println!("  paid {}", payoff);
    println!("  final status: {:?}", record.loan.status);
    assert_eq!(record.loan.status, LoanStatus::Repaid);

    // 5. audit trail and events
    println!("\n5. audit trail");
    println!("--------------");
    for repayment in store.received_repayments(loan_id)? {
        println!(
            "  received {} at {}",
            repayment.amount,
            repayment.received_at.format("%Y-%m-%d")
        );
    }
    println!("\n  events:");
    for event in ledger.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
