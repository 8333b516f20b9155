/// quick start - minimal example to get started
use lending_ledger_rs::chrono::{NaiveDate, TimeZone, Utc};
use lending_ledger_rs::{Ledger, LoanView, MemoryStore, Money, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(MemoryStore::new());

    // issue a 5000.00 EUR loan over 6 monthly installments
    let record = ledger.create_loan(
        Uuid::new_v4(),
        Money::from_minor(500_000),
        "EUR",
        6,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    )?;

    // first repayment arrives a month later
    let record = ledger.apply_repayment(
        record.loan.id,
        Money::from_minor(100_000),
        "EUR",
        Utc.with_ymd_and_hms(2024, 2, 15, 9, 0, 0).unwrap(),
    )?;

    // print current state
    println!("{}", LoanView::from_record(&record).to_json_pretty()?);

    Ok(())
}
