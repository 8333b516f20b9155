pub mod allocation;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod loan;
pub mod money;
pub mod schedule;
pub mod store;
pub mod types;
pub mod views;

// re-export key types
pub use allocation::{allocate, AllocationResult};
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use ledger::{Ledger, LedgerConfig};
pub use loan::{Installment, Loan, ReceivedRepayment};
pub use money::Money;
pub use schedule::build_schedule;
pub use store::{LedgerStore, LoanRecord, MemoryStore, VersionedLoan};
pub use types::{
    BorrowerId, InstallmentId, InstallmentStatus, LoanId, LoanStatus, RepaymentId,
};
pub use views::{InstallmentView, LoanView};

// re-export external dependencies that users will need
pub use chrono;
pub use uuid::Uuid;
