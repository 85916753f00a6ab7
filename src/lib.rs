pub mod agent;
pub mod calendar;
pub mod config;
pub mod customer;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod loan;
pub mod scoring;
pub mod transfer;
pub mod types;

// re-export key types
pub use agent::Agent;
pub use calendar::{BusinessCalendar, PublicHoliday};
pub use config::{LoanOffer, LoanQuote, LoanSettings, QualificationRange};
pub use customer::Customer;
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use ledger::{DailySummary, Ledger, Repayment};
pub use loan::Loan;
pub use scoring::ScoreAdjustment;
pub use transfer::{TransferAction, TransferRequest};
pub use types::{
    AgentId, CustomerId, LoanId, LoanStatus, PaymentDay, PaymentStatusColor, RepaymentId,
    TransferId, TransferStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
