use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{LoanStatus, TransferStatus};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
    },

    #[error("payment already recorded for loan {loan_id} on {date}")]
    DuplicatePayment {
        loan_id: Uuid,
        date: NaiveDate,
    },

    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        available: Money,
        requested: Money,
    },

    #[error("loan not active: current status is {status:?}")]
    LoanNotActive {
        status: LoanStatus,
    },

    #[error("transfer request already resolved: current status is {status:?}")]
    TransferAlreadyResolved {
        status: TransferStatus,
    },

    #[error("customer {customer_id} already has an active loan")]
    ActiveLoanExists {
        customer_id: Uuid,
    },

    #[error("principal {requested} outside qualification range {min}..{max}")]
    PrincipalOutOfRange {
        requested: Money,
        min: Money,
        max: Money,
    },

    #[error("unknown agent: {id}")]
    UnknownAgent {
        id: Uuid,
    },

    #[error("unknown customer: {id}")]
    UnknownCustomer {
        id: Uuid,
    },

    #[error("unknown loan: {id}")]
    UnknownLoan {
        id: Uuid,
    },

    #[error("unknown transfer request: {id}")]
    UnknownTransfer {
        id: Uuid,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
