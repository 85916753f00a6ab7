use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::scoring::ScoreAdjustment;
use crate::types::{AgentId, CustomerId, LoanId, RepaymentId, TransferId};

/// all events emitted by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // registration events
    AgentRegistered {
        agent_id: AgentId,
    },
    CustomerRegistered {
        customer_id: CustomerId,
        agent_id: AgentId,
    },

    // loan lifecycle events
    LoanCreated {
        loan_id: LoanId,
        customer_id: CustomerId,
        principal: Money,
        total_due: Money,
        daily_payment: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    FundsDisbursed {
        loan_id: LoanId,
        agent_id: AgentId,
        amount: Money,
    },
    PaymentReceived {
        repayment_id: RepaymentId,
        loan_id: LoanId,
        agent_id: AgentId,
        amount: Money,
        date: NaiveDate,
        remaining_balance: Money,
    },
    LoanCompleted {
        loan_id: LoanId,
        customer_id: CustomerId,
        total_paid: Money,
        completed_on: NaiveDate,
    },
    CreditScoreAdjusted {
        customer_id: CustomerId,
        loan_id: LoanId,
        adjustment: ScoreAdjustment,
        new_score: i64,
    },

    // agent balance events
    FundsGranted {
        agent_id: AgentId,
        amount: Money,
        new_balance: Money,
    },

    // cash-transfer events
    TransferRequested {
        transfer_id: TransferId,
        agent_id: AgentId,
        amount: Money,
    },
    TransferApproved {
        transfer_id: TransferId,
        agent_id: AgentId,
        amount: Money,
        new_balance: Money,
    },
    TransferRejected {
        transfer_id: TransferId,
        agent_id: AgentId,
        note: String,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
