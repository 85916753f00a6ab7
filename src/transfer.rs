use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{AgentId, TransferId, TransferStatus};

/// note stored when a request is rejected without an explanation
pub const DEFAULT_REJECTION_NOTE: &str = "No reason provided.";

/// an agent's request to hand collected cash over to the admin
///
/// the balance is only debited on approval, never at request time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub id: TransferId,
    pub agent_id: AgentId,
    pub requested_amount: Money,
    pub actual_received_amount: Option<Money>,
    pub status: TransferStatus,
    pub rejection_note: Option<String>,
    pub requested_on: NaiveDate,
}

/// admin decision on a pending transfer request
#[derive(Debug, Clone, PartialEq)]
pub enum TransferAction {
    /// approve; the admin may correct the amount actually received
    Approve { actual_amount: Option<Money> },
    /// reject with an optional note
    Reject { note: Option<String> },
}

impl TransferRequest {
    pub fn new(agent_id: AgentId, requested_amount: Money, requested_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_id,
            requested_amount,
            actual_received_amount: None,
            status: TransferStatus::Pending,
            rejection_note: None,
            requested_on,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Pending
    }

    /// apply an admin decision; each request resolves at most once
    ///
    /// on approval, returns the amount the agent's balance must be debited by
    pub fn resolve(&mut self, action: TransferAction) -> Result<Option<Money>> {
        if !self.is_pending() {
            return Err(LedgerError::TransferAlreadyResolved {
                status: self.status,
            });
        }

        match action {
            TransferAction::Approve { actual_amount } => {
                let amount = actual_amount.unwrap_or(self.requested_amount);
                self.status = TransferStatus::Approved;
                self.actual_received_amount = Some(amount);
                Ok(Some(amount))
            }
            TransferAction::Reject { note } => {
                self.status = TransferStatus::Rejected;
                self.rejection_note =
                    Some(note.unwrap_or_else(|| DEFAULT_REJECTION_NOTE.to_string()));
                Ok(None)
            }
        }
    }
}
