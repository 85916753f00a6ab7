use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::AgentId;

/// a field agent holding collected cash
///
/// the balance is kept non-negative by the workflow guards (transfer requests
/// are rejected against it), not by the write path itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub phone: String,
    pub amount_in_hand: Money,
}

impl Agent {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            amount_in_hand: Money::ZERO,
        }
    }

    /// add collected cash (repayment credit, admin grant)
    pub fn credit(&mut self, amount: Money) {
        self.amount_in_hand += amount;
    }

    /// remove cash (loan disbursement, approved transfer)
    pub fn debit(&mut self, amount: Money) {
        self.amount_in_hand -= amount;
    }
}
