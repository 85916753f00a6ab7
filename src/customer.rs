use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::QualificationRange;
use crate::decimal::Money;
use crate::scoring;
use crate::types::{AgentId, CustomerId};

/// a borrower registered by a field agent
///
/// whether the customer currently has an active loan is derived by querying
/// loans, never stored here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub agent_id: AgentId,
    pub name: String,
    pub phone: String,
    pub location: Option<String>,
    pub national_id: String,
    pub credit_score: i64,
    pub joined_on: NaiveDate,
}

impl Customer {
    pub fn new(
        agent_id: AgentId,
        name: impl Into<String>,
        phone: impl Into<String>,
        national_id: impl Into<String>,
        joined_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_id,
            name: name.into(),
            phone: phone.into(),
            location: None,
            national_id: national_id.into(),
            credit_score: scoring::DEFAULT_SCORE,
            joined_on,
        }
    }

    /// current qualification range: floor 200 up to the credit score
    pub fn loan_range(&self) -> QualificationRange {
        QualificationRange::new(
            Money::from_major(scoring::SCORE_FLOOR),
            Money::from_major(self.credit_score),
        )
    }
}
