use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// default loan terms, passed explicitly at the call boundary
///
/// used for qualification only when no customer-specific range applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSettings {
    pub interest_percent: Rate,
    pub duration_days: u32,
    pub min_loan_amount: Money,
    pub max_loan_amount: Money,
}

impl Default for LoanSettings {
    fn default() -> Self {
        Self {
            interest_percent: Rate::from_percent(20),
            duration_days: 20,
            min_loan_amount: Money::from_major(200),
            max_loan_amount: Money::from_major(500),
        }
    }
}

/// principal bounds a customer (or walk-in applicant) qualifies for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualificationRange {
    pub lower: Money,
    pub upper: Money,
}

impl QualificationRange {
    pub fn new(lower: Money, upper: Money) -> Self {
        Self { lower, upper }
    }

    /// fallback range for applicants with no credit history
    pub fn from_settings(settings: &LoanSettings) -> Self {
        Self {
            lower: settings.min_loan_amount,
            upper: settings.max_loan_amount,
        }
    }

    pub fn contains(&self, amount: Money) -> bool {
        amount >= self.lower && amount <= self.upper
    }
}

/// a loan product offered to a qualified customer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub interest: Rate,
    pub duration_days: u32,
}

/// repayment terms quoted for an offer at a given principal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub principal: Money,
    pub interest: Rate,
    pub duration_days: u32,
    pub total_due: Money,
    pub daily_payment: Money,
}

impl LoanOffer {
    pub fn new(interest: Rate, duration_days: u32) -> Self {
        Self {
            interest,
            duration_days,
        }
    }

    /// the two standard field offers
    pub fn standard() -> Vec<LoanOffer> {
        vec![
            LoanOffer::new(Rate::from_percent(20), 20),
            LoanOffer::new(Rate::from_percent(25), 25),
        ]
    }

    /// quote repayment terms for a principal, rounded the same way loan
    /// origination rounds them
    pub fn quote(&self, principal: Money) -> LoanQuote {
        let total_due = principal + principal.percentage(self.interest.as_percent());
        let daily_payment = total_due / rust_decimal::Decimal::from(self.duration_days);
        LoanQuote {
            principal,
            interest: self.interest,
            duration_days: self.duration_days,
            total_due,
            daily_payment,
        }
    }
}
