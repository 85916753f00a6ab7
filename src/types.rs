use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for an agent
pub type AgentId = Uuid;

/// unique identifier for a customer
pub type CustomerId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a repayment entry
pub type RepaymentId = Uuid;

/// unique identifier for a cash-transfer request
pub type TransferId = Uuid;

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// loan disbursed and collecting
    Active,
    /// fully repaid
    Completed,
}

/// cash-transfer request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    /// awaiting admin resolution
    Pending,
    /// approved, agent balance debited
    Approved,
    /// rejected, no balance effect
    Rejected,
}

/// dashboard traffic-light for a loan's repayment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatusColor {
    /// no missed days
    Green,
    /// 1 to 3 missed days
    Yellow,
    /// more than 3 missed days
    Red,
}

impl PaymentStatusColor {
    /// classify a missed-day count
    pub fn from_days_missed(days_missed: i64) -> Self {
        if days_missed == 0 {
            PaymentStatusColor::Green
        } else if days_missed <= 3 {
            PaymentStatusColor::Yellow
        } else {
            PaymentStatusColor::Red
        }
    }
}

/// human-friendly label for the next expected payment day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentDay {
    Today,
    Tomorrow,
    On(Weekday),
}

impl fmt::Display for PaymentDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentDay::Today => write!(f, "Today"),
            PaymentDay::Tomorrow => write!(f, "Tomorrow"),
            PaymentDay::On(weekday) => write!(f, "On {}", weekday_name(*weekday)),
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color_tie_breaks() {
        assert_eq!(PaymentStatusColor::from_days_missed(0), PaymentStatusColor::Green);
        assert_eq!(PaymentStatusColor::from_days_missed(1), PaymentStatusColor::Yellow);
        assert_eq!(PaymentStatusColor::from_days_missed(3), PaymentStatusColor::Yellow);
        assert_eq!(PaymentStatusColor::from_days_missed(4), PaymentStatusColor::Red);
    }

    #[test]
    fn test_payment_day_labels() {
        assert_eq!(PaymentDay::Today.to_string(), "Today");
        assert_eq!(PaymentDay::Tomorrow.to_string(), "Tomorrow");
        assert_eq!(PaymentDay::On(Weekday::Mon).to_string(), "On Monday");
    }
}
