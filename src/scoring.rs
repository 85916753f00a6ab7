use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::loan::Loan;
use crate::types::LoanStatus;

/// score a fresh customer starts with
pub const DEFAULT_SCORE: i64 = 500;
/// scores never drop below this, and it doubles as the qualification floor
pub const SCORE_FLOOR: i64 = 200;
/// scores never rise above this
pub const SCORE_CEILING: i64 = 2000;

/// finishing at least this many days before the end date counts as early
pub const EARLY_FINISH_DAYS: i64 = 3;

const EARLY_BONUS: i64 = 250;
const ON_TIME_BONUS: i64 = 200;
const LATE_PENALTY: i64 = 100;

/// how a completed loan moved the customer's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreAdjustment {
    /// no missed days and finished 3+ days early: +250
    EarlyBonus,
    /// no missed days: +200
    OnTimeBonus,
    /// missed days at any point: -100
    LatePenalty,
}

impl ScoreAdjustment {
    pub fn delta(&self) -> i64 {
        match self {
            ScoreAdjustment::EarlyBonus => EARLY_BONUS,
            ScoreAdjustment::OnTimeBonus => ON_TIME_BONUS,
            ScoreAdjustment::LatePenalty => -LATE_PENALTY,
        }
    }
}

/// adjust a customer's score for a completed loan
///
/// no-op unless the loan actually reached `Completed`; returns the
/// adjustment applied so callers can report it
pub fn score_completed_loan(
    customer: &mut Customer,
    loan: &Loan,
    today: NaiveDate,
) -> Option<ScoreAdjustment> {
    if loan.status != LoanStatus::Completed {
        return None;
    }

    let days_early = match loan.last_paid_date {
        Some(last_paid) => (loan.end_date - last_paid).num_days(),
        None => 0,
    };

    let adjustment = if loan.days_missed(today) == 0 && days_early >= EARLY_FINISH_DAYS {
        ScoreAdjustment::EarlyBonus
    } else if loan.days_missed(today) == 0 {
        ScoreAdjustment::OnTimeBonus
    } else {
        ScoreAdjustment::LatePenalty
    };

    customer.credit_score =
        (customer.credit_score + adjustment.delta()).clamp(SCORE_FLOOR, SCORE_CEILING);

    Some(adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::BusinessCalendar;
    use crate::decimal::{Money, Rate};
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn customer() -> Customer {
        Customer::new(
            Uuid::new_v4(),
            "Thandi Nkambule",
            "+268 7600 0003",
            "9105051100087",
            d(2024, 1, 15),
        )
    }

    fn loan() -> Loan {
        // created tue 2024-06-04, starts wed 2024-06-05, ends 2024-06-25
        Loan::originate(
            Uuid::new_v4(),
            Money::from_major(300),
            Rate::from_percent(20),
            20,
            d(2024, 6, 4),
            &BusinessCalendar::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_active_loan_is_ignored() {
        let mut c = customer();
        let l = loan();
        assert_eq!(score_completed_loan(&mut c, &l, d(2024, 6, 10)), None);
        assert_eq!(c.credit_score, DEFAULT_SCORE);
    }

    #[test]
    fn test_early_finish_bonus() {
        let mut c = customer();
        let mut l = loan();

        // settled in 5 large installments, 2024-06-05 through 06-09
        for day in 5..=9 {
            l.apply_payment(Money::from_major(72), d(2024, 6, day));
        }
        let today = d(2024, 6, 9);
        assert_eq!(l.days_missed(today), 0);

        let adjustment = score_completed_loan(&mut c, &l, today);
        assert_eq!(adjustment, Some(ScoreAdjustment::EarlyBonus));
        assert_eq!(c.credit_score, 750);
    }

    #[test]
    fn test_on_time_bonus() {
        let mut c = customer();
        let mut l = loan();

        // one payment every calendar day for the full term
        for offset in 0..20 {
            let date = l.start_date + chrono::Duration::days(offset);
            l.apply_payment(Money::from_major(18), date);
        }
        let today = l.start_date + chrono::Duration::days(19);
        assert_eq!(l.days_missed(today), 0);

        // last payment lands 1 day before end_date, short of the early window
        let adjustment = score_completed_loan(&mut c, &l, today);
        assert_eq!(adjustment, Some(ScoreAdjustment::OnTimeBonus));
        assert_eq!(c.credit_score, 700);
    }

    #[test]
    fn test_late_penalty() {
        let mut c = customer();
        let mut l = loan();

        // five days of silence before the balance is cleared in one go
        let today = d(2024, 6, 10);
        l.apply_payment(Money::from_major(360), today);
        assert!(l.days_missed(today) > 0);

        let adjustment = score_completed_loan(&mut c, &l, today);
        assert_eq!(adjustment, Some(ScoreAdjustment::LatePenalty));
        assert_eq!(c.credit_score, 400);
    }

    #[test]
    fn test_score_is_capped() {
        let mut c = customer();
        c.credit_score = 1900;
        let mut l = loan();
        l.apply_payment(Money::from_major(360), d(2024, 6, 5));

        score_completed_loan(&mut c, &l, d(2024, 6, 5));
        assert_eq!(c.credit_score, SCORE_CEILING);
    }

    #[test]
    fn test_score_is_floored() {
        let mut c = customer();
        c.credit_score = 250;
        let mut l = loan();
        l.apply_payment(Money::from_major(360), d(2024, 6, 12));

        score_completed_loan(&mut c, &l, d(2024, 6, 12));
        assert_eq!(c.credit_score, SCORE_FLOOR);
    }
}
