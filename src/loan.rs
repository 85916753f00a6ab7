use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::BusinessCalendar;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::{CustomerId, LoanId, LoanStatus, PaymentDay, PaymentStatusColor};

/// a disbursed microloan collected in daily installments
///
/// the financial schedule (`total_due`, `daily_payment`, `start_date`,
/// `end_date`) is fixed at origination and never recomputed; repayment
/// progress mutates only through [`Loan::apply_payment`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub customer_id: CustomerId,
    pub principal_amount: Money,
    pub interest_rate: Rate,
    pub duration_days: u32,
    pub total_due: Money,
    pub daily_payment: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LoanStatus,
    pub last_paid_date: Option<NaiveDate>,
    /// count of distinct repayment dates, not an index into the term
    pub days_paid: u32,
    pub total_paid: Money,
}

impl Loan {
    /// originate a loan and compute its financial schedule
    ///
    /// collection starts on the first business day strictly after the
    /// creation day; the term itself is measured in calendar days, so
    /// weekends and holidays inside it shift expected payment days without
    /// extending the end date
    pub fn originate(
        customer_id: CustomerId,
        principal: Money,
        interest_rate: Rate,
        duration_days: u32,
        created_on: NaiveDate,
        calendar: &BusinessCalendar,
    ) -> Result<Self> {
        if duration_days == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "loan duration must be at least one day".to_string(),
            });
        }
        if !principal.is_positive() {
            return Err(LedgerError::Validation {
                message: format!("principal must be positive, got {}", principal),
            });
        }

        let total_due = principal + principal.percentage(interest_rate.as_percent());
        let daily_payment = total_due / Decimal::from(duration_days);
        let start_date = calendar.next_business_day_after(created_on);
        let end_date = start_date + Duration::days(duration_days as i64);

        Ok(Self {
            id: Uuid::new_v4(),
            customer_id,
            principal_amount: principal,
            interest_rate,
            duration_days,
            total_due,
            daily_payment,
            start_date,
            end_date,
            status: LoanStatus::Active,
            last_paid_date: None,
            days_paid: 0,
            total_paid: Money::ZERO,
        })
    }

    /// calendar days since the collection start date
    pub fn days_elapsed(&self, today: NaiveDate) -> i64 {
        (today - self.start_date).num_days()
    }

    /// an active loan is due unless a payment was already recorded today
    pub fn is_due_today(&self, today: NaiveDate) -> bool {
        if self.status != LoanStatus::Active {
            return false;
        }
        self.last_paid_date != Some(today)
    }

    /// elapsed days not covered by a distinct repayment date
    pub fn days_missed(&self, today: NaiveDate) -> i64 {
        (self.days_elapsed(today) - self.days_paid as i64).max(0)
    }

    pub fn remaining_balance(&self) -> Money {
        (self.total_due - self.total_paid).max(Money::ZERO)
    }

    pub fn is_fully_paid(&self) -> bool {
        self.remaining_balance().is_zero()
    }

    /// dashboard traffic-light: green, yellow up to 3 missed days, red after
    pub fn payment_status_color(&self, today: NaiveDate) -> PaymentStatusColor {
        PaymentStatusColor::from_days_missed(self.days_missed(today))
    }

    /// label for the next expected payment day, none once fully paid
    pub fn next_payment_day(
        &self,
        today: NaiveDate,
        calendar: &BusinessCalendar,
    ) -> Option<PaymentDay> {
        if self.is_fully_paid() {
            return None;
        }

        let candidate = match self.last_paid_date {
            // already paid today, next collection is the following business day
            Some(last_paid) if last_paid == today => calendar.next_business_day_after(today),
            _ if self.days_missed(today) > 0 => calendar.next_business_day(today),
            None => calendar.next_business_day(today),
            // paid before, not today, nothing missed
            Some(last_paid) => calendar.next_business_day_after(last_paid),
        };

        Some(if candidate == today {
            PaymentDay::Today
        } else if candidate == today + Duration::days(1) {
            PaymentDay::Tomorrow
        } else {
            PaymentDay::On(chrono::Datelike::weekday(&candidate))
        })
    }

    /// fold a recorded repayment into the loan totals
    ///
    /// returns true when this payment completed the loan; the transition to
    /// `Completed` happens here exactly once and never reverses
    pub(crate) fn apply_payment(&mut self, amount: Money, date: NaiveDate) -> bool {
        self.total_paid += amount;
        self.last_paid_date = Some(date);
        self.days_paid += 1;

        if self.status == LoanStatus::Active && self.remaining_balance().is_zero() {
            self.status = LoanStatus::Completed;
            return true;
        }
        false
    }

    /// get json representation of current state
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::PublicHoliday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn loan_from(created_on: NaiveDate) -> Loan {
        Loan::originate(
            Uuid::new_v4(),
            Money::from_major(300),
            Rate::from_percent(20),
            20,
            created_on,
            &BusinessCalendar::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_schedule_fixed_at_origination() {
        // created tuesday 2024-06-04, starts wednesday
        let loan = loan_from(d(2024, 6, 4));

        assert_eq!(loan.total_due, Money::from_major(360));
        assert_eq!(loan.daily_payment, Money::from_major(18));
        assert_eq!(loan.start_date, d(2024, 6, 5));
        assert_eq!(loan.end_date, d(2024, 6, 25));
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.days_paid, 0);
        assert_eq!(loan.total_paid, Money::ZERO);
        assert_eq!(loan.last_paid_date, None);
    }

    #[test]
    fn test_start_date_never_creation_day() {
        // created monday: start is tuesday, not monday itself
        let loan = loan_from(d(2024, 6, 3));
        assert_eq!(loan.start_date, d(2024, 6, 4));
    }

    #[test]
    fn test_start_date_skips_weekend() {
        // created friday: saturday and sunday skipped
        let loan = loan_from(d(2024, 6, 7));
        assert_eq!(loan.start_date, d(2024, 6, 10));
    }

    #[test]
    fn test_start_date_skips_holiday_and_weekend() {
        // created thursday, friday is a holiday: start lands on monday
        let holidays = [PublicHoliday::new(d(2024, 6, 7), "Bank Holiday")];
        let calendar = BusinessCalendar::from_holidays(&holidays);

        let loan = Loan::originate(
            Uuid::new_v4(),
            Money::from_major(300),
            Rate::from_percent(20),
            20,
            d(2024, 6, 6),
            &calendar,
        )
        .unwrap();

        assert_eq!(loan.start_date, d(2024, 6, 10));
        // term length is unchanged by the shift
        assert_eq!(loan.end_date, d(2024, 6, 30));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = Loan::originate(
            Uuid::new_v4(),
            Money::from_major(300),
            Rate::from_percent(20),
            0,
            d(2024, 6, 4),
            &BusinessCalendar::new(),
        );
        assert!(matches!(
            result,
            Err(LedgerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_uneven_daily_payment_rounds() {
        let loan = Loan::originate(
            Uuid::new_v4(),
            Money::from_major(250),
            Rate::from_percent(25),
            25,
            d(2024, 6, 4),
            &BusinessCalendar::new(),
        )
        .unwrap();

        assert_eq!(loan.total_due, Money::from_str_exact("312.50").unwrap());
        assert_eq!(loan.daily_payment, Money::from_str_exact("12.50").unwrap());
    }

    #[test]
    fn test_days_missed_tracks_unpaid_days() {
        let mut loan = loan_from(d(2024, 6, 4)); // starts wed 2024-06-05

        assert_eq!(loan.days_missed(d(2024, 6, 5)), 0);

        loan.apply_payment(Money::from_major(18), d(2024, 6, 5));
        assert_eq!(loan.days_missed(d(2024, 6, 6)), 0);
        assert_eq!(loan.payment_status_color(d(2024, 6, 6)), PaymentStatusColor::Green);

        // three unpaid days later: still yellow
        assert_eq!(loan.days_missed(d(2024, 6, 9)), 3);
        assert_eq!(loan.payment_status_color(d(2024, 6, 9)), PaymentStatusColor::Yellow);

        // four: red
        assert_eq!(loan.days_missed(d(2024, 6, 10)), 4);
        assert_eq!(loan.payment_status_color(d(2024, 6, 10)), PaymentStatusColor::Red);
    }

    #[test]
    fn test_due_today_flips_after_payment() {
        let mut loan = loan_from(d(2024, 6, 4));
        let today = d(2024, 6, 5);

        assert!(loan.is_due_today(today));
        loan.apply_payment(Money::from_major(18), today);
        assert!(!loan.is_due_today(today));
        // due again the next day
        assert!(loan.is_due_today(d(2024, 6, 6)));
    }

    #[test]
    fn test_completion_is_terminal() {
        let mut loan = loan_from(d(2024, 6, 4));

        let completed = loan.apply_payment(Money::from_major(360), d(2024, 6, 5));
        assert!(completed);
        assert_eq!(loan.status, LoanStatus::Completed);
        assert!(loan.is_fully_paid());
        assert!(!loan.is_due_today(d(2024, 6, 6)));

        // overpayment clamps at zero and does not re-complete
        let completed_again = loan.apply_payment(Money::from_major(18), d(2024, 6, 6));
        assert!(!completed_again);
        assert_eq!(loan.remaining_balance(), Money::ZERO);
        assert_eq!(loan.status, LoanStatus::Completed);
    }

    #[test]
    fn test_next_payment_day_priorities() {
        let calendar = BusinessCalendar::new();
        let mut loan = loan_from(d(2024, 6, 4)); // starts wed 2024-06-05

        // never paid: due today
        assert_eq!(
            loan.next_payment_day(d(2024, 6, 5), &calendar),
            Some(PaymentDay::Today)
        );

        // paid today: next business day after today
        loan.apply_payment(Money::from_major(18), d(2024, 6, 5));
        assert_eq!(
            loan.next_payment_day(d(2024, 6, 5), &calendar),
            Some(PaymentDay::Tomorrow)
        );

        // paid yesterday, nothing missed: day after the last payment
        assert_eq!(
            loan.next_payment_day(d(2024, 6, 6), &calendar),
            Some(PaymentDay::Today)
        );

        // missed days outstanding: due today
        assert_eq!(
            loan.next_payment_day(d(2024, 6, 10), &calendar),
            Some(PaymentDay::Today)
        );
    }

    #[test]
    fn test_next_payment_day_paid_friday_labels_monday() {
        let calendar = BusinessCalendar::new();
        // created wed 2024-06-05, starts thursday
        let mut loan = loan_from(d(2024, 6, 5));
        loan.apply_payment(Money::from_major(18), d(2024, 6, 6));
        loan.apply_payment(Money::from_major(18), d(2024, 6, 7)); // friday

        // viewed on friday after paying: next collection is monday
        assert_eq!(
            loan.next_payment_day(d(2024, 6, 7), &calendar),
            Some(PaymentDay::On(chrono::Weekday::Mon))
        );
    }

    #[test]
    fn test_next_payment_day_none_when_paid_off() {
        let calendar = BusinessCalendar::new();
        let mut loan = loan_from(d(2024, 6, 4));
        loan.apply_payment(Money::from_major(360), d(2024, 6, 5));

        assert_eq!(loan.next_payment_day(d(2024, 6, 5), &calendar), None);
    }
}
