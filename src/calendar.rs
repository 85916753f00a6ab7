use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// a named calendar date excluded from business-day computations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub date: NaiveDate,
    pub name: String,
}

impl PublicHoliday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// business-day resolver over a snapshot of the holiday set
///
/// the snapshot is taken when the calendar is built; a holiday added to the
/// source list afterwards does not retroactively affect schedules already
/// computed against this calendar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl BusinessCalendar {
    /// calendar with no holidays (weekends only)
    pub fn new() -> Self {
        Self::default()
    }

    /// snapshot a holiday list
    pub fn from_holidays<'a, I>(holidays: I) -> Self
    where
        I: IntoIterator<Item = &'a PublicHoliday>,
    {
        Self {
            holidays: holidays.into_iter().map(|h| h.date).collect(),
        }
    }

    /// add a holiday date to the snapshot
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// true unless the date falls on a weekend or a listed holiday
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday();
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            return false;
        }
        !self.holidays.contains(&date)
    }

    /// smallest date >= the input that is a business day
    pub fn next_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut candidate = date;
        while !self.is_business_day(candidate) {
            candidate += Duration::days(1);
        }
        candidate
    }

    /// smallest business day strictly after the input
    pub fn next_business_day_after(&self, date: NaiveDate) -> NaiveDate {
        self.next_business_day(date + Duration::days(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_weekends_are_not_business_days() {
        let cal = BusinessCalendar::new();
        assert!(cal.is_business_day(d(2024, 6, 7))); // friday
        assert!(!cal.is_business_day(d(2024, 6, 8))); // saturday
        assert!(!cal.is_business_day(d(2024, 6, 9))); // sunday
        assert!(cal.is_business_day(d(2024, 6, 10))); // monday
    }

    #[test]
    fn test_holiday_excluded() {
        let holidays = [PublicHoliday::new(d(2024, 4, 25), "National Flag Day")];
        let cal = BusinessCalendar::from_holidays(&holidays);
        assert!(!cal.is_business_day(d(2024, 4, 25)));
        assert!(cal.is_business_day(d(2024, 4, 24)));
    }

    #[test]
    fn test_next_business_day_includes_same_day() {
        let cal = BusinessCalendar::new();
        assert_eq!(cal.next_business_day(d(2024, 6, 10)), d(2024, 6, 10));
        assert_eq!(cal.next_business_day(d(2024, 6, 8)), d(2024, 6, 10));
    }

    #[test]
    fn test_next_business_day_after_is_strict() {
        let cal = BusinessCalendar::new();
        // friday -> monday, even though friday itself is a business day
        assert_eq!(cal.next_business_day_after(d(2024, 6, 7)), d(2024, 6, 10));
        assert_eq!(cal.next_business_day_after(d(2024, 6, 10)), d(2024, 6, 11));
    }

    #[test]
    fn test_holiday_run_into_weekend() {
        // thursday and friday are holidays, so the next business day after
        // wednesday is the following monday
        let holidays = [
            PublicHoliday::new(d(2024, 4, 18), "Kings Birthday"),
            PublicHoliday::new(d(2024, 4, 19), "Bridge Day"),
        ];
        let cal = BusinessCalendar::from_holidays(&holidays);
        assert_eq!(cal.next_business_day_after(d(2024, 4, 17)), d(2024, 4, 22));
    }
}
