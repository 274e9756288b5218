//! TARGET (Trans-European Automated Real-time Gross Settlement) calendar.

use crate::calendar::Calendar;
use crate::date::{days_in_month, Date};

/// TARGET calendar (the ECB's settlement system).
///
/// Weekends plus New Year's Day, Good Friday, Easter Monday, Labour Day
/// (May 1), Christmas Day, and Boxing Day.
#[derive(Debug, Clone, Copy, Default)]
pub struct Target;

impl Calendar for Target {
    fn name(&self) -> &str {
        "TARGET"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if date.weekday().is_weekend() {
            return false;
        }
        let y = date.year();
        let m = date.month();
        let d = date.day_of_month();
        let doy = date.day_of_year();
        let em = easter_monday(y);

        !((d == 1 && m == 1)
            || (doy == em - 3 && y >= 2000)
            || (doy == em && y >= 2000)
            || (d == 1 && m == 5 && y >= 2000)
            || (d == 25 && m == 12)
            || (d == 26 && m == 12)
            || (d == 31 && m == 12 && (y == 1998 || y == 1999 || y == 2001)))
    }
}

/// Day-of-year (1-based) of Easter Monday, via Oudin's Gregorian algorithm.
fn easter_monday(year: u16) -> u16 {
    let y = year as i32;
    let g = y % 19;
    let c = y / 100;
    let h = (c - c / 4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
    let i = h - (h / 28) * (1 - (h / 28) * (29 / (h + 1)) * ((21 - g) / 11));
    let j = (y + y / 4 + i + 2 - c + c / 4) % 7;
    let p = i - j;
    let e_day = 1 + (p + 27 + (p + 6) / 40) % 31;
    let e_month = 3 + (p + 26) / 30;

    let mut doy = e_day as u16;
    for mon in 1..e_month {
        doy += days_in_month(year, mon as u8) as u16;
    }
    doy + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn fixed_holidays() {
        let cal = Target;
        assert!(!cal.is_business_day(date(2020, 1, 1)));
        assert!(!cal.is_business_day(date(2020, 5, 1)));
        assert!(!cal.is_business_day(date(2020, 12, 25)));
    }

    #[test]
    fn easter_2020() {
        // Easter Sunday 2020: April 12.
        let cal = Target;
        assert!(!cal.is_business_day(date(2020, 4, 10))); // Good Friday
        assert!(!cal.is_business_day(date(2020, 4, 13))); // Easter Monday
        assert!(cal.is_business_day(date(2020, 4, 14)));
    }

    #[test]
    fn ordinary_weekday() {
        assert!(Target.is_business_day(date(2020, 3, 11)));
    }
}
