//! `Schedule` — the coupon/payment date sequence of an instrument.
//!
//! A schedule is generated from a start date, end date, tenor, calendar,
//! and business-day conventions.  Swap and bond helpers use it to lay out
//! their fixed legs.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::period::Period;
use bc_core::errors::Result;

/// Date generation rule for schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateGeneration {
    /// Dates generated backward from the end date.
    Backward,
    /// Dates generated forward from the start date.
    Forward,
    /// Zero coupon — only start and end dates.
    Zero,
}

/// An ordered sequence of coupon/payment dates.
#[derive(Debug, Clone)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// All dates in the schedule, in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates.
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// Return `true` if the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The `i`-th date.
    pub fn date(&self, i: usize) -> Date {
        self.dates[i]
    }

    /// The start (effective) date.
    pub fn start_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// The end (termination) date.
    pub fn end_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Build a schedule from an explicit list of dates.
    pub fn from_dates(dates: Vec<Date>) -> Self {
        Self { dates }
    }
}

/// Builder for [`Schedule`].
#[derive(Debug)]
pub struct ScheduleBuilder<'a> {
    effective_date: Date,
    termination_date: Date,
    tenor: Period,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
}

impl<'a> ScheduleBuilder<'a> {
    /// Begin building a schedule.
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        tenor: Period,
        calendar: &'a dyn Calendar,
    ) -> Self {
        Self {
            effective_date,
            termination_date,
            tenor,
            calendar,
            convention: BusinessDayConvention::ModifiedFollowing,
            termination_convention: BusinessDayConvention::ModifiedFollowing,
            rule: DateGeneration::Backward,
            end_of_month: false,
        }
    }

    /// Set the business-day convention for intermediate dates.
    pub fn with_convention(mut self, c: BusinessDayConvention) -> Self {
        self.convention = c;
        self
    }

    /// Set the business-day convention for the termination date.
    pub fn with_termination_convention(mut self, c: BusinessDayConvention) -> Self {
        self.termination_convention = c;
        self
    }

    /// Set the date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Whether to snap month/year-rolled dates to the end of the month.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    /// Build the `Schedule`.
    pub fn build(self) -> Result<Schedule> {
        let start = self.effective_date;
        let end = self.termination_date;
        bc_core::ensure!(
            start < end,
            "effective date {start} must be before termination date {end}"
        );

        if self.tenor.length == 0 || self.rule == DateGeneration::Zero {
            return Ok(Schedule {
                dates: vec![
                    self.calendar.adjust(start, self.convention),
                    self.calendar.adjust(end, self.termination_convention),
                ],
            });
        }

        let mut dates: Vec<Date> = Vec::new();
        match self.rule {
            DateGeneration::Forward => {
                dates.push(self.calendar.adjust(start, self.convention));
                let mut n = 1i32;
                loop {
                    let next = start.advance(n * self.tenor.length, self.tenor.unit)?;
                    if next >= end {
                        break;
                    }
                    dates.push(self.roll(next));
                    n += 1;
                }
                dates.push(self.calendar.adjust(end, self.termination_convention));
            }
            DateGeneration::Backward | DateGeneration::Zero => {
                dates.push(self.calendar.adjust(end, self.termination_convention));
                let mut n = 1i32;
                loop {
                    let prev = end.advance(-n * self.tenor.length, self.tenor.unit)?;
                    if prev <= start {
                        break;
                    }
                    dates.insert(0, self.roll(prev));
                    n += 1;
                }
                dates.insert(0, self.calendar.adjust(start, self.convention));
            }
        }

        dates.dedup();
        Ok(Schedule { dates })
    }

    fn roll(&self, raw: Date) -> Date {
        let adj = self.calendar.adjust(raw, self.convention);
        if self.end_of_month && self.calendar.is_end_of_month(adj) {
            self.calendar.end_of_month(raw)
        } else {
            adj
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekendsOnly;
    use crate::time_unit::TimeUnit;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn zero_coupon_schedule() {
        let cal = WeekendsOnly;
        let sched = ScheduleBuilder::new(
            date(2023, 1, 1),
            date(2025, 1, 1),
            Period::new(0, TimeUnit::Years),
            &cal,
        )
        .build()
        .unwrap();
        assert_eq!(sched.size(), 2);
    }

    #[test]
    fn annual_backward_schedule() {
        let cal = WeekendsOnly;
        let sched = ScheduleBuilder::new(
            date(2020, 1, 1),
            date(2023, 1, 1),
            Period::years(1),
            &cal,
        )
        .build()
        .unwrap();
        // 2020-01-01 falls on a Wednesday, so only holiday rolls move dates.
        assert_eq!(sched.size(), 4);
        assert_eq!(sched.start_date().unwrap(), date(2020, 1, 1));
        assert_eq!(sched.end_date().unwrap(), date(2023, 1, 1));
    }

    #[test]
    fn semiannual_forward_schedule() {
        let cal = WeekendsOnly;
        let sched = ScheduleBuilder::new(
            date(2021, 3, 15),
            date(2022, 3, 15),
            Period::months(6),
            &cal,
        )
        .with_rule(DateGeneration::Forward)
        .build()
        .unwrap();
        assert_eq!(sched.dates().len(), 3);
        assert_eq!(sched.date(1), date(2021, 9, 15));
    }

    #[test]
    fn rejects_inverted_dates() {
        let cal = WeekendsOnly;
        let result =
            ScheduleBuilder::new(date(2023, 1, 1), date(2022, 1, 1), Period::years(1), &cal)
                .build();
        assert!(result.is_err());
    }
}
