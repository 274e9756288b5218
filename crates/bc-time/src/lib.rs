//! # bc-time
//!
//! Dates, calendars, day counters, schedules, and interest-rate conversions
//! for bootcurve.
//!
//! These are the curve core's external collaborators: the only way dates
//! become numeric times for a curve is [`DayCounter::year_fraction`], and the
//! only way instrument dates are rolled off holidays is [`Calendar::adjust`] /
//! [`Calendar::advance`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod business_day_convention;
mod calendar;
/// Holiday calendars.
pub mod calendars;
mod date;
mod day_counter;
mod frequency;
mod interest_rate;
mod period;
mod schedule;
mod time_unit;
mod weekday;

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use calendars::Target;
pub use date::Date;
pub use day_counter::{Actual360, Actual365Fixed, DayCounter, Thirty360};
pub use frequency::Frequency;
pub use interest_rate::InterestRate;
pub use period::Period;
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder};
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
