//! `TermStructure` — base trait for all term structures.
//!
//! Every term structure has a **reference date**, a **day counter**, a
//! **calendar**, and a **maximum date**.  Queries past the maximum date
//! fail with [`Error::Extrapolation`] unless extrapolation is allowed,
//! either per curve or per call.

use bc_core::{
    errors::{Error, Result},
    Time,
};
use bc_time::{Calendar, Date, DayCounter};
use std::sync::Arc;

/// Base trait for all term structures.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which discount = 1.0 and from which time is measured.
    fn reference_date(&self) -> Date;

    /// The day counter used for date → time-fraction conversions.
    fn day_counter(&self) -> &dyn DayCounter;

    /// The calendar used for date adjustments.
    fn calendar(&self) -> &dyn Calendar;

    /// The latest date for which the curve is calibrated.
    fn max_date(&self) -> Date;

    /// The latest time for which the curve is calibrated.
    fn max_time(&self) -> Time {
        self.time_from_reference(self.max_date())
    }

    /// Whether queries past [`max_date`](TermStructure::max_date) are
    /// allowed for this curve without a per-call override.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Convert a date to a year fraction relative to the reference date.
    fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter()
            .year_fraction(self.reference_date(), date)
    }

    /// Validate that `t` is inside the curve's calibrated range.
    ///
    /// # Errors
    /// Returns [`Error::Extrapolation`] for `t < 0`, or for
    /// `t > max_time()` when neither the per-call `extrapolate` flag nor
    /// the per-curve setting allows it.
    fn check_range(&self, t: Time, extrapolate: bool) -> Result<()> {
        if t < 0.0 || (t > self.max_time() && !extrapolate && !self.allows_extrapolation()) {
            return Err(Error::Extrapolation {
                point: t,
                min: 0.0,
                max: self.max_time(),
            });
        }
        Ok(())
    }
}

/// Common data shared by the concrete term structures in this crate.
#[derive(Debug)]
pub struct TermStructureData {
    /// Reference date.
    pub reference_date: Date,
    /// Calendar for date adjustments.
    pub calendar: Box<dyn Calendar>,
    /// Day counter for time calculations.
    pub day_counter: Arc<dyn DayCounter>,
    /// Per-curve extrapolation setting.
    pub extrapolation: bool,
}

impl TermStructureData {
    /// Create a new data bundle with extrapolation disabled.
    pub fn new(
        reference_date: Date,
        calendar: impl Calendar + 'static,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self {
            reference_date,
            calendar: Box::new(calendar),
            day_counter: Arc::new(day_counter),
            extrapolation: false,
        }
    }
}
