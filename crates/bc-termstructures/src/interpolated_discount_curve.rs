//! `InterpolatedDiscountCurve` — a yield curve defined by discount
//! factors at known dates.
//!
//! The curve stores (date, discount-factor) pairs and interpolates them as
//! a function of time.  Log-linear interpolation on discounts gives
//! piecewise-constant forward rates; linear interpolation is also common.
//! This is the frozen-node curve the bootstrapper produces, available
//! standalone when the discount factors are already known.

use crate::term_structure::{TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use bc_core::{errors::Result, DiscountFactor, Time};
use bc_math::{Interpolation1D, InterpolationBuilder};
use bc_time::{Calendar, Date, DayCounter, NullCalendar};

/// A yield curve interpolating known discount factors.
#[derive(Debug)]
pub struct InterpolatedDiscountCurve {
    data: TermStructureData,
    dates: Vec<Date>,
    times: Vec<Time>,
    discounts: Vec<DiscountFactor>,
    interp: Box<dyn Interpolation1D>,
    max_date: Date,
}

impl InterpolatedDiscountCurve {
    /// Build a discount curve from dates and corresponding discount
    /// factors.
    ///
    /// The first date is the reference date and must carry a discount
    /// factor of 1.0; dates must be strictly increasing.
    ///
    /// # Errors
    /// Fails on mismatched inputs, a first discount factor away from 1,
    /// or node times that collapse under the day counter
    /// ([`bc_core::errors::Error::DegenerateNode`]).
    pub fn new(
        dates: &[Date],
        discounts: &[DiscountFactor],
        day_counter: impl DayCounter + 'static,
        builder: &dyn InterpolationBuilder,
    ) -> Result<Self> {
        bc_core::ensure!(
            dates.len() >= 2,
            "need at least 2 dates (reference + 1 pillar), got {}",
            dates.len()
        );
        bc_core::ensure!(
            dates.len() == discounts.len(),
            "{} dates vs {} discount factors",
            dates.len(),
            discounts.len()
        );
        bc_core::ensure!(
            (discounts[0] - 1.0).abs() < 1e-12,
            "first discount factor must be 1.0, got {}",
            discounts[0]
        );

        let reference_date = dates[0];
        let data = TermStructureData::new(reference_date, NullCalendar, day_counter);

        let times: Vec<Time> = dates
            .iter()
            .map(|&d| data.day_counter.year_fraction(reference_date, d))
            .collect();

        let interp = builder.build(&times, discounts)?;
        let max_date = *dates.last().unwrap();

        Ok(Self {
            data,
            dates: dates.to_vec(),
            times,
            discounts: discounts.to_vec(),
            interp,
            max_date,
        })
    }

    /// Set a custom calendar.
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.data.calendar = Box::new(calendar);
        self
    }

    /// Set the per-curve extrapolation policy.
    pub fn with_extrapolation(mut self, flag: bool) -> Self {
        self.data.extrapolation = flag;
        self
    }

    /// The pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The pillar times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The pillar discount factors.
    pub fn discounts(&self) -> &[DiscountFactor] {
        &self.discounts
    }
}

impl TermStructure for InterpolatedDiscountCurve {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.data.day_counter
    }

    fn calendar(&self) -> &dyn Calendar {
        &*self.data.calendar
    }

    fn max_date(&self) -> Date {
        self.max_date
    }

    fn allows_extrapolation(&self) -> bool {
        self.data.extrapolation
    }
}

impl YieldTermStructure for InterpolatedDiscountCurve {
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        self.interp.value_unchecked(t)
    }
}
