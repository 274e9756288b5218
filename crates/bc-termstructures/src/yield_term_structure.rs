//! `YieldTermStructure` — the query surface of a yield curve.
//!
//! Three fundamental quantities, all derived from the discount function:
//!
//! * **discount factor** — `P(0, t)`
//! * **zero rate** — the annualized rate between the reference date and a
//!   maturity, under caller-chosen compounding conventions
//! * **forward rate** — the annualized rate between two future dates
//!
//! Every query is fallible: out-of-range times fail with `Extrapolation`
//! unless extrapolation is enabled, and rate queries at or before the
//! reference date fail with `DateBeforeReference`.

use crate::term_structure::TermStructure;
use bc_core::{
    errors::{Error, Result},
    Compounding, DiscountFactor, Time,
};
use bc_time::{Date, DayCounter, Frequency, InterestRate};

/// A yield (interest-rate) term structure.
///
/// Implementors provide [`discount_impl`](YieldTermStructure::discount_impl);
/// the zero- and forward-rate queries are derived from it.
pub trait YieldTermStructure: TermStructure {
    /// The discount factor at time `t`, with no range check.
    ///
    /// Callers reach this through [`discount`](YieldTermStructure::discount),
    /// which validates the range first.
    fn discount_impl(&self, t: Time) -> DiscountFactor;

    // ── Public interface ─────────────────────────────────────────────────

    /// Discount factor for a time.
    ///
    /// # Errors
    /// Returns [`Error::Extrapolation`] when `t` is outside the calibrated
    /// range and extrapolation is not allowed.
    fn discount(&self, t: Time, extrapolate: bool) -> Result<DiscountFactor> {
        self.check_range(t, extrapolate)?;
        Ok(self.discount_impl(t))
    }

    /// Discount factor for a date.
    fn discount_date(&self, date: Date, extrapolate: bool) -> Result<DiscountFactor> {
        self.discount(self.time_from_reference(date), extrapolate)
    }

    /// Zero rate between the reference date and `date`, expressed under the
    /// given day-count, compounding, and frequency conventions.
    ///
    /// # Errors
    /// Returns [`Error::DateBeforeReference`] if `date` is on or before the
    /// reference date.
    fn zero_rate(
        &self,
        date: Date,
        dc: &dyn DayCounter,
        comp: Compounding,
        freq: Frequency,
        extrapolate: bool,
    ) -> Result<InterestRate> {
        if date <= self.reference_date() {
            return Err(Error::DateBeforeReference {
                date: date.to_string(),
                reference: self.reference_date().to_string(),
            });
        }
        // Range checks run in the curve's own day counter; the result is
        // expressed in the caller's.
        let df = self.discount(self.time_from_reference(date), extrapolate)?;
        let t = dc.year_fraction(self.reference_date(), date);
        InterestRate::implied_rate(1.0 / df, comp, freq, t)
    }

    /// Zero rate for a time `t` measured with the curve's day counter.
    fn zero_rate_time(
        &self,
        t: Time,
        comp: Compounding,
        freq: Frequency,
        extrapolate: bool,
    ) -> Result<InterestRate> {
        bc_core::ensure!(t > 0.0, "zero rate requires a positive time, got {t}");
        let df = self.discount(t, extrapolate)?;
        InterestRate::implied_rate(1.0 / df, comp, freq, t)
    }

    /// Forward rate between two dates, expressed under the given
    /// conventions.
    ///
    /// # Errors
    /// Returns [`Error::DateBeforeReference`] if `d1` precedes the
    /// reference date, and a precondition failure if `d2 <= d1`.
    fn forward_rate(
        &self,
        d1: Date,
        d2: Date,
        dc: &dyn DayCounter,
        comp: Compounding,
        freq: Frequency,
        extrapolate: bool,
    ) -> Result<InterestRate> {
        if d1 < self.reference_date() {
            return Err(Error::DateBeforeReference {
                date: d1.to_string(),
                reference: self.reference_date().to_string(),
            });
        }
        bc_core::ensure!(d2 > d1, "forward period [{d1}, {d2}] is empty or inverted");
        let df1 = self.discount(self.time_from_reference(d1), extrapolate)?;
        let df2 = self.discount(self.time_from_reference(d2), extrapolate)?;
        let tau = dc.year_fraction(d1, d2);
        InterestRate::implied_rate(df1 / df2, comp, freq, tau)
    }

    /// Forward rate between two times measured with the curve's day
    /// counter.
    fn forward_rate_time(
        &self,
        t1: Time,
        t2: Time,
        comp: Compounding,
        freq: Frequency,
        extrapolate: bool,
    ) -> Result<InterestRate> {
        bc_core::ensure!(t1 >= 0.0, "forward start time {t1} is negative");
        bc_core::ensure!(t2 > t1, "forward period [{t1}, {t2}] is empty or inverted");
        let df1 = self.discount(t1, extrapolate)?;
        let df2 = self.discount(t2, extrapolate)?;
        InterestRate::implied_rate(df1 / df2, comp, freq, t2 - t1)
    }
}
