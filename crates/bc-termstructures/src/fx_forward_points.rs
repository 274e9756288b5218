//! `FxForwardPointTermStructure` — forward points as a function of time.
//!
//! The structure holds a spot exchange rate and a set of forward-point
//! pillars, interpolated linearly in time with an implicit `(0, 0)` node
//! at the reference date (spot carries no points).  Beyond the last
//! pillar the points are held constant rather than extended along the
//! last segment, since extrapolated pips grow without economic meaning.

use crate::term_structure::{TermStructure, TermStructureData};
use bc_core::{
    errors::{Error, Result},
    Real, Time,
};
use bc_currencies::{ExchangeRate, ForwardExchangeRate};
use bc_math::{Interpolation1D, LinearInterpolation};
use bc_time::{Calendar, Date, DayCounter, NullCalendar, Period};

/// A term structure of FX forward points over a fixed currency pair.
#[derive(Debug)]
pub struct FxForwardPointTermStructure {
    data: TermStructureData,
    spot: ExchangeRate,
    dates: Vec<Date>,
    times: Vec<Time>,
    points: Vec<Real>,
    interp: LinearInterpolation,
    max_date: Date,
}

impl FxForwardPointTermStructure {
    /// Build a forward-point structure from pillar dates and points.
    ///
    /// Dates must be strictly increasing and after the reference date.
    ///
    /// # Errors
    /// Fails on mismatched inputs, out-of-order pillars, or node times
    /// that collapse under the day counter
    /// ([`Error::DegenerateNode`]).
    pub fn new(
        reference_date: Date,
        spot: ExchangeRate,
        dates: &[Date],
        points: &[Real],
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        bc_core::ensure!(!dates.is_empty(), "at least one forward-point pillar is required");
        bc_core::ensure!(
            dates.len() == points.len(),
            "{} dates vs {} forward points",
            dates.len(),
            points.len()
        );

        let data = TermStructureData::new(reference_date, NullCalendar, day_counter);

        let mut prev = reference_date;
        for &d in dates {
            if d <= prev {
                return Err(Error::DegenerateNode(format!(
                    "pillar date {d} is not after {prev}"
                )));
            }
            prev = d;
        }

        // Spot anchors the structure: zero points at the reference date.
        let mut times: Vec<Time> = Vec::with_capacity(dates.len() + 1);
        let mut node_points: Vec<Real> = Vec::with_capacity(dates.len() + 1);
        times.push(0.0);
        node_points.push(0.0);
        for (&d, &p) in dates.iter().zip(points) {
            times.push(data.day_counter.year_fraction(reference_date, d));
            node_points.push(p);
        }

        let interp = LinearInterpolation::new(&times, &node_points)?;
        let max_date = *dates.last().unwrap();

        Ok(Self {
            data,
            spot,
            dates: dates.to_vec(),
            times,
            points: node_points,
            interp,
            max_date,
        })
    }

    /// Build a forward-point structure from quoted forward exchange
    /// rates.
    ///
    /// All rates must quote the same currency pair at the same spot; the
    /// pillar date of each is the reference date advanced by its tenor.
    ///
    /// # Errors
    /// Fails on an empty input, mixed currency pairs
    /// ([`Error::NotChainable`]), or tenors that collapse to duplicate
    /// dates.
    pub fn from_forward_rates(
        reference_date: Date,
        forwards: &[ForwardExchangeRate],
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        bc_core::ensure!(
            !forwards.is_empty(),
            "at least one forward exchange rate is required"
        );

        let spot = forwards[0].spot_exchange_rate().clone();
        for f in forwards {
            if f.source() != spot.source || f.target() != spot.target {
                return Err(Error::NotChainable(format!(
                    "expected {}/{} forwards, got {}/{}",
                    spot.source.code,
                    spot.target.code,
                    f.source().code,
                    f.target().code
                )));
            }
        }

        let mut pillars: Vec<(Date, Real)> = forwards
            .iter()
            .map(|f| {
                let d = reference_date.advance_period(f.tenor())?;
                Ok((d, f.forward_points()))
            })
            .collect::<Result<_>>()?;
        pillars.sort_by_key(|&(d, _)| d);

        let dates: Vec<Date> = pillars.iter().map(|&(d, _)| d).collect();
        let points: Vec<Real> = pillars.iter().map(|&(_, p)| p).collect();
        Self::new(reference_date, spot, &dates, &points, day_counter)
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

    /// The spot exchange rate the points are quoted against.
    pub fn spot(&self) -> &ExchangeRate {
        &self.spot
    }

    /// The pillar dates (excluding the implicit spot node).
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The node times, including the spot node at zero.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The node points, including the zero point at spot.
    pub fn points(&self) -> &[Real] {
        &self.points
    }

    /// Forward points at time `t`, in pips.
    ///
    /// Points beyond the last pillar are held constant at the last
    /// pillar's value.
    ///
    /// # Errors
    /// Returns [`Error::Extrapolation`] when `t` is past the last pillar
    /// and extrapolation is not allowed.
    pub fn forward_points(&self, t: Time, extrapolate: bool) -> Result<Real> {
        self.check_range(t, extrapolate)?;
        if t >= self.max_time() {
            return Ok(*self.points.last().unwrap());
        }
        Ok(self.interp.value_unchecked(t))
    }

    /// Forward points at a date, in pips.
    pub fn forward_points_date(&self, date: Date, extrapolate: bool) -> Result<Real> {
        self.forward_points(self.time_from_reference(date), extrapolate)
    }

    /// The forward exchange rate for delivery at `date`.
    ///
    /// The result's tenor is the actual day count from the reference
    /// date to `date`.
    pub fn forward_exchange_rate(
        &self,
        date: Date,
        extrapolate: bool,
    ) -> Result<ForwardExchangeRate> {
        let points = self.forward_points_date(date, extrapolate)?;
        let tenor = Period::days(date.serial() - self.data.reference_date.serial());
        Ok(ForwardExchangeRate::new(self.spot.clone(), points, tenor))
    }
}

impl TermStructure for FxForwardPointTermStructure {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bc_currencies::currencies::{EUR, GBP, USD};
    use bc_time::Actual365Fixed;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample() -> FxForwardPointTermStructure {
        let ref_date = date(2025, 1, 2);
        let dates = vec![date(2025, 4, 2), date(2025, 7, 2), date(2026, 1, 2)];
        let points = vec![25.0, 52.0, 110.0];
        FxForwardPointTermStructure::new(
            ref_date,
            ExchangeRate::new(&EUR, &USD, 1.10),
            &dates,
            &points,
            Actual365Fixed,
        )
        .unwrap()
    }

    #[test]
    fn reproduces_pillar_points() {
        let ts = sample();
        assert_abs_diff_eq!(
            ts.forward_points_date(date(2025, 4, 2), false).unwrap(),
            25.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            ts.forward_points_date(date(2026, 1, 2), false).unwrap(),
            110.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn points_vanish_at_spot() {
        let ts = sample();
        assert_abs_diff_eq!(ts.forward_points(0.0, false).unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn interpolates_between_pillars() {
        let ts = sample();
        let t1 = ts.times()[1];
        let t2 = ts.times()[2];
        let mid = 0.5 * (t1 + t2);
        assert_abs_diff_eq!(
            ts.forward_points(mid, false).unwrap(),
            0.5 * (25.0 + 52.0),
            epsilon = 1e-10
        );
    }

    #[test]
    fn constant_beyond_last_pillar() {
        let ts = sample();
        let t = ts.max_time() + 2.0;
        assert!(matches!(
            ts.forward_points(t, false),
            Err(Error::Extrapolation { .. })
        ));
        assert_abs_diff_eq!(ts.forward_points(t, true).unwrap(), 110.0, epsilon = 1e-12);
    }

    #[test]
    fn forward_exchange_rate_carries_points_and_tenor() {
        let ts = sample();
        let delivery = date(2025, 7, 2);
        let fwd = ts.forward_exchange_rate(delivery, false).unwrap();
        assert_eq!(fwd.source(), &EUR);
        assert_eq!(fwd.target(), &USD);
        assert_abs_diff_eq!(fwd.forward_rate(), 1.10 + 52.0 / 10_000.0, epsilon = 1e-12);
        assert_eq!(
            fwd.tenor(),
            Period::days(delivery.serial() - date(2025, 1, 2).serial())
        );
    }

    #[test]
    fn builds_from_forward_rates() {
        let ref_date = date(2025, 1, 2);
        let spot = ExchangeRate::new(&EUR, &USD, 1.10);
        let forwards = vec![
            ForwardExchangeRate::new(spot.clone(), 52.0, Period::months(6)),
            ForwardExchangeRate::new(spot.clone(), 25.0, Period::months(3)),
        ];
        let ts = FxForwardPointTermStructure::from_forward_rates(
            ref_date,
            &forwards,
            Actual365Fixed,
        )
        .unwrap();

        // Pillars sorted by date regardless of input order.
        assert_eq!(ts.dates(), &[date(2025, 4, 2), date(2025, 7, 2)]);
        assert_abs_diff_eq!(
            ts.forward_points_date(date(2025, 4, 2), false).unwrap(),
            25.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn mixed_pairs_rejected() {
        let ref_date = date(2025, 1, 2);
        let forwards = vec![
            ForwardExchangeRate::new(
                ExchangeRate::new(&EUR, &USD, 1.10),
                25.0,
                Period::months(3),
            ),
            ForwardExchangeRate::new(
                ExchangeRate::new(&GBP, &USD, 1.27),
                10.0,
                Period::months(6),
            ),
        ];
        assert!(matches!(
            FxForwardPointTermStructure::from_forward_rates(ref_date, &forwards, Actual365Fixed),
            Err(Error::NotChainable(_))
        ));
    }

    #[test]
    fn unordered_pillars_rejected() {
        let ref_date = date(2025, 1, 2);
        let dates = vec![date(2025, 7, 2), date(2025, 4, 2)];
        let points = vec![52.0, 25.0];
        assert!(matches!(
            FxForwardPointTermStructure::new(
                ref_date,
                ExchangeRate::new(&EUR, &USD, 1.10),
                &dates,
                &points,
                Actual365Fixed,
            ),
            Err(Error::DegenerateNode(_))
        ));
    }
}
