//! `PiecewiseYieldCurve` — iterative bootstrap construction of a yield
//! curve.
//!
//! Given a vector of [`RateHelper`]s (deposits, FRAs, swaps, bonds, FX
//! forwards) the bootstrapper builds an interpolated discount curve by
//! solving, node by node, for the discount factor at each helper's pillar
//! date such that the helper's implied quote matches its market quote.
//! Because later segments can feed back into earlier ones (a swap's fixed
//! leg spans earlier pillars), whole passes over the node vector repeat
//! until no node moves by more than the configured accuracy.
//!
//! # Example
//!
//! ```
//! use bc_termstructures::piecewise_yield_curve::PiecewiseYieldCurve;
//! use bc_termstructures::rate_helpers::{DepositRateHelper, RateHelper};
//! use bc_termstructures::yield_term_structure::YieldTermStructure;
//! use bc_math::LogLinear;
//! use bc_time::{Actual360, Date};
//!
//! let ref_date = Date::from_ymd(2025, 1, 2).unwrap();
//! let helpers: Vec<Box<dyn RateHelper>> = vec![
//!     Box::new(DepositRateHelper::new(
//!         0.04,
//!         ref_date,
//!         Date::from_ymd(2025, 4, 2).unwrap(),
//!         Actual360,
//!     ).unwrap()),
//!     Box::new(DepositRateHelper::new(
//!         0.045,
//!         ref_date,
//!         Date::from_ymd(2025, 7, 2).unwrap(),
//!         Actual360,
//!     ).unwrap()),
//! ];
//! let curve = PiecewiseYieldCurve::new(ref_date, helpers, Actual360, &LogLinear).unwrap();
//! assert!(curve.discount(0.25, false).unwrap() < 1.0);
//! ```

use crate::rate_helpers::{BootstrapCurve, RateHelper};
use crate::term_structure::{TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use bc_core::errors::{Error, Result};
use bc_core::{DiscountFactor, Real, Time};
use bc_math::solvers1d::bracketed_brent;
use bc_math::{Interpolation1D, InterpolationBuilder};
use bc_time::{Calendar, Date, DayCounter, NullCalendar};
use std::cell::RefCell;

/// Tunable parameters of the bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapConfig {
    /// Solver accuracy and node-convergence tolerance.
    pub accuracy: Real,
    /// Cap on full passes over the node vector.
    pub max_passes: usize,
    /// Lower bound of the discount-factor search domain.
    pub min_discount: Real,
    /// Upper bound of the discount-factor search domain (above 1 so
    /// negative rates are admissible).
    pub max_discount: Real,
    /// Initial half-width of the root bracket around the previous node.
    pub initial_step: Real,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            accuracy: 1.0e-12,
            max_passes: 50,
            min_discount: 1.0e-12,
            max_discount: 10.0,
            initial_step: 0.05,
        }
    }
}

/// A yield curve bootstrapped from market instruments.
///
/// Nodes are discount factors at the helpers' pillar dates, seeded with
/// `(0, 1.0)` at the reference date.  Once built the curve is frozen:
/// helper quotes changing afterwards never mutate it, but
/// [`is_up_to_date`](PiecewiseYieldCurve::is_up_to_date) reports whether
/// a rebuild would produce the same curve.
#[derive(Debug)]
pub struct PiecewiseYieldCurve {
    data: TermStructureData,
    /// Helpers in pillar-date order.
    helpers: Vec<Box<dyn RateHelper>>,
    /// Pillar dates (first entry = reference date).
    dates: Vec<Date>,
    /// Time fractions corresponding to `dates`.
    times: Vec<Time>,
    /// Bootstrapped discount factors at each pillar.
    discounts: Vec<DiscountFactor>,
    /// The interpolation over `(times, discounts)`.
    interp: Box<dyn Interpolation1D>,
    max_date: Date,
    /// Quote generations observed at build time, one per helper.
    quote_generations: Vec<u64>,
}

impl PiecewiseYieldCurve {
    /// Bootstrap a yield curve from rate helpers.
    ///
    /// Helpers may arrive in any order; they are sorted by pillar date
    /// internally.
    ///
    /// # Errors
    /// Any failure aborts the build and is wrapped in
    /// [`Error::CurveConstruction`] naming the offending helper:
    /// unset quotes, duplicate pillar dates, infeasible quotes
    /// ([`Error::UnboundedRoot`]), or failure of the global iteration to
    /// settle ([`Error::BootstrapNonConvergence`]).
    pub fn new(
        reference_date: Date,
        helpers: Vec<Box<dyn RateHelper>>,
        day_counter: impl DayCounter + 'static,
        builder: &dyn InterpolationBuilder,
    ) -> Result<Self> {
        Self::with_config(
            reference_date,
            helpers,
            day_counter,
            builder,
            BootstrapConfig::default(),
        )
    }

    /// Bootstrap with explicit solver bounds, accuracy, and pass cap.
    pub fn with_config(
        reference_date: Date,
        mut helpers: Vec<Box<dyn RateHelper>>,
        day_counter: impl DayCounter + 'static,
        builder: &dyn InterpolationBuilder,
        config: BootstrapConfig,
    ) -> Result<Self> {
        bc_core::ensure!(!helpers.is_empty(), "at least one rate helper is required");

        helpers.sort_by_key(|h| h.latest_date());
        let data = TermStructureData::new(reference_date, NullCalendar, day_counter);

        // Pillar layout: reference date plus one node per helper.
        let mut dates = Vec::with_capacity(helpers.len() + 1);
        let mut times = Vec::with_capacity(helpers.len() + 1);
        dates.push(reference_date);
        times.push(0.0);

        for (i, helper) in helpers.iter().enumerate() {
            let pillar = helper.latest_date();
            if pillar <= reference_date {
                return Err(Error::InvalidInstrument(format!(
                    "pillar date {pillar} is not after reference date {reference_date}"
                ))
                .at_helper(i, helper.description()));
            }
            if pillar == *dates.last().unwrap() {
                return Err(Error::DegenerateNode(format!(
                    "pillar date {pillar} appears more than once"
                ))
                .at_helper(i, helper.description()));
            }
            dates.push(pillar);
            times.push(data.day_counter.year_fraction(reference_date, pillar));
        }

        // ── Iterative bootstrap ──────────────────────────────────────
        //
        // Per node: solve for discounts[k] such that the helper's implied
        // quote matches the market quote, bracketing around the previous
        // node's value.  Whole passes repeat until the largest node change
        // drops below the accuracy, so interdependent segments settle.
        let nodes = RefCell::new(vec![1.0_f64; dates.len()]);
        let mut passes = 0;
        let mut max_change = Real::MAX;

        while passes < config.max_passes {
            max_change = 0.0;
            for (i, helper) in helpers.iter().enumerate() {
                let node = i + 1;
                let market = helper
                    .quote_value()
                    .map_err(|e| e.at_helper(i, helper.description()))?;

                let (guess, previous) = {
                    let v = nodes.borrow();
                    let guess = if passes == 0 { v[node - 1] } else { v[node] };
                    (guess, v[node])
                };

                let objective = |df: Real| -> Result<Real> {
                    let mut v = nodes.borrow_mut();
                    v[node] = df;
                    let interp = builder.build(&times, &v)?;
                    let view = BootstrapCurve {
                        reference_date,
                        day_counter: &*data.day_counter,
                        times: &times,
                        discounts: &v,
                        interp: &*interp,
                    };
                    Ok(helper.implied_quote(&view)? - market)
                };

                let solved = bracketed_brent(
                    objective,
                    guess,
                    config.initial_step,
                    config.min_discount,
                    config.max_discount,
                    config.accuracy,
                )
                .map_err(|e| e.at_helper(i, helper.description()))?;

                nodes.borrow_mut()[node] = solved;
                max_change = max_change.max((solved - previous).abs());
            }
            passes += 1;
            if max_change < config.accuracy {
                break;
            }
        }

        if max_change >= config.accuracy {
            return Err(Error::BootstrapNonConvergence { passes, max_change });
        }

        let discounts = nodes.into_inner();
        let interp = builder.build(&times, &discounts)?;
        let max_date = *dates.last().unwrap();
        let quote_generations = helpers.iter().map(|h| h.quote().generation()).collect();

        Ok(Self {
            data,
            helpers,
            dates,
            times,
            discounts,
            interp,
            max_date,
            quote_generations,
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

    /// The pillar dates (first entry = reference date).
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The pillar times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The bootstrapped discount factors.
    pub fn discounts(&self) -> &[DiscountFactor] {
        &self.discounts
    }

    /// The curve nodes as (date, discount factor) pairs.
    pub fn nodes(&self) -> Vec<(Date, DiscountFactor)> {
        self.dates
            .iter()
            .copied()
            .zip(self.discounts.iter().copied())
            .collect()
    }

    /// The helpers the curve was built from, in pillar-date order.
    pub fn helpers(&self) -> &[Box<dyn RateHelper>] {
        &self.helpers
    }

    /// Whether every input quote still has the value observed at build
    /// time.  A `false` result means a rebuild would produce a different
    /// curve; this curve itself never changes.
    pub fn is_up_to_date(&self) -> bool {
        self.helpers
            .iter()
            .zip(&self.quote_generations)
            .all(|(h, &g)| h.quote().generation() == g)
    }
}

impl TermStructure for PiecewiseYieldCurve {
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

impl YieldTermStructure for PiecewiseYieldCurve {
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        self.interp.value_unchecked(t)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolated_discount_curve::InterpolatedDiscountCurve;
    use crate::rate_helpers::{
        DepositRateHelper, FxForwardRateHelper, SwapRateHelper,
    };
    use approx::assert_abs_diff_eq;
    use bc_core::Compounding;
    use bc_math::{Linear, LogLinear, LogLinearInterpolation};
    use bc_quotes::SimpleQuote;
    use bc_time::{Actual360, Actual365Fixed, Frequency, Schedule};
    use std::sync::Arc;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn deposit(rate: f64, settle: Date, mat: Date) -> Box<dyn RateHelper> {
        Box::new(DepositRateHelper::new(rate, settle, mat, Actual360).unwrap())
    }

    /// Verify every helper reprices to its quote off the final nodes.
    fn assert_reprices(curve: &PiecewiseYieldCurve, tol: f64) {
        let interp = LogLinearInterpolation::new(curve.times(), curve.discounts()).unwrap();
        for helper in curve.helpers() {
            let view = BootstrapCurve {
                reference_date: curve.reference_date(),
                day_counter: curve.day_counter(),
                times: curve.times(),
                discounts: curve.discounts(),
                interp: &interp,
            };
            let implied = helper.implied_quote(&view).unwrap();
            let market = helper.quote_value().unwrap();
            assert_abs_diff_eq!(implied, market, epsilon = tol);
        }
    }

    #[test]
    fn single_deposit_reprices() {
        let ref_date = date(2025, 1, 2);
        let mat = date(2025, 4, 2);
        let curve = PiecewiseYieldCurve::new(
            ref_date,
            vec![deposit(0.05, ref_date, mat)],
            Actual360,
            &LogLinear,
        )
        .unwrap();

        let tau = Actual360.year_fraction(ref_date, mat);
        let df = curve.discount(tau, false).unwrap();
        assert_abs_diff_eq!((1.0 / df - 1.0) / tau, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn deposits_and_swap_reprice() {
        let ref_date = date(2025, 1, 2);
        let swap_schedule =
            Schedule::from_dates(vec![ref_date, date(2026, 1, 2), date(2027, 1, 4)]);
        let helpers: Vec<Box<dyn RateHelper>> = vec![
            deposit(0.04, ref_date, date(2025, 4, 2)),
            deposit(0.042, ref_date, date(2025, 7, 2)),
            Box::new(SwapRateHelper::new(0.045, swap_schedule, Actual365Fixed).unwrap()),
        ];
        let curve = PiecewiseYieldCurve::new(ref_date, helpers, Actual360, &LogLinear).unwrap();
        assert_reprices(&curve, 1e-10);

        // Positive rates: strictly decreasing discount factors.
        for w in curve.discounts().windows(2) {
            assert!(w[1] < w[0]);
        }
    }

    #[test]
    fn helper_order_does_not_matter() {
        let ref_date = date(2025, 1, 2);
        let quotes = [0.03, 0.032, 0.035, 0.038];
        let mats = [
            date(2025, 2, 3),
            date(2025, 4, 2),
            date(2025, 7, 2),
            date(2026, 1, 2),
        ];

        let ordered: Vec<Box<dyn RateHelper>> = quotes
            .iter()
            .zip(&mats)
            .map(|(&q, &m)| deposit(q, ref_date, m))
            .collect();
        let shuffled: Vec<Box<dyn RateHelper>> = [3, 0, 2, 1]
            .iter()
            .map(|&i| deposit(quotes[i], ref_date, mats[i]))
            .collect();

        let a = PiecewiseYieldCurve::new(ref_date, ordered, Actual360, &LogLinear).unwrap();
        let b = PiecewiseYieldCurve::new(ref_date, shuffled, Actual360, &LogLinear).unwrap();
        assert_eq!(a.dates(), b.dates());
        for (da, db) in a.discounts().iter().zip(b.discounts()) {
            assert_abs_diff_eq!(da, db, epsilon = 1e-14);
        }
    }

    #[test]
    fn negative_deposit_rates_give_growing_discounts() {
        // Euro money-market levels of mid-March 2020.
        let ref_date = date(2020, 3, 13);
        let quotes = [-0.00523, -0.00503, -0.00473, -0.00429, -0.00339];
        let mats = [
            date(2020, 4, 15),
            date(2020, 6, 15),
            date(2020, 9, 15),
            date(2020, 12, 15),
            date(2021, 3, 15),
        ];
        let helpers: Vec<Box<dyn RateHelper>> = quotes
            .iter()
            .zip(&mats)
            .map(|(&q, &m)| deposit(q, ref_date, m))
            .collect();

        let curve = PiecewiseYieldCurve::new(ref_date, helpers, Actual360, &LogLinear).unwrap();
        assert_reprices(&curve, 1e-10);

        // Negative rates: discount factors above one, increasing with time.
        let pillar_dfs = &curve.discounts()[1..];
        let mut prev = 1.0;
        for &df in pillar_dfs {
            assert!(df > 1.0, "expected DF > 1, got {df}");
            assert!(df > prev, "expected increasing DFs, got {df} after {prev}");
            prev = df;
        }
    }

    #[test]
    fn linear_builder_also_bootstraps() {
        let ref_date = date(2025, 1, 2);
        let helpers: Vec<Box<dyn RateHelper>> = vec![
            deposit(0.04, ref_date, date(2025, 4, 2)),
            deposit(0.045, ref_date, date(2025, 7, 2)),
        ];
        let curve = PiecewiseYieldCurve::new(ref_date, helpers, Actual360, &Linear).unwrap();
        assert!(curve.discount(0.25, false).unwrap() < 1.0);
    }

    #[test]
    fn empty_helpers_rejected() {
        let result = PiecewiseYieldCurve::new(date(2025, 1, 2), vec![], Actual360, &LogLinear);
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_pillars_are_degenerate() {
        let ref_date = date(2025, 1, 2);
        let mat = date(2025, 7, 2);
        let helpers: Vec<Box<dyn RateHelper>> = vec![
            deposit(0.04, ref_date, mat),
            deposit(0.041, ref_date, mat),
        ];
        let err = PiecewiseYieldCurve::new(ref_date, helpers, Actual360, &LogLinear).unwrap_err();
        match err {
            Error::CurveConstruction { source, .. } => {
                assert!(matches!(*source, Error::DegenerateNode(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pillar_before_reference_rejected() {
        let ref_date = date(2025, 1, 2);
        let helpers: Vec<Box<dyn RateHelper>> =
            vec![deposit(0.04, date(2024, 10, 1), date(2024, 12, 1))];
        let err = PiecewiseYieldCurve::new(ref_date, helpers, Actual360, &LogLinear).unwrap_err();
        assert!(matches!(err, Error::CurveConstruction { .. }));
    }

    #[test]
    fn infeasible_quote_reports_unbounded_root() {
        let ref_date = date(2025, 1, 2);
        // No admissible discount factor implies a -500% deposit rate.
        let helpers: Vec<Box<dyn RateHelper>> =
            vec![deposit(-5.0, ref_date, date(2025, 4, 2))];
        let err = PiecewiseYieldCurve::new(ref_date, helpers, Actual360, &LogLinear).unwrap_err();
        match err {
            Error::CurveConstruction {
                index,
                source,
                ..
            } => {
                assert_eq!(index, 0);
                assert!(matches!(*source, Error::UnboundedRoot(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pass_cap_reports_non_convergence() {
        let ref_date = date(2025, 1, 2);
        let helpers: Vec<Box<dyn RateHelper>> = vec![
            deposit(0.04, ref_date, date(2025, 4, 2)),
            deposit(0.045, ref_date, date(2025, 7, 2)),
        ];
        // The first pass always moves nodes away from the 1.0 seed, so a
        // cap of one pass cannot satisfy the convergence check.
        let config = BootstrapConfig {
            max_passes: 1,
            ..BootstrapConfig::default()
        };
        let err =
            PiecewiseYieldCurve::with_config(ref_date, helpers, Actual360, &LogLinear, config)
                .unwrap_err();
        match err {
            Error::BootstrapNonConvergence { passes, .. } => assert_eq!(passes, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unset_quote_aborts_the_build() {
        let ref_date = date(2025, 1, 2);
        let helper = DepositRateHelper::with_quote(
            SimpleQuote::empty(),
            ref_date,
            date(2025, 4, 2),
            Actual360,
        )
        .unwrap();
        let err = PiecewiseYieldCurve::new(
            ref_date,
            vec![Box::new(helper)],
            Actual360,
            &LogLinear,
        )
        .unwrap_err();
        match err {
            Error::CurveConstruction { source, .. } => {
                assert!(matches!(*source, Error::QuoteUnavailable(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn quote_update_marks_curve_stale() {
        let ref_date = date(2025, 1, 2);
        let quote = SimpleQuote::new(0.04);
        let helper = DepositRateHelper::with_quote(
            quote.clone(),
            ref_date,
            date(2025, 4, 2),
            Actual360,
        )
        .unwrap();
        let curve = PiecewiseYieldCurve::new(
            ref_date,
            vec![Box::new(helper)],
            Actual360,
            &LogLinear,
        )
        .unwrap();

        assert!(curve.is_up_to_date());
        let df_before = curve.discount(0.2, false).unwrap();

        quote.set_value(0.05);
        assert!(!curve.is_up_to_date());
        // The built curve itself is frozen.
        assert_abs_diff_eq!(
            curve.discount(0.2, false).unwrap(),
            df_before,
            epsilon = 1e-15
        );
    }

    #[test]
    fn extrapolation_policy_applies_to_queries() {
        let ref_date = date(2025, 1, 2);
        let curve = PiecewiseYieldCurve::new(
            ref_date,
            vec![deposit(0.04, ref_date, date(2025, 7, 2))],
            Actual360,
            &LogLinear,
        )
        .unwrap();

        let t = curve.max_time() + 0.5;
        assert!(matches!(
            curve.discount(t, false),
            Err(Error::Extrapolation { .. })
        ));
        assert!(curve.discount(t, true).is_ok());
    }

    #[test]
    fn zero_rate_recovers_deposit_level() {
        let ref_date = date(2025, 1, 2);
        let mat = date(2026, 1, 2);
        let curve = PiecewiseYieldCurve::new(
            ref_date,
            vec![Box::new(
                DepositRateHelper::new(0.05, ref_date, mat, Actual365Fixed).unwrap(),
            )],
            Actual365Fixed,
            &LogLinear,
        )
        .unwrap();

        let zr = curve
            .zero_rate(
                mat,
                &Actual365Fixed,
                Compounding::Simple,
                Frequency::Annual,
                false,
            )
            .unwrap();
        assert_abs_diff_eq!(zr.rate(), 0.05, epsilon = 1e-10);
    }

    #[test]
    fn fx_forward_helper_bootstraps_domestic_curve() {
        let ref_date = date(2025, 1, 2);
        let mat = date(2025, 7, 2);

        // Flat 2% source-currency curve.
        let src_dates = vec![ref_date, date(2027, 1, 2)];
        let dc = Actual360;
        let src_discounts: Vec<f64> = src_dates
            .iter()
            .map(|&d| (-0.02 * dc.year_fraction(ref_date, d)).exp())
            .collect();
        let source: Arc<dyn YieldTermStructure> = Arc::new(
            InterpolatedDiscountCurve::new(&src_dates, &src_discounts, Actual360, &LogLinear)
                .unwrap()
                .with_extrapolation(true),
        );

        let spot = 1.10;
        let points = 30.0;
        let helper =
            FxForwardRateHelper::new(points, spot, ref_date, mat, Arc::clone(&source)).unwrap();

        let curve = PiecewiseYieldCurve::new(
            ref_date,
            vec![Box::new(helper)],
            Actual360,
            &LogLinear,
        )
        .unwrap();

        // Covered interest parity must hold at the pillar.
        let t = dc.year_fraction(ref_date, mat);
        let df_dom = curve.discount(t, false).unwrap();
        let df_src = source.discount(t, true).unwrap();
        let forward = spot * df_src / df_dom;
        assert_abs_diff_eq!((forward - spot) * 10_000.0, points, epsilon = 1e-8);
    }
}
