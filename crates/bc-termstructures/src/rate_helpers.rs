//! Rate helpers for yield-curve bootstrapping.
//!
//! A *rate helper* pairs a market quote (deposit rate, FRA rate, par swap
//! rate, bond price, FX forward points) with the conventions needed to
//! reprice that instrument off a curve.  The bootstrapper adjusts the
//! discount factor at the helper's `latest_date` until
//! `implied_quote(curve) == quote`.
//!
//! Helpers only ever read the curve at dates up to their own
//! `latest_date`; this keeps the per-node root search well defined.

use crate::yield_term_structure::YieldTermStructure;
use bc_core::{
    errors::{Error, Result},
    DiscountFactor, Rate, Real, Time,
};
use bc_math::Interpolation1D;
use bc_quotes::{Quote, SimpleQuote};
use bc_time::{
    BusinessDayConvention, Calendar, Date, DateGeneration, DayCounter, Frequency, Period, Schedule,
    ScheduleBuilder, TimeUnit,
};
use std::sync::Arc;

/// Pips per unit of exchange rate.
const FX_POINTS_SCALE: Real = 10_000.0;

// ── BootstrapCurve (tentative curve view used during bootstrap) ──────────────

/// A lightweight read-only view of the curve under construction.
///
/// During bootstrapping the solver probes discount factors from a
/// partially built curve.  `BootstrapCurve` wraps the pillar times and
/// discount factors accumulated so far together with the interpolation
/// that is rebuilt on every trial value.
#[derive(Debug)]
pub struct BootstrapCurve<'a> {
    /// Reference date.
    pub reference_date: Date,
    /// Day counter for time conversion.
    pub day_counter: &'a dyn DayCounter,
    /// Pillar times (first entry = 0 for the reference date).
    pub times: &'a [Time],
    /// Discount factors at each pillar (first entry = 1).
    pub discounts: &'a [DiscountFactor],
    /// Interpolation over `(times, discounts)`.
    pub interp: &'a dyn Interpolation1D,
}

impl BootstrapCurve<'_> {
    /// Time from the reference date to `date`.
    pub fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter.year_fraction(self.reference_date, date)
    }

    /// Discount factor for a given time.
    pub fn discount(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        self.interp.value_unchecked(t)
    }

    /// Discount factor for a given date.
    pub fn discount_date(&self, date: Date) -> DiscountFactor {
        self.discount(self.time_from_reference(date))
    }
}

// ── RateHelper trait ──────────────────────────────────────────────────────────

/// A single market quote that constrains the yield curve at a pillar date.
pub trait RateHelper: std::fmt::Debug + Send + Sync {
    /// The earliest date at which this helper reads the curve.
    fn earliest_date(&self) -> Date;

    /// The pillar date — the latest date this helper reads the curve, and
    /// the date whose node the bootstrap solves for.
    fn latest_date(&self) -> Date;

    /// The market quote backing this helper.
    fn quote(&self) -> &dyn Quote;

    /// The current quote value.
    ///
    /// # Errors
    /// Returns [`Error::QuoteUnavailable`] if the quote is unset.
    fn quote_value(&self) -> Result<Real> {
        self.quote()
            .value()
            .ok_or_else(|| Error::QuoteUnavailable(self.description()))
    }

    /// The model-implied quote given the (partially bootstrapped) curve.
    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Result<Real>;

    /// Human-readable description used in error messages.
    fn description(&self) -> String;
}

// ── DepositRateHelper ─────────────────────────────────────────────────────────

/// A deposit (money-market) rate helper.
///
/// The implied quote is the simple rate over `[settlement, maturity]`:
/// `R = (P(settlement) / P(maturity) - 1) / tau`.
#[derive(Debug)]
pub struct DepositRateHelper {
    quote: SimpleQuote,
    settlement_date: Date,
    maturity_date: Date,
    day_counter: Box<dyn DayCounter>,
}

impl DepositRateHelper {
    /// Create a deposit rate helper from explicit settlement and maturity
    /// dates.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInstrument`] if `maturity_date` is not
    /// after `settlement_date`.
    pub fn new(
        rate: Rate,
        settlement_date: Date,
        maturity_date: Date,
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        Self::with_quote(
            SimpleQuote::new(rate),
            settlement_date,
            maturity_date,
            day_counter,
        )
    }

    /// Create a deposit rate helper backed by a shared quote.
    pub fn with_quote(
        quote: SimpleQuote,
        settlement_date: Date,
        maturity_date: Date,
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        if maturity_date <= settlement_date {
            return Err(Error::InvalidInstrument(format!(
                "deposit maturity {maturity_date} is not after settlement {settlement_date}"
            )));
        }
        Ok(Self {
            quote,
            settlement_date,
            maturity_date,
            day_counter: Box::new(day_counter),
        })
    }

    /// Create a deposit rate helper from a tenor and market conventions.
    ///
    /// Settlement is `fixing_days` business days after the reference date;
    /// the maturity is settlement advanced by `tenor` and adjusted.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tenor(
        rate: Rate,
        tenor: Period,
        fixing_days: u32,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        end_of_month: bool,
        day_counter: impl DayCounter + 'static,
        reference_date: Date,
    ) -> Result<Self> {
        let settlement = calendar.advance_business_days(reference_date, fixing_days as i32);
        let maturity = calendar.advance(settlement, tenor, convention, end_of_month)?;
        Self::new(rate, settlement, maturity, day_counter)
    }

    /// The settlement date of the deposit.
    pub fn settlement_date(&self) -> Date {
        self.settlement_date
    }

    /// The maturity date of the deposit.
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }
}

impl RateHelper for DepositRateHelper {
    fn earliest_date(&self) -> Date {
        self.settlement_date
    }

    fn latest_date(&self) -> Date {
        self.maturity_date
    }

    fn quote(&self) -> &dyn Quote {
        &self.quote
    }

    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Result<Real> {
        let tau = self
            .day_counter
            .year_fraction(self.settlement_date, self.maturity_date);
        let df_settle = curve.discount_date(self.settlement_date);
        let df_maturity = curve.discount_date(self.maturity_date);
        bc_core::ensure!(
            df_maturity > 0.0,
            "non-positive discount factor {df_maturity} at {}",
            self.maturity_date
        );
        Ok((df_settle / df_maturity - 1.0) / tau)
    }

    fn description(&self) -> String {
        format!("deposit maturing {}", self.maturity_date)
    }
}

// ── FraRateHelper ─────────────────────────────────────────────────────────────

/// A forward-rate-agreement (FRA) rate helper.
///
/// The implied quote is the simple forward rate over
/// `[value_date, maturity_date]`.
#[derive(Debug)]
pub struct FraRateHelper {
    quote: SimpleQuote,
    value_date: Date,
    maturity_date: Date,
    day_counter: Box<dyn DayCounter>,
}

impl FraRateHelper {
    /// Create a FRA rate helper from explicit value and maturity dates.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInstrument`] if `maturity_date` is not
    /// after `value_date`.
    pub fn new(
        rate: Rate,
        value_date: Date,
        maturity_date: Date,
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        if maturity_date <= value_date {
            return Err(Error::InvalidInstrument(format!(
                "FRA maturity {maturity_date} is not after value date {value_date}"
            )));
        }
        Ok(Self {
            quote: SimpleQuote::new(rate),
            value_date,
            maturity_date,
            day_counter: Box::new(day_counter),
        })
    }

    /// Create a FRA rate helper from month offsets (e.g. a 3x6 FRA).
    ///
    /// Offsets are counted from the settlement date, which is
    /// `fixing_days` business days after the reference date.
    #[allow(clippy::too_many_arguments)]
    pub fn from_months(
        rate: Rate,
        months_to_start: u32,
        months_to_end: u32,
        fixing_days: u32,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        day_counter: impl DayCounter + 'static,
        reference_date: Date,
    ) -> Result<Self> {
        let settlement = calendar.advance_business_days(reference_date, fixing_days as i32);
        let value_date = calendar.adjust(
            settlement.advance(months_to_start as i32, TimeUnit::Months)?,
            convention,
        );
        let maturity_date = calendar.adjust(
            settlement.advance(months_to_end as i32, TimeUnit::Months)?,
            convention,
        );
        Self::new(rate, value_date, maturity_date, day_counter)
    }

    /// The FRA value (start) date.
    pub fn value_date(&self) -> Date {
        self.value_date
    }
}

impl RateHelper for FraRateHelper {
    fn earliest_date(&self) -> Date {
        self.value_date
    }

    fn latest_date(&self) -> Date {
        self.maturity_date
    }

    fn quote(&self) -> &dyn Quote {
        &self.quote
    }

    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Result<Real> {
        let tau = self
            .day_counter
            .year_fraction(self.value_date, self.maturity_date);
        let df_start = curve.discount_date(self.value_date);
        let df_end = curve.discount_date(self.maturity_date);
        bc_core::ensure!(
            df_end > 0.0,
            "non-positive discount factor {df_end} at {}",
            self.maturity_date
        );
        Ok((df_start / df_end - 1.0) / tau)
    }

    fn description(&self) -> String {
        format!("FRA {} / {}", self.value_date, self.maturity_date)
    }
}

// ── SwapRateHelper ────────────────────────────────────────────────────────────

/// A par-swap rate helper.
///
/// The implied quote is the par rate of the fixed leg:
/// `(P(start) - P(end)) / annuity` with
/// `annuity = sum_i tau_i * P(t_i)` over the fixed-leg schedule.
#[derive(Debug)]
pub struct SwapRateHelper {
    quote: SimpleQuote,
    fixed_schedule: Schedule,
    fixed_day_counter: Box<dyn DayCounter>,
}

impl SwapRateHelper {
    /// Create a swap-rate helper from an already-built fixed-leg schedule.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInstrument`] if the schedule has fewer
    /// than two dates.
    pub fn new(
        rate: Rate,
        fixed_schedule: Schedule,
        fixed_day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        if fixed_schedule.size() < 2 {
            return Err(Error::InvalidInstrument(format!(
                "swap schedule has {} dates, need at least 2",
                fixed_schedule.size()
            )));
        }
        Ok(Self {
            quote: SimpleQuote::new(rate),
            fixed_schedule,
            fixed_day_counter: Box::new(fixed_day_counter),
        })
    }

    /// Create a swap-rate helper from market conventions.
    ///
    /// Builds a forward fixed-leg schedule from the settlement date
    /// (`fixing_days` business days after the reference date) out to
    /// `settlement + swap_tenor`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_conventions(
        rate: Rate,
        swap_tenor: Period,
        calendar: &dyn Calendar,
        fixed_frequency: Frequency,
        fixed_convention: BusinessDayConvention,
        fixed_day_counter: impl DayCounter + 'static,
        reference_date: Date,
        fixing_days: u32,
    ) -> Result<Self> {
        let settlement = calendar.advance_business_days(reference_date, fixing_days as i32);
        let maturity = calendar.advance(settlement, swap_tenor, fixed_convention, false)?;
        let fixed_tenor = Period::from_frequency(fixed_frequency)?;
        let fixed_schedule = ScheduleBuilder::new(settlement, maturity, fixed_tenor, calendar)
            .with_convention(fixed_convention)
            .with_termination_convention(fixed_convention)
            .with_rule(DateGeneration::Forward)
            .build()?;
        Self::new(rate, fixed_schedule, fixed_day_counter)
    }

    /// The fixed-leg payment schedule.
    pub fn fixed_schedule(&self) -> &Schedule {
        &self.fixed_schedule
    }
}

impl RateHelper for SwapRateHelper {
    fn earliest_date(&self) -> Date {
        self.fixed_schedule.dates()[0]
    }

    fn latest_date(&self) -> Date {
        *self.fixed_schedule.dates().last().unwrap()
    }

    fn quote(&self) -> &dyn Quote {
        &self.quote
    }

    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Result<Real> {
        let dates = self.fixed_schedule.dates();
        let df_start = curve.discount_date(dates[0]);
        let df_end = curve.discount_date(dates[dates.len() - 1]);

        let mut annuity = 0.0;
        for i in 1..dates.len() {
            let delta = self.fixed_day_counter.year_fraction(dates[i - 1], dates[i]);
            annuity += delta * curve.discount_date(dates[i]);
        }
        bc_core::ensure!(
            annuity.abs() > 1e-16,
            "vanishing fixed-leg annuity for swap maturing {}",
            dates[dates.len() - 1]
        );
        Ok((df_start - df_end) / annuity)
    }

    fn description(&self) -> String {
        format!("swap maturing {}", self.latest_date())
    }
}

// ── FixedRateBondHelper ───────────────────────────────────────────────────────

/// A fixed-rate-bond helper quoted as a price per 100 nominal.
///
/// The implied quote is the model price at the bond's settlement date:
/// coupons plus redemption, discounted to settlement.
#[derive(Debug)]
pub struct FixedRateBondHelper {
    quote: SimpleQuote,
    coupon_rate: Rate,
    schedule: Schedule,
    day_counter: Box<dyn DayCounter>,
    redemption: Real,
}

impl FixedRateBondHelper {
    /// Create a bond helper from a price quote, a coupon rate, and the
    /// coupon schedule (settlement date first, maturity last).
    ///
    /// # Errors
    /// Returns [`Error::InvalidInstrument`] if the schedule has fewer
    /// than two dates.
    pub fn new(
        price: Real,
        coupon_rate: Rate,
        schedule: Schedule,
        day_counter: impl DayCounter + 'static,
        redemption: Real,
    ) -> Result<Self> {
        if schedule.size() < 2 {
            return Err(Error::InvalidInstrument(format!(
                "bond schedule has {} dates, need at least 2",
                schedule.size()
            )));
        }
        Ok(Self {
            quote: SimpleQuote::new(price),
            coupon_rate,
            schedule,
            day_counter: Box::new(day_counter),
            redemption,
        })
    }

    /// The coupon rate of the fixed leg.
    pub fn coupon_rate(&self) -> Rate {
        self.coupon_rate
    }
}

impl RateHelper for FixedRateBondHelper {
    fn earliest_date(&self) -> Date {
        self.schedule.dates()[0]
    }

    fn latest_date(&self) -> Date {
        *self.schedule.dates().last().unwrap()
    }

    fn quote(&self) -> &dyn Quote {
        &self.quote
    }

    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Result<Real> {
        let dates = self.schedule.dates();
        let df_settle = curve.discount_date(dates[0]);
        bc_core::ensure!(
            df_settle > 0.0,
            "non-positive discount factor {df_settle} at {}",
            dates[0]
        );

        let mut value = 0.0;
        for i in 1..dates.len() {
            let tau = self.day_counter.year_fraction(dates[i - 1], dates[i]);
            value += self.coupon_rate * tau * 100.0 * curve.discount_date(dates[i]);
        }
        value += self.redemption * curve.discount_date(dates[dates.len() - 1]);
        Ok(value / df_settle)
    }

    fn description(&self) -> String {
        format!("fixed-rate bond maturing {}", self.latest_date())
    }
}

// ── FxForwardRateHelper ───────────────────────────────────────────────────────

/// An FX-forward (FX swap) helper quoted in forward points.
///
/// Given the spot rate and a known curve for the source (base) currency,
/// covered interest parity implies
/// `forward = spot * (P_src(maturity) / P_src(settlement))
///                 / (P_dom(maturity) / P_dom(settlement))`
/// where the domestic (target-currency) curve is the one being
/// bootstrapped.  The implied quote is `(forward - spot) * 10_000`.
#[derive(Debug)]
pub struct FxForwardRateHelper {
    points_quote: SimpleQuote,
    spot: Real,
    settlement_date: Date,
    maturity_date: Date,
    source_curve: Arc<dyn YieldTermStructure>,
}

impl FxForwardRateHelper {
    /// Create an FX-forward helper.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInstrument`] if `maturity_date` is not
    /// after `settlement_date`.
    pub fn new(
        forward_points: Real,
        spot: Real,
        settlement_date: Date,
        maturity_date: Date,
        source_curve: Arc<dyn YieldTermStructure>,
    ) -> Result<Self> {
        if maturity_date <= settlement_date {
            return Err(Error::InvalidInstrument(format!(
                "FX forward maturity {maturity_date} is not after settlement {settlement_date}"
            )));
        }
        Ok(Self {
            points_quote: SimpleQuote::new(forward_points),
            spot,
            settlement_date,
            maturity_date,
            source_curve,
        })
    }

    /// The spot exchange rate the points are quoted against.
    pub fn spot(&self) -> Real {
        self.spot
    }
}

impl RateHelper for FxForwardRateHelper {
    fn earliest_date(&self) -> Date {
        self.settlement_date
    }

    fn latest_date(&self) -> Date {
        self.maturity_date
    }

    fn quote(&self) -> &dyn Quote {
        &self.points_quote
    }

    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Result<Real> {
        let df_src_settle = self.source_curve.discount_date(self.settlement_date, false)?;
        let df_src_mat = self.source_curve.discount_date(self.maturity_date, false)?;
        let df_dom_settle = curve.discount_date(self.settlement_date);
        let df_dom_mat = curve.discount_date(self.maturity_date);
        bc_core::ensure!(
            df_dom_mat > 0.0 && df_dom_settle > 0.0,
            "non-positive discount factor on domestic leg of {}",
            self.description()
        );
        let forward =
            self.spot * (df_src_mat / df_src_settle) / (df_dom_mat / df_dom_settle);
        Ok((forward - self.spot) * FX_POINTS_SCALE)
    }

    fn description(&self) -> String {
        format!("FX forward maturing {}", self.maturity_date)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bc_math::LogLinearInterpolation;
    use bc_time::Actual360;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    /// Discount-factor view of a flat continuously-compounded curve.
    fn flat_curve(max_t: Time, rate: Rate) -> (Vec<Time>, Vec<DiscountFactor>) {
        let times: Vec<Time> = vec![0.0, max_t / 2.0, max_t];
        let discounts = times.iter().map(|&t| (-rate * t).exp()).collect();
        (times, discounts)
    }

    fn view<'a>(
        reference_date: Date,
        times: &'a [Time],
        discounts: &'a [DiscountFactor],
        interp: &'a LogLinearInterpolation,
    ) -> BootstrapCurve<'a> {
        BootstrapCurve {
            reference_date,
            day_counter: &Actual360,
            times,
            discounts,
            interp,
        }
    }

    #[test]
    fn deposit_implied_matches_flat_curve() {
        let ref_date = date(2025, 1, 2);
        let mat = date(2025, 4, 2);
        let (times, discounts) = flat_curve(5.0, 0.05);
        let interp = LogLinearInterpolation::new(&times, &discounts).unwrap();
        let bc = view(ref_date, &times, &discounts, &interp);

        let helper = DepositRateHelper::new(0.0, ref_date, mat, Actual360).unwrap();
        let tau = Actual360.year_fraction(ref_date, mat);
        let expected = ((0.05_f64 * tau).exp() - 1.0) / tau;
        assert_abs_diff_eq!(
            helper.implied_quote(&bc).unwrap(),
            expected,
            epsilon = 1e-10
        );
    }

    #[test]
    fn deposit_rejects_inverted_dates() {
        let err = DepositRateHelper::new(0.01, date(2025, 4, 2), date(2025, 1, 2), Actual360)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInstrument(_)));
    }

    #[test]
    fn unset_quote_is_reported() {
        let helper = DepositRateHelper::with_quote(
            SimpleQuote::empty(),
            date(2025, 1, 2),
            date(2025, 4, 2),
            Actual360,
        )
        .unwrap();
        assert!(matches!(
            helper.quote_value(),
            Err(Error::QuoteUnavailable(_))
        ));
    }

    #[test]
    fn fra_implied_forward_rate() {
        let ref_date = date(2025, 1, 2);
        let start = date(2025, 4, 2);
        let end = date(2025, 7, 2);
        let (times, discounts) = flat_curve(5.0, 0.03);
        let interp = LogLinearInterpolation::new(&times, &discounts).unwrap();
        let bc = view(ref_date, &times, &discounts, &interp);

        let helper = FraRateHelper::new(0.0, start, end, Actual360).unwrap();
        let tau = Actual360.year_fraction(start, end);
        let t1 = Actual360.year_fraction(ref_date, start);
        let t2 = Actual360.year_fraction(ref_date, end);
        let expected = (((-0.03 * t1) as f64).exp() / ((-0.03 * t2) as f64).exp() - 1.0) / tau;
        assert_abs_diff_eq!(
            helper.implied_quote(&bc).unwrap(),
            expected,
            epsilon = 1e-10
        );
    }

    #[test]
    fn swap_par_rate_near_flat_rate() {
        let ref_date = date(2025, 1, 2);
        let schedule = Schedule::from_dates(vec![
            ref_date,
            date(2026, 1, 2),
            date(2027, 1, 4),
            date(2028, 1, 3),
            date(2029, 1, 2),
            date(2030, 1, 2),
        ]);
        let (times, discounts) = flat_curve(10.0, 0.04);
        let interp = LogLinearInterpolation::new(&times, &discounts).unwrap();
        let bc = view(ref_date, &times, &discounts, &interp);

        let helper = SwapRateHelper::new(0.04, schedule, Actual360).unwrap();
        let implied = helper.implied_quote(&bc).unwrap();
        // Simple vs continuous compounding keeps this near, not at, 4%.
        assert!((implied - 0.04).abs() < 0.005, "par rate = {implied}");
    }

    #[test]
    fn bond_reprices_at_par_when_coupon_equals_yield() {
        let ref_date = date(2025, 1, 2);
        // Zero-rate curve at 0 gives all discount factors = 1; a bond then
        // prices at redemption plus the undiscounted coupon sum.
        let (times, discounts) = flat_curve(10.0, 0.0);
        let interp = LogLinearInterpolation::new(&times, &discounts).unwrap();
        let bc = view(ref_date, &times, &discounts, &interp);

        let schedule = Schedule::from_dates(vec![ref_date, date(2026, 1, 2), date(2027, 1, 2)]);
        let helper =
            FixedRateBondHelper::new(100.0, 0.05, schedule.clone(), Actual360, 100.0).unwrap();
        let implied = helper.implied_quote(&bc).unwrap();

        let tau1 = Actual360.year_fraction(ref_date, date(2026, 1, 2));
        let tau2 = Actual360.year_fraction(date(2026, 1, 2), date(2027, 1, 2));
        let expected = 100.0 + 0.05 * (tau1 + tau2) * 100.0;
        assert_abs_diff_eq!(implied, expected, epsilon = 1e-10);
    }

    #[test]
    fn helper_dates_are_ordered() {
        let helper =
            DepositRateHelper::new(0.01, date(2025, 1, 2), date(2025, 7, 2), Actual360).unwrap();
        assert!(helper.latest_date() > helper.earliest_date());
    }
}
