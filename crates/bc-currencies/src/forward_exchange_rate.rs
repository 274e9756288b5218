//! Forward exchange rates quoted as spot plus forward points.
//!
//! Forward points use the market convention of 1/10,000th of the quote
//! (a pip): `forward = spot + points / 10_000`.  Chaining and inversion
//! work on the points so that the all-in forward of the result is exactly
//! the algebraic combination of the inputs' all-in forwards.

use crate::currency::{Currency, Money};
use crate::exchange_rate::ExchangeRate;
use bc_core::{
    errors::{Error, Result},
    Real,
};
use bc_time::Period;

/// Pips per unit of exchange rate.
const POINTS_SCALE: Real = 10_000.0;

/// A forward exchange rate for a given tenor.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardExchangeRate {
    spot: ExchangeRate,
    forward_points: Real,
    tenor: Period,
}

impl ForwardExchangeRate {
    /// Create a forward rate from a spot rate and forward points.
    pub fn new(spot: ExchangeRate, forward_points: Real, tenor: Period) -> Self {
        Self {
            spot,
            forward_points,
            tenor,
        }
    }

    /// The source currency.
    pub fn source(&self) -> &'static Currency {
        self.spot.source
    }

    /// The target currency.
    pub fn target(&self) -> &'static Currency {
        self.spot.target
    }

    /// The underlying spot exchange rate object.
    pub fn spot_exchange_rate(&self) -> &ExchangeRate {
        &self.spot
    }

    /// The spot rate value.
    pub fn spot_rate(&self) -> Real {
        self.spot.rate
    }

    /// The forward points, in pips.
    pub fn forward_points(&self) -> Real {
        self.forward_points
    }

    /// The all-in forward rate: `spot + points / 10_000`.
    pub fn forward_rate(&self) -> Real {
        self.spot.rate + self.forward_points / POINTS_SCALE
    }

    /// The tenor of the forward.
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Convert a monetary amount at the all-in forward rate.
    ///
    /// # Errors
    /// Fails if `amount` is denominated in neither leg.
    pub fn exchange(&self, amount: &Money) -> Result<Money> {
        let fwd = self.forward_rate();
        if amount.currency == self.spot.source {
            Ok(Money::new(amount.value * fwd, self.spot.target))
        } else if amount.currency == self.spot.target {
            Ok(Money::new(amount.value / fwd, self.spot.source))
        } else {
            Err(Error::NotChainable(format!(
                "{}/{} forward cannot convert {}",
                self.spot.source.code, self.spot.target.code, amount.currency.code
            )))
        }
    }

    /// Combine two forward rates sharing one currency leg into a cross
    /// forward between the remaining currencies.
    ///
    /// The chained points are derived so that the all-in forward of the
    /// result equals the corresponding combination of the inputs' all-in
    /// forwards.
    ///
    /// # Errors
    /// Returns [`Error::NotChainable`] if the tenors differ or the spot
    /// legs share no currency.
    pub fn chain(r1: &ForwardExchangeRate, r2: &ForwardExchangeRate) -> Result<ForwardExchangeRate> {
        if r1.tenor != r2.tenor {
            return Err(Error::NotChainable(format!(
                "forward tenors differ: {} vs {}",
                r1.tenor, r2.tenor
            )));
        }

        let spot = ExchangeRate::chain(&r1.spot, &r2.spot)?;
        let points = if r1.source() == r2.source() {
            (r2.forward_rate() / r1.forward_rate() - r2.spot_rate() / r1.spot_rate()) * POINTS_SCALE
        } else if r1.source() == r2.target() {
            (1.0 / (r1.forward_rate() * r2.forward_rate())
                - 1.0 / (r1.spot_rate() * r2.spot_rate()))
                * POINTS_SCALE
        } else if r1.target() == r2.source() {
            r1.spot_rate() * r2.forward_points
                + r2.spot_rate() * r1.forward_points
                + r1.forward_points * r2.forward_points / POINTS_SCALE
        } else {
            (r1.forward_rate() / r2.forward_rate() - r1.spot_rate() / r2.spot_rate()) * POINTS_SCALE
        };

        Ok(ForwardExchangeRate::new(spot, points, r1.tenor))
    }

    /// The inverse forward rate (target → source).
    ///
    /// The inverse points are chosen so that the inverse all-in forward is
    /// exactly the reciprocal of this forward.
    pub fn inverse(&self) -> ForwardExchangeRate {
        let spot = self.spot.inverse();
        let points = (1.0 / self.forward_rate() - spot.rate) * POINTS_SCALE;
        ForwardExchangeRate::new(spot, points, self.tenor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currencies::{CHF, EUR, GBP, USD};
    use approx::assert_abs_diff_eq;

    fn eur_usd() -> ForwardExchangeRate {
        ForwardExchangeRate::new(
            ExchangeRate::new(&EUR, &USD, 1.1000),
            25.0,
            Period::months(3),
        )
    }

    fn usd_gbp() -> ForwardExchangeRate {
        ForwardExchangeRate::new(
            ExchangeRate::new(&USD, &GBP, 0.7500),
            -12.0,
            Period::months(3),
        )
    }

    #[test]
    fn all_in_forward_rate() {
        let fwd = eur_usd();
        assert_abs_diff_eq!(fwd.forward_rate(), 1.1025, epsilon = 1e-12);
    }

    #[test]
    fn chain_forward_is_product_of_forwards() {
        // target of r1 == source of r2: EUR/USD then USD/GBP.
        let chained = ForwardExchangeRate::chain(&eur_usd(), &usd_gbp()).unwrap();
        assert_eq!(chained.source(), &EUR);
        assert_eq!(chained.target(), &GBP);
        assert_abs_diff_eq!(
            chained.forward_rate(),
            eur_usd().forward_rate() * usd_gbp().forward_rate(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn chain_common_source() {
        // USD/EUR and USD/GBP → EUR/GBP, forward = F2 / F1.
        let r1 = eur_usd().inverse();
        let r2 = usd_gbp();
        let chained = ForwardExchangeRate::chain(&r1, &r2).unwrap();
        assert_eq!(chained.source(), &EUR);
        assert_eq!(chained.target(), &GBP);
        assert_abs_diff_eq!(
            chained.forward_rate(),
            r2.forward_rate() / r1.forward_rate(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn chain_common_target() {
        // EUR/USD and GBP/USD → EUR/GBP, forward = F1 / F2.
        let r1 = eur_usd();
        let r2 = usd_gbp().inverse();
        let chained = ForwardExchangeRate::chain(&r1, &r2).unwrap();
        assert_abs_diff_eq!(
            chained.forward_rate(),
            r1.forward_rate() / r2.forward_rate(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn chain_opposed_legs() {
        // source of r1 == target of r2: USD/GBP then EUR/USD gives
        // GBP/EUR, forward = 1 / (F1 * F2).
        let r1 = usd_gbp();
        let r2 = eur_usd();
        let chained = ForwardExchangeRate::chain(&r1, &r2).unwrap();
        assert_eq!(chained.source(), &GBP);
        assert_eq!(chained.target(), &EUR);
        assert_abs_diff_eq!(
            chained.forward_rate(),
            1.0 / (r1.forward_rate() * r2.forward_rate()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn inverse_forward_is_reciprocal() {
        let fwd = eur_usd();
        let inv = fwd.inverse();
        assert_eq!(inv.source(), &USD);
        assert_eq!(inv.target(), &EUR);
        assert_abs_diff_eq!(
            inv.forward_rate(),
            1.0 / fwd.forward_rate(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn double_inverse_restores_forward() {
        let fwd = eur_usd();
        let back = fwd.inverse().inverse();
        assert_abs_diff_eq!(back.forward_rate(), fwd.forward_rate(), epsilon = 1e-12);
        assert_abs_diff_eq!(back.spot_rate(), fwd.spot_rate(), epsilon = 1e-12);
    }

    #[test]
    fn tenor_mismatch_not_chainable() {
        let r1 = eur_usd();
        let r2 = ForwardExchangeRate::new(
            ExchangeRate::new(&USD, &GBP, 0.75),
            -12.0,
            Period::months(6),
        );
        assert!(matches!(
            ForwardExchangeRate::chain(&r1, &r2),
            Err(Error::NotChainable(_))
        ));
    }

    #[test]
    fn disjoint_currencies_not_chainable() {
        let r1 = eur_usd();
        let r2 = ForwardExchangeRate::new(
            ExchangeRate::new(&GBP, &CHF, 1.15),
            3.0,
            Period::months(3),
        );
        assert!(matches!(
            ForwardExchangeRate::chain(&r1, &r2),
            Err(Error::NotChainable(_))
        ));
    }

    #[test]
    fn exchange_at_forward() {
        let fwd = eur_usd();
        let usd = fwd.exchange(&Money::new(1_000_000.0, &EUR)).unwrap();
        assert_eq!(usd.currency, &USD);
        assert_abs_diff_eq!(usd.value, 1_102_500.0, epsilon = 1e-6);
    }
}
