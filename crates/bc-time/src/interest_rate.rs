//! Interest rate with compounding and frequency conventions.
//!
//! An [`InterestRate`] bundles a rate value with a [`Compounding`]
//! convention and a [`Frequency`].  It converts between compound factors
//! and annualized rates, which is how the curve query surface expresses
//! zero and forward rates under arbitrary conventions.

use crate::frequency::Frequency;
use bc_core::errors::Result;
use bc_core::{Compounding, Real, Time};

/// An interest rate with associated compounding conventions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestRate {
    rate: Real,
    compounding: Compounding,
    frequency: Frequency,
}

impl InterestRate {
    /// Create a new interest rate.
    pub fn new(rate: Real, compounding: Compounding, frequency: Frequency) -> Self {
        Self {
            rate,
            compounding,
            frequency,
        }
    }

    /// The rate value as a decimal (0.05 = 5 %).
    pub fn rate(&self) -> Real {
        self.rate
    }

    /// The compounding convention.
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// The compounding frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Compound factor over a period of `t` years.
    ///
    /// # Errors
    /// Fails if `t` is negative or the simple compound factor would be
    /// non-positive.
    pub fn compound_factor(&self, t: Time) -> Result<Real> {
        bc_core::ensure!(t >= 0.0, "negative time ({t}) not allowed");
        if t == 0.0 {
            return Ok(1.0);
        }
        let f = freq_value(self.frequency);
        let factor = match self.compounding {
            Compounding::Simple => 1.0 + self.rate * t,
            Compounding::Compounded => (1.0 + self.rate / f).powf(f * t),
            Compounding::Continuous => (self.rate * t).exp(),
            Compounding::SimpleThenCompounded => {
                if t <= 1.0 / f {
                    1.0 + self.rate * t
                } else {
                    (1.0 + self.rate / f).powf(f * t)
                }
            }
        };
        bc_core::ensure!(factor > 0.0, "non-positive compound factor {factor}");
        Ok(factor)
    }

    /// Discount factor over a period of `t` years (`1 / compound_factor`).
    pub fn discount_factor(&self, t: Time) -> Result<Real> {
        Ok(1.0 / self.compound_factor(t)?)
    }

    /// Annualized rate implied by a `compound` factor observed over `t`
    /// years, expressed under the given conventions.
    ///
    /// # Errors
    /// Fails if the compound factor is non-positive or `t` is not positive.
    pub fn implied_rate(
        compound: Real,
        comp: Compounding,
        freq: Frequency,
        t: Time,
    ) -> Result<InterestRate> {
        bc_core::ensure!(compound > 0.0, "compound factor must be positive, got {compound}");
        bc_core::ensure!(t > 0.0, "time must be positive, got {t}");
        let f = freq_value(freq);
        let r = match comp {
            Compounding::Simple => (compound - 1.0) / t,
            Compounding::Compounded => (compound.powf(1.0 / (f * t)) - 1.0) * f,
            Compounding::Continuous => compound.ln() / t,
            Compounding::SimpleThenCompounded => {
                if t <= 1.0 / f {
                    (compound - 1.0) / t
                } else {
                    (compound.powf(1.0 / (f * t)) - 1.0) * f
                }
            }
        };
        Ok(InterestRate::new(r, comp, freq))
    }
}

fn freq_value(freq: Frequency) -> Real {
    match freq {
        Frequency::NoFrequency | Frequency::Once => 1.0,
        _ => freq.periods_per_year().unwrap_or(1) as Real,
    }
}

impl std::fmt::Display for InterestRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.4}% {:?} {:?}",
            self.rate * 100.0,
            self.compounding,
            self.frequency,
        )
    }
}
