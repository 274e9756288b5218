//! Spot exchange rates: conversion, chaining, and inversion.

use crate::currency::{Currency, Money};
use bc_core::{
    errors::{Error, Result},
    Real,
};

/// A spot exchange rate between two currencies.
///
/// The rate is the number of units of `target` one unit of `source` buys.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    /// The source currency.
    pub source: &'static Currency,
    /// The target currency.
    pub target: &'static Currency,
    /// How many units of `target` one unit of `source` buys.
    pub rate: Real,
}

impl ExchangeRate {
    /// Create a new exchange rate.
    pub fn new(source: &'static Currency, target: &'static Currency, rate: Real) -> Self {
        Self {
            source,
            target,
            rate,
        }
    }

    /// Convert a monetary amount between `source` and `target`.
    ///
    /// # Errors
    /// Fails if `amount` is denominated in neither leg.
    pub fn exchange(&self, amount: &Money) -> Result<Money> {
        if amount.currency == self.source {
            Ok(Money::new(amount.value * self.rate, self.target))
        } else if amount.currency == self.target {
            Ok(Money::new(amount.value / self.rate, self.source))
        } else {
            Err(Error::NotChainable(format!(
                "{}/{} rate cannot convert {}",
                self.source.code, self.target.code, amount.currency.code
            )))
        }
    }

    /// The inverse rate (target → source).
    pub fn inverse(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            rate: 1.0 / self.rate,
        }
    }

    /// Combine two rates sharing exactly one currency leg into a cross
    /// rate between the remaining two currencies.
    ///
    /// # Errors
    /// Returns [`Error::NotChainable`] if the rates share no leg.
    pub fn chain(r1: &ExchangeRate, r2: &ExchangeRate) -> Result<ExchangeRate> {
        if r1.source == r2.source {
            Ok(ExchangeRate::new(r1.target, r2.target, r2.rate / r1.rate))
        } else if r1.source == r2.target {
            Ok(ExchangeRate::new(
                r1.target,
                r2.source,
                1.0 / (r1.rate * r2.rate),
            ))
        } else if r1.target == r2.source {
            Ok(ExchangeRate::new(r1.source, r2.target, r1.rate * r2.rate))
        } else if r1.target == r2.target {
            Ok(ExchangeRate::new(r1.source, r2.source, r1.rate / r2.rate))
        } else {
            Err(Error::NotChainable(format!(
                "{}/{} and {}/{} share no currency",
                r1.source.code, r1.target.code, r2.source.code, r2.target.code
            )))
        }
    }
}
