//! # bootcurve
//!
//! Piecewise yield-curve bootstrapping and term-structure queries.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `bc-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! bootcurve = "0.1"
//! ```
//!
//! ```rust
//! use bootcurve::math::LogLinear;
//! use bootcurve::termstructures::{
//!     DepositRateHelper, PiecewiseYieldCurve, RateHelper, YieldTermStructure,
//! };
//! use bootcurve::time::{Actual360, Date};
//!
//! let today = Date::from_ymd(2025, 1, 2).unwrap();
//! let helpers: Vec<Box<dyn RateHelper>> = vec![
//!     Box::new(DepositRateHelper::new(
//!         0.04,
//!         today,
//!         Date::from_ymd(2025, 7, 2).unwrap(),
//!         Actual360,
//!     ).unwrap()),
//! ];
//! let curve = PiecewiseYieldCurve::new(today, helpers, Actual360, &LogLinear).unwrap();
//! assert!(curve.discount(0.25, false).unwrap() < 1.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use bc_core as core;

/// Date, calendar, day counter, schedule, and interest-rate types.
pub use bc_time as time;

/// Interpolation and one-dimensional root finding.
pub use bc_math as math;

/// Market quotes.
pub use bc_quotes as quotes;

/// Currencies and spot/forward exchange rates.
pub use bc_currencies as currencies;

/// Yield curves, rate helpers, and FX forward-point structures.
pub use bc_termstructures as termstructures;
