//! # bc-termstructures
//!
//! Yield curves and FX forward-point structures.
//!
//! The centerpiece is [`PiecewiseYieldCurve`], which bootstraps a discount
//! curve from market instruments wrapped in [`RateHelper`]s.  Known
//! discount factors can be interpolated directly with
//! [`InterpolatedDiscountCurve`], and quoted FX forward points become a
//! structure of their own in [`FxForwardPointTermStructure`].
//!
//! All curves share the [`TermStructure`] base trait (reference date, day
//! counter, extrapolation policy) and yield curves add the
//! [`YieldTermStructure`] query surface (discounts, zero rates, forward
//! rates).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// FX forward points as a function of time.
pub mod fx_forward_points;

/// Discount curves over known nodes.
pub mod interpolated_discount_curve;

/// Bootstrap construction of yield curves.
pub mod piecewise_yield_curve;

/// Bootstrap instruments.
pub mod rate_helpers;

/// Base trait and shared data for term structures.
pub mod term_structure;

/// The yield-curve query surface.
pub mod yield_term_structure;

pub use fx_forward_points::FxForwardPointTermStructure;
pub use interpolated_discount_curve::InterpolatedDiscountCurve;
pub use piecewise_yield_curve::{BootstrapConfig, PiecewiseYieldCurve};
pub use rate_helpers::{
    BootstrapCurve, DepositRateHelper, FixedRateBondHelper, FraRateHelper, FxForwardRateHelper,
    RateHelper, SwapRateHelper,
};
pub use term_structure::{TermStructure, TermStructureData};
pub use yield_term_structure::YieldTermStructure;
