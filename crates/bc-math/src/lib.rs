//! # bc-math
//!
//! Interpolation schemes and 1D root finding for bootcurve.
//!
//! The bootstrap drives both halves of this crate: every trial value for a
//! curve node rebuilds an interpolation via an [`InterpolationBuilder`],
//! and the node value itself is found with [`solvers1d::bracketed_brent`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod interpolation;
pub mod solvers1d;

pub use interpolation::{
    BackwardFlat, BackwardFlatInterpolation, Interpolation1D, InterpolationBuilder, Linear,
    LinearInterpolation, LogLinear, LogLinearInterpolation,
};
