//! # bc-quotes
//!
//! Market quotes and observable values for bootcurve.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `Quote` trait and concrete implementations.
pub mod quote;

pub use quote::{DerivedQuote, Quote, SimpleQuote};
