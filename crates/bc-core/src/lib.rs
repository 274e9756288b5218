//! # bc-core
//!
//! Core types and error definitions for bootcurve.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – numeric type aliases, the error taxonomy
//! used by the bootstrap engine and the term-structure query surface, and the
//! compounding conventions.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Compounding conventions.
pub mod compounding;

/// Error types and the `ensure!` / `fail!` convenience macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Decimal number (alias for Real); used for quantities quoted in market
/// convention, e.g. FX forward points.
pub type Decimal = f64;

/// Integer type used for general-purpose counting.
pub type Integer = i32;

/// Non-negative integer type (fixing days, settlement lags, …).
pub type Natural = u32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor; 1.0 at the reference date, positive everywhere.
pub type DiscountFactor = Real;

/// A time measurement in years (a day-count fraction from a reference date).
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use compounding::Compounding;
pub use errors::{Error, Result};
