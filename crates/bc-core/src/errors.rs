//! Error types for bootcurve.
//!
//! A single `thiserror`-derived enum covers the whole library.  Curve
//! construction wraps any lower-level failure in
//! [`Error::CurveConstruction`] together with the identity of the rate
//! helper that caused it, so a failed bootstrap always names the offending
//! instrument.  No partial curve is ever exposed.

use thiserror::Error;

/// The top-level error type used throughout bootcurve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A rate helper's settlement or maturity date could not be computed
    /// from its calendar / day-count inputs, or its dates are degenerate.
    #[error("invalid instrument: {0}")]
    InvalidInstrument(String),

    /// The market quote backing a rate helper is unset.
    #[error("quote unavailable: {0}")]
    QuoteUnavailable(String),

    /// Two curve nodes collapsed onto the same time.
    #[error("degenerate node: {0}")]
    DegenerateNode(String),

    /// A curve or interpolation was queried outside its domain without
    /// extrapolation enabled.
    #[error("extrapolation at {point} outside [{min}, {max}] not allowed")]
    Extrapolation {
        /// The point that was queried.
        point: f64,
        /// Lower bound of the valid domain.
        min: f64,
        /// Upper bound of the valid domain.
        max: f64,
    },

    /// The root search could not bracket a sign change within its
    /// admissible domain; the market quote is infeasible.
    #[error("no root bracketed: {0}")]
    UnboundedRoot(String),

    /// The global fixed-point iteration over the node vector hit its pass
    /// cap before node values settled.
    #[error("bootstrap did not converge after {passes} passes (max node change {max_change:e})")]
    BootstrapNonConvergence {
        /// Number of full passes performed.
        passes: usize,
        /// Largest absolute node change observed in the final pass.
        max_change: f64,
    },

    /// Curve construction aborted; wraps the underlying failure together
    /// with the failing helper's position and description.
    #[error("curve construction failed at helper {index} ({description}): {source}")]
    CurveConstruction {
        /// Index of the failing helper in maturity order.
        index: usize,
        /// Human-readable description of the failing instrument.
        description: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// A rate query was made for a date on or before the curve's reference
    /// date.
    #[error("date {date} is not after reference date {reference}")]
    DateBeforeReference {
        /// The queried date.
        date: String,
        /// The curve's reference date.
        reference: String,
    },

    /// Two exchange rates share no currency leg (or differ in tenor) and
    /// cannot be combined into a cross rate.
    #[error("exchange rates not chainable: {0}")]
    NotChainable(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// Wrap this error with the identity of the rate helper that caused it.
    pub fn at_helper(self, index: usize, description: impl Into<String>) -> Self {
        Error::CurveConstruction {
            index,
            description: description.into(),
            source: Box::new(self),
        }
    }
}

/// Shorthand `Result` type used throughout bootcurve.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use bc_core::ensure;
/// fn positive(x: f64) -> bc_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use bc_core::fail;
/// fn always_err() -> bc_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
