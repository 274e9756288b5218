//! 1D interpolation trait and implementations.
//!
//! Every scheme validates its nodes up front: at least two points, strictly
//! increasing abscissae.  Evaluation outside the node range is an error
//! unless the caller opts into extrapolation, in which case the scheme
//! extends itself in its natural way (linear schemes extend the boundary
//! segment, flat schemes hold the boundary value).

use bc_core::{
    errors::{Error, Result},
    Real,
};

/// A 1D interpolation function defined by a set of known points.
pub trait Interpolation1D: std::fmt::Debug + Send + Sync {
    /// Lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Evaluate at `x` without a range check (extends the boundary segment
    /// outside the domain).
    fn value_unchecked(&self, x: Real) -> Real;

    /// Evaluate at `x`.
    ///
    /// # Errors
    /// Returns [`Error::Extrapolation`] when `x` lies outside the node range
    /// and `extrapolate` is `false`.
    fn value(&self, x: Real, extrapolate: bool) -> Result<Real> {
        if !extrapolate && !self.is_in_range(x) {
            return Err(Error::Extrapolation {
                point: x,
                min: self.x_min(),
                max: self.x_max(),
            });
        }
        Ok(self.value_unchecked(x))
    }

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// Validate a node set: matching lengths, at least two points, strictly
/// increasing abscissae.
fn check_nodes(xs: &[Real], ys: &[Real]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(Error::DegenerateNode(format!(
            "{} abscissae vs {} ordinates",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(Error::DegenerateNode(format!(
            "need at least 2 points, got {}",
            xs.len()
        )));
    }
    for w in xs.windows(2) {
        if w[1] <= w[0] {
            return Err(Error::DegenerateNode(format!(
                "abscissae not strictly increasing: {} then {}",
                w[0], w[1]
            )));
        }
    }
    Ok(())
}

/// Index of the segment containing `x`, clamped to the boundary segments.
fn locate(xs: &[Real], x: Real) -> usize {
    let n = xs.len();
    if x <= xs[0] {
        return 0;
    }
    if x >= xs[n - 1] {
        return n - 2;
    }
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Piecewise-linear interpolation.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Construct a linear interpolation over sorted `xs` and matching `ys`.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }
}

impl Interpolation1D for LinearInterpolation {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        *self.xs.last().unwrap()
    }

    fn value_unchecked(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let dx = self.xs[i + 1] - self.xs[i];
        self.ys[i] + (x - self.xs[i]) * (self.ys[i + 1] - self.ys[i]) / dx
    }
}

// ── Log-linear ────────────────────────────────────────────────────────────────

/// Log-linear interpolation: interpolates `ln(y)` linearly and exponentiates.
///
/// Applied to discount factors this makes forward rates piecewise constant.
#[derive(Debug, Clone)]
pub struct LogLinearInterpolation {
    inner: LinearInterpolation,
}

impl LogLinearInterpolation {
    /// Construct a log-linear interpolation.  All `ys` must be strictly
    /// positive.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        for &y in ys {
            if y <= 0.0 {
                return Err(Error::DegenerateNode(format!(
                    "non-positive ordinate {y} in log-linear interpolation"
                )));
            }
        }
        let log_ys: Vec<Real> = ys.iter().map(|&y| y.ln()).collect();
        Ok(Self {
            inner: LinearInterpolation::new(xs, &log_ys)?,
        })
    }
}

impl Interpolation1D for LogLinearInterpolation {
    fn x_min(&self) -> Real {
        self.inner.x_min()
    }

    fn x_max(&self) -> Real {
        self.inner.x_max()
    }

    fn value_unchecked(&self, x: Real) -> Real {
        self.inner.value_unchecked(x).exp()
    }
}

// ── Backward-flat ─────────────────────────────────────────────────────────────

/// Backward-flat (step-function) interpolation: the value over
/// `(x[i-1], x[i]]` is `y[i]`.
#[derive(Debug, Clone)]
pub struct BackwardFlatInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl BackwardFlatInterpolation {
    /// Construct a backward-flat interpolation.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }
}

impl Interpolation1D for BackwardFlatInterpolation {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        *self.xs.last().unwrap()
    }

    fn value_unchecked(&self, x: Real) -> Real {
        if x <= self.xs[0] {
            return self.ys[0];
        }
        let i = locate(&self.xs, x);
        self.ys[i + 1]
    }
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Factory producing a concrete interpolation from a node set.
///
/// Curves are re-interpolated on every bootstrap trial, so the scheme is
/// chosen once through a builder and applied repeatedly.
pub trait InterpolationBuilder: std::fmt::Debug + Send + Sync {
    /// Build an interpolation over the given nodes.
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>>;
}

/// Builder for [`LinearInterpolation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl InterpolationBuilder for Linear {
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>> {
        Ok(Box::new(LinearInterpolation::new(xs, ys)?))
    }
}

/// Builder for [`LogLinearInterpolation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLinear;

impl InterpolationBuilder for LogLinear {
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>> {
        Ok(Box::new(LogLinearInterpolation::new(xs, ys)?))
    }
}

/// Builder for [`BackwardFlatInterpolation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BackwardFlat;

impl InterpolationBuilder for BackwardFlat {
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>> {
        Ok(Box::new(BackwardFlatInterpolation::new(xs, ys)?))
    }
}
