//! 1D root finding.
//!
//! [`brent`] solves within a known bracket; [`bracketed_brent`] first grows a
//! bracket around a guess by doubling its half-width, then hands off to
//! Brent.  The bootstrap uses the latter so each node search starts tight
//! around the previous node's value.

use bc_core::{
    errors::{Error, Result},
    Real,
};

const MAX_ITERATIONS: u32 = 100;
const MAX_BRACKET_EXPANSIONS: u32 = 60;

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation.
///
/// # Errors
/// Returns [`Error::UnboundedRoot`] when `f(x_min)` and `f(x_max)` have the
/// same sign, and [`Error::Runtime`] if the iteration cap is reached.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Result<Real>,
{
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if fa * fb > 0.0 {
        return Err(Error::UnboundedRoot(format!(
            "f({a}) = {fa} and f({b}) = {fb} have the same sign"
        )));
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * accuracy;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b)?;
    }
    Err(Error::Runtime(
        "Brent solver: maximum iterations reached".into(),
    ))
}

/// Find a root of `f` near `guess`, expanding the bracket as needed.
///
/// The bracket starts as `[guess - step, guess + step]` clamped to
/// `[lower, upper]` and doubles its half-width until `f` changes sign
/// across it.  Once the bracket covers the whole admissible domain without
/// a sign change, the search is abandoned.
///
/// # Errors
/// Returns [`Error::UnboundedRoot`] when no sign change exists in
/// `[lower, upper]`.
pub fn bracketed_brent<F>(
    f: F,
    guess: Real,
    step: Real,
    lower: Real,
    upper: Real,
    accuracy: Real,
) -> Result<Real>
where
    F: Fn(Real) -> Result<Real>,
{
    bc_core::ensure!(
        lower < upper,
        "invalid search domain [{lower}, {upper}]"
    );
    bc_core::ensure!(step > 0.0, "bracket step must be positive, got {step}");

    let guess = guess.clamp(lower, upper);
    let mut half = step;
    for _ in 0..MAX_BRACKET_EXPANSIONS {
        let a = (guess - half).max(lower);
        let b = (guess + half).min(upper);
        let fa = f(a)?;
        let fb = f(b)?;
        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa * fb < 0.0 {
            return brent(f, a, b, accuracy);
        }
        if a <= lower && b >= upper {
            return Err(Error::UnboundedRoot(format!(
                "no sign change in [{lower}, {upper}]: f({a}) = {fa}, f({b}) = {fb}"
            )));
        }
        half *= 2.0;
    }
    Err(Error::UnboundedRoot(
        "bracket expansion exhausted without a sign change".into(),
    ))
}
