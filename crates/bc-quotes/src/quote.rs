//! `Quote` trait and `SimpleQuote` implementation.
//!
//! Quotes are shared between the market and any curve built from them, so
//! `SimpleQuote` is interior-mutable and thread-safe.  Instead of pushing
//! notifications at observers, every quote carries a monotonically
//! increasing generation that bumps on each update; a curve snapshots the
//! generations of its inputs at build time and compares them later to
//! decide whether it is stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use bc_core::Real;

/// A market-observable value.
pub trait Quote: std::fmt::Debug + Send + Sync {
    /// The current value, or `None` if the quote is unset.
    fn value(&self) -> Option<Real>;

    /// Update generation: increases every time the value changes.
    fn generation(&self) -> u64;

    /// Return `true` if the quote currently holds a value.
    fn is_valid(&self) -> bool {
        self.value().is_some()
    }
}

/// A simple, mutable market quote.
///
/// Cloning shares the underlying value; all clones observe the same
/// updates and generation.
#[derive(Debug, Clone)]
pub struct SimpleQuote {
    inner: Arc<QuoteCell>,
}

#[derive(Debug)]
struct QuoteCell {
    value: RwLock<Option<Real>>,
    generation: AtomicU64,
}

impl SimpleQuote {
    /// Create a new quote with the given value.
    pub fn new(value: Real) -> Self {
        Self {
            inner: Arc::new(QuoteCell {
                value: RwLock::new(Some(value)),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Create an empty (invalid) quote.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(QuoteCell {
                value: RwLock::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Set a new value and bump the generation.
    pub fn set_value(&self, value: Real) {
        *self.inner.value.write().unwrap() = Some(value);
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Clear the value, making the quote invalid.
    pub fn reset(&self) {
        *self.inner.value.write().unwrap() = None;
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Quote for SimpleQuote {
    fn value(&self) -> Option<Real> {
        *self.inner.value.read().unwrap()
    }

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }
}

/// A quote derived by applying a function to another quote's value.
pub struct DerivedQuote<Q: Quote, F> {
    inner: Q,
    func: F,
}

impl<Q: Quote, F> DerivedQuote<Q, F>
where
    F: Fn(Real) -> Real + Send + Sync,
{
    /// Wrap a quote with a value transformation.
    pub fn new(inner: Q, func: F) -> Self {
        Self { inner, func }
    }
}

impl<Q: Quote, F> std::fmt::Debug for DerivedQuote<Q, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedQuote")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<Q: Quote, F> Quote for DerivedQuote<Q, F>
where
    F: Fn(Real) -> Real + Send + Sync,
{
    fn value(&self) -> Option<Real> {
        self.inner.value().map(&self.func)
    }

    fn generation(&self) -> u64 {
        self.inner.generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quote_holds_value() {
        let q = SimpleQuote::new(1.05);
        assert!(q.is_valid());
        assert_eq!(q.value(), Some(1.05));
    }

    #[test]
    fn empty_quote_is_invalid() {
        let q = SimpleQuote::empty();
        assert!(!q.is_valid());
        assert_eq!(q.value(), None);
    }

    #[test]
    fn set_value_bumps_generation() {
        let q = SimpleQuote::new(0.01);
        let g0 = q.generation();
        q.set_value(0.02);
        assert_eq!(q.value(), Some(0.02));
        assert!(q.generation() > g0);
    }

    #[test]
    fn clones_share_the_value() {
        let q = SimpleQuote::new(0.01);
        let alias = q.clone();
        q.set_value(0.03);
        assert_eq!(alias.value(), Some(0.03));
        assert_eq!(alias.generation(), q.generation());
    }

    #[test]
    fn reset_invalidates_and_bumps() {
        let q = SimpleQuote::new(0.01);
        let g0 = q.generation();
        q.reset();
        assert!(!q.is_valid());
        assert!(q.generation() > g0);
    }

    #[test]
    fn derived_quote_tracks_inner() {
        let q = SimpleQuote::new(2.0);
        let neg = DerivedQuote::new(q.clone(), |v| -v);
        assert_eq!(neg.value(), Some(-2.0));
        q.set_value(3.0);
        assert_eq!(neg.value(), Some(-3.0));
        assert_eq!(neg.generation(), q.generation());
    }
}
