//! # bc-currencies
//!
//! Currencies, spot exchange rates, and forward exchange rates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Currency data and definitions.
pub mod currency;

/// Spot exchange rates.
pub mod exchange_rate;

/// Forward exchange rates (spot plus forward points).
pub mod forward_exchange_rate;

/// Pre-defined world currencies.
pub mod currencies;

pub use currency::{Currency, Money};
pub use exchange_rate::ExchangeRate;
pub use forward_exchange_rate::ForwardExchangeRate;
