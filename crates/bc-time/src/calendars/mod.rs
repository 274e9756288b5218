//! Concrete holiday calendars.

mod target;

pub use target::Target;
