//! Business-day adjustment conventions.

/// How to adjust a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Choose the first business day after the holiday.
    Following,
    /// Choose the first business day after the holiday unless it belongs
    /// to a different month; in that case choose the first business day
    /// before the holiday.
    ModifiedFollowing,
    /// Choose the first business day before the holiday.
    Preceding,
    /// Choose the first business day before the holiday unless it belongs
    /// to a different month; in that case choose the first business day
    /// after the holiday.
    ModifiedPreceding,
    /// Do not adjust.
    Unadjusted,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        };
        write!(f, "{s}")
    }
}
