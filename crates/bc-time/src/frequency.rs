//! Payment / event frequency.

/// How often coupons or events recur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// No events — used as a sentinel.
    NoFrequency,
    /// Once (maturity only).
    Once,
    /// Annual (once per year).
    Annual,
    /// Semi-annual (twice per year).
    Semiannual,
    /// Quarterly (four times per year).
    Quarterly,
    /// Monthly (twelve times per year).
    Monthly,
    /// Weekly (fifty-two times per year).
    Weekly,
    /// Daily.
    Daily,
}

impl Frequency {
    /// Number of periods per year.  Returns `None` for `NoFrequency`.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Frequency::NoFrequency => None,
            Frequency::Once => Some(0),
            Frequency::Annual => Some(1),
            Frequency::Semiannual => Some(2),
            Frequency::Quarterly => Some(4),
            Frequency::Monthly => Some(12),
            Frequency::Weekly => Some(52),
            Frequency::Daily => Some(365),
        }
    }
}
