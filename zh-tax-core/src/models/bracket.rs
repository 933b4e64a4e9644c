use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bracket in a marginal-form schedule (federal style, Art. 36 DBG).
///
/// The tax for an income inside this bracket is `base_tax` plus
/// `rate_per_hundred` for every CHF 100 of income above `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginalBracket {
    /// Lower income bound of the bracket, inclusive.
    pub threshold: Decimal,

    /// Cumulative tax owed at the threshold.
    pub base_tax: Decimal,

    /// Marginal rate, expressed per CHF 100 of excess income.
    pub rate_per_hundred: Decimal,
}

/// A complete marginal-form schedule, sorted ascending by threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginalTable {
    pub brackets: Vec<MarginalBracket>,
}

/// A bracket in a slice-form schedule (Zürich "einfache" style, StG § 35).
///
/// The rate applies only to the slice of income between this bracket's
/// threshold and the next bracket's threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceBracket {
    /// Lower income bound of the slice, inclusive.
    pub threshold: Decimal,

    /// Rate applied to the slice. Interpretation depends on [`RateBasis`].
    pub rate: Decimal,
}

/// Denominator for slice-form rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateBasis {
    /// Rate is a percentage (income tax: 2 means 2%).
    PerHundred,

    /// Rate is per mille (wealth tax: 0.5 means 0.5‰).
    PerMille,
}

impl RateBasis {
    pub fn divisor(&self) -> Decimal {
        match self {
            Self::PerHundred => Decimal::from(100),
            Self::PerMille => Decimal::from(1000),
        }
    }
}

/// A complete slice-form schedule, sorted ascending by threshold.
///
/// The first bracket usually carries a zero rate and establishes the
/// tax-free floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceTable {
    pub brackets: Vec<SliceBracket>,
    pub basis: RateBasis,
}
