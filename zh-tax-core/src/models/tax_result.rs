use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::profile::Denomination;

/// One row of a per-bracket tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    /// Index of the bracket in its schedule.
    pub bracket_index: usize,

    pub range_start: Decimal,

    /// Upper bound of the bracket; `None` for the unbounded top bracket.
    pub range_end: Option<Decimal>,

    /// The bracket's rate in its schedule's own unit (percent or per mille).
    pub rate: Decimal,

    /// Amount of taxable income falling inside this bracket.
    pub taxable_amount: Decimal,

    pub tax_paid: Decimal,

    /// Whether taxable income currently sits inside this bracket.
    pub is_active: bool,
}

/// Church tax for one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchTax {
    pub amount: Decimal,

    /// Percentage of gross income before deductions.
    pub effective_rate: Decimal,

    pub denomination: Denomination,

    /// False when no denomination applies or income is non-positive.
    pub applied: bool,
}

/// Wealth tax for one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WealthTax {
    /// Wealth remaining after statutory deductions.
    pub taxable_wealth: Decimal,

    /// Statutory deductions applied before the bracket walk.
    pub deductions: Decimal,

    /// Base wealth tax before Steuerfüsse.
    pub einfache_wealth_tax: Decimal,

    pub cantonal_wealth_tax: Decimal,
    pub municipal_wealth_tax: Decimal,

    /// Cantonal + municipal wealth tax.
    pub amount: Decimal,

    /// Percentage of total (pre-deduction) wealth.
    pub effective_rate: Decimal,

    pub breakdown: Vec<BracketSlice>,
}

/// Output of one tax computation for one (income, deductions, profile)
/// triple.
///
/// Populated by the composition layer; [`TaxResult::finalize`] must be the
/// last step before the result is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    // Inputs
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,

    // Federal (DBG)
    pub federal_tax: Decimal,
    pub federal_effective_rate: Decimal,
    pub federal_marginal_rate: Decimal,
    pub federal_bracket_index: usize,
    pub federal_breakdown: Vec<BracketSlice>,

    // Cantonal / municipal (Zürich)
    pub einfache_staatssteuer: Decimal,
    pub cantonal_tax: Decimal,
    pub municipal_tax: Decimal,
    pub personal_tax: Decimal,
    pub total_cantonal_municipal: Decimal,
    pub cantonal_effective_rate: Decimal,
    pub cantonal_marginal_rate: Decimal,
    pub cantonal_bracket_index: usize,
    pub cantonal_breakdown: Vec<BracketSlice>,

    /// Position inside the active cantonal bracket, as a percentage.
    pub progress_in_bracket: Decimal,
    pub amount_to_next_bracket: Decimal,

    // Church and wealth
    pub church_tax: Decimal,
    pub church_effective_rate: Decimal,
    pub wealth_tax: Decimal,
    pub wealth_effective_rate: Decimal,

    // Aggregate
    pub total_tax: Decimal,
    pub total_effective_rate: Decimal,
}

impl TaxResult {
    /// Computes the aggregate total and all effective rates.
    ///
    /// The total deliberately excludes federal tax: it is remitted
    /// separately to the federal government, while the total shown here is
    /// the combined Zürich obligation (cantonal + municipal + personal +
    /// church + wealth).
    ///
    /// Effective rates are percentages of gross income before deductions,
    /// not of taxable income.
    pub fn finalize(&mut self) {
        self.total_cantonal_municipal = self.cantonal_tax + self.municipal_tax;
        self.total_tax = self.cantonal_tax
            + self.municipal_tax
            + self.personal_tax
            + self.church_tax
            + self.wealth_tax;

        if self.gross_income > Decimal::ZERO {
            let percent = |part: Decimal, whole: Decimal| part / whole * Decimal::ONE_HUNDRED;
            self.total_effective_rate = percent(self.total_tax, self.gross_income);
            self.federal_effective_rate = percent(self.federal_tax, self.gross_income);
            self.cantonal_effective_rate =
                percent(self.total_cantonal_municipal, self.gross_income);
            if self.church_tax > Decimal::ZERO {
                self.church_effective_rate = percent(self.church_tax, self.gross_income);
            }
        }
    }
}

/// Three-scenario comparison for one profile: taxes before any deductions,
/// after the automatic (pauschal) deductions, and after all deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub gross_income: Decimal,

    pub automatic_deductions: Decimal,
    pub total_deductions: Decimal,

    pub before: TaxResult,
    pub after_automatic: TaxResult,
    pub after_all: TaxResult,

    pub savings_from_automatic: Decimal,
    pub savings_from_optional: Decimal,
    pub total_savings: Decimal,
    pub total_savings_percent: Decimal,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn finalize_excludes_federal_tax_from_total() {
        let mut result = TaxResult {
            gross_income: dec!(100000),
            federal_tax: dec!(2688),
            cantonal_tax: dec!(5862.36),
            municipal_tax: dec!(5742.72),
            personal_tax: dec!(24),
            church_tax: dec!(658.02),
            wealth_tax: dec!(100),
            ..TaxResult::default()
        };

        result.finalize();

        assert_eq!(result.total_tax, dec!(12387.10));
        // Federal tax is reported but never folded into the total.
        assert_eq!(
            result.total_tax,
            result.cantonal_tax
                + result.municipal_tax
                + result.personal_tax
                + result.church_tax
                + result.wealth_tax
        );
    }

    #[test]
    fn finalize_uses_gross_income_for_effective_rates() {
        let mut result = TaxResult {
            gross_income: dec!(100000),
            taxable_income: dec!(80000),
            cantonal_tax: dec!(4000),
            municipal_tax: dec!(4000),
            ..TaxResult::default()
        };

        result.finalize();

        // 8000 / 100000, not 8000 / 80000.
        assert_eq!(result.cantonal_effective_rate, dec!(8));
    }

    #[test]
    fn finalize_with_zero_income_leaves_rates_at_zero() {
        let mut result = TaxResult::default();

        result.finalize();

        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.total_effective_rate, Decimal::ZERO);
        assert_eq!(result.federal_effective_rate, Decimal::ZERO);
    }
}
