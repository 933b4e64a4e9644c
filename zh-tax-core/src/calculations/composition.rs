//! Tax composition: turns bracket evaluations into the actual amounts owed.
//!
//! Switzerland assesses the same income three times:
//!
//! | Tier      | Schedule                 | Multipliers on top                  |
//! |-----------|--------------------------|-------------------------------------|
//! | Federal   | marginal form (DBG)      | none                                |
//! | Cantonal  | slice form ("einfache")  | cantonal 98% + municipal Steuerfuss |
//! | Municipal | same einfache base       | per-municipality integer percent    |
//!
//! Church tax and the wealth tax reuse the einfache mechanics. The federal
//! and cantonal computations see different taxable incomes because the
//! commuting cost caps differ per authority; callers pass the already
//! adjusted deduction totals.
//!
//! Evaluations stay unrounded; every amount produced here is rounded to
//! centimes after its multiplier is applied.

use rust_decimal::Decimal;

use crate::calculations::common::{max, round_half_up};
use crate::calculations::deductions::adjusted_total;
use crate::calculations::progressive::{evaluate_marginal, evaluate_slices, EvaluationError};
use crate::models::{
    BracketSlice, ChurchTax, DeductionLedger, Denomination, MaritalStatus, TaxResult, TaxYearTables,
    TaxAuthority, TaxpayerProfile, WealthTax,
};

/// Federal income tax fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederalTax {
    pub taxable_income: Decimal,
    pub tax: Decimal,
    pub marginal_rate: Decimal,
    pub bracket_index: usize,
    pub breakdown: Vec<BracketSlice>,
}

/// Cantonal and municipal income tax fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CantonalTax {
    pub taxable_income: Decimal,

    /// Base tax from the StG § 35 schedule, before any Steuerfuss.
    pub einfache_staatssteuer: Decimal,

    pub cantonal_tax: Decimal,
    pub municipal_tax: Decimal,

    /// Flat Personalsteuer, owed whenever taxable income is positive.
    pub personal_tax: Decimal,

    pub marginal_rate: Decimal,
    pub bracket_index: usize,
    pub breakdown: Vec<BracketSlice>,
    pub progress_in_bracket: Decimal,
    pub amount_to_next_bracket: Decimal,
}

/// Direct federal tax (DBG) on income after the federally capped deductions.
pub fn federal_income_tax(
    gross_income: Decimal,
    deductions: Decimal,
    status: MaritalStatus,
    tables: &TaxYearTables,
) -> Result<FederalTax, EvaluationError> {
    let taxable = max(Decimal::ZERO, gross_income - deductions);
    let evaluation = evaluate_marginal(tables.federal(status), taxable)?;

    Ok(FederalTax {
        taxable_income: taxable,
        tax: round_half_up(evaluation.tax),
        marginal_rate: evaluation.marginal_rate,
        bracket_index: evaluation.bracket_index,
        breakdown: evaluation.breakdown,
    })
}

/// Cantonal plus municipal income tax on income after the cantonally capped
/// deductions.
///
/// The einfache Staatssteuer is scaled twice from the same base: once by the
/// cantonal Steuerfuss and once by the municipality's.
pub fn cantonal_income_tax(
    gross_income: Decimal,
    deductions: Decimal,
    municipal_multiplier: u32,
    status: MaritalStatus,
    tables: &TaxYearTables,
) -> Result<CantonalTax, EvaluationError> {
    let taxable = max(Decimal::ZERO, gross_income - deductions);
    let evaluation = evaluate_slices(tables.cantonal(status), taxable)?;

    let einfache = evaluation.tax;
    let cantonal = round_half_up(einfache * tables.multipliers.cantonal_percent / Decimal::ONE_HUNDRED);
    let municipal =
        round_half_up(einfache * Decimal::from(municipal_multiplier) / Decimal::ONE_HUNDRED);
    let personal = if taxable > Decimal::ZERO {
        tables.multipliers.personal_tax
    } else {
        Decimal::ZERO
    };

    Ok(CantonalTax {
        taxable_income: taxable,
        einfache_staatssteuer: round_half_up(einfache),
        cantonal_tax: cantonal,
        municipal_tax: municipal,
        personal_tax: personal,
        marginal_rate: evaluation.marginal_rate,
        bracket_index: evaluation.bracket_index,
        breakdown: evaluation.breakdown,
        progress_in_bracket: evaluation.progress_in_bracket,
        amount_to_next_bracket: evaluation.amount_to_next_bracket,
    })
}

/// Church tax as a denomination-specific fraction of the einfache
/// Staatssteuer.
///
/// The tax applies whenever a denomination levies it and income is
/// positive; income inside the tax-free floor still counts as applied,
/// with a zero amount.
pub fn church_tax(
    einfache_staatssteuer: Decimal,
    denomination: Denomination,
    gross_income: Decimal,
    tables: &TaxYearTables,
) -> ChurchTax {
    let rate = tables.multipliers.church_rate(denomination);
    if rate == Decimal::ZERO || gross_income <= Decimal::ZERO {
        return ChurchTax {
            amount: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
            denomination,
            applied: false,
        };
    }

    let amount = round_half_up(einfache_staatssteuer * rate);
    let effective_rate = amount / gross_income * Decimal::ONE_HUNDRED;

    ChurchTax { amount, effective_rate, denomination, applied: true }
}

/// Wealth tax on net wealth after the per-child deductions, with the same
/// cantonal and municipal Steuerfüsse as the income tax.
pub fn wealth_tax(
    total_wealth: Decimal,
    num_children: u32,
    municipal_multiplier: u32,
    status: MaritalStatus,
    tables: &TaxYearTables,
) -> Result<WealthTax, EvaluationError> {
    let deductions = Decimal::from(num_children) * tables.limits.wealth_deduction_per_child;
    let taxable = max(Decimal::ZERO, total_wealth - deductions);
    let evaluation = evaluate_slices(tables.wealth(status), taxable)?;

    let einfache = evaluation.tax;
    let cantonal = round_half_up(einfache * tables.multipliers.cantonal_percent / Decimal::ONE_HUNDRED);
    let municipal =
        round_half_up(einfache * Decimal::from(municipal_multiplier) / Decimal::ONE_HUNDRED);
    let amount = cantonal + municipal;
    let effective_rate = if total_wealth > Decimal::ZERO {
        amount / total_wealth * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    Ok(WealthTax {
        taxable_wealth: taxable,
        deductions,
        einfache_wealth_tax: round_half_up(einfache),
        cantonal_wealth_tax: cantonal,
        municipal_wealth_tax: municipal,
        amount,
        effective_rate,
        breakdown: evaluation.breakdown,
    })
}

/// Assembles the complete three-tier result for one income and one
/// deduction ledger.
///
/// `total_override` restricts the ledger to a partial total (for example the
/// automatic bucket only); the per-authority commuting caps are re-applied
/// to whichever total is used.
pub fn complete_tax_result(
    gross_income: Decimal,
    ledger: &DeductionLedger,
    total_override: Option<Decimal>,
    profile: &TaxpayerProfile,
    tables: &TaxYearTables,
) -> Result<TaxResult, EvaluationError> {
    let federal_deductions =
        adjusted_total(ledger, TaxAuthority::Federal, total_override, &tables.limits);
    let cantonal_deductions =
        adjusted_total(ledger, TaxAuthority::Cantonal, total_override, &tables.limits);

    let federal =
        federal_income_tax(gross_income, federal_deductions, profile.marital_status, tables)?;
    let cantonal = cantonal_income_tax(
        gross_income,
        cantonal_deductions,
        profile.municipal_multiplier,
        profile.marital_status,
        tables,
    )?;
    let church = church_tax(
        cantonal.einfache_staatssteuer,
        profile.religious_affiliation,
        gross_income,
        tables,
    );
    let wealth = wealth_tax(
        profile.total_wealth,
        profile.num_children,
        profile.municipal_multiplier,
        profile.marital_status,
        tables,
    )?;

    let mut result = TaxResult {
        gross_income,
        total_deductions: cantonal_deductions,
        taxable_income: cantonal.taxable_income,

        federal_tax: federal.tax,
        federal_marginal_rate: federal.marginal_rate,
        federal_bracket_index: federal.bracket_index,
        federal_breakdown: federal.breakdown,

        einfache_staatssteuer: cantonal.einfache_staatssteuer,
        cantonal_tax: cantonal.cantonal_tax,
        municipal_tax: cantonal.municipal_tax,
        personal_tax: cantonal.personal_tax,
        cantonal_marginal_rate: cantonal.marginal_rate,
        cantonal_bracket_index: cantonal.bracket_index,
        cantonal_breakdown: cantonal.breakdown,
        progress_in_bracket: cantonal.progress_in_bracket,
        amount_to_next_bracket: cantonal.amount_to_next_bracket,

        church_tax: church.amount,
        wealth_tax: wealth.amount,
        wealth_effective_rate: wealth.effective_rate,

        ..TaxResult::default()
    };
    result.finalize();

    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{
        DeductionLimits, EmploymentType, InsuranceLimits, MarginalBracket, MarginalTable,
        Multipliers, RateBasis, SliceBracket, SliceTable, Spouse,
    };

    fn marginal(rows: &[(i64, &str, &str)]) -> MarginalTable {
        MarginalTable {
            brackets: rows
                .iter()
                .map(|(threshold, base, rate)| MarginalBracket {
                    threshold: Decimal::from(*threshold),
                    base_tax: base.parse().unwrap(),
                    rate_per_hundred: rate.parse().unwrap(),
                })
                .collect(),
        }
    }

    fn slices(rows: &[(i64, &str)], basis: RateBasis) -> SliceTable {
        SliceTable {
            brackets: rows
                .iter()
                .map(|(threshold, rate)| SliceBracket {
                    threshold: Decimal::from(*threshold),
                    rate: rate.parse().unwrap(),
                })
                .collect(),
            basis,
        }
    }

    fn test_tables() -> TaxYearTables {
        let federal = marginal(&[
            (0, "0", "0"),
            (15200, "0", "0.77"),
            (33200, "138.60", "0.88"),
            (43500, "229.20", "2.64"),
            (58000, "612.00", "2.97"),
            (76100, "1149.55", "5.94"),
            (82000, "1500.00", "6.60"),
            (108800, "3268.80", "8.80"),
            (141500, "6146.40", "11.00"),
        ]);
        let cantonal = slices(
            &[
                (0, "0"),
                (6900, "2"),
                (11800, "3"),
                (16600, "4"),
                (24500, "5"),
                (34100, "6"),
                (45100, "7"),
                (58000, "8"),
                (75400, "9"),
                (109000, "10"),
                (142200, "11"),
            ],
            RateBasis::PerHundred,
        );
        let wealth = slices(
            &[(0, "0"), (77000, "0.5"), (308000, "1.0"), (3158000, "3.0")],
            RateBasis::PerMille,
        );

        TaxYearTables {
            tax_year: 2024,
            federal_single: federal.clone(),
            federal_married: federal,
            cantonal_single: cantonal.clone(),
            cantonal_married: cantonal,
            wealth_single: wealth.clone(),
            wealth_married: wealth,
            multipliers: Multipliers {
                cantonal_percent: dec!(98),
                personal_tax: dec!(24),
                church_reformed: dec!(0.10),
                church_catholic: dec!(0.11),
                church_christian_catholic: dec!(0.15),
            },
            limits: DeductionLimits {
                commuting_pauschal: dec!(700),
                commuting_max_federal: dec!(3200),
                commuting_max_cantonal: dec!(5000),
                meals_with_subsidy: dec!(1600),
                meals_without_subsidy: dec!(3200),
                professional_rate: dec!(0.03),
                professional_min: dec!(2000),
                professional_max: dec!(4000),
                side_income_rate: dec!(0.20),
                side_income_min: dec!(800),
                side_income_max: dec!(2400),
                child_deduction: dec!(9000),
                property_maintenance_rate: dec!(0.20),
                asset_management_rate: dec!(0.003),
                asset_management_max: dec!(6000),
                dual_income_deduction: dec!(5900),
                insurance: InsuranceLimits {
                    single_with_pension: dec!(2600),
                    single_without_pension: dec!(3900),
                    married_with_pension: dec!(5200),
                    married_without_pension: dec!(7800),
                    per_child: dec!(1300),
                },
                pillar_3a_max_employed: dec!(7258),
                pillar_3a_max_self_employed: dec!(36288),
                childcare_max: dec!(10100),
                childcare_age_limit: 14,
                medical_threshold_rate: dec!(0.05),
                donations_max_rate: dec!(0.20),
                political_max_single: dec!(10000),
                political_max_married: dec!(20000),
                debt_interest_max: dec!(50000),
                support_payment_min: dec!(2700),
                wealth_deduction_per_child: dec!(41100),
            },
        }
    }

    fn duebendorf_catholic() -> TaxpayerProfile {
        TaxpayerProfile {
            religious_affiliation: Denomination::Catholic,
            municipality: "Dübendorf".to_owned(),
            municipal_multiplier: 96,
            primary: Spouse {
                employment_type: EmploymentType::Employed,
                net_salary: dec!(97500),
                ..Spouse::default()
            },
            ..TaxpayerProfile::default()
        }
    }

    // =========================================================================
    // Component taxes
    // =========================================================================

    #[test]
    fn federal_tax_on_97500_single() {
        let tables = test_tables();

        let federal =
            federal_income_tax(dec!(97500), dec!(0), MaritalStatus::Single, &tables).unwrap();

        // 1,500.00 + 155 × 6.60
        assert_eq!(federal.tax, dec!(2523.00));
        assert_eq!(federal.marginal_rate, dec!(6.60));
    }

    #[test]
    fn einfache_staatssteuer_on_97500_single() {
        let tables = test_tables();

        let cantonal =
            cantonal_income_tax(dec!(97500), dec!(0), 96, MaritalStatus::Single, &tables).unwrap();

        assert_eq!(cantonal.einfache_staatssteuer, dec!(5982.00));
        assert_eq!(cantonal.cantonal_tax, dec!(5862.36));
        assert_eq!(cantonal.municipal_tax, dec!(5742.72));
        assert_eq!(cantonal.personal_tax, dec!(24));
    }

    #[test]
    fn personal_tax_is_waived_at_zero_taxable_income() {
        let tables = test_tables();

        let cantonal =
            cantonal_income_tax(dec!(5000), dec!(5000), 119, MaritalStatus::Single, &tables)
                .unwrap();

        assert_eq!(cantonal.einfache_staatssteuer, dec!(0.00));
        assert_eq!(cantonal.personal_tax, dec!(0));
    }

    #[test]
    fn church_tax_applies_the_denomination_multiplier() {
        let tables = test_tables();

        let church = church_tax(dec!(5982.00), Denomination::Catholic, dec!(97500), &tables);

        assert!(church.applied);
        assert_eq!(church.amount, dec!(658.02));
    }

    #[test]
    fn no_denomination_means_no_church_tax() {
        let tables = test_tables();

        let church = church_tax(dec!(5982.00), Denomination::None, dec!(97500), &tables);

        assert!(!church.applied);
        assert_eq!(church.amount, dec!(0));
    }

    #[test]
    fn church_tax_applies_at_zero_einfache_when_income_is_positive() {
        let tables = test_tables();

        // Income inside the tax-free floor: nothing owed, but the levy
        // still applies to the member.
        let church = church_tax(dec!(0), Denomination::Catholic, dec!(5000), &tables);

        assert!(church.applied);
        assert_eq!(church.amount, dec!(0));
        assert_eq!(church.effective_rate, dec!(0));
    }

    #[test]
    fn church_tax_does_not_apply_without_income() {
        let tables = test_tables();

        let church = church_tax(dec!(0), Denomination::Catholic, dec!(0), &tables);

        assert!(!church.applied);
    }

    #[test]
    fn wealth_tax_walks_the_per_mille_slices() {
        let tables = test_tables();

        let wealth = wealth_tax(dec!(500000), 0, 119, MaritalStatus::Single, &tables).unwrap();

        // (308,000 - 77,000) × 0.5‰ + (500,000 - 308,000) × 1.0‰ = 307.50
        assert_eq!(wealth.einfache_wealth_tax, dec!(307.50));
        assert_eq!(wealth.cantonal_wealth_tax, dec!(301.35));
        assert_eq!(wealth.municipal_wealth_tax, dec!(365.93));
        assert_eq!(wealth.amount, dec!(667.28));
    }

    #[test]
    fn wealth_tax_deducts_per_child() {
        let tables = test_tables();

        let with_children =
            wealth_tax(dec!(160000), 2, 119, MaritalStatus::Single, &tables).unwrap();

        assert_eq!(with_children.deductions, dec!(82200));
        assert_eq!(with_children.taxable_wealth, dec!(77800));
        // Only CHF 800 falls above the 77,000 floor.
        assert_eq!(with_children.einfache_wealth_tax, dec!(0.40));
    }

    #[test]
    fn wealth_below_the_floor_owes_nothing() {
        let tables = test_tables();

        let wealth = wealth_tax(dec!(50000), 0, 119, MaritalStatus::Single, &tables).unwrap();

        assert_eq!(wealth.amount, dec!(0));
        assert_eq!(wealth.effective_rate, dec!(0));
    }

    // =========================================================================
    // Complete result
    // =========================================================================

    #[test]
    fn complete_result_for_97500_in_duebendorf() {
        let tables = test_tables();
        let profile = duebendorf_catholic();
        let ledger = DeductionLedger::default();

        let result =
            complete_tax_result(dec!(97500), &ledger, None, &profile, &tables).unwrap();

        assert_eq!(result.einfache_staatssteuer, dec!(5982.00));
        assert_eq!(result.cantonal_tax, dec!(5862.36));
        assert_eq!(result.municipal_tax, dec!(5742.72));
        assert_eq!(result.personal_tax, dec!(24));
        assert_eq!(result.church_tax, dec!(658.02));
        assert_eq!(result.federal_tax, dec!(2523.00));
        // Federal tax is excluded from the Zürich total.
        assert_eq!(result.total_tax, dec!(12287.10));
    }

    #[test]
    fn commuting_caps_split_the_taxable_incomes() {
        let tables = test_tables();
        let profile = duebendorf_catholic();
        let ledger = DeductionLedger { commuting: dec!(6000), ..DeductionLedger::default() };

        let result =
            complete_tax_result(dec!(97500), &ledger, None, &profile, &tables).unwrap();

        // Cantonal sees 97,500 - 5,000; federal sees 97,500 - 3,200.
        assert_eq!(result.taxable_income, dec!(92500));
        let federal =
            federal_income_tax(dec!(97500), dec!(3200), MaritalStatus::Single, &tables).unwrap();
        assert_eq!(result.federal_tax, federal.tax);
    }

    #[test]
    fn zero_income_produces_zeros_not_errors() {
        let tables = test_tables();
        let profile = TaxpayerProfile::default();
        let ledger = DeductionLedger::default();

        let result = complete_tax_result(dec!(0), &ledger, None, &profile, &tables).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.total_effective_rate, dec!(0));
        assert_eq!(result.personal_tax, dec!(0));
    }
}
