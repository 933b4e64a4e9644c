//! Built-in statutory tables, keyed by tax year.
//!
//! Every number here is statutory data, not configuration: the federal
//! schedules come from Art. 36 DBG, the cantonal and wealth schedules from
//! StG § 35 and § 47, the Steuerfüsse from the cantonal and church decisions
//! for the year. Supporting a new year means adding a new table set (or
//! loading the schedules from CSV, see [`crate::loader`]); asking for a year
//! that is not carried is an error, never a silent fallback.

use rust_decimal_macros::dec;
use thiserror::Error;
use zh_tax_core::{
    DeductionLimits, InsuranceLimits, MarginalBracket, MarginalTable, Multipliers, RateBasis,
    SliceBracket, SliceTable, TaxYearTables,
};

/// Errors raised when a table set cannot be provided.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no statutory tables for tax year {0}")]
    UnsupportedYear(i32),
}

/// Returns the complete built-in table set for a tax year.
pub fn tables_for_year(year: i32) -> Result<TaxYearTables, ConfigError> {
    match year {
        2024 => Ok(year_2024()),
        other => Err(ConfigError::UnsupportedYear(other)),
    }
}

/// Years with built-in tables.
pub const SUPPORTED_YEARS: &[i32] = &[2024];

fn year_2024() -> TaxYearTables {
    TaxYearTables {
        tax_year: 2024,
        federal_single: federal_single_2024(),
        federal_married: federal_married_2024(),
        cantonal_single: cantonal_single_2024(),
        cantonal_married: cantonal_married_2024(),
        wealth_single: wealth_single_2024(),
        wealth_married: wealth_married_2024(),
        multipliers: Multipliers {
            cantonal_percent: dec!(98),
            personal_tax: dec!(24),
            church_reformed: dec!(0.10),
            church_catholic: dec!(0.11),
            church_christian_catholic: dec!(0.15),
        },
        limits: limits_2024(),
    }
}

/// Art. 36 Abs. 1 DBG, Grundtarif. The 793'300/793'400 rows encode the
/// statutory transition to the flat 11.5% maximum rate.
fn federal_single_2024() -> MarginalTable {
    let rows = [
        (dec!(0), dec!(0), dec!(0)),
        (dec!(15200), dec!(0), dec!(0.77)),
        (dec!(33200), dec!(138.60), dec!(0.88)),
        (dec!(43500), dec!(229.20), dec!(2.64)),
        (dec!(58000), dec!(612.00), dec!(2.97)),
        (dec!(76100), dec!(1149.55), dec!(5.94)),
        (dec!(82000), dec!(1500.00), dec!(6.60)),
        (dec!(108800), dec!(3268.80), dec!(8.80)),
        (dec!(141500), dec!(6146.40), dec!(11.00)),
        (dec!(184900), dec!(10920.40), dec!(13.20)),
        (dec!(793300), dec!(91229.20), dec!(0)),
        (dec!(793400), dec!(91241.00), dec!(11.50)),
    ];
    marginal_table(&rows)
}

/// Art. 36 Abs. 2 DBG, Verheiratetentarif.
fn federal_married_2024() -> MarginalTable {
    let rows = [
        (dec!(0), dec!(0), dec!(0)),
        (dec!(28800), dec!(0), dec!(1)),
        (dec!(51800), dec!(230), dec!(2)),
        (dec!(59400), dec!(382), dec!(3)),
        (dec!(76700), dec!(901), dec!(4)),
        (dec!(92000), dec!(1513), dec!(5)),
        (dec!(105400), dec!(2183), dec!(6)),
        (dec!(116700), dec!(2861), dec!(7)),
        (dec!(126500), dec!(3547), dec!(8)),
        (dec!(134600), dec!(4195), dec!(9)),
        (dec!(141200), dec!(4789), dec!(10)),
        (dec!(146300), dec!(5299), dec!(11)),
        (dec!(149700), dec!(5673), dec!(12)),
        (dec!(151300), dec!(5865), dec!(13)),
        (dec!(928600), dec!(106914), dec!(11.5)),
    ];
    marginal_table(&rows)
}

/// StG § 35 Abs. 1, Grundtarif.
fn cantonal_single_2024() -> SliceTable {
    let rows = [
        (dec!(0), dec!(0)),
        (dec!(6900), dec!(2)),
        (dec!(11800), dec!(3)),
        (dec!(16600), dec!(4)),
        (dec!(24500), dec!(5)),
        (dec!(34100), dec!(6)),
        (dec!(45100), dec!(7)),
        (dec!(58000), dec!(8)),
        (dec!(75400), dec!(9)),
        (dec!(109000), dec!(10)),
        (dec!(142200), dec!(11)),
        (dec!(194900), dec!(12)),
        (dec!(263300), dec!(13)),
    ];
    slice_table(&rows, RateBasis::PerHundred)
}

/// StG § 35 Abs. 2, Verheiratetentarif.
fn cantonal_married_2024() -> SliceTable {
    let rows = [
        (dec!(0), dec!(0)),
        (dec!(13900), dec!(2)),
        (dec!(19800), dec!(3)),
        (dec!(27000), dec!(4)),
        (dec!(42200), dec!(5)),
        (dec!(57100), dec!(6)),
        (dec!(72000), dec!(7)),
        (dec!(84900), dec!(8)),
        (dec!(102400), dec!(9)),
        (dec!(132700), dec!(10)),
        (dec!(175600), dec!(11)),
        (dec!(232000), dec!(12)),
        (dec!(291100), dec!(13)),
    ];
    slice_table(&rows, RateBasis::PerHundred)
}

/// StG § 47, rates per mille.
fn wealth_single_2024() -> SliceTable {
    let rows = [
        (dec!(0), dec!(0)),
        (dec!(77000), dec!(0.5)),
        (dec!(308000), dec!(1.0)),
        (dec!(3158000), dec!(3.0)),
    ];
    slice_table(&rows, RateBasis::PerMille)
}

fn wealth_married_2024() -> SliceTable {
    let rows = [
        (dec!(0), dec!(0)),
        (dec!(154000), dec!(0.5)),
        (dec!(616000), dec!(1.0)),
        (dec!(6316000), dec!(3.0)),
    ];
    slice_table(&rows, RateBasis::PerMille)
}

fn limits_2024() -> DeductionLimits {
    DeductionLimits {
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
    }
}

fn marginal_table(rows: &[(rust_decimal::Decimal, rust_decimal::Decimal, rust_decimal::Decimal)]) -> MarginalTable {
    MarginalTable {
        brackets: rows
            .iter()
            .map(|&(threshold, base_tax, rate_per_hundred)| MarginalBracket {
                threshold,
                base_tax,
                rate_per_hundred,
            })
            .collect(),
    }
}

fn slice_table(
    rows: &[(rust_decimal::Decimal, rust_decimal::Decimal)],
    basis: RateBasis,
) -> SliceTable {
    SliceTable {
        brackets: rows
            .iter()
            .map(|&(threshold, rate)| SliceBracket { threshold, rate })
            .collect(),
        basis,
    }
}
