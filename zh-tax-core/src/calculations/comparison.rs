//! Three-scenario comparison: what the household owes with no deductions,
//! with the automatic pauschal deductions, and with everything claimed.
//!
//! The point of the comparison is the savings attribution: how much the
//! no-receipts pauschal deductions save on their own, and how much the
//! proof-required claims add on top.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::composition::complete_tax_result;
use crate::calculations::progressive::EvaluationError;
use crate::models::{
    DeductionLedger, ProfileError, ScenarioComparison, TaxYearTables, TaxpayerProfile,
};

/// Errors from the comparison orchestrator.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("invalid taxpayer profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    #[error("tax evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Computes the three scenarios for one profile and one deduction ledger.
///
/// The profile is validated first; an invalid profile produces no results.
/// Gross income is the household's combined net salary; side income only
/// enters through its expense deduction, never the taxable base. Each
/// scenario re-derives its own federally and cantonally capped totals from
/// the same ledger, so the caps stay consistent across scenarios.
pub fn compare_scenarios(
    profile: &TaxpayerProfile,
    ledger: &DeductionLedger,
    tables: &TaxYearTables,
) -> Result<ScenarioComparison, CalculationError> {
    profile.validate()?;

    let gross_income = profile.combined_net_salary();

    let empty = DeductionLedger::default();
    let before = complete_tax_result(gross_income, &empty, None, profile, tables)?;
    let after_automatic = complete_tax_result(
        gross_income,
        ledger,
        Some(ledger.total_automatic()),
        profile,
        tables,
    )?;
    let after_all = complete_tax_result(gross_income, ledger, None, profile, tables)?;

    let savings_from_automatic = before.total_tax - after_automatic.total_tax;
    let savings_from_optional = after_automatic.total_tax - after_all.total_tax;
    let total_savings = before.total_tax - after_all.total_tax;
    let total_savings_percent = if before.total_tax > Decimal::ZERO {
        total_savings / before.total_tax * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    Ok(ScenarioComparison {
        gross_income,
        automatic_deductions: ledger.total_automatic(),
        total_deductions: ledger.total(),
        before,
        after_automatic,
        after_all,
        savings_from_automatic,
        savings_from_optional,
        total_savings,
        total_savings_percent,
    })
}
