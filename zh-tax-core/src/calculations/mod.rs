//! Tax calculation modules for the Zürich three-tier assessment.
//!
//! This module provides the progressive bracket evaluators, the deduction
//! engine, the composition layer that applies Steuerfüsse, and the
//! three-scenario comparison.

pub mod common;
pub mod comparison;
pub mod composition;
pub mod deductions;
pub mod progressive;

pub use comparison::{CalculationError, compare_scenarios};
pub use composition::{
    CantonalTax, FederalTax, cantonal_income_tax, church_tax, complete_tax_result,
    federal_income_tax, wealth_tax,
};
pub use deductions::{
    OptionalContext, adjusted_total, automatic_deductions, capped_commuting, insurance_deduction,
    insurance_premium_limit, validate_optional_deduction,
};
pub use progressive::{Evaluation, EvaluationError, evaluate_marginal, evaluate_slices};
