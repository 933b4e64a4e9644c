//! Progressive bracket evaluation.
//!
//! Two schedule forms are supported:
//!
//! | Form     | Used by                      | Tax for income inside bracket        |
//! |----------|------------------------------|--------------------------------------|
//! | Marginal | Federal income tax (DBG)     | `base_tax + excess/100 × rate`       |
//! | Slice    | Zürich income and wealth tax | sum of per-slice amounts × rate      |
//!
//! Both evaluators return the unrounded tax together with a per-bracket
//! breakdown and the caller's position inside the active bracket. Rounding
//! happens in the composition layer, after the Steuerfüsse are applied.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{BracketSlice, MarginalTable, SliceTable};

/// Errors that can occur during bracket evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The schedule contains no brackets.
    #[error("tax schedule contains no brackets")]
    EmptyTable,
}

/// Result of evaluating one schedule against one taxable amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Unrounded tax owed.
    pub tax: Decimal,

    /// Rate of the active bracket, in the schedule's own unit.
    pub marginal_rate: Decimal,

    /// Index of the active bracket.
    pub bracket_index: usize,

    /// Per-bracket rows; zero-rate brackets and empty slices are omitted,
    /// except that the active bracket always carries a row.
    pub breakdown: Vec<BracketSlice>,

    /// Position inside the active bracket as a percentage. 100 when the
    /// active bracket is unbounded.
    pub progress_in_bracket: Decimal,

    /// Income needed to reach the next bracket. Zero when the active bracket
    /// is unbounded.
    pub amount_to_next_bracket: Decimal,
}

impl Evaluation {
    fn zero() -> Self {
        Self {
            tax: Decimal::ZERO,
            marginal_rate: Decimal::ZERO,
            bracket_index: 0,
            breakdown: Vec::new(),
            progress_in_bracket: Decimal::ZERO,
            amount_to_next_bracket: Decimal::ZERO,
        }
    }
}

/// Evaluates a marginal-form schedule (federal style).
///
/// The active bracket is the highest bracket whose threshold does not exceed
/// the taxable amount. The tax is that bracket's cumulative `base_tax` plus
/// the bracket rate applied per CHF 100 of income above the threshold.
///
/// The breakdown walks the slices for display; the authoritative tax comes
/// from the `base_tax` column, which carries statutory rounding that a pure
/// slice sum would miss.
///
/// # Arguments
///
/// * `table` - The schedule, sorted ascending by threshold
/// * `taxable` - Taxable income; non-positive amounts yield zero tax
pub fn evaluate_marginal(
    table: &MarginalTable,
    taxable: Decimal,
) -> Result<Evaluation, EvaluationError> {
    if table.brackets.is_empty() {
        return Err(EvaluationError::EmptyTable);
    }
    if taxable <= Decimal::ZERO {
        return Ok(Evaluation::zero());
    }

    let mut active = 0;
    for (i, bracket) in table.brackets.iter().enumerate() {
        if bracket.threshold <= taxable {
            active = i;
        } else {
            break;
        }
    }

    let bracket = &table.brackets[active];
    let excess = taxable - bracket.threshold;
    let tax = bracket.base_tax + excess / Decimal::ONE_HUNDRED * bracket.rate_per_hundred;

    let mut breakdown = Vec::new();
    for (i, bracket) in table.brackets.iter().enumerate() {
        let is_active = i == active;
        // The active bracket always gets a row, even at a zero rate (the
        // flat-maximum transition row), so the caller can show where the
        // income sits.
        if bracket.rate_per_hundred == Decimal::ZERO && !is_active {
            continue;
        }
        let range_end = table.brackets.get(i + 1).map(|next| next.threshold);
        let slice_end = match range_end {
            Some(end) if taxable > end => end,
            _ => taxable,
        };
        let amount = slice_end - bracket.threshold;
        if amount <= Decimal::ZERO && !is_active {
            continue;
        }
        breakdown.push(BracketSlice {
            bracket_index: i,
            range_start: bracket.threshold,
            range_end,
            rate: bracket.rate_per_hundred,
            taxable_amount: amount,
            tax_paid: amount / Decimal::ONE_HUNDRED * bracket.rate_per_hundred,
            is_active,
        });
    }

    let (progress, to_next) = bracket_position(
        taxable,
        bracket.threshold,
        table.brackets.get(active + 1).map(|next| next.threshold),
    );

    Ok(Evaluation {
        tax,
        marginal_rate: bracket.rate_per_hundred,
        bracket_index: active,
        breakdown,
        progress_in_bracket: progress,
        amount_to_next_bracket: to_next,
    })
}

/// Evaluates a slice-form schedule (Zürich style).
///
/// Each bracket's rate applies only to the slice of income between its
/// threshold and the next bracket's threshold; the tax is the sum of all
/// slice amounts. The breakdown rows therefore sum exactly to the tax.
///
/// # Arguments
///
/// * `table` - The schedule, sorted ascending by threshold
/// * `taxable` - Taxable base; non-positive amounts yield zero tax
pub fn evaluate_slices(
    table: &SliceTable,
    taxable: Decimal,
) -> Result<Evaluation, EvaluationError> {
    if table.brackets.is_empty() {
        return Err(EvaluationError::EmptyTable);
    }
    if taxable <= Decimal::ZERO {
        return Ok(Evaluation::zero());
    }

    let divisor = table.basis.divisor();
    let mut active = 0;
    for (i, bracket) in table.brackets.iter().enumerate() {
        if taxable > bracket.threshold {
            active = i;
        } else {
            break;
        }
    }

    let mut tax = Decimal::ZERO;
    let mut breakdown = Vec::new();
    for (i, bracket) in table.brackets.iter().enumerate() {
        let range_end = table.brackets.get(i + 1).map(|next| next.threshold);
        let slice_end = match range_end {
            Some(end) if taxable > end => end,
            _ => taxable,
        };
        let amount = slice_end - bracket.threshold;
        if amount <= Decimal::ZERO {
            continue;
        }
        let slice_tax = amount * bracket.rate / divisor;
        tax += slice_tax;
        if bracket.rate == Decimal::ZERO && i != active {
            continue;
        }
        breakdown.push(BracketSlice {
            bracket_index: i,
            range_start: bracket.threshold,
            range_end,
            rate: bracket.rate,
            taxable_amount: amount,
            tax_paid: slice_tax,
            is_active: i == active,
        });
    }

    let bracket = &table.brackets[active];
    let (progress, to_next) = bracket_position(
        taxable,
        bracket.threshold,
        table.brackets.get(active + 1).map(|next| next.threshold),
    );

    Ok(Evaluation {
        tax,
        marginal_rate: bracket.rate,
        bracket_index: active,
        breakdown,
        progress_in_bracket: progress,
        amount_to_next_bracket: to_next,
    })
}

fn bracket_position(
    taxable: Decimal,
    threshold: Decimal,
    next_threshold: Option<Decimal>,
) -> (Decimal, Decimal) {
    match next_threshold {
        Some(next) => {
            let width = next - threshold;
            let progress = if width > Decimal::ZERO {
                (taxable - threshold) / width * Decimal::ONE_HUNDRED
            } else {
                Decimal::ONE_HUNDRED
            };
            (progress, next - taxable)
        }
        None => (Decimal::ONE_HUNDRED, Decimal::ZERO),
    }
}
