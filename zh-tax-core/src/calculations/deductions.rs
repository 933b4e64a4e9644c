//! Deduction calculation and validation.
//!
//! Deductions fall into two buckets:
//!
//! * Automatic (pauschal) deductions require no receipts and are derived
//!   entirely from the taxpayer profile by [`automatic_deductions`].
//! * Optional deductions require proof and are validated individually by
//!   [`validate_optional_deduction`], which reports eligibility and caps as
//!   data rather than errors.
//!
//! Commuting costs are stored raw in the ledger. Federal and cantonal law cap
//! them differently (CHF 3,200 vs CHF 5,000), so the cap belongs to the
//! moment an authority's taxable income is derived, not to the ledger. Use
//! [`adjusted_total`] for that.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{clamp, max};
use crate::models::{
    DeductionCheck, DeductionLedger, DeductionLimits, EmploymentType, OptionalDeductionKind,
    Spouse, TaxAuthority, TaxpayerProfile,
};

/// Income figures needed to validate the income-relative optional deductions.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalContext {
    /// Gross household income, the base for the medical threshold and the
    /// donations cap.
    pub gross_income: Decimal,

    /// Investment income (dividends, interest), which raises the debt
    /// interest ceiling.
    pub investment_income: Decimal,

    /// Employment type to validate against instead of the primary spouse's.
    /// Used when a married couple claims Pillar 3a for the partner.
    pub employment_override: Option<EmploymentType>,
}

/// Computes all automatic (pauschal) deductions for a profile.
///
/// Employment-linked deductions (commuting, meals, professional expenses,
/// side income) are computed per spouse and summed; household-level
/// deductions (children, property maintenance, asset management) are added
/// once. The dual-income deduction is granted once when both spouses work.
///
/// Insurance premiums and the optional bucket are left at zero for the
/// caller to fill.
pub fn automatic_deductions(
    profile: &TaxpayerProfile,
    limits: &DeductionLimits,
) -> DeductionLedger {
    let mut ledger = DeductionLedger::default();

    for (index, spouse) in profile.spouses().enumerate() {
        ledger.commuting += spouse_commuting(spouse, limits);
        ledger.meal_costs += spouse_meals(spouse, limits);
        ledger.side_income += spouse_side_income(spouse, limits);

        // The actual-cost override applies to the primary earner only.
        if index == 0 && profile.claim_actual_professional {
            ledger.professional_expenses += profile.actual_professional_costs;
        } else {
            ledger.professional_expenses += spouse_professional(spouse, limits);
        }
    }

    if profile.both_spouses_work() {
        ledger.dual_income = limits.dual_income_deduction;
    }

    ledger.child_deductions = Decimal::from(profile.num_children) * limits.child_deduction;

    if profile.owns_property
        && let Some(eigenmietwert) = profile.eigenmietwert
    {
        ledger.property_maintenance = if profile.claim_actual_property_maintenance {
            profile.actual_property_maintenance_costs
        } else {
            eigenmietwert * limits.property_maintenance_rate
        };
    }

    if profile.has_securities
        && let Some(securities) = profile.securities_value
    {
        let pauschal = securities * limits.asset_management_rate;
        ledger.asset_management = pauschal.min(limits.asset_management_max);
    }

    ledger
}

fn spouse_commuting(
    spouse: &Spouse,
    limits: &DeductionLimits,
) -> Decimal {
    if !spouse.employment_type.is_salaried() {
        return Decimal::ZERO;
    }
    let mut total = Decimal::ZERO;
    if spouse.bikes_to_work {
        total += limits.commuting_pauschal;
    }
    if spouse.uses_paid_transport {
        total += spouse.actual_commuting_costs;
    }
    total
}

fn spouse_meals(
    spouse: &Spouse,
    limits: &DeductionLimits,
) -> Decimal {
    if !spouse.employment_type.is_salaried() || !spouse.works_away_from_home {
        return Decimal::ZERO;
    }
    let base = if spouse.employer_meal_subsidy {
        limits.meals_with_subsidy
    } else {
        limits.meals_without_subsidy
    };
    base * spouse.employment_percentage / Decimal::ONE_HUNDRED
}

fn spouse_professional(
    spouse: &Spouse,
    limits: &DeductionLimits,
) -> Decimal {
    if !spouse.employment_type.is_salaried() || spouse.net_salary <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    clamp(
        spouse.net_salary * limits.professional_rate,
        limits.professional_min,
        limits.professional_max,
    )
}

fn spouse_side_income(
    spouse: &Spouse,
    limits: &DeductionLimits,
) -> Decimal {
    if !spouse.has_side_income || spouse.side_income_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    clamp(
        spouse.side_income_amount * limits.side_income_rate,
        limits.side_income_min,
        limits.side_income_max,
    )
}

/// Maximum deductible insurance premium for a household.
///
/// The base limit is keyed by marital status and Pillar 2 enrollment (a
/// working primary earner is treated as enrolled), plus a per-child amount.
pub fn insurance_premium_limit(
    profile: &TaxpayerProfile,
    limits: &DeductionLimits,
) -> Decimal {
    let base = limits
        .insurance
        .base_limit(profile.marital_status, profile.primary.employment_type.has_pension());
    base + Decimal::from(profile.num_children) * limits.insurance.per_child
}

/// Deductible insurance premiums: premiums paid, net of subsidies received,
/// capped at the household limit.
pub fn insurance_deduction(
    annual_premiums: Decimal,
    premium_subsidies: Decimal,
    profile: &TaxpayerProfile,
    limits: &DeductionLimits,
) -> Decimal {
    let net = max(Decimal::ZERO, annual_premiums - premium_subsidies);
    let limit = insurance_premium_limit(profile, limits);
    if net > limit {
        warn!(
            premiums = %net,
            limit = %limit,
            "insurance premiums exceed the deductible limit, capping"
        );
        limit
    } else {
        net
    }
}

/// Validates one proposed optional deduction against the taxpayer's
/// situation and the statutory limits.
///
/// Unmet preconditions and exceeded caps come back as a [`DeductionCheck`],
/// never as an error: the questionnaire shows the message and uses the
/// `allowed` amount.
pub fn validate_optional_deduction(
    kind: OptionalDeductionKind,
    amount: Decimal,
    profile: &TaxpayerProfile,
    ctx: &OptionalContext,
    limits: &DeductionLimits,
) -> DeductionCheck {
    if amount < Decimal::ZERO {
        return DeductionCheck::ineligible(None, "amount must be non-negative".to_owned());
    }

    match kind {
        OptionalDeductionKind::Pillar3a => {
            let employment = ctx
                .employment_override
                .unwrap_or(profile.primary.employment_type);
            let limit = if employment == EmploymentType::SelfEmployed {
                limits.pillar_3a_max_self_employed
            } else {
                limits.pillar_3a_max_employed
            };
            cap_at(amount, limit, "Pillar 3a contribution")
        }
        OptionalDeductionKind::Pillar2Buyin => DeductionCheck::granted(amount, None),
        OptionalDeductionKind::MortgageInterest | OptionalDeductionKind::OtherDebtInterest => {
            let limit = limits.debt_interest_max + ctx.investment_income;
            cap_at(amount, limit, "debt interest")
        }
        OptionalDeductionKind::MedicalCosts => {
            let threshold = ctx.gross_income * limits.medical_threshold_rate;
            let deductible = max(Decimal::ZERO, amount - threshold);
            if deductible == Decimal::ZERO {
                DeductionCheck::ineligible(
                    None,
                    format!("medical costs below the threshold of CHF {threshold}"),
                )
            } else {
                DeductionCheck {
                    eligible: true,
                    is_valid: true,
                    max_allowed: None,
                    allowed: deductible,
                    message: Some(format!(
                        "only the CHF {deductible} above the CHF {threshold} threshold is deductible"
                    )),
                }
            }
        }
        OptionalDeductionKind::ChildcareCosts => childcare_check(amount, profile, limits),
        OptionalDeductionKind::Donations => {
            let limit = ctx.gross_income * limits.donations_max_rate;
            cap_at(amount, limit, "donations")
        }
        OptionalDeductionKind::PoliticalContributions => {
            let limit = if profile.marital_status.is_married() {
                limits.political_max_married
            } else {
                limits.political_max_single
            };
            cap_at(amount, limit, "political contributions")
        }
        OptionalDeductionKind::AlimonyPayments => DeductionCheck::granted(amount, None),
        OptionalDeductionKind::SupportPayments => {
            if amount < limits.support_payment_min {
                DeductionCheck::ineligible(
                    None,
                    format!(
                        "support payments qualify only from CHF {} per year",
                        limits.support_payment_min
                    ),
                )
            } else {
                DeductionCheck::granted(amount, None)
            }
        }
    }
}

fn cap_at(
    amount: Decimal,
    limit: Decimal,
    what: &str,
) -> DeductionCheck {
    if amount > limit {
        DeductionCheck::capped(
            limit,
            limit,
            format!("{what} exceeds the limit of CHF {limit}"),
        )
    } else {
        DeductionCheck::granted(amount, Some(limit))
    }
}

fn childcare_check(
    amount: Decimal,
    profile: &TaxpayerProfile,
    limits: &DeductionLimits,
) -> DeductionCheck {
    let limit = limits.childcare_max;

    if profile.num_children == 0 {
        return DeductionCheck::ineligible(
            Some(limit),
            "no children for the childcare deduction".to_owned(),
        );
    }
    if profile.marital_status.is_married() {
        if !profile.both_spouses_work() {
            return DeductionCheck::ineligible(
                Some(limit),
                "both spouses must be working for the childcare deduction".to_owned(),
            );
        }
    } else if !profile.primary.employment_type.is_working() {
        return DeductionCheck::ineligible(
            Some(limit),
            "must be working for the childcare deduction".to_owned(),
        );
    }
    if !profile.has_child_under(limits.childcare_age_limit) {
        return DeductionCheck::ineligible(
            Some(limit),
            format!(
                "children must be under {} for the childcare deduction",
                limits.childcare_age_limit
            ),
        );
    }

    cap_at(amount, limit, "childcare costs")
}

/// The ledger's raw commuting total, capped for one authority.
pub fn capped_commuting(
    ledger: &DeductionLedger,
    authority: TaxAuthority,
    limits: &DeductionLimits,
) -> Decimal {
    let cap = match authority {
        TaxAuthority::Federal => limits.commuting_max_federal,
        TaxAuthority::Cantonal => limits.commuting_max_cantonal,
    };
    ledger.commuting.min(cap)
}

/// Total deductions with the authority's commuting cap applied.
///
/// The raw commuting total is removed from the (possibly overridden) ledger
/// total and the capped amount added back; the ledger itself is untouched,
/// so the operation is idempotent.
pub fn adjusted_total(
    ledger: &DeductionLedger,
    authority: TaxAuthority,
    total_override: Option<Decimal>,
    limits: &DeductionLimits,
) -> Decimal {
    let total = total_override.unwrap_or_else(|| ledger.total());
    total - ledger.commuting + capped_commuting(ledger, authority, limits)
}
