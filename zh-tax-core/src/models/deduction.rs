use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax authority whose commuting cost ceiling applies.
///
/// Swiss law caps commuting deductions differently per authority; the cap is
/// applied when an authority's taxable income is computed, never to the
/// stored ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxAuthority {
    Federal,
    Cantonal,
}

/// The optional (proof-required) deduction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalDeductionKind {
    Pillar3a,
    Pillar2Buyin,
    MortgageInterest,
    OtherDebtInterest,
    MedicalCosts,
    ChildcareCosts,
    Donations,
    PoliticalContributions,
    AlimonyPayments,
    SupportPayments,
}

/// Outcome of validating a proposed optional deduction.
///
/// Limit violations and unmet preconditions are data, not errors: the caller
/// decides whether to warn, cap, or drop the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionCheck {
    /// Preconditions for this deduction are met at all.
    pub eligible: bool,

    /// The proposed amount is within the statutory limit.
    pub is_valid: bool,

    /// Statutory ceiling, when one exists.
    pub max_allowed: Option<Decimal>,

    /// The amount that will actually be deducted (capped, or zero when
    /// ineligible).
    pub allowed: Decimal,

    /// Inline guidance for the questionnaire when not fully valid.
    pub message: Option<String>,
}

impl DeductionCheck {
    pub(crate) fn granted(
        allowed: Decimal,
        max_allowed: Option<Decimal>,
    ) -> Self {
        Self {
            eligible: true,
            is_valid: true,
            max_allowed,
            allowed,
            message: None,
        }
    }

    pub(crate) fn capped(
        allowed: Decimal,
        max_allowed: Decimal,
        message: String,
    ) -> Self {
        Self {
            eligible: true,
            is_valid: false,
            max_allowed: Some(max_allowed),
            allowed,
            message: Some(message),
        }
    }

    pub(crate) fn ineligible(
        max_allowed: Option<Decimal>,
        reason: String,
    ) -> Self {
        Self {
            eligible: false,
            is_valid: false,
            max_allowed,
            allowed: Decimal::ZERO,
            message: Some(reason),
        }
    }
}

/// The complete deduction ledger for one household.
///
/// Two disjoint buckets: automatic (pauschal, no receipts) and optional
/// (proof-required). Totals are derived on demand from the components, so a
/// ledger can never carry a stale total.
///
/// `commuting` holds the raw, uncapped household commuting cost; the
/// per-authority ceilings are applied by
/// [`adjusted_total`](crate::calculations::deductions::adjusted_total).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionLedger {
    // Automatic (pauschal) bucket
    pub commuting: Decimal,
    pub meal_costs: Decimal,
    pub professional_expenses: Decimal,
    pub side_income: Decimal,
    pub child_deductions: Decimal,
    pub property_maintenance: Decimal,
    pub asset_management: Decimal,
    pub insurance_premiums: Decimal,
    pub dual_income: Decimal,

    // Optional (proof-required) bucket
    pub pillar_3a: Decimal,
    pub pillar_2_buyins: Decimal,
    pub mortgage_interest: Decimal,
    pub other_debt_interest: Decimal,
    pub medical_costs_deductible: Decimal,
    pub childcare_costs: Decimal,
    pub donations: Decimal,
    pub political_contributions: Decimal,
    pub alimony_payments: Decimal,
    pub support_payments: Decimal,
}

impl DeductionLedger {
    /// Sum of the automatic bucket, with the raw (uncapped) commuting total.
    pub fn total_automatic(&self) -> Decimal {
        self.commuting
            + self.meal_costs
            + self.professional_expenses
            + self.side_income
            + self.child_deductions
            + self.property_maintenance
            + self.asset_management
            + self.insurance_premiums
            + self.dual_income
    }

    /// Sum of the optional bucket.
    pub fn total_optional(&self) -> Decimal {
        self.pillar_3a
            + self.pillar_2_buyins
            + self.mortgage_interest
            + self.other_debt_interest
            + self.medical_costs_deductible
            + self.childcare_costs
            + self.donations
            + self.political_contributions
            + self.alimony_payments
            + self.support_payments
    }

    /// Sum of both buckets.
    pub fn total(&self) -> Decimal {
        self.total_automatic() + self.total_optional()
    }
}
