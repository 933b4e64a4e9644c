use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bracket::{MarginalTable, SliceTable};
use super::profile::{Denomination, MaritalStatus};

/// Scalar multipliers applied on top of the einfache Staatssteuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multipliers {
    /// Canton-wide Steuerfuss as an integer percentage (98 = 98%).
    pub cantonal_percent: Decimal,

    /// Flat Personalsteuer, owed whenever taxable income is positive.
    pub personal_tax: Decimal,

    /// Church Steuerfüsse as fractions of the einfache Staatssteuer
    /// (0.11 = 11%).
    pub church_reformed: Decimal,
    pub church_catholic: Decimal,
    pub church_christian_catholic: Decimal,
}

impl Multipliers {
    pub fn church_rate(&self, denomination: Denomination) -> Decimal {
        match denomination {
            Denomination::None => Decimal::ZERO,
            Denomination::Reformed => self.church_reformed,
            Denomination::Catholic => self.church_catholic,
            Denomination::ChristianCatholic => self.church_christian_catholic,
        }
    }
}

/// Insurance premium ceilings, keyed by marital status and Pillar 2
/// enrollment, plus an additive per-child amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceLimits {
    pub single_with_pension: Decimal,
    pub single_without_pension: Decimal,
    pub married_with_pension: Decimal,
    pub married_without_pension: Decimal,
    pub per_child: Decimal,
}

impl InsuranceLimits {
    pub fn base_limit(
        &self,
        status: MaritalStatus,
        has_pension: bool,
    ) -> Decimal {
        match (status.is_married(), has_pension) {
            (true, true) => self.married_with_pension,
            (true, false) => self.married_without_pension,
            (false, true) => self.single_with_pension,
            (false, false) => self.single_without_pension,
        }
    }
}

/// Statutory deduction constants for one tax year.
///
/// All amounts in CHF; rates are fractions (0.03 = 3%) unless noted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLimits {
    /// Bicycle/small-motorcycle commuting pauschal.
    pub commuting_pauschal: Decimal,

    /// Commuting cost ceiling for the federal (DBG) computation.
    pub commuting_max_federal: Decimal,

    /// Commuting cost ceiling for the cantonal (StG) computation.
    pub commuting_max_cantonal: Decimal,

    /// Meal pauschal with an employer canteen subsidy (CHF 7.50 × 220 days).
    pub meals_with_subsidy: Decimal,

    /// Meal pauschal without a subsidy (CHF 15 × 220 days).
    pub meals_without_subsidy: Decimal,

    pub professional_rate: Decimal,
    pub professional_min: Decimal,
    pub professional_max: Decimal,

    pub side_income_rate: Decimal,
    pub side_income_min: Decimal,
    pub side_income_max: Decimal,

    /// Per-child deduction (Zürich).
    pub child_deduction: Decimal,

    /// Property maintenance pauschal as a fraction of the Eigenmietwert.
    pub property_maintenance_rate: Decimal,

    /// Asset management pauschal: per-mille fraction of securities value.
    pub asset_management_rate: Decimal,
    pub asset_management_max: Decimal,

    /// Dual-income deduction, granted once per household.
    pub dual_income_deduction: Decimal,

    pub insurance: InsuranceLimits,

    pub pillar_3a_max_employed: Decimal,
    pub pillar_3a_max_self_employed: Decimal,

    pub childcare_max: Decimal,

    /// Age below which a child qualifies for the childcare deduction.
    pub childcare_age_limit: u8,

    /// Medical costs are deductible only above this fraction of income.
    pub medical_threshold_rate: Decimal,

    pub donations_max_rate: Decimal,

    pub political_max_single: Decimal,
    pub political_max_married: Decimal,

    /// Debt interest ceiling before adding investment income.
    pub debt_interest_max: Decimal,

    /// Minimum qualifying support payment (Zürich).
    pub support_payment_min: Decimal,

    /// Wealth tax deduction per child.
    pub wealth_deduction_per_child: Decimal,
}

/// Complete statutory table set for one tax year.
///
/// Constructed by `zh-tax-data` (built-in years or CSV); the calculators
/// treat it as read-only. Supporting a new year means supplying a new table
/// set, never touching calculator code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearTables {
    pub tax_year: i32,

    pub federal_single: MarginalTable,
    pub federal_married: MarginalTable,

    pub cantonal_single: SliceTable,
    pub cantonal_married: SliceTable,

    pub wealth_single: SliceTable,
    pub wealth_married: SliceTable,

    pub multipliers: Multipliers,
    pub limits: DeductionLimits,
}

impl TaxYearTables {
    /// Federal schedule for a marital status. Only married filers use the
    /// Verheiratetentarif; separated and divorced filers are assessed
    /// individually on the single schedule.
    pub fn federal(&self, status: MaritalStatus) -> &MarginalTable {
        if status.is_married() {
            &self.federal_married
        } else {
            &self.federal_single
        }
    }

    pub fn cantonal(&self, status: MaritalStatus) -> &SliceTable {
        if status.is_married() {
            &self.cantonal_married
        } else {
            &self.cantonal_single
        }
    }

    pub fn wealth(&self, status: MaritalStatus) -> &SliceTable {
        if status.is_married() {
            &self.wealth_married
        } else {
            &self.wealth_single
        }
    }
}
