use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [`TaxpayerProfile`] fails boundary validation.
///
/// Negative amounts and malformed family data are rejected here so they can
/// never reach the tax evaluators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    /// A monetary field that must be non-negative carries a negative value.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount {
        field: &'static str,
        value: Decimal,
    },

    /// Employment percentage must lie in (0, 100].
    #[error("employment percentage must be in (0, 100], got {0}")]
    EmploymentPercentageOutOfRange(Decimal),

    /// More child ages were supplied than declared children.
    #[error("{ages} child ages supplied but only {children} children declared")]
    TooManyChildAges { ages: usize, children: u32 },

    /// A married profile needs a partner record.
    #[error("married profile is missing the partner record")]
    MissingPartner,

    /// Only married profiles carry a partner record.
    #[error("partner record present on a non-married profile")]
    UnexpectedPartner,
}

/// Civil status of the taxpayer. Married filers use the married bracket
/// tables; all other statuses use the single tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Separated,
    Divorced,
}

impl MaritalStatus {
    pub fn is_married(&self) -> bool {
        matches!(self, Self::Married)
    }
}

/// Religious affiliation, which selects the church tax multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Denomination {
    None,
    Reformed,
    Catholic,
    ChristianCatholic,
}

/// Employment situation of one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Employed,
    SelfEmployed,
    Both,
    Retired,
    NotWorking,
}

impl EmploymentType {
    /// Whether this person draws a salary from employment (commuting, meal
    /// and professional-expense pauschals apply).
    pub fn is_salaried(&self) -> bool {
        matches!(self, Self::Employed | Self::Both)
    }

    /// Whether this person counts as working for the dual-income and
    /// childcare tests.
    pub fn is_working(&self) -> bool {
        matches!(self, Self::Employed | Self::SelfEmployed | Self::Both)
    }

    /// Whether occupational pension (Pillar 2) enrollment is assumed.
    pub fn has_pension(&self) -> bool {
        matches!(self, Self::Employed | Self::SelfEmployed | Self::Both)
    }
}

/// Per-person employment record.
///
/// Married profiles carry two of these; every employment-linked deduction is
/// computed from one spouse's own flags and salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spouse {
    pub employment_type: EmploymentType,
    pub net_salary: Decimal,

    /// Employment percentage, 100 = full time. Scales the meal pauschal.
    pub employment_percentage: Decimal,

    pub has_side_income: bool,
    pub side_income_amount: Decimal,

    /// Bicycle or small motorcycle commute: fixed pauschal, no receipts.
    pub bikes_to_work: bool,

    /// Public transport or car commute: actual (receipted) costs.
    pub uses_paid_transport: bool,
    pub actual_commuting_costs: Decimal,

    pub works_away_from_home: bool,
    pub employer_meal_subsidy: bool,
}

impl Default for Spouse {
    fn default() -> Self {
        Self {
            employment_type: EmploymentType::Employed,
            net_salary: Decimal::ZERO,
            employment_percentage: Decimal::ONE_HUNDRED,
            has_side_income: false,
            side_income_amount: Decimal::ZERO,
            bikes_to_work: false,
            uses_paid_transport: false,
            actual_commuting_costs: Decimal::ZERO,
            works_away_from_home: true,
            employer_meal_subsidy: false,
        }
    }
}

impl Spouse {
    fn validate(&self) -> Result<(), ProfileError> {
        if self.net_salary < Decimal::ZERO {
            return Err(ProfileError::NegativeAmount {
                field: "net_salary",
                value: self.net_salary,
            });
        }
        if self.side_income_amount < Decimal::ZERO {
            return Err(ProfileError::NegativeAmount {
                field: "side_income_amount",
                value: self.side_income_amount,
            });
        }
        if self.actual_commuting_costs < Decimal::ZERO {
            return Err(ProfileError::NegativeAmount {
                field: "actual_commuting_costs",
                value: self.actual_commuting_costs,
            });
        }
        if self.employment_percentage <= Decimal::ZERO
            || self.employment_percentage > Decimal::ONE_HUNDRED
        {
            return Err(ProfileError::EmploymentPercentageOutOfRange(
                self.employment_percentage,
            ));
        }
        Ok(())
    }
}

/// The subject of a calculation.
///
/// Built by the questionnaire (out of scope), validated once at the boundary
/// and then treated as read-only by every calculator. The engine never holds
/// a profile across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxpayerProfile {
    pub marital_status: MaritalStatus,
    pub religious_affiliation: Denomination,
    pub num_children: u32,

    /// Ages of the children, if known. May be shorter than `num_children`.
    #[serde(default)]
    pub children_ages: Vec<u8>,

    /// Primary person (the only person for non-married filers).
    pub primary: Spouse,

    /// Second person, present exactly when married.
    #[serde(default)]
    pub partner: Option<Spouse>,

    // Assets
    pub owns_property: bool,
    #[serde(default)]
    pub eigenmietwert: Option<Decimal>,
    pub has_securities: bool,
    #[serde(default)]
    pub securities_value: Option<Decimal>,
    pub total_wealth: Decimal,

    // Location
    pub municipality: String,

    /// Municipal Steuerfuss as an integer percentage (119 = 119%).
    pub municipal_multiplier: u32,

    // Actual-cost overrides (receipted costs instead of pauschal amounts)
    #[serde(default)]
    pub claim_actual_professional: bool,
    #[serde(default)]
    pub actual_professional_costs: Decimal,
    #[serde(default)]
    pub claim_actual_property_maintenance: bool,
    #[serde(default)]
    pub actual_property_maintenance_costs: Decimal,
}

impl Default for TaxpayerProfile {
    fn default() -> Self {
        Self {
            marital_status: MaritalStatus::Single,
            religious_affiliation: Denomination::None,
            num_children: 0,
            children_ages: Vec::new(),
            primary: Spouse::default(),
            partner: None,
            owns_property: false,
            eigenmietwert: None,
            has_securities: false,
            securities_value: None,
            total_wealth: Decimal::ZERO,
            municipality: "Zürich".to_string(),
            municipal_multiplier: 119,
            claim_actual_professional: false,
            actual_professional_costs: Decimal::ZERO,
            claim_actual_property_maintenance: false,
            actual_property_maintenance_costs: Decimal::ZERO,
        }
    }
}

impl TaxpayerProfile {
    /// Boundary validation. Must pass before the profile is handed to any
    /// calculator.
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.primary.validate()?;
        if let Some(partner) = &self.partner {
            partner.validate()?;
        }

        match (self.marital_status.is_married(), self.partner.is_some()) {
            (true, false) => return Err(ProfileError::MissingPartner),
            (false, true) => return Err(ProfileError::UnexpectedPartner),
            _ => {}
        }

        if self.children_ages.len() > self.num_children as usize {
            return Err(ProfileError::TooManyChildAges {
                ages: self.children_ages.len(),
                children: self.num_children,
            });
        }

        if self.total_wealth < Decimal::ZERO {
            return Err(ProfileError::NegativeAmount {
                field: "total_wealth",
                value: self.total_wealth,
            });
        }
        for (field, value) in [
            ("eigenmietwert", self.eigenmietwert),
            ("securities_value", self.securities_value),
        ] {
            if let Some(value) = value
                && value < Decimal::ZERO
            {
                return Err(ProfileError::NegativeAmount { field, value });
            }
        }
        for (field, value) in [
            (
                "actual_professional_costs",
                self.actual_professional_costs,
            ),
            (
                "actual_property_maintenance_costs",
                self.actual_property_maintenance_costs,
            ),
        ] {
            if value < Decimal::ZERO {
                return Err(ProfileError::NegativeAmount { field, value });
            }
        }

        Ok(())
    }

    /// All persons on the profile: the primary, plus the partner when
    /// married.
    pub fn spouses(&self) -> impl Iterator<Item = &Spouse> {
        std::iter::once(&self.primary).chain(
            self.partner
                .as_ref()
                .filter(|_| self.marital_status.is_married()),
        )
    }

    /// Combined net salary of the household, the gross income every tax is
    /// computed from.
    pub fn combined_net_salary(&self) -> Decimal {
        self.spouses().map(|s| s.net_salary).sum()
    }

    /// Dual-income test: both spouses have a working employment status.
    pub fn both_spouses_work(&self) -> bool {
        self.marital_status.is_married()
            && self.primary.employment_type.is_working()
            && self
                .partner
                .as_ref()
                .is_some_and(|p| p.employment_type.is_working())
    }

    /// Whether any child is young enough for the childcare deduction.
    /// Unknown ages count as qualifying, matching questionnaire behavior
    /// when the age step was skipped.
    pub fn has_child_under(&self, age_limit: u8) -> bool {
        if self.num_children == 0 {
            return false;
        }
        if self.children_ages.is_empty() {
            return true;
        }
        self.children_ages.iter().any(|age| *age < age_limit)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_profile_validates() {
        let profile = TaxpayerProfile::default();

        assert_eq!(profile.validate(), Ok(()));
    }

    #[test]
    fn negative_salary_is_rejected() {
        let mut profile = TaxpayerProfile::default();
        profile.primary.net_salary = dec!(-1);

        assert_eq!(
            profile.validate(),
            Err(ProfileError::NegativeAmount {
                field: "net_salary",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn zero_employment_percentage_is_rejected() {
        let mut profile = TaxpayerProfile::default();
        profile.primary.employment_percentage = Decimal::ZERO;

        assert_eq!(
            profile.validate(),
            Err(ProfileError::EmploymentPercentageOutOfRange(Decimal::ZERO))
        );
    }

    #[test]
    fn married_without_partner_is_rejected() {
        let mut profile = TaxpayerProfile::default();
        profile.marital_status = MaritalStatus::Married;

        assert_eq!(profile.validate(), Err(ProfileError::MissingPartner));
    }

    #[test]
    fn partner_on_single_profile_is_rejected() {
        let mut profile = TaxpayerProfile::default();
        profile.partner = Some(Spouse::default());

        assert_eq!(profile.validate(), Err(ProfileError::UnexpectedPartner));
    }

    #[test]
    fn excess_child_ages_are_rejected() {
        let mut profile = TaxpayerProfile::default();
        profile.num_children = 1;
        profile.children_ages = vec![4, 9];

        assert_eq!(
            profile.validate(),
            Err(ProfileError::TooManyChildAges {
                ages: 2,
                children: 1,
            })
        );
    }

    #[test]
    fn combined_salary_sums_both_spouses() {
        let mut profile = TaxpayerProfile::default();
        profile.marital_status = MaritalStatus::Married;
        profile.primary.net_salary = dec!(80000);
        profile.partner = Some(Spouse {
            net_salary: dec!(40000),
            ..Spouse::default()
        });

        assert_eq!(profile.combined_net_salary(), dec!(120000));
    }

    #[test]
    fn partner_is_ignored_for_single_profiles() {
        // A stale partner record on a non-married profile fails validation,
        // but the accessors must still not count it.
        let mut profile = TaxpayerProfile::default();
        profile.primary.net_salary = dec!(50000);
        profile.partner = Some(Spouse {
            net_salary: dec!(99999),
            ..Spouse::default()
        });

        assert_eq!(profile.combined_net_salary(), dec!(50000));
        assert_eq!(profile.spouses().count(), 1);
    }

    #[test]
    fn unknown_child_ages_count_as_young() {
        let mut profile = TaxpayerProfile::default();
        profile.num_children = 2;

        assert!(profile.has_child_under(14));
    }

    #[test]
    fn old_children_do_not_qualify() {
        let mut profile = TaxpayerProfile::default();
        profile.num_children = 2;
        profile.children_ages = vec![16, 18];

        assert!(!profile.has_child_under(14));
    }
}
