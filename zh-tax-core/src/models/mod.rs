mod bracket;
mod deduction;
mod profile;
mod tax_result;
mod year_tables;

pub use bracket::{MarginalBracket, MarginalTable, RateBasis, SliceBracket, SliceTable};
pub use deduction::{DeductionCheck, DeductionLedger, OptionalDeductionKind, TaxAuthority};
pub use profile::{
    Denomination, EmploymentType, MaritalStatus, ProfileError, Spouse, TaxpayerProfile,
};
pub use tax_result::{BracketSlice, ChurchTax, ScenarioComparison, TaxResult, WealthTax};
pub use year_tables::{DeductionLimits, InsuranceLimits, Multipliers, TaxYearTables};
