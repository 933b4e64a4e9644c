pub mod calculations;
pub mod models;

pub use calculations::{CalculationError, compare_scenarios};
pub use models::*;
