pub mod loader;
pub mod municipalities;
pub mod tables;

pub use loader::{TableLoadError, parse_marginal_table, parse_slice_table};
pub use municipalities::{MUNICIPALITIES, Municipality, municipal_multiplier};
pub use tables::{ConfigError, SUPPORTED_YEARS, tables_for_year};
