//! CSV loading for bracket schedules.
//!
//! When a new tax year is published before this crate carries it, the
//! schedules can be supplied as CSV files instead of code:
//!
//! * marginal form (federal): `threshold,base_tax,rate` per row
//! * slice form (cantonal/wealth): `threshold,rate` per row
//!
//! Rows must be sorted ascending by threshold; the first row normally has
//! threshold 0 and rate 0 to establish the tax-free floor.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use zh_tax_core::{MarginalBracket, MarginalTable, RateBasis, SliceBracket, SliceTable};

/// Errors that can occur when loading bracket schedules from CSV.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("schedule contains no rows")]
    Empty,

    #[error("thresholds must ascend: row {row} has threshold {threshold} after {previous}")]
    NotAscending {
        row: usize,
        threshold: Decimal,
        previous: Decimal,
    },

    #[error("row {row} has a negative value")]
    Negative { row: usize },
}

impl From<csv::Error> for TableLoadError {
    fn from(err: csv::Error) -> Self {
        TableLoadError::CsvParse(err.to_string())
    }
}

/// A single row of a marginal-form schedule CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MarginalRecord {
    pub threshold: Decimal,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

/// A single row of a slice-form schedule CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SliceRecord {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Parses a marginal-form schedule from a CSV reader.
pub fn parse_marginal_table<R: Read>(reader: R) -> Result<MarginalTable, TableLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut brackets = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let record: MarginalRecord = result?;
        if record.threshold < Decimal::ZERO
            || record.base_tax < Decimal::ZERO
            || record.rate < Decimal::ZERO
        {
            return Err(TableLoadError::Negative { row: index + 1 });
        }
        brackets.push(MarginalBracket {
            threshold: record.threshold,
            base_tax: record.base_tax,
            rate_per_hundred: record.rate,
        });
    }

    check_ascending(brackets.iter().map(|b| b.threshold))?;
    Ok(MarginalTable { brackets })
}

/// Parses a slice-form schedule from a CSV reader.
///
/// The caller states the rate basis: income schedules are per-hundred,
/// wealth schedules per-mille.
pub fn parse_slice_table<R: Read>(
    reader: R,
    basis: RateBasis,
) -> Result<SliceTable, TableLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut brackets = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let record: SliceRecord = result?;
        if record.threshold < Decimal::ZERO || record.rate < Decimal::ZERO {
            return Err(TableLoadError::Negative { row: index + 1 });
        }
        brackets.push(SliceBracket { threshold: record.threshold, rate: record.rate });
    }

    check_ascending(brackets.iter().map(|b| b.threshold))?;
    Ok(SliceTable { brackets, basis })
}

fn check_ascending(thresholds: impl Iterator<Item = Decimal>) -> Result<(), TableLoadError> {
    let mut previous: Option<Decimal> = None;
    let mut count = 0;
    for (index, threshold) in thresholds.enumerate() {
        if let Some(previous) = previous
            && threshold <= previous
        {
            return Err(TableLoadError::NotAscending { row: index + 1, threshold, previous });
        }
        previous = Some(threshold);
        count += 1;
    }
    if count == 0 {
        return Err(TableLoadError::Empty);
    }
    Ok(())
}
