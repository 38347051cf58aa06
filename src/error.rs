//! Error types for avance
//!
//! Only malformed input is an error. Numeric degeneracy (zero denominators
//! in the index formulas) and missing schedule joins are documented,
//! expected outcomes handled by the engines themselves.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Avance error types
#[derive(Error, Debug)]
pub enum Error {
    /// Composite key appears more than once within a single input table
    #[error("duplicate key ({project_id}, {period_end})\nEach input table must carry exactly one row per project per period")]
    DuplicateKey {
        /// Offending project identifier
        project_id: String,
        /// Offending period end date
        period_end: NaiveDate,
    },

    /// Row with an empty project identifier
    #[error("row {index} has an empty project_id\nEvery row must be keyed by a non-empty project_id")]
    MissingProjectId {
        /// Zero-based position of the offending row in the input
        index: usize,
    },
}
