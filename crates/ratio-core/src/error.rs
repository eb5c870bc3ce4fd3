use std::fmt;

use thiserror::Error;

use crate::types::FiscalYear;

/// Which side of the payload a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Income,
    Balance,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementKind::Income => write!(f, "income statement"),
            StatementKind::Balance => write!(f, "balance sheet"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatioError {
    #[error("Missing field `{field}` ({key}) in {statement} for year {year}")]
    MissingField {
        statement: StatementKind,
        field: &'static str,
        key: &'static str,
        year: FiscalYear,
    },

    #[error("Malformed end date in {statement}: {value:?} is not YYYY-MM-DD")]
    MalformedYear {
        statement: StatementKind,
        value: String,
    },

    #[error("Division by zero computing {ratio} for year {year}: {denominator} is zero")]
    DivisionByZero {
        ratio: &'static str,
        denominator: &'static str,
        year: FiscalYear,
    },

    #[error("Non-finite result computing {ratio} for year {year}")]
    NonFinite {
        ratio: &'static str,
        year: FiscalYear,
    },

    #[error("Missing section `{0}` in financials payload")]
    MissingSection(&'static str),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Data source error: {0}")]
    Source(String),
}

impl RatioError {
    /// Year the failure is attributed to, when one is known.
    pub fn year(&self) -> Option<FiscalYear> {
        match self {
            RatioError::MissingField { year, .. }
            | RatioError::DivisionByZero { year, .. }
            | RatioError::NonFinite { year, .. } => Some(*year),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RatioError {
    fn from(err: serde_json::Error) -> Self {
        RatioError::InvalidPayload(err.to_string())
    }
}
