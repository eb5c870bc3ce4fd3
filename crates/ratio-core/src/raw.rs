//! Wire shape of the Yahoo Finance `get-financials` payload.
//!
//! Only the regions and fields the ratio pipeline reads are modelled. Every numeric
//! line is a `{raw, fmt}` wrapper and every one of them is optional here: presence
//! is validated later, where a missing line can be reported with its fiscal year.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RatioError;

/// `{ "raw": 123.0, "fmt": "123" }`. Yahoo sends `{}` when it has no value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNumber {
    #[serde(default)]
    pub raw: Option<f64>,
    #[serde(default)]
    pub fmt: Option<String>,
}

impl RawNumber {
    pub fn new(raw: f64) -> Self {
        Self {
            raw: Some(raw),
            fmt: None,
        }
    }
}

/// `{ "raw": 1640908800, "fmt": "2021-12-31" }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDate {
    #[serde(default)]
    pub raw: Option<i64>,
    #[serde(default)]
    pub fmt: Option<String>,
}

impl RawDate {
    pub fn from_fmt(fmt: impl Into<String>) -> Self {
        Self {
            raw: None,
            fmt: Some(fmt.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIncomeStatement {
    #[serde(default)]
    pub end_date: Option<RawDate>,
    #[serde(default)]
    pub net_income: Option<RawNumber>,
    #[serde(default)]
    pub gross_profit: Option<RawNumber>,
    #[serde(default)]
    pub total_revenue: Option<RawNumber>,
    #[serde(default)]
    pub cost_of_revenue: Option<RawNumber>,
}

/// Keep "key present" apart from "value present": `null` becomes `Some(None)`.
fn key_present<'de, D>(deserializer: D) -> Result<Option<Option<RawNumber>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawNumber>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBalanceSheet {
    #[serde(default)]
    pub end_date: Option<RawDate>,
    #[serde(default)]
    pub total_stockholder_equity: Option<RawNumber>,
    #[serde(default)]
    pub total_assets: Option<RawNumber>,
    #[serde(default)]
    pub net_receivables: Option<RawNumber>,
    #[serde(default)]
    pub accounts_payable: Option<RawNumber>,
    #[serde(default)]
    pub total_current_assets: Option<RawNumber>,
    #[serde(default)]
    pub total_current_liabilities: Option<RawNumber>,
    #[serde(default)]
    pub short_long_term_debt: Option<RawNumber>,
    #[serde(default)]
    pub long_term_debt: Option<RawNumber>,
    /// Outer `Some` whenever the `inventory` key exists, even as `null` or `{}`.
    #[serde(default, deserialize_with = "key_present", skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Option<RawNumber>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIncomeStatementHistory {
    #[serde(default)]
    pub income_statement_history: Option<Vec<RawIncomeStatement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBalanceSheetHistory {
    #[serde(default)]
    pub balance_sheet_statements: Option<Vec<RawBalanceSheet>>,
}

/// Top level of the financials payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinancials {
    #[serde(default)]
    pub income_statement_history: Option<RawIncomeStatementHistory>,
    #[serde(default)]
    pub balance_sheet_history: Option<RawBalanceSheetHistory>,
}

impl RawFinancials {
    pub fn from_json_str(body: &str) -> Result<Self, RatioError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, RatioError> {
        Ok(serde_json::from_value(value)?)
    }

    /// `incomeStatementHistory.incomeStatementHistory`, in payload order.
    pub fn income_statements(&self) -> Result<&[RawIncomeStatement], RatioError> {
        self.income_statement_history
            .as_ref()
            .and_then(|h| h.income_statement_history.as_deref())
            .ok_or(RatioError::MissingSection(
                "incomeStatementHistory.incomeStatementHistory",
            ))
    }

    /// `balanceSheetHistory.balanceSheetStatements`, in payload order.
    pub fn balance_sheets(&self) -> Result<&[RawBalanceSheet], RatioError> {
        self.balance_sheet_history
            .as_ref()
            .and_then(|h| h.balance_sheet_statements.as_deref())
            .ok_or(RatioError::MissingSection(
                "balanceSheetHistory.balanceSheetStatements",
            ))
    }
}
