//! Statement extraction: one raw yearly record in, one normalized record out.

use std::str::FromStr;

use ratio_core::{
    BalanceFacts, FiscalYear, IncomeFacts, RatioError, RawBalanceSheet, RawDate,
    RawIncomeStatement, RawNumber, StatementKind,
};

use crate::engine::finite;

/// Where the inventory value is read from once a balance sheet exposes an `inventory` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventorySource {
    /// The `inventory` line itself.
    #[default]
    InventoryField,
    /// The `accountsPayable` line. Kept only to reproduce figures produced by the
    /// legacy screener, which attached payables as inventory.
    AccountsPayable,
}

impl FromStr for InventorySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inventory" | "inventory_field" => Ok(InventorySource::InventoryField),
            "accounts_payable" | "payable" | "legacy" => Ok(InventorySource::AccountsPayable),
            other => Err(format!("unknown inventory source: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionConfig {
    pub inventory_source: InventorySource,
}

/// Extract the fiscal year from an `endDate` wrapper.
pub fn extract_year(
    end_date: Option<&RawDate>,
    statement: StatementKind,
) -> Result<FiscalYear, RatioError> {
    let fmt = end_date.and_then(|d| d.fmt.as_deref()).unwrap_or_default();
    FiscalYear::from_end_date(fmt).ok_or_else(|| RatioError::MalformedYear {
        statement,
        value: fmt.to_string(),
    })
}

/// Read the `raw` number of a required line. `field` is the normalized name, `key` the payload key.
fn required(
    value: Option<&RawNumber>,
    field: &'static str,
    key: &'static str,
    statement: StatementKind,
    year: FiscalYear,
) -> Result<f64, RatioError> {
    value.and_then(|v| v.raw).ok_or(RatioError::MissingField {
        statement,
        field,
        key,
        year,
    })
}

pub fn extract_income(record: &RawIncomeStatement) -> Result<(FiscalYear, IncomeFacts), RatioError> {
    let kind = StatementKind::Income;
    let year = extract_year(record.end_date.as_ref(), kind)?;

    let facts = IncomeFacts {
        year,
        net_income: required(record.net_income.as_ref(), "net_income", "netIncome", kind, year)?,
        gross_profit: required(record.gross_profit.as_ref(), "gross_profit", "grossProfit", kind, year)?,
        revenue: required(record.total_revenue.as_ref(), "revenue", "totalRevenue", kind, year)?,
        // a.k.a. cost of goods sold
        cost_of_revenue: required(record.cost_of_revenue.as_ref(), "cost_of_revenue", "costOfRevenue", kind, year)?,
    };

    tracing::debug!("Extracted {} for {}", kind, year);
    Ok((year, facts))
}

pub fn extract_balance(
    record: &RawBalanceSheet,
    config: &ExtractionConfig,
) -> Result<(FiscalYear, BalanceFacts), RatioError> {
    let kind = StatementKind::Balance;
    let year = extract_year(record.end_date.as_ref(), kind)?;

    let equity = required(record.total_stockholder_equity.as_ref(), "equity", "totalStockholderEquity", kind, year)?;
    let asset = required(record.total_assets.as_ref(), "asset", "totalAssets", kind, year)?;
    let account_receivable = required(record.net_receivables.as_ref(), "account_receivable", "netReceivables", kind, year)?;
    let account_payable = required(record.accounts_payable.as_ref(), "account_payable", "accountsPayable", kind, year)?;
    let current_asset = required(record.total_current_assets.as_ref(), "current_asset", "totalCurrentAssets", kind, year)?;
    let current_liability =
        required(record.total_current_liabilities.as_ref(), "current_liability", "totalCurrentLiabilities", kind, year)?;
    let short_debt = required(record.short_long_term_debt.as_ref(), "short_debt", "shortLongTermDebt", kind, year)?;
    let long_debt = required(record.long_term_debt.as_ref(), "long_debt", "longTermDebt", kind, year)?;

    // An inventory line with no value (`null` or `{}`) is treated as no inventory.
    let inventory = match (&record.inventory, config.inventory_source) {
        (None, _) => None,
        (Some(line), InventorySource::InventoryField) => line.as_ref().and_then(|v| v.raw),
        (Some(_), InventorySource::AccountsPayable) => Some(account_payable),
    };

    let facts = BalanceFacts {
        year,
        equity,
        asset,
        account_receivable,
        account_payable,
        current_asset,
        current_liability,
        short_debt,
        long_debt,
        total_debt: finite(short_debt + long_debt, "total_debt", year)?,
        inventory,
    };

    tracing::debug!("Extracted {} for {} (inventory: {})", kind, year, inventory.is_some());
    Ok((year, facts))
}
