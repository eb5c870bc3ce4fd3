use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Fiscal year label taken from a statement's end date.
///
/// Ordered numerically, displayed zero-padded to four digits (`2022`, `0999`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiscalYear(i32);

impl FiscalYear {
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    /// Parse a `YYYY-MM-DD` end date and keep its leading year token.
    pub fn from_end_date(end_date: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(end_date.trim(), "%Y-%m-%d").ok()?;
        let token = end_date.trim().split('-').next()?;
        if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(date.year()))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl Serialize for FiscalYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Normalized income statement for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeFacts {
    pub year: FiscalYear,
    pub net_income: f64,
    pub gross_profit: f64,
    pub revenue: f64,
    pub cost_of_revenue: f64,
}

/// Normalized balance sheet for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceFacts {
    pub year: FiscalYear,
    pub equity: f64,
    pub asset: f64,
    pub account_receivable: f64,
    pub account_payable: f64,
    pub current_asset: f64,
    pub current_liability: f64,
    pub short_debt: f64,
    pub long_debt: f64,
    /// Always `short_debt + long_debt`.
    pub total_debt: f64,
    /// `None` when the raw record carries no inventory line; inventory ratios are then skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<f64>,
}

/// Ratios that only exist for companies reporting inventory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryRatios {
    pub days_inventory: f64,
    pub cash_conversion_cycle: f64,
}

/// The ratio set for one joined fiscal year. All values are raw ratios or day counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyRatios {
    pub return_on_equity: f64,
    pub return_on_asset: f64,
    pub net_margin: f64,
    pub days_sales_outstanding: f64,
    pub days_payable_outstanding: f64,
    pub current_ratio: f64,
    pub debt_to_equity_ratio: f64,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<InventoryRatios>,
}

impl YearlyRatios {
    pub fn days_inventory(&self) -> Option<f64> {
        self.inventory.map(|i| i.days_inventory)
    }

    pub fn cash_conversion_cycle(&self) -> Option<f64> {
        self.inventory.map(|i| i.cash_conversion_cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiscal_year_from_end_date() {
        assert_eq!(FiscalYear::from_end_date("2022-12-31"), Some(FiscalYear::new(2022)));
        assert_eq!(FiscalYear::from_end_date("0999-06-30"), Some(FiscalYear::new(999)));
        assert_eq!(FiscalYear::from_end_date("2022"), None);
        assert_eq!(FiscalYear::from_end_date("31-12-2022"), None);
        assert_eq!(FiscalYear::from_end_date("2022/12/31"), None);
        assert_eq!(FiscalYear::from_end_date(""), None);
    }

    #[test]
    fn test_fiscal_year_ordering_is_numeric() {
        let mut years = vec![FiscalYear::new(2021), FiscalYear::new(999), FiscalYear::new(10000)];
        years.sort();
        assert_eq!(years, vec![FiscalYear::new(999), FiscalYear::new(2021), FiscalYear::new(10000)]);
        assert_eq!(FiscalYear::new(999).to_string(), "0999");
    }

    #[test]
    fn test_ratios_serialize_without_inventory() {
        let ratios = YearlyRatios {
            return_on_equity: 0.2,
            return_on_asset: 0.1,
            net_margin: 0.1,
            days_sales_outstanding: 18.25,
            days_payable_outstanding: 24.0,
            current_ratio: 2.0,
            debt_to_equity_ratio: 0.1,
            inventory: None,
        };
        let value = serde_json::to_value(ratios).unwrap();
        assert!(value.get("days_inventory").is_none());
        assert!(value.get("cash_conversion_cycle").is_none());
        assert_eq!(value["current_ratio"], 2.0);
    }

    #[test]
    fn test_ratios_serialize_with_inventory() {
        let ratios = YearlyRatios {
            return_on_equity: 0.2,
            return_on_asset: 0.1,
            net_margin: 0.1,
            days_sales_outstanding: 18.25,
            days_payable_outstanding: 24.0,
            current_ratio: 2.0,
            debt_to_equity_ratio: 0.1,
            inventory: Some(InventoryRatios {
                days_inventory: 30.0,
                cash_conversion_cycle: 24.25,
            }),
        };
        let value = serde_json::to_value(ratios).unwrap();
        assert_eq!(value["days_inventory"], 30.0);
        assert_eq!(value["cash_conversion_cycle"], 24.25);
        assert_eq!(ratios.days_inventory(), Some(30.0));
    }
}
