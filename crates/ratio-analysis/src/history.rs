//! Year-keyed indexes over a statement history.
//!
//! Records are applied in payload order. Two records resolving to the same fiscal
//! year are not an error: the later one replaces the earlier one. Any record that
//! fails extraction fails the whole history.

use std::collections::BTreeMap;

use ratio_core::{
    BalanceFacts, FiscalYear, IncomeFacts, RatioError, RawBalanceSheet, RawIncomeStatement,
    StatementKind,
};

use crate::extractor::{extract_balance, extract_income, ExtractionConfig};

pub type IncomeHistory = BTreeMap<FiscalYear, IncomeFacts>;
pub type BalanceHistory = BTreeMap<FiscalYear, BalanceFacts>;

fn index_history<R, T>(
    records: &[R],
    kind: StatementKind,
    mut extract: impl FnMut(&R) -> Result<(FiscalYear, T), RatioError>,
) -> Result<BTreeMap<FiscalYear, T>, RatioError> {
    let mut by_year = BTreeMap::new();
    for record in records {
        let (year, facts) = extract(record)?;
        if by_year.insert(year, facts).is_some() {
            tracing::warn!("Duplicate {} for {}: keeping the later record", kind, year);
        }
    }
    Ok(by_year)
}

pub fn index_income_history(records: &[RawIncomeStatement]) -> Result<IncomeHistory, RatioError> {
    index_history(records, StatementKind::Income, extract_income)
}

pub fn index_balance_history(
    records: &[RawBalanceSheet],
    config: &ExtractionConfig,
) -> Result<BalanceHistory, RatioError> {
    index_history(records, StatementKind::Balance, |record| {
        extract_balance(record, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratio_core::{RawDate, RawNumber};

    fn income(end_date: &str, net_income: f64) -> RawIncomeStatement {
        RawIncomeStatement {
            end_date: Some(RawDate::from_fmt(end_date)),
            net_income: Some(RawNumber::new(net_income)),
            gross_profit: Some(RawNumber::new(400.0)),
            total_revenue: Some(RawNumber::new(1000.0)),
            cost_of_revenue: Some(RawNumber::new(600.0)),
        }
    }

    #[test]
    fn test_index_keeps_every_year() {
        let records = vec![income("2022-12-31", 100.0), income("2021-12-31", 90.0), income("2020-12-31", 80.0)];
        let history = index_income_history(&records).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[&FiscalYear::new(2021)].net_income, 90.0);
    }

    #[test]
    fn test_duplicate_year_last_write_wins() {
        let records = vec![income("2022-12-31", 100.0), income("2022-06-30", 55.0)];
        let history = index_income_history(&records).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[&FiscalYear::new(2022)].net_income, 55.0);
    }

    #[test]
    fn test_one_bad_record_fails_the_batch() {
        let mut bad = income("2021-12-31", 90.0);
        bad.total_revenue = None;
        let records = vec![income("2022-12-31", 100.0), bad];
        let err = index_income_history(&records).unwrap_err();
        assert_eq!(err.year(), Some(FiscalYear::new(2021)));
    }

    #[test]
    fn test_empty_history() {
        let history = index_balance_history(&[], &ExtractionConfig::default()).unwrap();
        assert!(history.is_empty());
    }
}
