//! Ratio computation over the year-joined income and balance histories.

use ratio_core::{BalanceFacts, FiscalYear, IncomeFacts, InventoryRatios, RatioError, YearlyRatios};

use crate::history::{BalanceHistory, IncomeHistory};

const DAYS_PER_YEAR: f64 = 365.0;

/// Refuse inf/NaN so a table never carries them.
pub(crate) fn finite(value: f64, name: &'static str, year: FiscalYear) -> Result<f64, RatioError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RatioError::NonFinite { ratio: name, year })
    }
}

/// `numerator / denominator`, refusing a zero denominator or a non-finite quotient.
fn ratio(
    numerator: f64,
    denominator: f64,
    name: &'static str,
    denominator_name: &'static str,
    year: FiscalYear,
) -> Result<f64, RatioError> {
    if denominator == 0.0 {
        return Err(RatioError::DivisionByZero {
            ratio: name,
            denominator: denominator_name,
            year,
        });
    }
    finite(numerator / denominator, name, year)
}

/// `numerator / denominator * 365`, as a day count.
fn days(
    numerator: f64,
    denominator: f64,
    name: &'static str,
    denominator_name: &'static str,
    year: FiscalYear,
) -> Result<f64, RatioError> {
    finite(ratio(numerator, denominator, name, denominator_name, year)? * DAYS_PER_YEAR, name, year)
}

/// Compute the ratio set for one fiscal year.
pub fn compute_ratios(income: &IncomeFacts, balance: &BalanceFacts) -> Result<YearlyRatios, RatioError> {
    let year = income.year;

    let return_on_equity = ratio(income.net_income, balance.equity, "return_on_equity", "equity", year)?;
    let return_on_asset = ratio(income.net_income, balance.asset, "return_on_asset", "asset", year)?;
    let net_margin = ratio(income.net_income, income.revenue, "net_margin", "revenue", year)?;
    let days_sales_outstanding = days(
        balance.account_receivable,
        income.revenue,
        "days_sales_outstanding",
        "revenue",
        year,
    )?;
    let days_payable_outstanding = days(
        balance.account_payable,
        income.cost_of_revenue,
        "days_payable_outstanding",
        "cost_of_revenue",
        year,
    )?;
    let current_ratio = ratio(
        balance.current_asset,
        balance.current_liability,
        "current_ratio",
        "current_liability",
        year,
    )?;
    let debt_to_equity_ratio = ratio(balance.total_debt, balance.equity, "debt_to_equity_ratio", "equity", year)?;

    let inventory = match balance.inventory {
        Some(inventory) => {
            let days_inventory = days(inventory, income.cost_of_revenue, "days_inventory", "cost_of_revenue", year)?;
            let cash_conversion_cycle = finite(
                days_sales_outstanding + days_inventory - days_payable_outstanding,
                "cash_conversion_cycle",
                year,
            )?;
            Some(InventoryRatios {
                days_inventory,
                cash_conversion_cycle,
            })
        }
        None => None,
    };

    Ok(YearlyRatios {
        return_on_equity,
        return_on_asset,
        net_margin,
        days_sales_outstanding,
        days_payable_outstanding,
        current_ratio,
        debt_to_equity_ratio,
        inventory,
    })
}

/// Inner join on fiscal year, then compute every joined year.
///
/// Income years without a balance sheet (and vice versa) are skipped. The first
/// failing year aborts the whole computation. Output is in ascending year order;
/// callers wanting the latest year first should go through `RatioTable::build`.
pub fn compute_all(
    income_by_year: &IncomeHistory,
    balance_by_year: &BalanceHistory,
) -> Result<Vec<(FiscalYear, YearlyRatios)>, RatioError> {
    income_by_year
        .iter()
        .filter_map(|(year, income)| {
            let balance = balance_by_year.get(year);
            if balance.is_none() {
                tracing::debug!("No balance sheet for {}, skipping", year);
            }
            balance.map(|balance| (year, income, balance))
        })
        .map(|(year, income, balance)| Ok((*year, compute_ratios(income, balance)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn income(year: i32) -> IncomeFacts {
        IncomeFacts {
            year: FiscalYear::new(year),
            net_income: 100.0,
            gross_profit: 400.0,
            revenue: 1000.0,
            cost_of_revenue: 600.0,
        }
    }

    fn balance(year: i32) -> BalanceFacts {
        BalanceFacts {
            year: FiscalYear::new(year),
            equity: 500.0,
            asset: 1000.0,
            account_receivable: 50.0,
            account_payable: 40.0,
            current_asset: 300.0,
            current_liability: 150.0,
            short_debt: 20.0,
            long_debt: 30.0,
            total_debt: 50.0,
            inventory: None,
        }
    }

    #[test]
    fn test_compute_ratios() {
        let r = compute_ratios(&income(2022), &balance(2022)).unwrap();
        assert_relative_eq!(r.return_on_equity, 0.2, epsilon = 1e-12);
        assert_relative_eq!(r.return_on_asset, 0.1, epsilon = 1e-12);
        assert_relative_eq!(r.net_margin, 0.1, epsilon = 1e-12);
        assert_relative_eq!(r.days_sales_outstanding, 18.25, epsilon = 1e-9);
        assert_relative_eq!(r.days_payable_outstanding, 40.0 / 600.0 * 365.0, epsilon = 1e-9);
        assert_relative_eq!(r.current_ratio, 2.0, epsilon = 1e-12);
        assert_relative_eq!(r.debt_to_equity_ratio, 0.1, epsilon = 1e-12);
        assert!(r.inventory.is_none());
    }

    #[test]
    fn test_inventory_ratios() {
        let mut b = balance(2022);
        b.inventory = Some(120.0);
        let r = compute_ratios(&income(2022), &b).unwrap();
        let days_inventory = r.days_inventory().unwrap();
        assert_relative_eq!(days_inventory, 73.0, epsilon = 1e-9);
        assert_relative_eq!(
            r.cash_conversion_cycle().unwrap(),
            r.days_sales_outstanding + days_inventory - r.days_payable_outstanding,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_denominator_is_an_error() {
        let mut b = balance(2022);
        b.current_liability = 0.0;
        let err = compute_ratios(&income(2022), &b).unwrap_err();
        assert_eq!(
            err,
            RatioError::DivisionByZero {
                ratio: "current_ratio",
                denominator: "current_liability",
                year: FiscalYear::new(2022),
            }
        );
    }

    #[test]
    fn test_zero_cost_of_revenue() {
        let mut i = income(2022);
        i.cost_of_revenue = 0.0;
        let err = compute_ratios(&i, &balance(2022)).unwrap_err();
        assert!(matches!(err, RatioError::DivisionByZero { ratio: "days_payable_outstanding", .. }));
    }

    #[test]
    fn test_subnormal_denominator_is_non_finite() {
        let mut b = balance(2022);
        b.equity = 1e-320;
        let err = compute_ratios(&income(2022), &b).unwrap_err();
        assert_eq!(
            err,
            RatioError::NonFinite {
                ratio: "return_on_equity",
                year: FiscalYear::new(2022),
            }
        );
    }

    #[test]
    fn test_compute_all_inner_join() {
        let incomes: IncomeHistory = [2020, 2021, 2022].into_iter().map(|y| (FiscalYear::new(y), income(y))).collect();
        let balances: BalanceHistory = [2021, 2022, 2023].into_iter().map(|y| (FiscalYear::new(y), balance(y))).collect();
        let rows = compute_all(&incomes, &balances).unwrap();
        let years: Vec<i32> = rows.iter().map(|(y, _)| y.value()).collect();
        assert_eq!(years, vec![2021, 2022]);
    }

    #[test]
    fn test_compute_all_aborts_on_bad_year() {
        let incomes: IncomeHistory = [2021, 2022].into_iter().map(|y| (FiscalYear::new(y), income(y))).collect();
        let mut balances: BalanceHistory = [2021, 2022].into_iter().map(|y| (FiscalYear::new(y), balance(y))).collect();
        if let Some(b) = balances.get_mut(&FiscalYear::new(2021)) {
            b.equity = 0.0;
        }
        let err = compute_all(&incomes, &balances).unwrap_err();
        assert_eq!(err.year(), Some(FiscalYear::new(2021)));
    }
}
