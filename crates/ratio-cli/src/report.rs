//! Plain-text rendering of a ratio table.

use ratio_analysis::{RatioRow, RatioTable};

/// One row per year, latest first. Inventory columns appear only when some year has them.
pub fn format_table(table: &RatioTable) -> String {
    let with_inventory = table.has_inventory_metrics();
    let mut out = String::new();

    out.push_str(&format!(
        "{:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "year", "roe", "roa", "margin", "dso", "dpo", "current", "d/e"
    ));
    if with_inventory {
        out.push_str(&format!(" {:>8} {:>8}", "dio", "ccc"));
    }
    out.push('\n');

    for row in table {
        let r = &row.ratios;
        out.push_str(&format!(
            "{:>6} {:>8.3} {:>8.3} {:>8.3} {:>8.2} {:>8.2} {:>8.2} {:>8.3}",
            row.year.to_string(),
            r.return_on_equity,
            r.return_on_asset,
            r.net_margin,
            r.days_sales_outstanding,
            r.days_payable_outstanding,
            r.current_ratio,
            r.debt_to_equity_ratio
        ));
        if with_inventory {
            match r.inventory {
                Some(inv) => out.push_str(&format!(
                    " {:>8.2} {:>8.2}",
                    inv.days_inventory, inv.cash_conversion_cycle
                )),
                None => out.push_str(&format!(" {:>8} {:>8}", "-", "-")),
            }
        }
        out.push('\n');
    }
    out
}

/// Headline figures for the most recent year, percentages scaled by 100.
pub fn format_headline(row: &RatioRow) -> String {
    let r = &row.ratios;
    let mut out = String::new();

    out.push_str(&format!("Year: {}\n", row.year));
    out.push_str(&format!("  Return on Equity:           {:.2}%\n", r.return_on_equity * 100.0));
    out.push_str(&format!("  Return on Asset:            {:.2}%\n", r.return_on_asset * 100.0));
    out.push_str(&format!("  Net Margin:                 {:.2}%\n", r.net_margin * 100.0));
    out.push_str(&format!("  Days of Sales Outstanding:  {:.1} days\n", r.days_sales_outstanding));
    out.push_str(&format!("  Days of Payable Outstanding: {:.1} days\n", r.days_payable_outstanding));
    if let Some(inv) = r.inventory {
        out.push_str(&format!("  Days of Inventory:          {:.2} days\n", inv.days_inventory));
        out.push_str(&format!("  Cash Conversion Cycle:      {:.2} days\n", inv.cash_conversion_cycle));
    }
    out.push_str(&format!("  Current Ratio:              {:.2}%\n", r.current_ratio * 100.0));
    out.push_str(&format!("  Debt to Equity Ratio:       {:.2}%\n", r.debt_to_equity_ratio * 100.0));
    out
}
