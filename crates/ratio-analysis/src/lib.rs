//! Financial ratio pipeline.
//!
//! raw payload -> per-year income / balance indexes -> year join + ratio set -> table.
//!
//! Everything here is synchronous and pure: no I/O, no caching, no shared state.

pub mod engine;
pub mod extractor;
pub mod history;
pub mod table;


pub use engine::{compute_all, compute_ratios};
pub use extractor::{extract_balance, extract_income, ExtractionConfig, InventorySource};
pub use history::{index_balance_history, index_income_history, BalanceHistory, IncomeHistory};
pub use table::{RatioRow, RatioTable};

use ratio_core::{RatioError, RawFinancials};

#[derive(Debug, Clone, Default)]
pub struct RatioAnalysisEngine {
    config: ExtractionConfig,
}

impl RatioAnalysisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Run the full pipeline over an already-parsed payload.
    pub fn analyze(&self, financials: &RawFinancials) -> Result<RatioTable, RatioError> {
        let income_by_year = index_income_history(financials.income_statements()?)?;
        let balance_by_year = index_balance_history(financials.balance_sheets()?, &self.config)?;

        let pairs = compute_all(&income_by_year, &balance_by_year)?;
        let table = RatioTable::build(pairs);

        tracing::info!(
            "Built ratio table: {} rows from {} income / {} balance years",
            table.len(),
            income_by_year.len(),
            balance_by_year.len()
        );
        Ok(table)
    }

    pub fn analyze_value(&self, payload: serde_json::Value) -> Result<RatioTable, RatioError> {
        self.analyze(&RawFinancials::from_value(payload)?)
    }

    pub fn analyze_json(&self, body: &str) -> Result<RatioTable, RatioError> {
        self.analyze(&RawFinancials::from_json_str(body)?)
    }
}
