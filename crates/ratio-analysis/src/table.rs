use std::collections::BTreeMap;

use ratio_core::{FiscalYear, YearlyRatios};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioRow {
    pub year: FiscalYear,
    #[serde(flatten)]
    pub ratios: YearlyRatios,
}

/// Per-year ratios, latest year first.
///
/// Row 0 is always the most recent joined year; presentation code reads its headline
/// figures from there.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RatioTable {
    rows: Vec<RatioRow>,
}

impl RatioTable {
    /// Order `(year, ratios)` pairs by year, descending. A repeated year keeps the later pair.
    pub fn build(pairs: impl IntoIterator<Item = (FiscalYear, YearlyRatios)>) -> Self {
        let by_year: BTreeMap<FiscalYear, YearlyRatios> = pairs.into_iter().collect();
        let rows = by_year
            .into_iter()
            .rev()
            .map(|(year, ratios)| RatioRow { year, ratios })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[RatioRow] {
        &self.rows
    }

    pub fn latest(&self) -> Option<&RatioRow> {
        self.rows.first()
    }

    pub fn get(&self, year: FiscalYear) -> Option<&YearlyRatios> {
        self.rows.iter().find(|r| r.year == year).map(|r| &r.ratios)
    }

    pub fn years(&self) -> Vec<FiscalYear> {
        self.rows.iter().map(|r| r.year).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any row carries the inventory-derived ratios.
    pub fn has_inventory_metrics(&self) -> bool {
        self.rows.iter().any(|r| r.ratios.inventory.is_some())
    }
}

impl<'a> IntoIterator for &'a RatioTable {
    type Item = &'a RatioRow;
    type IntoIter = std::slice::Iter<'a, RatioRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
