//! Cost comparison of model forecasts against human forecasts.
//!
//! Every row is priced independently: the forecast error is split into a
//! surplus (over-prediction) and a deficit (under-prediction), each is
//! multiplied by its unit cost and then by the inference cost of the
//! forecaster. The four cost series are summed, and the model is judged
//! more effective when its total cost does not exceed the human total.
//!
//! [`compute`] folds rows left to right in input order so repeated runs give
//! bit-identical totals. [`compute_parallel`] reduces partial sums on the
//! rayon pool; its totals match within floating-point tolerance.

pub mod models;
pub mod row;

#[cfg(test)]
mod tests;

use rayon::prelude::*;

use crate::config::ResolvedParameters;

pub use models::{BusinessValueTest, MetricsReport, RoiValues};
pub use row::{surplus_deficit, InputRow, RowCosts, SurplusDeficit};

/// Running totals of the four cost series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostTotals {
    pub model_surplus_total: f64,
    pub model_deficit_total: f64,
    pub human_surplus_total: f64,
    pub human_deficit_total: f64,
}

impl CostTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_row(self, costs: &RowCosts) -> Self {
        Self {
            model_surplus_total: self.model_surplus_total + costs.model_surplus_cost,
            model_deficit_total: self.model_deficit_total + costs.model_deficit_cost,
            human_surplus_total: self.human_surplus_total + costs.human_surplus_cost,
            human_deficit_total: self.human_deficit_total + costs.human_deficit_cost,
        }
    }

    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            model_surplus_total: self.model_surplus_total + other.model_surplus_total,
            model_deficit_total: self.model_deficit_total + other.model_deficit_total,
            human_surplus_total: self.human_surplus_total + other.human_surplus_total,
            human_deficit_total: self.human_deficit_total + other.human_deficit_total,
        }
    }

    pub fn model_total_cost(&self) -> f64 {
        self.model_surplus_total + self.model_deficit_total
    }

    pub fn human_total_cost(&self) -> f64 {
        self.human_surplus_total + self.human_deficit_total
    }
}

/// Sum the per-row costs of `rows` in input order.
pub fn aggregate(params: &ResolvedParameters, rows: &[InputRow]) -> CostTotals {
    rows.iter()
        .map(|row| RowCosts::derive(row, &params.costs))
        .fold(CostTotals::zero(), |totals, costs| totals.add_row(&costs))
}

/// Parallel counterpart of [`aggregate`].
pub fn aggregate_parallel(params: &ResolvedParameters, rows: &[InputRow]) -> CostTotals {
    rows.par_iter()
        .map(|row| RowCosts::derive(row, &params.costs))
        .fold(CostTotals::zero, |totals, costs| totals.add_row(&costs))
        .reduce(CostTotals::zero, CostTotals::combine)
}

/// Compare model and human forecasting cost over a batch of rows.
pub fn compute(params: &ResolvedParameters, rows: &[InputRow]) -> MetricsReport {
    let totals = aggregate(params, rows);
    log::debug!("Aggregated {} rows: {:?}", rows.len(), totals);
    MetricsReport::from_totals(&totals)
}

/// Same as [`compute`], summing on the rayon thread pool.
pub fn compute_parallel(params: &ResolvedParameters, rows: &[InputRow]) -> MetricsReport {
    let totals = aggregate_parallel(params, rows);
    log::debug!("Aggregated {} rows in parallel: {:?}", rows.len(), totals);
    MetricsReport::from_totals(&totals)
}
