use serde::{Deserialize, Serialize};

use super::CostTotals;
use crate::errors::RoiError;

pub const ACTUAL_ROI_TEST_NAME: &str = "Actual ROI";
pub const BUSINESS_VALUE_CATEGORY: &str = "business_value";
pub const ACTUAL_ROI_TEST_TYPE: &str = "actual_roi";
pub const ACTUAL_ROI_TEST_ID: &str = "business_value_actual_roi";

/// Result of one aggregation, in the shape the evaluation harness reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub is_model_more_effective: bool,
    pub cost_savings_by_model: f64,
    pub business_value: Vec<BusinessValueTest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessValueTest {
    pub test_name: String,
    pub test_category: String,
    pub test_type: String,
    pub test_id: String,
    pub values: RoiValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiValues {
    pub model_surplus_total: f64,
    pub model_deficit_total: f64,
    pub human_surplus_total: f64,
    pub human_deficit_total: f64,
    pub model_total_cost: f64,
    pub human_total_cost: f64,
    pub is_model_more_effective: bool,
    pub cost_savings_by_model: f64,
}

impl RoiValues {
    pub fn from_totals(totals: &CostTotals) -> Self {
        let model_total_cost = totals.model_total_cost();
        let human_total_cost = totals.human_total_cost();
        let cost_savings_by_model = human_total_cost - model_total_cost;

        Self {
            model_surplus_total: totals.model_surplus_total,
            model_deficit_total: totals.model_deficit_total,
            human_surplus_total: totals.human_surplus_total,
            human_deficit_total: totals.human_deficit_total,
            model_total_cost,
            human_total_cost,
            is_model_more_effective: cost_savings_by_model >= 0.0,
            cost_savings_by_model,
        }
    }

    /// Fails on the first total that overflowed, in field order.
    pub fn ensure_finite(&self) -> Result<(), RoiError> {
        [
            ("model_surplus_total", self.model_surplus_total),
            ("model_deficit_total", self.model_deficit_total),
            ("human_surplus_total", self.human_surplus_total),
            ("human_deficit_total", self.human_deficit_total),
            ("model_total_cost", self.model_total_cost),
            ("human_total_cost", self.human_total_cost),
            ("cost_savings_by_model", self.cost_savings_by_model),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map_or(Ok(()), |(series, value)| {
            Err(RoiError::non_finite_total(series, value))
        })
    }
}

impl MetricsReport {
    /// Build the report; the top-level verdict and savings are copied from
    /// the nested values so both always agree.
    pub fn from_totals(totals: &CostTotals) -> Self {
        let values = RoiValues::from_totals(totals);

        Self {
            is_model_more_effective: values.is_model_more_effective,
            cost_savings_by_model: values.cost_savings_by_model,
            business_value: vec![BusinessValueTest {
                test_name: ACTUAL_ROI_TEST_NAME.to_string(),
                test_category: BUSINESS_VALUE_CATEGORY.to_string(),
                test_type: ACTUAL_ROI_TEST_TYPE.to_string(),
                test_id: ACTUAL_ROI_TEST_ID.to_string(),
                values,
            }],
        }
    }

    /// Reject a report whose numbers cannot be written as JSON numbers.
    pub fn ensure_finite(&self) -> Result<(), RoiError> {
        self.business_value
            .iter()
            .try_for_each(|test| test.values.ensure_finite())?;

        if self.cost_savings_by_model.is_finite() {
            Ok(())
        } else {
            Err(RoiError::non_finite_total(
                "cost_savings_by_model",
                self.cost_savings_by_model,
            ))
        }
    }

    /// The "Actual ROI" detail block.
    pub fn actual_roi(&self) -> Option<&RoiValues> {
        self.business_value
            .iter()
            .find(|test| test.test_id == ACTUAL_ROI_TEST_ID)
            .map(|test| &test.values)
    }

    pub fn summary(&self) -> String {
        match self.actual_roi() {
            Some(values) => format!(
                "Model cost: {:.2} | Human cost: {:.2} | Savings by model: {:.2} | Model more effective: {}",
                values.model_total_cost,
                values.human_total_cost,
                self.cost_savings_by_model,
                self.is_model_more_effective
            ),
            None => format!(
                "Savings by model: {:.2} | Model more effective: {}",
                self.cost_savings_by_model, self.is_model_more_effective
            ),
        }
    }
}
