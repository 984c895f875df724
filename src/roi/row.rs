use crate::config::CostCoefficients;

/// One record of the input table, projected onto the configured columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRow {
    pub actual: f64,
    pub model_pred: f64,
    pub human_pred: f64,
}

impl InputRow {
    pub fn new(actual: f64, model_pred: f64, human_pred: f64) -> Self {
        Self {
            actual,
            model_pred,
            human_pred,
        }
    }
}

/// Over- and under-prediction of one forecast. At most one side is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurplusDeficit {
    pub surplus: f64,
    pub deficit: f64,
}

/// Split the forecast error into its clipped surplus and deficit parts.
pub fn surplus_deficit(prediction: f64, actual: f64) -> SurplusDeficit {
    SurplusDeficit {
        surplus: (prediction - actual).max(0.0),
        deficit: (actual - prediction).max(0.0),
    }
}

/// Dollar-equivalent costs one row contributes to each total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowCosts {
    pub model: SurplusDeficit,
    pub human: SurplusDeficit,
    pub model_surplus_cost: f64,
    pub model_deficit_cost: f64,
    pub human_surplus_cost: f64,
    pub human_deficit_cost: f64,
}

impl RowCosts {
    /// Price each surplus/deficit by its unit cost, then by the inference
    /// cost of whoever made the forecast.
    pub fn derive(row: &InputRow, costs: &CostCoefficients) -> Self {
        let model = surplus_deficit(row.model_pred, row.actual);
        let human = surplus_deficit(row.human_pred, row.actual);

        Self {
            model,
            human,
            model_surplus_cost: model.surplus * costs.surplus * costs.model_inference,
            model_deficit_cost: model.deficit * costs.deficit * costs.model_inference,
            human_surplus_cost: human.surplus * costs.surplus * costs.human_inference,
            human_deficit_cost: human.deficit * costs.deficit * costs.human_inference,
        }
    }
}
