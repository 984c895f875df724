#[cfg(test)]
use super::*;
use crate::config::{CostCoefficients, FieldNames};
use crate::errors::RoiError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn create_params(surplus: f64, deficit: f64, model: f64, human: f64) -> ResolvedParameters {
    ResolvedParameters {
        costs: CostCoefficients {
            surplus,
            deficit,
            model_inference: model,
            human_inference: human,
        },
        fields: FieldNames {
            actuals: "actual".to_string(),
            model_pred: "model_prediction".to_string(),
            human_pred: "human_prediction".to_string(),
        },
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn rows_strategy() -> impl Strategy<Value = Vec<InputRow>> {
    prop::collection::vec(
        (-1e4f64..1e4, -1e4f64..1e4, -1e4f64..1e4)
            .prop_map(|(actual, model, human)| InputRow::new(actual, model, human)),
        0..64,
    )
}

#[test]
fn test_reference_scenario() {
    let params = create_params(1.0, 2.0, 1.0, 1.0);
    let report = compute(&params, &[InputRow::new(10.0, 12.0, 7.0)]);

    let expected = MetricsReport {
        is_model_more_effective: true,
        cost_savings_by_model: 4.0,
        business_value: vec![BusinessValueTest {
            test_name: "Actual ROI".to_string(),
            test_category: "business_value".to_string(),
            test_type: "actual_roi".to_string(),
            test_id: "business_value_actual_roi".to_string(),
            values: RoiValues {
                model_surplus_total: 2.0,
                model_deficit_total: 0.0,
                human_surplus_total: 0.0,
                human_deficit_total: 6.0,
                model_total_cost: 2.0,
                human_total_cost: 6.0,
                is_model_more_effective: true,
                cost_savings_by_model: 4.0,
            },
        }],
    };

    assert_eq!(report, expected);
}

#[test]
fn test_empty_dataset() {
    let report = compute(&create_params(1.0, 2.0, 3.0, 4.0), &[]);

    assert!(report.is_model_more_effective);
    assert_eq!(report.cost_savings_by_model, 0.0);
    let values = report.actual_roi().unwrap();
    assert_eq!(values.model_total_cost, 0.0);
    assert_eq!(values.human_total_cost, 0.0);
}

#[test]
fn test_overflowing_costs_are_rejected() {
    let params = create_params(10.0, 10.0, 1.0, 1.0);
    let report = compute(&params, &[InputRow::new(0.0, 1e308, -1e308)]);

    let values = report.actual_roi().unwrap();
    assert_eq!(values.model_surplus_total, f64::INFINITY);
    assert!(report.cost_savings_by_model.is_nan());

    match report.ensure_finite().unwrap_err() {
        RoiError::InvalidInput { row, field, .. } => {
            assert_eq!(row, None);
            assert_eq!(field.as_deref(), Some("model_surplus_total"));
        }
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn test_finite_report_passes_overflow_check() {
    let report = compute(&create_params(1.0, 2.0, 1.0, 1.0), &[InputRow::new(10.0, 12.0, 7.0)]);
    assert!(report.ensure_finite().is_ok());
    assert!(compute(&create_params(1.0, 2.0, 1.0, 1.0), &[]).ensure_finite().is_ok());
}

#[test]
fn test_human_cheaper_gives_negative_savings() {
    let params = create_params(1.0, 1.0, 10.0, 1.0);
    let rows = [InputRow::new(100.0, 101.0, 103.0)];

    let report = compute(&params, &rows);

    // Model: 1 * 1 * 10 = 10, human: 3 * 1 * 1 = 3
    assert!(!report.is_model_more_effective);
    assert_eq!(report.cost_savings_by_model, -7.0);
}

#[test]
fn test_equal_costs_favour_model() {
    let params = create_params(1.0, 1.0, 1.0, 1.0);
    let rows = [InputRow::new(5.0, 7.0, 3.0)];

    let report = compute(&params, &rows);

    assert_eq!(report.cost_savings_by_model, 0.0);
    assert!(report.is_model_more_effective);
}

#[test]
fn test_totals_accumulate_over_rows() {
    let params = create_params(2.0, 3.0, 1.0, 0.5);
    let rows = [
        InputRow::new(10.0, 11.0, 8.0),
        InputRow::new(20.0, 18.0, 24.0),
        InputRow::new(30.0, 30.0, 30.0),
    ];

    let totals = aggregate(&params, &rows);

    assert_eq!(totals.model_surplus_total, 2.0);
    assert_eq!(totals.model_deficit_total, 6.0);
    assert_eq!(totals.human_surplus_total, 4.0);
    assert_eq!(totals.human_deficit_total, 3.0);
    assert_eq!(totals.model_total_cost(), 8.0);
    assert_eq!(totals.human_total_cost(), 7.0);
}

#[test]
fn test_combine_matches_sequential_fold() {
    let params = create_params(1.5, 2.5, 0.75, 1.25);
    let rows = [
        InputRow::new(1.0, 2.0, 0.0),
        InputRow::new(4.0, 3.0, 8.0),
        InputRow::new(9.0, 9.5, 7.0),
        InputRow::new(2.0, 2.0, 2.5),
    ];

    let (left, right) = rows.split_at(2);
    let combined = aggregate(&params, left).combine(aggregate(&params, right));
    let sequential = aggregate(&params, &rows);

    assert!(approx_eq(combined.model_total_cost(), sequential.model_total_cost()));
    assert!(approx_eq(combined.human_total_cost(), sequential.human_total_cost()));
}

#[test]
fn test_summary_mentions_both_costs() {
    let report = compute(&create_params(1.0, 2.0, 1.0, 1.0), &[InputRow::new(10.0, 12.0, 7.0)]);
    let summary = report.summary();

    assert!(summary.contains("Model cost: 2.00"));
    assert!(summary.contains("Human cost: 6.00"));
    assert!(summary.contains("Savings by model: 4.00"));
}

#[test]
fn test_report_serializes_to_harness_shape() {
    let report = compute(&create_params(1.0, 2.0, 1.0, 1.0), &[InputRow::new(10.0, 12.0, 7.0)]);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["is_model_more_effective"], serde_json::json!(true));
    assert_eq!(json["cost_savings_by_model"], serde_json::json!(4.0));

    let test = &json["business_value"][0];
    assert_eq!(test["test_name"], "Actual ROI");
    assert_eq!(test["test_category"], "business_value");
    assert_eq!(test["test_type"], "actual_roi");
    assert_eq!(test["test_id"], "business_value_actual_roi");

    let values = test["values"].as_object().unwrap();
    let mut keys: Vec<&str> = values.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "cost_savings_by_model",
            "human_deficit_total",
            "human_surplus_total",
            "human_total_cost",
            "is_model_more_effective",
            "model_deficit_total",
            "model_surplus_total",
            "model_total_cost",
        ]
    );
}

proptest! {
    #[test]
    fn prop_surplus_and_deficit_are_exclusive(
        prediction in -1e6f64..1e6,
        actual in -1e6f64..1e6,
    ) {
        let split = surplus_deficit(prediction, actual);
        prop_assert!(split.surplus >= 0.0 && split.deficit >= 0.0);
        if split.surplus > 0.0 {
            prop_assert_eq!(split.deficit, 0.0);
        }
        if split.deficit > 0.0 {
            prop_assert_eq!(split.surplus, 0.0);
        }
    }

    #[test]
    fn prop_row_permutation_does_not_change_totals(
        rows in rows_strategy(),
        rotation in 0usize..64,
    ) {
        let params = create_params(1.0, 2.0, 0.5, 1.5);
        let mut permuted = rows.clone();
        permuted.reverse();
        if !permuted.is_empty() {
            let k = rotation % permuted.len();
            permuted.rotate_left(k);
        }

        let original = compute(&params, &rows);
        let shuffled = compute(&params, &permuted);

        let a = original.actual_roi().unwrap();
        let b = shuffled.actual_roi().unwrap();
        prop_assert!(approx_eq(a.model_surplus_total, b.model_surplus_total));
        prop_assert!(approx_eq(a.model_deficit_total, b.model_deficit_total));
        prop_assert!(approx_eq(a.human_surplus_total, b.human_surplus_total));
        prop_assert!(approx_eq(a.human_deficit_total, b.human_deficit_total));
    }

    #[test]
    fn prop_doubling_model_inference_doubles_model_cost(
        rows in rows_strategy(),
        surplus in 0.01f64..100.0,
        deficit in 0.01f64..100.0,
        model in 0.01f64..100.0,
        human in 0.01f64..100.0,
    ) {
        let base = compute(&create_params(surplus, deficit, model, human), &rows);
        let doubled = compute(&create_params(surplus, deficit, model * 2.0, human), &rows);

        let base = base.actual_roi().unwrap();
        let doubled = doubled.actual_roi().unwrap();
        prop_assert_eq!(doubled.model_total_cost, base.model_total_cost * 2.0);
        prop_assert_eq!(doubled.human_total_cost, base.human_total_cost);
    }

    #[test]
    fn prop_perfect_model_has_zero_cost(
        rows in rows_strategy(),
        surplus in 0.0f64..100.0,
        deficit in 0.0f64..100.0,
    ) {
        let perfect: Vec<InputRow> = rows
            .iter()
            .map(|r| InputRow::new(r.actual, r.actual, r.human_pred))
            .collect();

        let report = compute(&create_params(surplus, deficit, 1.0, 1.0), &perfect);

        prop_assert_eq!(report.actual_roi().unwrap().model_total_cost, 0.0);
        prop_assert!(report.is_model_more_effective);
    }

    #[test]
    fn prop_top_level_duplicates_nested_values(rows in rows_strategy()) {
        let report = compute(&create_params(1.0, 3.0, 2.0, 1.0), &rows);
        let nested = report.actual_roi().unwrap();

        prop_assert_eq!(report.cost_savings_by_model, nested.cost_savings_by_model);
        prop_assert_eq!(report.is_model_more_effective, nested.is_model_more_effective);
        prop_assert_eq!(
            nested.cost_savings_by_model,
            nested.human_total_cost - nested.model_total_cost
        );
    }

    #[test]
    fn prop_parallel_matches_sequential(rows in rows_strategy()) {
        let params = create_params(1.25, 0.5, 3.0, 2.0);
        let sequential = compute(&params, &rows);
        let parallel = compute_parallel(&params, &rows);

        let a = sequential.actual_roi().unwrap();
        let b = parallel.actual_roi().unwrap();
        prop_assert!(approx_eq(a.model_total_cost, b.model_total_cost));
        prop_assert!(approx_eq(a.human_total_cost, b.human_total_cost));
    }
}
