use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use std::path::Path;

use crate::errors::RoiError;
use crate::formatting::FormattingConfig;
use crate::roi::MetricsReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON report
    Json,
    /// Human-readable summary table
    Terminal,
}

pub fn render_json(report: &MetricsReport) -> Result<String, RoiError> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn money(value: f64) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

pub fn render_terminal(report: &MetricsReport, formatting: &FormattingConfig) -> String {
    let mut out = String::new();
    out.push_str(&formatting.header("Forecast ROI: model vs human"));
    out.push('\n');

    if let Some(values) = report.actual_roi() {
        let mut table = Table::new();
        table
            .load_preset(if formatting.use_color() {
                presets::UTF8_FULL
            } else {
                presets::ASCII_FULL
            })
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Cost", "Model", "Human"]);

        table.add_row(vec![
            Cell::new("Surplus"),
            money(values.model_surplus_total),
            money(values.human_surplus_total),
        ]);
        table.add_row(vec![
            Cell::new("Deficit"),
            money(values.model_deficit_total),
            money(values.human_deficit_total),
        ]);
        table.add_row(vec![
            Cell::new("Total"),
            money(values.model_total_cost),
            money(values.human_total_cost),
        ]);

        out.push_str(&table.to_string());
        out.push('\n');
    }

    let verdict = if report.is_model_more_effective {
        formatting.success(&format!(
            "Model is more cost-effective: saves {:.2}",
            report.cost_savings_by_model
        ))
    } else {
        formatting.failure(&format!(
            "Human forecasts are cheaper: model costs {:.2} more",
            -report.cost_savings_by_model
        ))
    };
    out.push_str(&verdict);
    out.push('\n');
    out
}

pub fn render_report(
    report: &MetricsReport,
    format: OutputFormat,
    formatting: &FormattingConfig,
) -> Result<String, RoiError> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Terminal => Ok(render_terminal(report, formatting)),
    }
}

/// Write the rendered report to `output_file`, or stdout when `None`.
pub fn write_report(
    report: &MetricsReport,
    format: OutputFormat,
    formatting: &FormattingConfig,
    output_file: Option<&Path>,
) -> Result<(), RoiError> {
    let rendered = render_report(report, format, formatting)?;

    if let Some(path) = output_file {
        super::write_text_file(path, &rendered)?;
        log::info!("Wrote report to {}", path.display());
    } else {
        println!("{}", rendered.trim_end());
    }
    Ok(())
}
