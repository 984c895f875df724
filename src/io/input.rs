//! Readers that turn a table into [`InputRow`]s.
//!
//! Columns are addressed by the configured field names. Any missing column,
//! missing field, or value that is not a finite number fails the whole read:
//! skipping rows would silently change the totals.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::FieldNames;
use crate::errors::RoiError;
use crate::roi::InputRow;

/// Layout of a tabular input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// A JSON array of objects
    Json,
    /// One JSON object per line
    Jsonl,
}

impl InputFormat {
    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("jsonl") | Some("ndjson") => Self::Jsonl,
            _ => Self::Csv,
        }
    }
}

/// Read rows from a file; `format` overrides extension detection.
pub fn read_rows_from_path(
    path: &Path,
    format: Option<InputFormat>,
    fields: &FieldNames,
) -> Result<Vec<InputRow>, RoiError> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    let file =
        File::open(path).map_err(|e| RoiError::io("Failed to open input file", Some(path), e))?;

    let rows = read_rows(BufReader::new(file), format, fields)?;
    log::info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn read_rows<R: Read>(
    reader: R,
    format: InputFormat,
    fields: &FieldNames,
) -> Result<Vec<InputRow>, RoiError> {
    match format {
        InputFormat::Csv => read_csv(reader, fields),
        InputFormat::Json => read_json(reader, fields),
        InputFormat::Jsonl => read_jsonl(BufReader::new(reader), fields),
    }
}

/// Column positions of the three configured fields in a CSV header.
struct ColumnIndices {
    actual: usize,
    model_pred: usize,
    human_pred: usize,
}

impl ColumnIndices {
    fn locate(headers: &csv::StringRecord, fields: &FieldNames) -> Result<Self, RoiError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| RoiError::missing_column(name))
        };

        Ok(Self {
            actual: find(&fields.actuals)?,
            model_pred: find(&fields.model_pred)?,
            human_pred: find(&fields.human_pred)?,
        })
    }

    fn extract(
        &self,
        record: &csv::StringRecord,
        row: usize,
        fields: &FieldNames,
    ) -> Result<InputRow, RoiError> {
        let value = |index: usize, name: &str| -> Result<f64, RoiError> {
            let raw = record
                .get(index)
                .ok_or_else(|| RoiError::invalid_value(row, name, "field is missing"))?;
            parse_number(raw, row, name)
        };

        Ok(InputRow::new(
            value(self.actual, &fields.actuals)?,
            value(self.model_pred, &fields.model_pred)?,
            value(self.human_pred, &fields.human_pred)?,
        ))
    }
}

pub fn read_csv<R: Read>(reader: R, fields: &FieldNames) -> Result<Vec<InputRow>, RoiError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| RoiError::malformed_input(format!("Failed to read CSV header: {e}")))?
        .clone();
    if headers.is_empty() {
        return Err(RoiError::malformed_input(
            "CSV input is empty; expected a header row naming the columns",
        ));
    }
    let columns = ColumnIndices::locate(&headers, fields)?;

    reader
        .records()
        .enumerate()
        .map(|(index, record)| -> Result<InputRow, RoiError> {
            let row = index + 1;
            let record = record.map_err(|e| RoiError::invalid_row(row, e.to_string()))?;
            columns.extract(&record, row, fields)
        })
        .collect()
}

pub fn read_json<R: Read>(reader: R, fields: &FieldNames) -> Result<Vec<InputRow>, RoiError> {
    let records: Vec<Value> = serde_json::from_reader(reader).map_err(|e| {
        RoiError::malformed_input(format!("Expected a JSON array of records: {e}"))
    })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| json_record_to_row(record, index + 1, fields))
        .collect()
}

/// Blank lines are skipped; row numbers count records, not lines.
pub fn read_jsonl<R: BufRead>(reader: R, fields: &FieldNames) -> Result<Vec<InputRow>, RoiError> {
    let mut rows = Vec::new();

    for line in reader.lines() {
        let row = rows.len() + 1;
        let line = line.map_err(|e| RoiError::invalid_row(row, e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = serde_json::from_str(&line)
            .map_err(|e| RoiError::invalid_row(row, format!("invalid JSON: {e}")))?;
        rows.push(json_record_to_row(&record, row, fields)?);
    }

    Ok(rows)
}

fn json_record_to_row(record: &Value, row: usize, fields: &FieldNames) -> Result<InputRow, RoiError> {
    let object = record
        .as_object()
        .ok_or_else(|| RoiError::invalid_row(row, "record is not a JSON object"))?;

    Ok(InputRow::new(
        json_number(object, row, &fields.actuals)?,
        json_number(object, row, &fields.model_pred)?,
        json_number(object, row, &fields.human_pred)?,
    ))
}

fn json_number(object: &Map<String, Value>, row: usize, field: &str) -> Result<f64, RoiError> {
    match object.get(field) {
        None => Err(RoiError::invalid_value(row, field, "field is missing")),
        Some(Value::Null) => Err(RoiError::invalid_value(row, field, "value is null")),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| RoiError::invalid_value(row, field, format!("{n} is not representable")))
            .and_then(|v| ensure_finite(v, row, field)),
        Some(Value::String(s)) => parse_number(s, row, field),
        Some(other) => Err(RoiError::invalid_value(
            row,
            field,
            format!("expected a number, got {other}"),
        )),
    }
}

/// Parse a textual cell as a finite `f64`.
pub fn parse_number(raw: &str, row: usize, field: &str) -> Result<f64, RoiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RoiError::invalid_value(row, field, "value is empty"));
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| RoiError::invalid_value(row, field, format!("'{trimmed}' is not numeric")))?;
    ensure_finite(value, row, field)
}

fn ensure_finite(value: f64, row: usize, field: &str) -> Result<f64, RoiError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RoiError::invalid_value(
            row,
            field,
            format!("value must be finite, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use indoc::indoc;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn fields() -> FieldNames {
        FieldNames {
            actuals: "actual".to_string(),
            model_pred: "model".to_string(),
            human_pred: "human".to_string(),
        }
    }

    #[test]
    fn test_read_csv_by_header_name() {
        let data = indoc! {"
            id, human, actual, model, note
            a, 7, 10, 12, first
            b, 5.5, 5, 4.5, second
        "};

        let rows = read_csv(Cursor::new(data), &fields()).unwrap();

        assert_eq!(
            rows,
            vec![InputRow::new(10.0, 12.0, 7.0), InputRow::new(5.0, 4.5, 5.5)]
        );
    }

    #[test]
    fn test_read_csv_header_only_is_empty() {
        let rows = read_csv(Cursor::new("actual,model,human\n"), &fields()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_read_csv_zero_bytes_reports_missing_header() {
        let err = read_csv(Cursor::new(""), &fields()).unwrap_err();

        assert_eq!(err.code(), ErrorCode::INPUT_MALFORMED);
        assert!(err.to_string().contains("expected a header row"));
        assert!(!err.to_string().contains("column not found"));
    }

    #[test]
    fn test_read_csv_missing_column() {
        let err = read_csv(Cursor::new("actual,model\n1,2\n"), &fields()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::INPUT_MALFORMED);
        assert!(err.to_string().contains("'human'"));
    }

    #[test]
    fn test_read_csv_rejects_non_numeric_value() {
        let data = "actual,model,human\n1,2,3\n4,five,6\n";
        match read_csv(Cursor::new(data), &fields()).unwrap_err() {
            RoiError::InvalidInput { row, field, message } => {
                assert_eq!(row, Some(2));
                assert_eq!(field.as_deref(), Some("model"));
                assert_eq!(message, "'five' is not numeric");
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_read_csv_rejects_empty_and_nan_cells() {
        let empty = read_csv(Cursor::new("actual,model,human\n1,,3\n"), &fields()).unwrap_err();
        assert!(empty.to_string().contains("value is empty"));

        let nan = read_csv(Cursor::new("actual,model,human\nNaN,2,3\n"), &fields()).unwrap_err();
        assert!(nan.to_string().contains("must be finite"));
    }

    #[test]
    fn test_read_csv_ragged_row_fails() {
        let err = read_csv(Cursor::new("actual,model,human\n1,2\n"), &fields()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::INPUT_INVALID_VALUE);
    }

    #[test]
    fn test_read_json_array() {
        let data = r#"[
            {"actual": 10, "model": 12.0, "human": "7"},
            {"actual": 1, "model": 1, "human": 1, "extra": null}
        ]"#;

        let rows = read_json(Cursor::new(data), &fields()).unwrap();
        assert_eq!(
            rows,
            vec![InputRow::new(10.0, 12.0, 7.0), InputRow::new(1.0, 1.0, 1.0)]
        );
    }

    #[test]
    fn test_read_json_null_and_missing_fields() {
        let null = read_json(
            Cursor::new(r#"[{"actual": 1, "model": null, "human": 2}]"#),
            &fields(),
        )
        .unwrap_err();
        assert!(null.to_string().contains("value is null"));

        let missing = read_json(Cursor::new(r#"[{"actual": 1, "model": 2}]"#), &fields())
            .unwrap_err();
        assert!(missing.to_string().contains("field 'human'"));
    }

    #[test]
    fn test_read_json_rejects_non_array() {
        let err = read_json(Cursor::new(r#"{"actual": 1}"#), &fields()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::INPUT_MALFORMED);
    }

    #[test]
    fn test_read_json_rejects_boolean_value() {
        let err = read_json(
            Cursor::new(r#"[{"actual": true, "model": 1, "human": 1}]"#),
            &fields(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_read_jsonl_skips_blank_lines() {
        let data = indoc! {r#"
            {"actual": 10, "model": 12, "human": 7}

            {"actual": 3, "model": 2, "human": 4}
        "#};

        let rows = read_jsonl(Cursor::new(data), &fields()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], InputRow::new(3.0, 2.0, 4.0));
    }

    #[test]
    fn test_read_jsonl_reports_record_number() {
        let data = "{\"actual\": 1, \"model\": 1, \"human\": 1}\n[1, 2]\n";
        match read_jsonl(Cursor::new(data), &fields()).unwrap_err() {
            RoiError::InvalidInput { row, .. } => assert_eq!(row, Some(2)),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("d.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("d.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("d.ndjson")), InputFormat::Jsonl);
        assert_eq!(InputFormat::from_path(Path::new("d.tsv")), InputFormat::Csv);
    }

    #[test]
    fn test_read_rows_from_path_uses_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.json");
        fs::write(&path, r#"[{"actual": 2, "model": 3, "human": 1}]"#).unwrap();

        let rows = read_rows_from_path(&path, None, &fields()).unwrap();
        assert_eq!(rows, vec![InputRow::new(2.0, 3.0, 1.0)]);
    }

    #[test]
    fn test_read_rows_from_missing_path() {
        let err = read_rows_from_path(Path::new("/nonexistent/rows.csv"), None, &fields())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::IO_FILE_NOT_FOUND);
    }
}
