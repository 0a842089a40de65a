use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Catalog, Field, FieldKind, FieldValue, Listing};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the reference catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – Parquet file with the eleven listing columns
/// * `.json`    – `[{ "Make": "Buick", "Model": "Century", ... }, ...]`
/// * `.csv`     – header row with the column names
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Parse a raw text cell according to its column's kind.  Blank or
/// unparsable cells degrade to `Null` so one bad row never aborts a load.
fn parse_cell(field: Field, raw: &str) -> FieldValue {
    let s = raw.trim();
    if s.is_empty() {
        return FieldValue::Null;
    }
    match field.kind() {
        FieldKind::Text => FieldValue::Text(s.to_string()),
        FieldKind::Integer => match s.parse::<i64>() {
            Ok(i) => FieldValue::Integer(i),
            // Spreadsheet exports often write integers as "6.0"
            Err(_) => match s.parse::<f64>() {
                Ok(f) if f.fract() == 0.0 => FieldValue::Integer(f as i64),
                Ok(f) => FieldValue::Float(f),
                Err(_) => FieldValue::Null,
            },
        },
        FieldKind::Float => s.parse::<f64>().map(FieldValue::Float).unwrap_or(FieldValue::Null),
        FieldKind::Bool => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => FieldValue::Bool(true),
            "false" | "0" => FieldValue::Bool(false),
            _ => FieldValue::Null,
        },
    }
}

/// Snap a natively-typed value onto the column's kind so option sets agree
/// across file formats (a Parquet `Cylinder` stored as Float64 must compare
/// equal to the CSV's integer).
fn coerce(field: Field, value: FieldValue) -> FieldValue {
    match (field.kind(), value) {
        (FieldKind::Integer, FieldValue::Float(f)) if f.fract() == 0.0 => {
            FieldValue::Integer(f as i64)
        }
        (FieldKind::Float, FieldValue::Integer(i)) => FieldValue::Float(i as f64),
        (FieldKind::Bool, FieldValue::Integer(i)) => FieldValue::Bool(i != 0),
        (_, v) => v,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Catalog> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Catalog> {
    let headers: Vec<Option<Field>> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(Field::from_column)
        .collect();

    if !headers.iter().any(|h| h.is_some()) {
        bail!("CSV has none of the expected listing columns");
    }

    let mut listings = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut fields = BTreeMap::new();
        for (idx, cell) in record.iter().enumerate() {
            // Columns outside the listing schema are ignored
            if let Some(Some(field)) = headers.get(idx) {
                fields.insert(*field, parse_cell(*field, cell));
            }
        }
        listings.push(Listing { fields });
    }

    Ok(Catalog::from_listings(listings))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Make": "Buick", "Model": "Century", "Trim": "Base",
///     "Mileage": 8221, "Type": "Sedan", "Cylinder": 6, "Liter": 3.1,
///     "Doors": 4, "Cruise": true, "Sound": true, "Leather": false },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Catalog> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut listings = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            if let Some(field) = Field::from_column(key) {
                fields.insert(field, coerce(field, json_to_value(val)));
            }
        }
        listings.push(Listing { fields });
    }

    Ok(Catalog::from_listings(listings))
}

fn json_to_value(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet catalog.  Any column whose name matches a listing field
/// (case-insensitively) is picked up; everything else is ignored.  Works
/// with files written by both Pandas (`df.to_parquet()`) and Polars
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut listings = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let listing_cols: Vec<(usize, Field)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter_map(|(i, f)| Field::from_column(f.name()).map(|field| (i, field)))
            .collect();

        if listing_cols.is_empty() {
            bail!("Parquet file has none of the expected listing columns");
        }

        for row in 0..batch.num_rows() {
            let mut fields = BTreeMap::new();
            for (col_idx, field) in &listing_cols {
                let value = extract_value(batch.column(*col_idx), row);
                fields.insert(*field, coerce(*field, value));
            }
            listings.push(Listing { fields });
        }
    }

    Ok(Catalog::from_listings(listings))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> FieldValue {
    if col.is_null(row) {
        return FieldValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                FieldValue::Text(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                FieldValue::Text(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            FieldValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            FieldValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            FieldValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            FieldValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            FieldValue::Bool(arr.value(row))
        }
        _ => FieldValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Make,Model,Trim,Mileage,Type,Cylinder,Liter,Doors,Cruise,Sound,Leather
Buick,Century,Base,8221,Sedan,6,3.1,4,true,true,false
Buick,LeSabre,Base,20445,Sedan,6.0,3.8,4,1,0,1
Cadillac,CTS,Luxury,13983,Sedan,6,2.8,4,true,false,true
";

    #[test]
    fn csv_rows_parse_with_typed_cells() {
        let catalog = read_csv(csv::Reader::from_reader(SAMPLE_CSV.as_bytes())).unwrap();
        assert_eq!(catalog.len(), 3);

        let first = &catalog.listings[0];
        assert_eq!(first.get(Field::Make), &FieldValue::Text("Buick".into()));
        assert_eq!(first.get(Field::Mileage), &FieldValue::Integer(8221));
        assert_eq!(first.get(Field::Liter), &FieldValue::Float(3.1));
        assert_eq!(first.get(Field::Leather), &FieldValue::Bool(false));

        // "6.0" and "1"/"0" cells coerce onto the column kind
        let second = &catalog.listings[1];
        assert_eq!(second.get(Field::Cylinder), &FieldValue::Integer(6));
        assert_eq!(second.get(Field::Cruise), &FieldValue::Bool(true));
        assert_eq!(second.get(Field::Sound), &FieldValue::Bool(false));
    }

    #[test]
    fn csv_static_option_lists_are_built_at_load() {
        let catalog = read_csv(csv::Reader::from_reader(SAMPLE_CSV.as_bytes())).unwrap();
        assert_eq!(
            catalog.make_options,
            vec![
                FieldValue::Text("Buick".into()),
                FieldValue::Text("Cadillac".into()),
            ]
        );
        assert_eq!(catalog.cylinder_options, vec![FieldValue::Integer(6)]);
        assert_eq!(catalog.door_options, vec![FieldValue::Integer(4)]);
    }

    #[test]
    fn csv_without_listing_columns_is_rejected() {
        let err = read_csv(csv::Reader::from_reader(&b"a,b\n1,2\n"[..])).unwrap_err();
        assert!(err.to_string().contains("expected listing columns"));
    }

    #[test]
    fn blank_and_garbage_cells_become_null() {
        let csv = "Make,Model,Mileage,Liter\nBuick,,n/a,\n";
        let catalog = read_csv(csv::Reader::from_reader(csv.as_bytes())).unwrap();
        let row = &catalog.listings[0];
        assert_eq!(row.get(Field::Model), &FieldValue::Null);
        assert_eq!(row.get(Field::Mileage), &FieldValue::Null);
        assert_eq!(row.get(Field::Liter), &FieldValue::Null);
        // absent column reads as null too
        assert_eq!(row.get(Field::Doors), &FieldValue::Null);
    }

    #[test]
    fn json_records_parse_with_native_types() {
        let text = r#"[
            {"Make": "Buick", "Model": "Century", "Cylinder": 6.0,
             "Liter": 3.1, "Cruise": true, "Trim": null}
        ]"#;
        let catalog = parse_json(text).unwrap();
        let row = &catalog.listings[0];
        assert_eq!(row.get(Field::Cylinder), &FieldValue::Integer(6));
        assert_eq!(row.get(Field::Liter), &FieldValue::Float(3.1));
        assert_eq!(row.get(Field::Cruise), &FieldValue::Bool(true));
        assert_eq!(row.get(Field::Trim), &FieldValue::Null);
    }

    #[test]
    fn json_top_level_must_be_an_array() {
        assert!(parse_json(r#"{"Make": "Buick"}"#).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("cars.xls")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
