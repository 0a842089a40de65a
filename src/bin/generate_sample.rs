use std::sync::Arc;

use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

// ---------------------------------------------------------------------------
// Sample data generator: writes cars.csv, cars.parquet and a matching
// car_price_model.json so the estimator is runnable out of the box.
// ---------------------------------------------------------------------------

struct Variant {
    make: &'static str,
    model: &'static str,
    trim: &'static str,
    vtype: &'static str,
    cylinder: i64,
    liter: f64,
    doors: i64,
    base_price: f64,
}

const fn variant(
    make: &'static str,
    model: &'static str,
    trim: &'static str,
    vtype: &'static str,
    cylinder: i64,
    liter: f64,
    doors: i64,
    base_price: f64,
) -> Variant {
    Variant { make, model, trim, vtype, cylinder, liter, doors, base_price }
}

const VARIANTS: &[Variant] = &[
    variant("Buick", "Century", "Base", "Sedan", 6, 3.1, 4, 21_000.0),
    variant("Buick", "LeSabre", "Custom", "Sedan", 6, 3.8, 4, 26_000.0),
    variant("Buick", "LeSabre", "Limited", "Sedan", 6, 3.8, 4, 29_500.0),
    variant("Buick", "Park Avenue", "Base", "Sedan", 6, 3.8, 4, 33_000.0),
    variant("Cadillac", "CTS", "Luxury", "Sedan", 6, 2.8, 4, 39_000.0),
    variant("Cadillac", "Deville", "DHS", "Sedan", 8, 4.6, 4, 45_000.0),
    variant("Cadillac", "XLR-V8", "Hardtop Conv", "Convertible", 8, 4.6, 2, 70_000.0),
    variant("Chevrolet", "Cavalier", "LS", "Coupe", 4, 2.2, 2, 14_500.0),
    variant("Chevrolet", "Cavalier", "LS", "Sedan", 4, 2.2, 4, 15_000.0),
    variant("Chevrolet", "Impala", "LT", "Sedan", 6, 3.8, 4, 22_500.0),
    variant("Chevrolet", "Malibu", "Maxx LS", "Hatchback", 6, 3.5, 4, 20_000.0),
    variant("Pontiac", "Grand Am", "GT", "Coupe", 6, 3.4, 2, 19_500.0),
    variant("Pontiac", "Vibe", "Base", "Wagon", 4, 1.8, 4, 17_000.0),
    variant("SAAB", "9_3", "Arc", "Sedan", 4, 2.0, 4, 30_500.0),
    variant("SAAB", "9_3", "Arc", "Convertible", 4, 2.0, 2, 37_000.0),
    variant("SAAB", "9_5", "Linear", "Wagon", 4, 2.3, 4, 33_500.0),
    variant("Saturn", "Ion", "Level 2", "Sedan", 4, 2.2, 4, 13_500.0),
    variant("Saturn", "L Series", "L300", "Sedan", 6, 3.0, 4, 18_000.0),
];

struct Row {
    make: String,
    model: String,
    trim: String,
    mileage: i64,
    vtype: String,
    cylinder: i64,
    liter: f64,
    doors: i64,
    cruise: bool,
    sound: bool,
    leather: bool,
}

fn build_rows() -> Vec<Row> {
    let mut rows = Vec::new();
    for (v_idx, v) in VARIANTS.iter().enumerate() {
        // Three listings per variant with deterministic mileage spread.
        for copy in 0..3u64 {
            let jitter = (v_idx as u64 * 7 + copy * 13) % 11;
            rows.push(Row {
                make: v.make.to_string(),
                model: v.model.to_string(),
                trim: v.trim.to_string(),
                mileage: 8_000 + (copy as i64) * 9_500 + (jitter as i64) * 311,
                vtype: v.vtype.to_string(),
                cylinder: v.cylinder,
                liter: v.liter,
                doors: v.doors,
                cruise: v.base_price > 18_000.0,
                sound: copy != 1,
                leather: v.base_price > 25_000.0,
            });
        }
    }
    rows
}

fn write_csv(rows: &[Row]) {
    let mut writer = csv::Writer::from_path("cars.csv").expect("creating cars.csv");
    writer
        .write_record([
            "Make", "Model", "Trim", "Mileage", "Type", "Cylinder", "Liter", "Doors", "Cruise",
            "Sound", "Leather",
        ])
        .expect("writing CSV header");
    for r in rows {
        writer
            .write_record([
                r.make.clone(),
                r.model.clone(),
                r.trim.clone(),
                r.mileage.to_string(),
                r.vtype.clone(),
                r.cylinder.to_string(),
                format!("{:.1}", r.liter),
                r.doors.to_string(),
                r.cruise.to_string(),
                r.sound.to_string(),
                r.leather.to_string(),
            ])
            .expect("writing CSV row");
    }
    writer.flush().expect("flushing cars.csv");
}

fn write_parquet(rows: &[Row]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Make", DataType::Utf8, false),
        Field::new("Model", DataType::Utf8, false),
        Field::new("Trim", DataType::Utf8, false),
        Field::new("Mileage", DataType::Int64, false),
        Field::new("Type", DataType::Utf8, false),
        Field::new("Cylinder", DataType::Int64, false),
        Field::new("Liter", DataType::Float64, false),
        Field::new("Doors", DataType::Int64, false),
        Field::new("Cruise", DataType::Boolean, false),
        Field::new("Sound", DataType::Boolean, false),
        Field::new("Leather", DataType::Boolean, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.make.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.model.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.trim.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.mileage))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.vtype.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.cylinder))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.liter))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.doors))),
            Arc::new(BooleanArray::from_iter(rows.iter().map(|r| Some(r.cruise)))),
            Arc::new(BooleanArray::from_iter(rows.iter().map(|r| Some(r.sound)))),
            Arc::new(BooleanArray::from_iter(rows.iter().map(|r| Some(r.leather)))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create("cars.parquet").expect("creating cars.parquet");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

/// Derive a simple linear artifact from the variant table: make/model/trim/
/// type offsets around the shared intercept plus fixed numeric weights.
fn write_model() {
    let mut make_w = serde_json::Map::new();
    let mut model_w = serde_json::Map::new();
    let mut trim_w = serde_json::Map::new();
    let mut type_w = serde_json::Map::new();

    let intercept = 18_000.0;
    for v in VARIANTS {
        let spread = v.base_price - intercept;
        make_w.entry(v.make.to_string()).or_insert(json!(spread * 0.4));
        model_w.entry(v.model.to_string()).or_insert(json!(spread * 0.4));
        trim_w.entry(v.trim.to_string()).or_insert(json!(spread * 0.1));
        type_w.entry(v.vtype.to_string()).or_insert(json!(spread * 0.1));
    }

    let artifact = json!({
        "intercept": intercept,
        "numeric": {
            "Mileage": -0.08,
            "Cylinder": 350.0,
            "Liter": 400.0,
            "Doors": -150.0,
            "Cruise": 450.0,
            "Sound": 275.0,
            "Leather": 600.0
        },
        "categorical": {
            "Make": make_w,
            "Model": model_w,
            "Trim": trim_w,
            "Type": type_w
        }
    });

    let text = serde_json::to_string_pretty(&artifact).expect("serializing artifact");
    std::fs::write("car_price_model.json", text).expect("writing car_price_model.json");
}

fn main() {
    let rows = build_rows();
    write_csv(&rows);
    write_parquet(&rows);
    write_model();
    println!(
        "Wrote {} listings to cars.csv / cars.parquet and the artifact to car_price_model.json",
        rows.len()
    );
}
