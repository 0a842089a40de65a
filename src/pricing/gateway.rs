use serde::Serialize;

use super::artifact::PriceModel;

// ---------------------------------------------------------------------------
// FeatureRecord – the fixed-shape prediction input
// ---------------------------------------------------------------------------

/// The single-row input assembled for one prediction call.  Field order
/// matches the reference dataset columns; values are passed through exactly
/// as given, with no range validation at this layer.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRecord {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Trim")]
    pub trim: String,
    #[serde(rename = "Mileage")]
    pub mileage: f64,
    #[serde(rename = "Type")]
    pub vehicle_type: String,
    #[serde(rename = "Cylinder")]
    pub cylinder: i64,
    #[serde(rename = "Liter")]
    pub liter: f64,
    #[serde(rename = "Doors")]
    pub doors: i64,
    #[serde(rename = "Cruise")]
    pub cruise: bool,
    #[serde(rename = "Sound")]
    pub sound: bool,
    #[serde(rename = "Leather")]
    pub leather: bool,
}

impl FeatureRecord {
    /// The categorical columns and their values, in schema order.
    pub fn categorical_features(&self) -> [(&'static str, &str); 4] {
        [
            ("Make", self.make.as_str()),
            ("Model", self.model.as_str()),
            ("Trim", self.trim.as_str()),
            ("Type", self.vehicle_type.as_str()),
        ]
    }

    /// The numeric columns and their values; booleans contribute 0/1.
    pub fn numeric_features(&self) -> [(&'static str, f64); 7] {
        [
            ("Mileage", self.mileage),
            ("Cylinder", self.cylinder as f64),
            ("Liter", self.liter),
            ("Doors", self.doors as f64),
            ("Cruise", self.cruise as i64 as f64),
            ("Sound", self.sound as i64 as f64),
            ("Leather", self.leather as i64 as f64),
        ]
    }
}

// ---------------------------------------------------------------------------
// PredictionGateway
// ---------------------------------------------------------------------------

/// Wraps the optional model capability and always answers with a
/// displayable string: the formatted estimate on success, a descriptive
/// failure message otherwise.  Stateless per call, no retries.
#[derive(Debug, Default)]
pub struct PredictionGateway {
    model: Option<PriceModel>,
}

impl PredictionGateway {
    pub fn new(model: Option<PriceModel>) -> Self {
        PredictionGateway { model }
    }

    /// Whether the model capability loaded at startup.
    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Run one prediction and format the result.  Never panics and never
    /// returns an error; every outcome is a message for the result box.
    pub fn predict(&self, record: &FeatureRecord) -> String {
        let Some(model) = &self.model else {
            return "Error: the price model could not be loaded, no estimate available."
                .to_string();
        };

        match model.predict(record) {
            Ok(prices) => match prices.first() {
                Some(price) => {
                    format!("Estimated Price: ${}", format_thousands(price.trunc() as i64))
                }
                None => "Error: the model returned no prediction.".to_string(),
            },
            Err(e) => format!("Prediction failed: {e}"),
        }
    }
}

/// Group an integer's digits with commas: `23456` → `"23,456"`.
fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn record() -> FeatureRecord {
        FeatureRecord {
            make: "Buick".into(),
            model: "Century".into(),
            trim: "Base".into(),
            mileage: 50_000.0,
            vehicle_type: "Sedan".into(),
            cylinder: 6,
            liter: 3.1,
            doors: 4,
            cruise: true,
            sound: true,
            leather: false,
        }
    }

    /// A model whose prediction is a constant, regardless of input.
    fn stub_model(price: f64) -> PriceModel {
        PriceModel {
            intercept: price,
            numeric: BTreeMap::new(),
            categorical: BTreeMap::new(),
        }
    }

    #[test]
    fn missing_model_yields_failure_without_an_estimate() {
        let gateway = PredictionGateway::new(None);
        let msg = gateway.predict(&record());
        assert!(msg.starts_with("Error:"));
        assert!(!msg.contains(|c: char| c.is_ascii_digit()));
    }

    #[test]
    fn estimate_is_truncated_and_comma_grouped() {
        let gateway = PredictionGateway::new(Some(stub_model(23_456.78)));
        assert_eq!(gateway.predict(&record()), "Estimated Price: $23,456");
    }

    #[test]
    fn prediction_error_becomes_a_message() {
        let mut categorical = BTreeMap::new();
        categorical.insert("Make".to_string(), BTreeMap::new());
        let model = PriceModel {
            intercept: 0.0,
            numeric: BTreeMap::new(),
            categorical,
        };
        let gateway = PredictionGateway::new(Some(model));
        let msg = gateway.predict(&record());
        assert!(msg.starts_with("Prediction failed:"));
        assert!(msg.contains("Buick"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(23_456), "23,456");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-45_678), "-45,678");
    }

    #[test]
    fn feature_record_serializes_with_dataset_column_names() {
        let json = serde_json::to_value(record()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "Make", "Model", "Trim", "Mileage", "Type", "Cylinder", "Liter", "Doors", "Cruise",
            "Sound", "Leather",
        ] {
            assert!(obj.contains_key(key), "missing column {key}");
        }
    }
}
