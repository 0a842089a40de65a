use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::gateway::FeatureRecord;

// ---------------------------------------------------------------------------
// PriceModel – the persisted regression artifact
// ---------------------------------------------------------------------------

/// A trained linear price model: an intercept, per-column numeric weights,
/// and per-column one-hot categorical weights.  Loaded once at startup from
/// a JSON artifact and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceModel {
    pub intercept: f64,
    /// Numeric column → weight.  Booleans enter the term as 0/1.
    #[serde(default)]
    pub numeric: BTreeMap<String, f64>,
    /// Categorical column → (value → weight).  A column absent here is
    /// simply not used by the model.
    #[serde(default)]
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Prediction failure inside the model itself.  The gateway converts this
/// into a displayable message.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("the model has no weight for {column} = '{value}'")]
    UnknownCategory { column: &'static str, value: String },
}

impl PriceModel {
    /// Load the artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading model artifact {}", path.display()))?;
        serde_json::from_str(&text).context("parsing model artifact JSON")
    }

    /// Predict prices for one feature record.  Returns a sequence to match
    /// the batch-oriented shape of the original estimator; callers take the
    /// first element.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Vec<f64>, PredictError> {
        let mut price = self.intercept;

        for (column, value) in record.categorical_features() {
            if let Some(weights) = self.categorical.get(column) {
                match weights.get(value) {
                    Some(w) => price += w,
                    None => {
                        return Err(PredictError::UnknownCategory {
                            column,
                            value: value.to_string(),
                        })
                    }
                }
            }
        }

        for (column, value) in record.numeric_features() {
            if let Some(w) = self.numeric.get(column) {
                price += w * value;
            }
        }

        Ok(vec![price])
    }
}

#[cfg(test)]
mod tests {
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

    fn model() -> PriceModel {
        let mut numeric = BTreeMap::new();
        numeric.insert("Mileage".to_string(), -0.25);
        numeric.insert("Cruise".to_string(), 500.0);
        let mut make_weights = BTreeMap::new();
        make_weights.insert("Buick".to_string(), 2_000.0);
        let mut categorical = BTreeMap::new();
        categorical.insert("Make".to_string(), make_weights);
        PriceModel {
            intercept: 25_000.0,
            numeric,
            categorical,
        }
    }

    #[test]
    fn predict_sums_intercept_weights_and_numeric_terms() {
        let got = model().predict(&record()).unwrap();
        // 25000 + 2000 (Buick) - 0.25 * 50000 + 500 (cruise on)
        assert_eq!(got, vec![15_000.0]);
    }

    #[test]
    fn unknown_category_is_an_error() {
        let mut rec = record();
        rec.make = "DeLorean".into();
        let err = model().predict(&rec).unwrap_err();
        assert!(err.to_string().contains("Make"));
        assert!(err.to_string().contains("DeLorean"));
    }

    #[test]
    fn columns_not_in_the_model_are_ignored() {
        let bare = PriceModel {
            intercept: 23_456.78,
            numeric: BTreeMap::new(),
            categorical: BTreeMap::new(),
        };
        assert_eq!(bare.predict(&record()).unwrap(), vec![23_456.78]);
    }

    #[test]
    fn artifact_json_round_trips() {
        let text = serde_json::to_string(&model()).unwrap();
        let back: PriceModel = serde_json::from_str(&text).unwrap();
        assert_eq!(back.intercept, 25_000.0);
        assert_eq!(back.predict(&record()).unwrap(), vec![15_000.0]);
    }

    #[test]
    fn missing_weight_tables_default_to_empty() {
        let back: PriceModel = serde_json::from_str(r#"{"intercept": 5.0}"#).unwrap();
        assert_eq!(back.predict(&record()).unwrap(), vec![5.0]);
    }
}
