use crate::data::filter::{FilterMap, filter_map};
use crate::data::model::{Catalog, Field, FieldValue};
use crate::pricing::{FeatureRecord, PredictionGateway, PriceModel};

// ---------------------------------------------------------------------------
// Selection – the user's current partial choice
// ---------------------------------------------------------------------------

/// Everything the form currently holds.  Owned by the presentation layer;
/// the core only ever sees snapshots of it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub make: Option<FieldValue>,
    pub model: Option<FieldValue>,
    pub trim: Option<FieldValue>,
    pub vehicle_type: Option<FieldValue>,
    pub cylinder: Option<FieldValue>,
    pub doors: Option<FieldValue>,
    pub mileage: f64,
    pub liter: f64,
    pub cruise: bool,
    pub sound: bool,
    pub leather: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            make: None,
            model: None,
            trim: None,
            vehicle_type: None,
            cylinder: None,
            doors: None,
            mileage: 50_000.0,
            liter: 2.0,
            cruise: true,
            sound: true,
            leather: false,
        }
    }
}

impl Selection {
    /// Assemble the fixed-shape prediction input.  Unset dropdowns pass
    /// through as empty strings / zeros; the gateway does no validation
    /// here, so an incomplete selection simply fails inside the model and
    /// comes back as a message.
    pub fn to_feature_record(&self) -> FeatureRecord {
        fn text(v: &Option<FieldValue>) -> String {
            v.as_ref().map(|v| v.to_string()).unwrap_or_default()
        }
        fn int(v: &Option<FieldValue>) -> i64 {
            v.as_ref().and_then(FieldValue::as_f64).map(|f| f as i64).unwrap_or(0)
        }
        FeatureRecord {
            make: text(&self.make),
            model: text(&self.model),
            trim: text(&self.trim),
            mileage: self.mileage,
            vehicle_type: text(&self.vehicle_type),
            cylinder: int(&self.cylinder),
            liter: self.liter,
            doors: int(&self.doors),
            cruise: self.cruise,
            sound: self.sound,
            leather: self.leather,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  Holds the read-only
/// catalog and gateway, the user's selection, and the dependent option
/// lists for the cascading dropdowns (Make → Model → Trim → Type).
pub struct AppState {
    pub catalog: Catalog,
    pub gateway: PredictionGateway,
    pub selection: Selection,

    /// Options for `Model`, valid for the current `make`.
    pub model_options: Vec<FieldValue>,
    /// Options for `Trim`, valid for the current `make` + `model`.
    pub trim_options: Vec<FieldValue>,
    /// Options for `Type`, valid for the current `make` + `model` + `trim`.
    pub type_options: Vec<FieldValue>,

    /// Last prediction outcome shown in the result box.
    pub result: Option<String>,
}

impl AppState {
    pub fn new(model: Option<PriceModel>, catalog: Catalog) -> Self {
        AppState {
            catalog,
            gateway: PredictionGateway::new(model),
            selection: Selection::default(),
            model_options: Vec::new(),
            trim_options: Vec::new(),
            type_options: Vec::new(),
            result: None,
        }
    }

    fn upstream_filters(&self, through: Field) -> FilterMap {
        let mut pairs = Vec::new();
        let chain: [(Field, &Option<FieldValue>); 3] = [
            (Field::Make, &self.selection.make),
            (Field::Model, &self.selection.model),
            (Field::Trim, &self.selection.trim),
        ];
        for (field, value) in chain {
            pairs.push((
                field,
                value.clone().unwrap_or(FieldValue::Null),
            ));
            if field == through {
                break;
            }
        }
        filter_map(pairs)
    }

    /// Select a make.  Clears model, trim and type outright (even when the
    /// old values would still be compatible) and recomputes model options.
    pub fn select_make(&mut self, value: FieldValue) {
        self.selection.make = Some(value);
        self.selection.model = None;
        self.selection.trim = None;
        self.selection.vehicle_type = None;
        self.trim_options.clear();
        self.type_options.clear();
        self.model_options = self
            .catalog
            .options_for(Field::Model, &self.upstream_filters(Field::Make));
    }

    /// Select a model.  Clears trim and type and recomputes trim options.
    pub fn select_model(&mut self, value: FieldValue) {
        self.selection.model = Some(value);
        self.selection.trim = None;
        self.selection.vehicle_type = None;
        self.type_options.clear();
        self.trim_options = self
            .catalog
            .options_for(Field::Trim, &self.upstream_filters(Field::Model));
    }

    /// Select a trim.  Clears type and recomputes type options.
    pub fn select_trim(&mut self, value: FieldValue) {
        self.selection.trim = Some(value);
        self.selection.vehicle_type = None;
        self.type_options = self
            .catalog
            .options_for(Field::Type, &self.upstream_filters(Field::Trim));
    }

    pub fn select_type(&mut self, value: FieldValue) {
        self.selection.vehicle_type = Some(value);
    }

    /// Run one prediction from the current selection and store the message.
    pub fn run_prediction(&mut self) {
        let record = self.selection.to_feature_record();
        log::debug!("predicting for {record:?}");
        self.result = Some(self.gateway.predict(&record));
    }
}
