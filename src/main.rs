mod app;
mod data;
mod pricing;
mod state;
mod ui;

use std::path::Path;

use app::EstimatorApp;
use data::model::Catalog;
use eframe::egui;
use pricing::PriceModel;
use state::AppState;

const DEFAULT_MODEL_PATH: &str = "car_price_model.json";
const DEFAULT_DATA_PATH: &str = "cars.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let model_path = args.next().unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
    let data_path = args.next().unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

    // Both loads are non-fatal: a missing model degrades prediction to an
    // error message, a missing dataset degrades every option list to empty.
    let model = match PriceModel::load(Path::new(&model_path)) {
        Ok(m) => {
            log::info!("Loaded price model from {model_path}");
            Some(m)
        }
        Err(e) => {
            log::error!("Failed to load price model from {model_path}: {e:#}");
            None
        }
    };

    let catalog = match data::loader::load_file(Path::new(&data_path)) {
        Ok(c) => {
            log::info!("Loaded {} listings from {data_path}", c.len());
            c
        }
        Err(e) => {
            log::error!("Failed to load reference data from {data_path}: {e:#}");
            Catalog::empty()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 420.0])
            .with_min_inner_size([560.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Car Price Estimator",
        options,
        Box::new(move |_cc| Ok(Box::new(EstimatorApp::new(AppState::new(model, catalog))))),
    )
}
