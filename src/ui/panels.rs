use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::FieldValue;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar – load status
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Car Price Estimator");
        ui.separator();

        if state.catalog.is_empty() {
            ui.label(RichText::new("No reference data loaded").color(Color32::RED));
        } else {
            ui.label(format!("{} listings loaded", state.catalog.len()));
        }

        ui.separator();

        if state.gateway.is_ready() {
            ui.label("Model ready");
        } else {
            ui.label(RichText::new("Price model not loaded").color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Estimator form – cascading dropdowns, numeric inputs, predict button
// ---------------------------------------------------------------------------

/// Render the estimator form.  All option semantics live in [`AppState`];
/// this function only draws widgets and forwards clicks.
pub fn estimator_form(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);

    // Clone the lists so we can mutate state inside the combo closures.
    let make_options = state.catalog.make_options.clone();
    let model_options = state.model_options.clone();
    let trim_options = state.trim_options.clone();
    let type_options = state.type_options.clone();
    let cylinder_options = state.catalog.cylinder_options.clone();
    let door_options = state.catalog.door_options.clone();

    ui.horizontal(|ui: &mut Ui| {
        if let Some(picked) = dropdown(ui, "Make", &state.selection.make, &make_options) {
            state.select_make(picked);
        }
        if let Some(picked) = dropdown(ui, "Model", &state.selection.model, &model_options) {
            state.select_model(picked);
        }
        if let Some(picked) = dropdown(ui, "Trim", &state.selection.trim, &trim_options) {
            state.select_trim(picked);
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Mileage");
        ui.add(
            egui::DragValue::new(&mut state.selection.mileage)
                .range(200.0..=600_000.0)
                .speed(1_000)
                .fixed_decimals(0),
        );
        if let Some(picked) = dropdown(ui, "Type", &state.selection.vehicle_type, &type_options) {
            state.select_type(picked);
        }
        if let Some(picked) = dropdown(ui, "Cylinder", &state.selection.cylinder, &cylinder_options)
        {
            state.selection.cylinder = Some(picked);
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Liter");
        ui.add(
            egui::DragValue::new(&mut state.selection.liter)
                .range(0.8..=8.0)
                .speed(0.1)
                .fixed_decimals(1),
        );
        if let Some(picked) = dropdown(ui, "Doors", &state.selection.doors, &door_options) {
            state.selection.doors = Some(picked);
        }
        ui.checkbox(&mut state.selection.cruise, "Cruise control");
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(&mut state.selection.sound, "Upgraded sound system");
        ui.checkbox(&mut state.selection.leather, "Leather seats");
    });

    ui.add_space(8.0);

    if ui.button("Estimate price").clicked() {
        state.run_prediction();
    }

    if let Some(result) = &state.result {
        ui.add_space(4.0);
        if result.starts_with("Estimated Price") {
            ui.label(RichText::new(result).strong());
        } else {
            ui.label(RichText::new(result).color(Color32::RED));
        }
    }
}

/// One labelled combo box.  Returns the value the user just picked, if any.
fn dropdown(
    ui: &mut Ui,
    label: &str,
    current: &Option<FieldValue>,
    options: &[FieldValue],
) -> Option<FieldValue> {
    let mut picked = None;
    let selected_text = current.as_ref().map(|v| v.to_string()).unwrap_or_default();

    ui.label(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let is_current = current.as_ref() == Some(option);
                if ui.selectable_label(is_current, option.to_string()).clicked() {
                    picked = Some(option.clone());
                }
            }
        });
    picked
}
