use radview_core::measure::MeasureState;
use radview_core::session::Mode;
use radview_core::viewport::ViewportController;

use crate::app::RadviewApp;

pub fn show(ctx: &egui::Context, app: &mut RadviewApp) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            if ui.button("Open...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image series", &["rvs"])
                    .add_filter("Images", &["png", "jpg", "jpeg", "tif", "tiff", "bmp"])
                    .pick_file()
                {
                    app.open_file(path);
                }
            }

            ui.separator();
            ui.selectable_value(&mut app.session.mode, Mode::WindowLevel, "W/L");
            ui.selectable_value(&mut app.session.mode, Mode::Pan, "Pan");
            ui.selectable_value(&mut app.session.mode, Mode::Measure, "Measure");
            ui.separator();

            let ready = app.session.status.is_ready();
            ui.add_enabled_ui(ready, |ui| {
                if ui.button("Rotate 90\u{b0}").clicked() {
                    ViewportController::rotate_cw(&mut app.surface);
                }
                if ui.button("Flip H").clicked() {
                    ViewportController::toggle_hflip(&mut app.surface);
                }
                if ui.button("Flip V").clicked() {
                    ViewportController::toggle_vflip(&mut app.surface);
                }
                if ui.button("Invert").clicked() {
                    ViewportController::toggle_invert(&mut app.surface);
                }
                ui.separator();
                if ui.button("Fit").clicked() {
                    ViewportController::fit_to_screen(&mut app.surface);
                }
                if ui.button("Reset").clicked() {
                    ViewportController::reset_viewport(&mut app.surface);
                }

                let has_measurement = !matches!(app.session.measure, MeasureState::Off);
                if ui
                    .add_enabled(has_measurement, egui::Button::new("Clear measure"))
                    .clicked()
                {
                    app.session.measure = MeasureState::Off;
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("About").clicked() {
                    app.show_about = true;
                }
            });
        });
        ui.add_space(2.0);
    });
}
