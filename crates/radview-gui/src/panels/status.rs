use radview_core::measure::MeasureState;
use radview_core::overlay::format_distance;
use radview_core::pipeline::RenderPipeline;
use radview_core::session::Status;

use crate::app::RadviewApp;

pub fn show(ctx: &egui::Context, app: &mut RadviewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        playback_controls(ui, app);

        // Log area, fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 3 empty lines to prevent layout jump.
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        status_line(ui, app);
        ui.add_space(2.0);
    });
}

fn playback_controls(ui: &mut egui::Ui, app: &mut RadviewApp) {
    let (frame_count, frame_index) = match &app.session.series {
        Some(s) if s.has_multiple_frames() => (s.frame_count, s.frame_index),
        _ => return,
    };

    ui.horizontal(|ui| {
        let label = if app.session.cine.playing { "Pause" } else { "Play" };
        if ui.button(label).clicked() {
            app.toggle_playback();
        }

        let mut index = frame_index;
        if ui
            .add(egui::Slider::new(&mut index, 0..=frame_count - 1).text("Frame"))
            .changed()
        {
            app.set_frame_index(index);
        }

        let mut fps = app.session.cine.fps;
        if ui.add(egui::Slider::new(&mut fps, 1..=30).text("fps")).changed() {
            app.set_fps(fps);
        }
    });
}

fn status_line(ui: &mut egui::Ui, app: &RadviewApp) {
    ui.horizontal(|ui| {
        match &app.session.status {
            Status::Idle => {
                ui.label("No file loaded");
            }
            Status::Loading(msg) => {
                ui.spinner();
                ui.label(msg);
            }
            Status::Ready => {
                if let Some(ref series) = app.session.series {
                    ui.label(series.frame_id());
                    ui.separator();
                    ui.label(format!(
                        "Frame {}/{}",
                        series.frame_index + 1,
                        series.frame_count
                    ));
                }
            }
            Status::Error(msg) => {
                ui.colored_label(egui::Color32::LIGHT_RED, msg);
            }
        }

        if let Some(vp) = app.surface.viewport() {
            ui.separator();
            ui.label(format!("Zoom: {:.0}%", vp.scale * 100.0));
            ui.separator();
            ui.label(format!("W: {:.0} L: {:.0}", vp.window_width, vp.window_center));
        }

        if let MeasureState::TwoPoints {
            distance_px,
            distance_mm,
            ..
        } = app.session.measure
        {
            ui.separator();
            ui.label(format!(
                "Distance: {}",
                format_distance(distance_px, distance_mm)
            ));
        }
    });
}
