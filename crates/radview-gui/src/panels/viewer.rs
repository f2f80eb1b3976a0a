use std::time::Instant;

use radview_core::consts::MARKER_RADIUS;
use radview_core::geometry::SurfacePoint;
use radview_core::overlay::{build_scene, OverlayShape};
use radview_core::pipeline::RenderPipeline;
use radview_core::session::Status;
use radview_core::viewport::ViewportController;

use crate::app::RadviewApp;

const OVERLAY_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 200, 0);

pub fn show(ctx: &egui::Context, app: &mut RadviewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        app.surface.set_panel(rect);
        app.surface.ensure_viewport();

        handle_dropped_files(ctx, app);

        if app.surface.has_frame() {
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
            handle_mouse(ui, &response, app);
            handle_touch(ui, app);
            draw_image(ui, ctx, app, rect);
            draw_overlay(ui, app);
        } else {
            show_placeholder(ui, &app.session.status);
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(20));
}

fn handle_dropped_files(ctx: &egui::Context, app: &mut RadviewApp) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
        app.open_file(path);
    }
}

fn point(pos: egui::Pos2) -> SurfacePoint {
    SurfacePoint::new(pos.x, pos.y)
}

fn handle_mouse(ui: &egui::Ui, response: &egui::Response, app: &mut RadviewApp) {
    let mode = app.session.mode;

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        for action in app.gestures.wheel(scroll) {
            app.apply_action(action);
        }
    }

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            app.gestures.pointer_pressed(point(pos));
        }
    }
    if response.dragged() {
        if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
            app.gestures.pointer_moved(point(pos));
        }
    }
    // One flush per repaint: intra-frame move bursts collapse into a
    // single delta.
    if let Some(action) = app.gestures.take_pending(mode) {
        app.apply_action(action);
    }
    if response.drag_stopped() {
        let pos = response
            .interact_pointer_pos()
            .or_else(|| ui.input(|i| i.pointer.latest_pos()));
        if let Some(pos) = pos {
            if let Some(action) = app.gestures.pointer_released(point(pos), mode) {
                app.apply_action(action);
            }
        }
    }

    if response.double_clicked() {
        ViewportController::fit_to_screen(&mut app.surface);
    } else if response.clicked() {
        // A below-threshold press never opens a drag session; route it
        // as a press+release pair so Measure mode sees the selection.
        if let Some(pos) = response.interact_pointer_pos() {
            app.gestures.pointer_pressed(point(pos));
            if let Some(action) = app.gestures.pointer_released(point(pos), mode) {
                app.apply_action(action);
            }
        }
    }
}

fn handle_touch(ui: &egui::Ui, app: &mut RadviewApp) {
    let events = ui.input(|i| i.events.clone());
    for event in events {
        let egui::Event::Touch { id, phase, pos, .. } = event else {
            continue;
        };
        let p = point(pos);
        match phase {
            egui::TouchPhase::Start => {
                app.touches.retain(|(tid, _)| *tid != id);
                app.touches.push((id, p));
                let points = touch_points(&app.touches);
                if let Some(action) = app.gestures.touch_started(&points, Instant::now()) {
                    app.apply_action(action);
                }
            }
            egui::TouchPhase::Move => {
                if let Some(entry) = app.touches.iter_mut().find(|(tid, _)| *tid == id) {
                    entry.1 = p;
                }
                let points = touch_points(&app.touches);
                let mode = app.session.mode;
                for action in app.gestures.touch_moved(&points, mode) {
                    app.apply_action(action);
                }
            }
            egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                app.touches.retain(|(tid, _)| *tid != id);
                let remaining = touch_points(&app.touches);
                let mode = app.session.mode;
                if let Some(action) = app.gestures.touch_ended(p, &remaining, mode) {
                    app.apply_action(action);
                }
            }
        }
    }
}

fn touch_points(touches: &[(egui::TouchId, SurfacePoint)]) -> Vec<SurfacePoint> {
    touches.iter().map(|(_, p)| *p).collect()
}

fn draw_image(ui: &egui::Ui, ctx: &egui::Context, app: &mut RadviewApp, rect: egui::Rect) {
    let Some(vp) = app.surface.viewport() else {
        return;
    };
    let Some((texture_id, tex_size)) = app
        .surface
        .texture(ctx)
        .map(|t| (t.id(), egui::vec2(t.size()[0] as f32, t.size()[1] as f32)))
    else {
        return;
    };

    // Texture pixels already carry window/flip/rotation; scale and pan
    // position the rect. Translation is in image pixels, so it scales.
    let center = rect.center() + egui::vec2(vp.translation.x, vp.translation.y) * vp.scale;
    let img_rect = egui::Rect::from_center_size(center, tex_size * vp.scale);

    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_overlay(ui: &egui::Ui, app: &RadviewApp) {
    let scene = build_scene(&app.session.measure, &app.session.status, &app.surface);
    let painter = ui.painter();

    for shape in scene {
        match shape {
            OverlayShape::Marker { at } => {
                painter.circle_filled(egui::pos2(at.x, at.y), MARKER_RADIUS, OVERLAY_COLOR);
            }
            OverlayShape::Segment { a, b } => {
                painter.line_segment(
                    [egui::pos2(a.x, a.y), egui::pos2(b.x, b.y)],
                    egui::Stroke::new(2.0, OVERLAY_COLOR),
                );
            }
            OverlayShape::Label { at, text } => {
                let font = egui::FontId::proportional(13.0);
                let galley = painter.layout_no_wrap(text, font, egui::Color32::WHITE);
                let anchor = egui::pos2(at.x, at.y - 12.0);
                let text_rect = egui::Align2::CENTER_BOTTOM.anchor_size(anchor, galley.size());
                painter.rect_filled(
                    text_rect.expand(4.0),
                    3.0,
                    egui::Color32::from_black_alpha(200),
                );
                painter.galley(text_rect.min, galley, egui::Color32::WHITE);
            }
        }
    }
}

fn show_placeholder(ui: &mut egui::Ui, status: &Status) {
    let (text, color) = match status {
        Status::Loading(msg) => (msg.clone(), egui::Color32::from_gray(160)),
        Status::Error(msg) => (msg.clone(), egui::Color32::LIGHT_RED),
        _ => (
            "Open or drop a series file to begin".to_string(),
            egui::Color32::from_gray(100),
        ),
    };
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new(text).size(18.0).color(color));
    });
}
