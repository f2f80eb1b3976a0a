use std::path::PathBuf;
use std::sync::mpsc;

use radview_core::cine::CineTimer;
use radview_core::geometry::SurfacePoint;
use radview_core::gesture::{GestureAction, GestureRecognizer};
use radview_core::pipeline::RenderPipeline;
use radview_core::session::ViewerSession;
use radview_core::viewport::ViewportController;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::UiState;
use crate::surface::DisplaySurface;
use crate::worker;

pub struct RadviewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    /// Cloned into the cine timer so ticks land in the same queue as
    /// worker results.
    result_tx: mpsc::Sender<WorkerResult>,
    egui_ctx: egui::Context,

    pub session: ViewerSession,
    pub surface: DisplaySurface,
    pub gestures: GestureRecognizer,
    /// Active touch points, keyed by platform touch id.
    pub touches: Vec<(egui::TouchId, SurfacePoint)>,
    pub ui_state: UiState,
    pub show_about: bool,

    /// Decoded frames of the loaded series, indexed by frame_index.
    frames: Vec<radview_core::frame::Frame>,
    cine_timer: Option<CineTimer>,
    /// Bumped on every load request; results carrying an older value
    /// are from a superseded load and get dropped.
    load_generation: u64,
}

impl RadviewApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        Self {
            cmd_tx,
            result_rx,
            result_tx,
            egui_ctx: ctx.clone(),
            session: ViewerSession::default(),
            surface: DisplaySurface::default(),
            gestures: GestureRecognizer::new(),
            touches: Vec::new(),
            ui_state: UiState::default(),
            show_about: false,
            frames: Vec::new(),
            cine_timer: None,
            load_generation: 0,
        }
    }

    /// Begin loading a file. Playback stops, the measurement and the
    /// viewport reset, and any in-flight load becomes stale.
    pub fn open_file(&mut self, path: PathBuf) {
        self.stop_cine();
        self.load_generation += 1;
        self.session
            .begin_load(format!("Opening {}...", path.display()));
        self.surface.clear();
        self.gestures = GestureRecognizer::new();
        self.touches.clear();
        self.frames.clear();

        self.ui_state.add_log(format!("Opening: {}", path.display()));
        let _ = self.cmd_tx.send(WorkerCommand::LoadSeries {
            path,
            generation: self.load_generation,
        });
    }

    /// Drain all pending results from the worker and the cine timer.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::SeriesLoaded { generation, series } => {
                    if generation != self.load_generation {
                        tracing::debug!(generation, "dropping stale load result");
                        continue;
                    }
                    let info = &series.info;
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{}, {} frames, {}-bit)",
                        info.filename.display(),
                        info.width,
                        info.height,
                        info.frame_count,
                        info.bit_depth
                    ));
                    self.session
                        .series_loaded(info.filename.display().to_string(), info);
                    self.frames = series.frames;
                    if let Some(frame) = self.frames.first() {
                        self.surface.set_frame(frame.clone());
                    }
                    // The viewport installs on the next layout pass, once
                    // the panel rect is known.
                }
                WorkerResult::LoadFailed { generation, message } => {
                    if generation != self.load_generation {
                        tracing::debug!(generation, "dropping stale load error");
                        continue;
                    }
                    self.session.load_failed(message.clone());
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::CineTick => {
                    if self.session.cine.playing {
                        self.session.advance_frame();
                        self.show_current_frame();
                    }
                }
            }
        }
    }

    fn show_current_frame(&mut self) {
        let Some(ref series) = self.session.series else {
            return;
        };
        if let Some(frame) = self.frames.get(series.frame_index) {
            self.surface.set_frame(frame.clone());
        }
    }

    pub fn set_frame_index(&mut self, index: usize) {
        let changed = self
            .session
            .series
            .as_mut()
            .is_some_and(|s| s.set_frame_index(index));
        if changed {
            self.show_current_frame();
        }
    }

    pub fn toggle_playback(&mut self) {
        if self.session.cine.playing {
            self.stop_cine();
        } else if self.session.can_play() {
            self.session.cine.playing = true;
            self.start_cine();
        }
    }

    /// Change the playback rate; a running timer restarts at the new
    /// interval.
    pub fn set_fps(&mut self, fps: u32) {
        if fps == self.session.cine.fps {
            return;
        }
        self.session.cine.fps = fps;
        if self.session.cine.playing {
            if let Some(mut timer) = self.cine_timer.take() {
                timer.stop();
            }
            self.start_cine();
        }
    }

    fn start_cine(&mut self) {
        let tx = self.result_tx.clone();
        let ctx = self.egui_ctx.clone();
        self.cine_timer = Some(CineTimer::start(self.session.cine.fps, move || {
            let _ = tx.send(WorkerResult::CineTick);
            ctx.request_repaint();
        }));
    }

    pub fn stop_cine(&mut self) {
        self.session.cine.playing = false;
        if let Some(mut timer) = self.cine_timer.take() {
            timer.stop();
        }
    }

    /// Apply one recognized gesture to the viewport or the measurement.
    pub fn apply_action(&mut self, action: GestureAction) {
        match action {
            GestureAction::Pan { dx, dy } => {
                ViewportController::pan_surface(&mut self.surface, dx, dy);
            }
            GestureAction::WindowLevel { dx, dy } => {
                ViewportController::adjust_window_level(&mut self.surface, dx, dy);
            }
            GestureAction::Zoom { factor } => {
                ViewportController::zoom(&mut self.surface, factor);
            }
            GestureAction::FitToScreen => {
                ViewportController::fit_to_screen(&mut self.surface);
            }
            GestureAction::SelectPoint { at } => {
                if let Some(p) = self.surface.pointer_to_image(at) {
                    self.session.select_point(p);
                }
            }
        }
    }
}

impl eframe::App for RadviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::toolbar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewer::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Radview")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Radview");
                        ui.label("Grayscale Series Viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
