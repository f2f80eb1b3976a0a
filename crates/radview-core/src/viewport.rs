use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_SCALE, MAX_WINDOW_CENTER, MAX_WINDOW_WIDTH, MIN_SCALE, MIN_WINDOW_CENTER,
    MIN_WINDOW_WIDTH, WINDOW_LEVEL_DRAG_GAIN,
};
use crate::pipeline::RenderPipeline;

/// Display rotation, cyclic in 90° steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Rotate a further 90° clockwise.
    pub fn rotated_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// True when the rotation swaps the displayed width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Pan offset in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
}

/// The composed viewport descriptor: how the current image is presented.
///
/// Reset to defaults whenever a new file begins loading; persists across
/// frame changes within the same series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Zoom factor, kept within [`MIN_SCALE`, `MAX_SCALE`].
    pub scale: f32,
    /// Pan offset in image pixels, unconstrained. The image may be panned
    /// fully off-screen; `fit_to_screen`/`reset_viewport` recover.
    pub translation: Translation,
    pub window_width: f32,
    pub window_center: f32,
    pub invert: bool,
    pub hflip: bool,
    pub vflip: bool,
    pub rotation: Rotation,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation: Translation::default(),
            window_width: 255.0,
            window_center: 127.5,
            invert: false,
            hflip: false,
            vflip: false,
            rotation: Rotation::Deg0,
        }
    }
}

impl ViewportState {
    /// Re-apply all range invariants. Called after every mutation so a
    /// descriptor read back from the pipeline can never escape its bounds.
    pub fn clamped(mut self) -> Self {
        self.scale = self.scale.clamp(MIN_SCALE, MAX_SCALE);
        self.window_width = self.window_width.clamp(MIN_WINDOW_WIDTH, MAX_WINDOW_WIDTH);
        self.window_center = self
            .window_center
            .clamp(MIN_WINDOW_CENTER, MAX_WINDOW_CENTER);
        self
    }
}

/// Viewport transform controller.
///
/// Every operation reads the current descriptor from the pipeline,
/// mutates it, clamps, and writes it back. When the pipeline cannot
/// supply a descriptor (nothing displayed yet, mid-teardown) the
/// operation is a silent no-op so rapid input never faults.
pub struct ViewportController;

impl ViewportController {
    pub fn zoom(pipeline: &mut dyn RenderPipeline, factor: f32) {
        Self::mutate(pipeline, |vp| {
            vp.scale *= factor;
        });
    }

    pub fn pan(pipeline: &mut dyn RenderPipeline, dx: f32, dy: f32) {
        Self::mutate(pipeline, |vp| {
            vp.translation.x += dx;
            vp.translation.y += dy;
        });
    }

    /// Pan by a surface-space delta: translation is kept in image pixels,
    /// so drag deltas are divided by the current scale.
    pub fn pan_surface(pipeline: &mut dyn RenderPipeline, dx: f32, dy: f32) {
        Self::mutate(pipeline, |vp| {
            vp.translation.x += dx / vp.scale;
            vp.translation.y += dy / vp.scale;
        });
    }

    /// Horizontal drag adjusts window width, vertical drag adjusts window
    /// center, both at a fixed gain.
    pub fn adjust_window_level(pipeline: &mut dyn RenderPipeline, dx: f32, dy: f32) {
        Self::mutate(pipeline, |vp| {
            vp.window_width += dx * WINDOW_LEVEL_DRAG_GAIN;
            vp.window_center += dy * WINDOW_LEVEL_DRAG_GAIN;
        });
    }

    pub fn rotate_cw(pipeline: &mut dyn RenderPipeline) {
        Self::mutate(pipeline, |vp| {
            vp.rotation = vp.rotation.rotated_cw();
        });
    }

    pub fn toggle_hflip(pipeline: &mut dyn RenderPipeline) {
        Self::mutate(pipeline, |vp| {
            vp.hflip = !vp.hflip;
        });
    }

    pub fn toggle_vflip(pipeline: &mut dyn RenderPipeline) {
        Self::mutate(pipeline, |vp| {
            vp.vflip = !vp.vflip;
        });
    }

    pub fn toggle_invert(pipeline: &mut dyn RenderPipeline) {
        Self::mutate(pipeline, |vp| {
            vp.invert = !vp.invert;
        });
    }

    /// Delegate to the pipeline's auto-fit; fall back to a full reset
    /// when the pipeline cannot fit (e.g. zero-sized panel).
    pub fn fit_to_screen(pipeline: &mut dyn RenderPipeline) {
        if !pipeline.fit_to_window() {
            Self::reset_viewport(pipeline);
        }
    }

    /// Install the pipeline's default viewport for the displayed image.
    pub fn reset_viewport(pipeline: &mut dyn RenderPipeline) {
        if let Some(default) = pipeline.default_viewport() {
            pipeline.set_viewport(default.clamped());
        }
    }

    fn mutate(pipeline: &mut dyn RenderPipeline, f: impl FnOnce(&mut ViewportState)) {
        let Some(mut vp) = pipeline.viewport() else {
            return;
        };
        f(&mut vp);
        pipeline.set_viewport(vp.clamped());
    }
}
