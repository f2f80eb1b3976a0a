use radview_core::consts::{MAX_SCALE, MIN_SCALE};
use radview_core::frame::Frame;
use radview_core::geometry::{ImagePoint, SurfacePoint};
use radview_core::mapper::{self, SurfaceRect};
use radview_core::pipeline::RenderPipeline;
use radview_core::render::{default_window, render};
use radview_core::viewport::{Rotation, Translation, ViewportState};

use crate::convert::rendered_to_color_image;

/// Descriptor fields that are baked into the texture pixels. Scale and
/// translation stay pure draw transforms and never invalidate it.
#[derive(Clone, Copy, PartialEq)]
struct BakeKey {
    frame_version: u64,
    window_width: f32,
    window_center: f32,
    invert: bool,
    hflip: bool,
    vflip: bool,
    rotation: Rotation,
}

/// The display surface: the current frame, its viewport descriptor, and
/// the GPU texture holding the windowed pixels.
///
/// Implements [`RenderPipeline`] over the pure projection math, so the
/// viewport controller and the overlay builder work against it directly.
pub struct DisplaySurface {
    frame: Option<Frame>,
    /// Bumped on every frame swap so the bake key changes.
    frame_version: u64,
    viewport: Option<ViewportState>,
    /// Panel rect in surface coordinates, refreshed every layout pass.
    panel: SurfaceRect,
    texture: Option<egui::TextureHandle>,
    baked: Option<BakeKey>,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        Self {
            frame: None,
            frame_version: 0,
            viewport: None,
            panel: SurfaceRect::new(0.0, 0.0, 0.0, 0.0),
            texture: None,
            baked: None,
        }
    }
}

impl DisplaySurface {
    /// Drop the displayed frame, its viewport, and the texture.
    pub fn clear(&mut self) {
        self.frame = None;
        self.viewport = None;
        self.texture = None;
        self.baked = None;
    }

    /// Display a (new or replacement) frame. The viewport is left alone:
    /// within a series the presentation persists across frame changes.
    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = Some(frame);
        self.frame_version = self.frame_version.wrapping_add(1);
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub fn set_panel(&mut self, rect: egui::Rect) {
        self.panel = SurfaceRect::new(rect.min.x, rect.min.y, rect.width(), rect.height());
    }

    /// Install the default viewport once a frame is displayed and none is
    /// set yet. Runs after the panel rect is known so the fit scale is
    /// computed against real panel dimensions.
    pub fn ensure_viewport(&mut self) {
        if self.frame.is_some() && self.viewport.is_none() {
            self.viewport = self.default_viewport().map(ViewportState::clamped);
        }
    }

    fn image_dims(&self) -> Option<(u32, u32)> {
        self.frame
            .as_ref()
            .map(|f| (f.width() as u32, f.height() as u32))
    }

    /// Texture for the current frame and descriptor, re-baked only when
    /// a pixel-affecting field changed.
    pub fn texture(&mut self, ctx: &egui::Context) -> Option<&egui::TextureHandle> {
        let frame = self.frame.as_ref()?;
        let vp = self.viewport?;
        let key = BakeKey {
            frame_version: self.frame_version,
            window_width: vp.window_width,
            window_center: vp.window_center,
            invert: vp.invert,
            hflip: vp.hflip,
            vflip: vp.vflip,
            rotation: vp.rotation,
        };

        if self.texture.is_none() || self.baked != Some(key) {
            let rendered = render(frame, &vp);
            let image = rendered_to_color_image(&rendered);
            self.texture = Some(ctx.load_texture("display", image, egui::TextureOptions::NEAREST));
            self.baked = Some(key);
        }
        self.texture.as_ref()
    }
}

impl RenderPipeline for DisplaySurface {
    fn viewport(&self) -> Option<ViewportState> {
        if self.frame.is_some() {
            self.viewport
        } else {
            None
        }
    }

    fn set_viewport(&mut self, viewport: ViewportState) -> bool {
        if self.frame.is_none() {
            return false;
        }
        self.viewport = Some(viewport);
        true
    }

    fn fit_to_window(&mut self) -> bool {
        let Some(dims) = self.image_dims() else {
            return false;
        };
        let Some(mut vp) = self.viewport else {
            return false;
        };
        if self.panel.width <= 0.0 || self.panel.height <= 0.0 {
            return false;
        }
        vp.scale = mapper::fit_scale(self.panel, dims, vp.rotation).clamp(MIN_SCALE, MAX_SCALE);
        vp.translation = Translation::default();
        self.viewport = Some(vp);
        true
    }

    fn default_viewport(&self) -> Option<ViewportState> {
        let frame = self.frame.as_ref()?;
        let dims = (frame.width() as u32, frame.height() as u32);
        let (width, center) = default_window(frame);

        let mut vp = ViewportState::default();
        vp.window_width = width;
        vp.window_center = center;
        if self.panel.width > 0.0 && self.panel.height > 0.0 {
            vp.scale = mapper::fit_scale(self.panel, dims, vp.rotation);
        }
        Some(vp)
    }

    fn pointer_to_image(&self, p: SurfacePoint) -> Option<ImagePoint> {
        let vp = self.viewport()?;
        let dims = self.image_dims()?;
        Some(mapper::surface_to_image(&vp, self.panel, dims, p))
    }

    fn image_to_surface(&self, p: ImagePoint) -> Option<SurfacePoint> {
        let vp = self.viewport()?;
        let dims = self.image_dims()?;
        Some(mapper::image_to_surface(&vp, self.panel, dims, p))
    }
}
