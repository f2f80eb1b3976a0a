//! Projection between surface (panel) space and image-pixel space.
//!
//! Pure math over `(ViewportState, panel rect, image dims)`; the GUI
//! pipeline wraps these in the fallible [`crate::pipeline::RenderPipeline`]
//! methods, which own the contract of when a conversion is valid.

use crate::geometry::{ImagePoint, SurfacePoint};
use crate::viewport::{Rotation, ViewportState};

/// Axis-aligned panel rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> SurfacePoint {
        SurfacePoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

fn rotate_cw(x: f32, y: f32, rotation: Rotation) -> (f32, f32) {
    match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (-y, x),
        Rotation::Deg180 => (-x, -y),
        Rotation::Deg270 => (y, -x),
    }
}

fn rotate_ccw(x: f32, y: f32, rotation: Rotation) -> (f32, f32) {
    match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (y, -x),
        Rotation::Deg180 => (-x, -y),
        Rotation::Deg270 => (-y, x),
    }
}

/// Project an image-pixel point onto the surface.
///
/// Order: center on the image, flip, rotate, scale, then offset by the
/// panel center plus the pan translation (image pixels, so scaled).
pub fn image_to_surface(
    viewport: &ViewportState,
    panel: SurfaceRect,
    image_dims: (u32, u32),
    p: ImagePoint,
) -> SurfacePoint {
    let (w, h) = image_dims;
    let mut x = p.x - w as f32 / 2.0;
    let mut y = p.y - h as f32 / 2.0;

    if viewport.hflip {
        x = -x;
    }
    if viewport.vflip {
        y = -y;
    }
    let (x, y) = rotate_cw(x, y, viewport.rotation);

    let center = panel.center();
    SurfacePoint::new(
        center.x + (viewport.translation.x + x) * viewport.scale,
        center.y + (viewport.translation.y + y) * viewport.scale,
    )
}

/// Project a surface point back into image-pixel space.
/// Exact inverse of [`image_to_surface`].
pub fn surface_to_image(
    viewport: &ViewportState,
    panel: SurfaceRect,
    image_dims: (u32, u32),
    p: SurfacePoint,
) -> ImagePoint {
    let (w, h) = image_dims;
    let center = panel.center();

    let x = (p.x - center.x) / viewport.scale - viewport.translation.x;
    let y = (p.y - center.y) / viewport.scale - viewport.translation.y;

    let (mut x, mut y) = rotate_ccw(x, y, viewport.rotation);
    if viewport.hflip {
        x = -x;
    }
    if viewport.vflip {
        y = -y;
    }

    ImagePoint::new(x + w as f32 / 2.0, y + h as f32 / 2.0)
}

/// Scale factor that fits the rotated image inside the panel.
pub fn fit_scale(panel: SurfaceRect, image_dims: (u32, u32), rotation: Rotation) -> f32 {
    let (w, h) = image_dims;
    let (dw, dh) = if rotation.swaps_axes() {
        (h as f32, w as f32)
    } else {
        (w as f32, h as f32)
    };
    if dw <= 0.0 || dh <= 0.0 {
        return 1.0;
    }
    (panel.width / dw).min(panel.height / dh)
}
