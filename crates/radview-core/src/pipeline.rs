use crate::geometry::{ImagePoint, SurfacePoint};
use crate::viewport::ViewportState;

/// Capability interface over the display surface.
///
/// All methods are explicitly fallible: `None`/`false` means the surface
/// is not ready (no image displayed, panel not laid out yet). Callers
/// branch on presence instead of catching anything; transform-path calls
/// treat absence as "no visual update this tick".
pub trait RenderPipeline {
    /// Current viewport descriptor, if an image is displayed.
    fn viewport(&self) -> Option<ViewportState>;

    /// Install a descriptor. Returns false when ignored.
    fn set_viewport(&mut self, viewport: ViewportState) -> bool;

    /// Recompute scale/translation so the image fills the panel.
    /// Window/level and flags are preserved. Returns false on failure.
    fn fit_to_window(&mut self) -> bool;

    /// The default descriptor for the displayed image (fit scale,
    /// centered, window derived from the frame's value range).
    fn default_viewport(&self) -> Option<ViewportState>;

    /// Project a surface-space point into image-pixel space.
    fn pointer_to_image(&self, p: SurfacePoint) -> Option<ImagePoint>;

    /// Project an image-pixel point into surface space.
    fn image_to_surface(&self, p: ImagePoint) -> Option<SurfacePoint>;
}
