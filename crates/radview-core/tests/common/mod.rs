use radview_core::frame::Frame;
use radview_core::geometry::{ImagePoint, SurfacePoint};
use radview_core::io::series::SERIES_HEADER_SIZE;
use radview_core::mapper::{self, SurfaceRect};
use radview_core::pipeline::RenderPipeline;
use radview_core::viewport::ViewportState;

use ndarray::Array2;

/// Build a series container header for mono 8-bit frames.
///
/// Returns a `Vec<u8>` containing just the 106-byte header.
/// Append frame pixel data after calling this function.
pub fn build_series_header(width: u32, height: u32, num_frames: usize) -> Vec<u8> {
    build_series_header_full(width, height, 8, num_frames, 0.0, 0.0)
}

/// Build a series container header with configurable bit depth and
/// pixel spacing (mm; 0.0 = unknown).
pub fn build_series_header_full(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    spacing_row: f64,
    spacing_col: f64,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SERIES_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"RADVIEW-SERIES");
    // Version
    buf.extend_from_slice(&1i32.to_le_bytes());
    // PixelDepth
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    // Width
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    // Height
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    // FrameCount
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Spacing row/col
    buf.extend_from_slice(&spacing_row.to_le_bytes());
    buf.extend_from_slice(&spacing_col.to_le_bytes());
    // Modality (16 bytes)
    buf.extend_from_slice(&[0u8; 16]);
    // Description (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);

    assert_eq!(buf.len(), SERIES_HEADER_SIZE);
    buf
}

/// Build a complete synthetic mono 8-bit container with the given frames.
pub fn build_series_with_frames(width: u32, height: u32, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = build_series_header(width, height, frames.len());
    for frame in frames {
        buf.extend_from_slice(frame);
    }
    buf
}

/// Write a container buffer to a temp file with the `.rvs` extension.
///
/// The file stays alive as long as the returned `NamedTempFile` is not
/// dropped.
pub fn write_test_series(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::Builder::new()
        .suffix(".rvs")
        .tempfile()
        .expect("create temp file");
    f.write_all(data).expect("write series data");
    f.flush().expect("flush");
    f
}

/// A uniform 8-bit test frame.
pub fn gray_frame(width: usize, height: usize, value: f32) -> Frame {
    Frame::new(Array2::from_elem((height, width), value), 8)
}

/// In-memory render pipeline used to exercise the controller, mapper
/// and overlay without a GUI. Projections go through the real mapper
/// math, exactly as the application pipeline does.
pub struct FakePipeline {
    pub viewport: Option<ViewportState>,
    pub panel: SurfaceRect,
    pub image_dims: (u32, u32),
    /// Returned by `fit_to_window`; lets tests force the fallback path.
    pub fit_succeeds: bool,
    pub set_count: usize,
}

impl FakePipeline {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Some(ViewportState::default()),
            panel: SurfaceRect::new(0.0, 0.0, width as f32, height as f32),
            image_dims: (width, height),
            fit_succeeds: true,
            set_count: 0,
        }
    }

    /// A pipeline with no image displayed: every operation must no-op.
    pub fn uninitialized() -> Self {
        Self {
            viewport: None,
            panel: SurfaceRect::new(0.0, 0.0, 0.0, 0.0),
            image_dims: (0, 0),
            fit_succeeds: false,
            set_count: 0,
        }
    }

    pub fn vp(&self) -> ViewportState {
        self.viewport.expect("viewport present")
    }
}

impl RenderPipeline for FakePipeline {
    fn viewport(&self) -> Option<ViewportState> {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: ViewportState) -> bool {
        if self.viewport.is_none() {
            return false;
        }
        self.viewport = Some(viewport);
        self.set_count += 1;
        true
    }

    fn fit_to_window(&mut self) -> bool {
        if !self.fit_succeeds || self.viewport.is_none() {
            return false;
        }
        let mut vp = self.vp();
        vp.scale = mapper::fit_scale(self.panel, self.image_dims, vp.rotation);
        vp.translation = Default::default();
        self.set_viewport(vp.clamped())
    }

    fn default_viewport(&self) -> Option<ViewportState> {
        self.viewport?;
        let mut vp = ViewportState::default();
        vp.scale = mapper::fit_scale(self.panel, self.image_dims, vp.rotation);
        Some(vp)
    }

    fn pointer_to_image(&self, p: SurfacePoint) -> Option<ImagePoint> {
        let vp = self.viewport?;
        Some(mapper::surface_to_image(&vp, self.panel, self.image_dims, p))
    }

    fn image_to_surface(&self, p: ImagePoint) -> Option<SurfacePoint> {
        let vp = self.viewport?;
        Some(mapper::image_to_surface(&vp, self.panel, self.image_dims, p))
    }
}
