use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single grayscale image frame.
/// Pixel values are raw intensities as stored in the source
/// (0..=255 for 8-bit, 0..=65535 for 16-bit), kept as f32 so the
/// window/level remap works on the native value range.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Source bit depth (8 or 16)
    pub bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self { data, bit_depth }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Maximum representable value for the source bit depth.
    pub fn value_range(&self) -> f32 {
        if self.bit_depth <= 8 { 255.0 } else { 65_535.0 }
    }
}

/// Physical size of one pixel along each image axis, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelSpacing {
    pub row: f32,
    pub col: f32,
}

impl PixelSpacing {
    /// Spacing is only usable for unit conversion when both axes are
    /// known and non-zero.
    pub fn is_valid(&self) -> bool {
        self.row > 0.0 && self.col > 0.0
    }
}

/// Metadata describing a loaded series, built from the container header
/// (or synthesized for single-frame image files).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub filename: PathBuf,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    /// None when the source carries no usable spacing metadata.
    pub pixel_spacing_mm: Option<PixelSpacing>,
    pub modality: Option<String>,
    pub description: Option<String>,
}
