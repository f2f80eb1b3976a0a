//! Grayscale presentation rendering: window/level remap plus
//! invert/flip/rotation, from a raw-valued frame to an 8-bit buffer.
//! Scale and translation are not baked in; they stay display transforms.

use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::Frame;
use crate::viewport::{Rotation, ViewportState};

/// An 8-bit grayscale buffer in display orientation (dimensions are
/// swapped from the source for 90/270 rotations).
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    pub width: usize,
    pub height: usize,
    /// Row-major luminance values.
    pub pixels: Vec<u8>,
}

/// Window derived from the frame's actual value range: full-range width
/// and midpoint center, so an unadjusted image shows all of its contrast.
pub fn default_window(frame: &Frame) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in frame.data.iter() {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (frame.value_range(), frame.value_range() / 2.0);
    }
    let width = (max - min).max(1.0);
    let center = (min + max) / 2.0;
    (width, center)
}

/// Linear window/level remap of one raw value to [0, 255].
#[inline]
fn remap(v: f32, window_low: f32, window_width: f32, invert: bool) -> u8 {
    let mut t = ((v - window_low) / window_width).clamp(0.0, 1.0);
    if invert {
        t = 1.0 - t;
    }
    (t * 255.0).round() as u8
}

/// Render the frame with the descriptor's grayscale and orientation
/// settings applied.
pub fn render(frame: &Frame, viewport: &ViewportState) -> RenderedFrame {
    let src_h = frame.height();
    let src_w = frame.width();
    let (out_h, out_w) = if viewport.rotation.swaps_axes() {
        (src_w, src_h)
    } else {
        (src_h, src_w)
    };

    let window_width = viewport.window_width.max(1.0);
    let window_low = viewport.window_center - window_width / 2.0;

    let render_row = |dr: usize, row_out: &mut [u8]| {
        for (dc, out) in row_out.iter_mut().enumerate() {
            // Display pixel -> source pixel: undo rotation, then flips.
            let (mut sr, mut sc) = match viewport.rotation {
                Rotation::Deg0 => (dr, dc),
                Rotation::Deg90 => (src_h - 1 - dc, dr),
                Rotation::Deg180 => (src_h - 1 - dr, src_w - 1 - dc),
                Rotation::Deg270 => (dc, src_w - 1 - dr),
            };
            if viewport.hflip {
                sc = src_w - 1 - sc;
            }
            if viewport.vflip {
                sr = src_h - 1 - sr;
            }
            *out = remap(frame.data[[sr, sc]], window_low, window_width, viewport.invert);
        }
    };

    let mut pixels = vec![0u8; out_h * out_w];
    if out_h * out_w >= PARALLEL_PIXEL_THRESHOLD {
        pixels
            .par_chunks_mut(out_w)
            .enumerate()
            .for_each(|(dr, row)| render_row(dr, row));
    } else {
        for (dr, row) in pixels.chunks_mut(out_w).enumerate() {
            render_row(dr, row);
        }
    }

    RenderedFrame {
        width: out_w,
        height: out_h,
        pixels,
    }
}
