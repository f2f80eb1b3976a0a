//! Single-frame image ingest and rendered-frame export via the `image`
//! crate.

use std::path::Path;

use image::DynamicImage;
use ndarray::Array2;

use crate::error::Result;
use crate::frame::{Frame, SeriesInfo};
use crate::render::RenderedFrame;

/// Load a standard image file (PNG/TIFF/JPEG/...) as a one-frame series.
///
/// 16-bit sources keep their depth; everything else collapses to 8-bit
/// luminance. Such files carry no pixel spacing, so physical-unit
/// measurement is unavailable for them.
pub fn load_image_frame(path: &Path) -> Result<(Frame, SeriesInfo)> {
    let img = image::open(path)?;

    let (data, bit_depth) = match img {
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgba16(_) => {
            let luma = img.to_luma16();
            let (w, h) = (luma.width() as usize, luma.height() as usize);
            let data = Array2::from_shape_fn((h, w), |(r, c)| {
                luma.get_pixel(c as u32, r as u32).0[0] as f32
            });
            (data, 16u8)
        }
        _ => {
            let luma = img.to_luma8();
            let (w, h) = (luma.width() as usize, luma.height() as usize);
            let data = Array2::from_shape_fn((h, w), |(r, c)| {
                luma.get_pixel(c as u32, r as u32).0[0] as f32
            });
            (data, 8u8)
        }
    };

    let (h, w) = (data.nrows() as u32, data.ncols() as u32);
    let frame = Frame::new(data, bit_depth);
    let info = SeriesInfo {
        filename: path.to_path_buf(),
        frame_count: 1,
        width: w,
        height: h,
        bit_depth,
        pixel_spacing_mm: None,
        modality: None,
        description: None,
    };
    Ok((frame, info))
}

/// Save a rendered (window/leveled, oriented) frame as an 8-bit
/// grayscale PNG.
pub fn save_rendered_png(rendered: &RenderedFrame, path: &Path) -> Result<()> {
    let img = image::GrayImage::from_raw(
        rendered.width as u32,
        rendered.height as u32,
        rendered.pixels.clone(),
    )
    .ok_or_else(|| {
        image::ImageError::Parameter(image::error::ParameterError::from_kind(
            image::error::ParameterErrorKind::DimensionMismatch,
        ))
    })?;
    img.save(path)?;
    Ok(())
}
