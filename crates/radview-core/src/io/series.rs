//! The `.rvs` series container: a fixed-size little-endian header
//! followed by raw row-major grayscale frames (1 or 2 bytes per pixel).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array2;

use crate::error::{RadviewError, Result};
use crate::frame::{Frame, PixelSpacing, SeriesInfo};
use crate::io::image_io::load_image_frame;

pub const SERIES_HEADER_SIZE: usize = 106;
pub const SERIES_MAGIC: &[u8; 14] = b"RADVIEW-SERIES";
pub const SERIES_VERSION: i32 = 1;

/// Series container header (106 bytes).
#[derive(Clone, Debug)]
pub struct SeriesHeader {
    pub version: i32,
    pub pixel_depth: u32,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    /// Pixel spacing in mm; 0.0 on either axis means unknown.
    pub spacing_row_mm: f64,
    pub spacing_col_mm: f64,
    pub modality: String,
    pub description: String,
}

impl SeriesHeader {
    /// Bytes per pixel (1 for 8-bit, 2 for 9-16 bit).
    pub fn bytes_per_pixel(&self) -> usize {
        if self.pixel_depth <= 8 { 1 } else { 2 }
    }

    /// Total bytes per frame.
    pub fn frame_byte_size(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(self.bytes_per_pixel())
    }

    /// Spacing for unit conversion, when both axes are known.
    pub fn pixel_spacing(&self) -> Option<PixelSpacing> {
        let spacing = PixelSpacing {
            row: self.spacing_row_mm as f32,
            col: self.spacing_col_mm as f32,
        };
        spacing.is_valid().then_some(spacing)
    }
}

/// Memory-mapped series reader.
pub struct SeriesReader {
    mmap: Mmap,
    pub header: SeriesHeader,
}

impl SeriesReader {
    /// Open a container and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SERIES_HEADER_SIZE {
            return Err(RadviewError::InvalidContainer(
                "File too small for series header".into(),
            ));
        }
        if &mmap[0..14] != SERIES_MAGIC {
            return Err(RadviewError::InvalidContainer(
                "Missing RADVIEW-SERIES magic".into(),
            ));
        }

        let header = parse_header(&mmap[..SERIES_HEADER_SIZE])?;

        // Checked: a crafted header can describe more bytes than usize
        // holds, which must surface as a parse error, not wrap around.
        let expected = (header.frame_count as usize)
            .checked_mul(header.frame_byte_size())
            .and_then(|data| data.checked_add(SERIES_HEADER_SIZE))
            .ok_or_else(|| {
                RadviewError::InvalidContainer(
                    "Header describes more data than is addressable".into(),
                )
            })?;
        if mmap.len() < expected {
            return Err(RadviewError::InvalidContainer(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected,
                mmap.len()
            )));
        }

        Ok(Self { mmap, header })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Raw bytes for one frame (zero-copy from the mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let total = self.frame_count();
        if index >= total {
            return Err(RadviewError::FrameIndexOutOfRange { index, total });
        }
        let offset = SERIES_HEADER_SIZE + index * self.header.frame_byte_size();
        let end = offset + self.header.frame_byte_size();
        Ok(&self.mmap[offset..end])
    }

    /// Decode one frame to raw-valued f32 pixels.
    pub fn read_frame(&self, index: usize) -> Result<Frame> {
        let raw = self.frame_raw(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;

        let data = match self.header.bytes_per_pixel() {
            1 => Array2::from_shape_fn((h, w), |(r, c)| raw[r * w + c] as f32),
            2 => Array2::from_shape_fn((h, w), |(r, c)| {
                let i = (r * w + c) * 2;
                u16::from_le_bytes([raw[i], raw[i + 1]]) as f32
            }),
            _ => return Err(RadviewError::UnsupportedBitDepth(self.header.pixel_depth)),
        };

        Ok(Frame::new(data, if self.header.bytes_per_pixel() == 1 { 8 } else { 16 }))
    }

    /// Build SeriesInfo from the header.
    pub fn series_info(&self, path: &Path) -> SeriesInfo {
        SeriesInfo {
            filename: path.to_path_buf(),
            frame_count: self.frame_count(),
            width: self.header.width,
            height: self.header.height,
            bit_depth: if self.header.bytes_per_pixel() == 1 { 8 } else { 16 },
            pixel_spacing_mm: self.header.pixel_spacing(),
            modality: non_empty(&self.header.modality),
            description: non_empty(&self.header.description),
        }
    }

    /// Iterator over all frames.
    pub fn frames(&self) -> impl Iterator<Item = Result<Frame>> + '_ {
        (0..self.frame_count()).map(move |i| self.read_frame(i))
    }
}

fn parse_header(buf: &[u8]) -> Result<SeriesHeader> {
    let mut cursor = std::io::Cursor::new(&buf[14..]); // skip magic

    let version = cursor.read_i32::<LittleEndian>()?;
    if version != SERIES_VERSION {
        return Err(RadviewError::InvalidContainer(format!(
            "Unsupported container version {version}"
        )));
    }
    let pixel_depth = cursor.read_i32::<LittleEndian>()? as u32;
    let width = cursor.read_i32::<LittleEndian>()? as u32;
    let height = cursor.read_i32::<LittleEndian>()? as u32;
    let frame_count = cursor.read_i32::<LittleEndian>()? as u32;
    let spacing_row_mm = cursor.read_f64::<LittleEndian>()?;
    let spacing_col_mm = cursor.read_f64::<LittleEndian>()?;

    if width == 0 || height == 0 {
        return Err(RadviewError::InvalidDimensions { width, height });
    }
    if pixel_depth == 0 || pixel_depth > 16 {
        return Err(RadviewError::UnsupportedBitDepth(pixel_depth));
    }

    let modality = read_fixed_string(&buf[50..66]);
    let description = read_fixed_string(&buf[66..106]);

    Ok(SeriesHeader {
        version,
        pixel_depth,
        width,
        height,
        frame_count,
        spacing_row_mm,
        spacing_col_mm,
        modality,
        description,
    })
}

fn read_fixed_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).trim().to_string()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Serialize a header to its 106-byte on-disk form.
pub fn encode_header(header: &SeriesHeader) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SERIES_HEADER_SIZE);
    buf.extend_from_slice(SERIES_MAGIC);
    buf.extend_from_slice(&header.version.to_le_bytes());
    buf.extend_from_slice(&(header.pixel_depth as i32).to_le_bytes());
    buf.extend_from_slice(&(header.width as i32).to_le_bytes());
    buf.extend_from_slice(&(header.height as i32).to_le_bytes());
    buf.extend_from_slice(&(header.frame_count as i32).to_le_bytes());
    buf.extend_from_slice(&header.spacing_row_mm.to_le_bytes());
    buf.extend_from_slice(&header.spacing_col_mm.to_le_bytes());
    buf.extend_from_slice(&fixed_string::<16>(&header.modality));
    buf.extend_from_slice(&fixed_string::<40>(&header.description));
    debug_assert_eq!(buf.len(), SERIES_HEADER_SIZE);
    buf
}

fn fixed_string<const N: usize>(s: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let bytes = s.as_bytes();
    let n = bytes.len().min(N);
    out[..n].copy_from_slice(&bytes[..n]);
    out
}

/// Write frames to a new container file. All frames must share the
/// dimensions and bit depth of the first.
pub fn write_series(
    path: &Path,
    frames: &[Frame],
    spacing: Option<PixelSpacing>,
    modality: &str,
    description: &str,
) -> Result<()> {
    let first = frames.first().ok_or(RadviewError::EmptySeries)?;
    let width = first.width() as u32;
    let height = first.height() as u32;
    let bit_depth = first.bit_depth as u32;

    for frame in frames {
        if frame.width() as u32 != width || frame.height() as u32 != height {
            return Err(RadviewError::InvalidDimensions {
                width: frame.width() as u32,
                height: frame.height() as u32,
            });
        }
    }

    let header = SeriesHeader {
        version: SERIES_VERSION,
        pixel_depth: bit_depth,
        width,
        height,
        frame_count: frames.len() as u32,
        spacing_row_mm: spacing.map_or(0.0, |s| s.row as f64),
        spacing_col_mm: spacing.map_or(0.0, |s| s.col as f64),
        modality: modality.to_string(),
        description: description.to_string(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&encode_header(&header))?;

    for frame in frames {
        if header.bytes_per_pixel() == 1 {
            for &v in frame.data.iter() {
                writer.write_all(&[v.clamp(0.0, 255.0) as u8])?;
            }
        } else {
            for &v in frame.data.iter() {
                writer.write_all(&(v.clamp(0.0, 65_535.0) as u16).to_le_bytes())?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// A fully decoded series ready for display.
#[derive(Clone, Debug)]
pub struct LoadedSeries {
    pub info: SeriesInfo,
    pub frames: Vec<Frame>,
}

/// Load any supported file: `.rvs` containers decode every frame;
/// anything else goes through the `image` crate as a one-frame series
/// with no spacing metadata.
pub fn load_series(path: &Path) -> Result<LoadedSeries> {
    let is_container = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("rvs"));

    if is_container {
        let reader = SeriesReader::open(path)?;
        let frames = reader.frames().collect::<Result<Vec<_>>>()?;
        if frames.is_empty() {
            return Err(RadviewError::EmptySeries);
        }
        Ok(LoadedSeries {
            info: reader.series_info(path),
            frames,
        })
    } else {
        let (frame, info) = load_image_frame(path)?;
        Ok(LoadedSeries {
            info,
            frames: vec![frame],
        })
    }
}
