mod common;

use approx::assert_relative_eq;
use radview_core::error::RadviewError;
use radview_core::frame::PixelSpacing;
use radview_core::io::series::{load_series, write_series, SeriesReader};

#[test]
fn test_open_and_read_frames() {
    let frames = vec![vec![0u8; 16 * 8], vec![255u8; 16 * 8]];
    let data = common::build_series_with_frames(16, 8, &frames);
    let file = common::write_test_series(&data);

    let reader = SeriesReader::open(file.path()).unwrap();
    assert_eq!(reader.frame_count(), 2);
    assert_eq!(reader.header.width, 16);
    assert_eq!(reader.header.height, 8);

    let f0 = reader.read_frame(0).unwrap();
    assert_eq!((f0.width(), f0.height()), (16, 8));
    assert_relative_eq!(f0.data[[0, 0]], 0.0);

    let f1 = reader.read_frame(1).unwrap();
    assert_relative_eq!(f1.data[[7, 15]], 255.0);
}

#[test]
fn test_frame_index_out_of_range() {
    let data = common::build_series_with_frames(4, 4, &[vec![0u8; 16]]);
    let file = common::write_test_series(&data);
    let reader = SeriesReader::open(file.path()).unwrap();

    match reader.read_frame(1) {
        Err(RadviewError::FrameIndexOutOfRange { index: 1, total: 1 }) => {}
        other => panic!("expected FrameIndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn test_bad_magic_rejected() {
    let mut data = common::build_series_with_frames(4, 4, &[vec![0u8; 16]]);
    data[0] = b'X';
    let file = common::write_test_series(&data);
    assert!(matches!(
        SeriesReader::open(file.path()),
        Err(RadviewError::InvalidContainer(_))
    ));
}

#[test]
fn test_truncated_file_rejected() {
    let data = common::build_series_with_frames(4, 4, &[vec![0u8; 16]]);
    let file = common::write_test_series(&data[..data.len() - 4]);
    assert!(matches!(
        SeriesReader::open(file.path()),
        Err(RadviewError::InvalidContainer(_))
    ));
}

#[test]
fn test_zero_dimensions_rejected() {
    let header = common::build_series_header(0, 4, 0);
    let file = common::write_test_series(&header);
    assert!(matches!(
        SeriesReader::open(file.path()),
        Err(RadviewError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_oversized_header_rejected() {
    // 65536x65536 @ 16-bit with a 2^31 frame count overflows any size
    // arithmetic; open must reject the header, not wrap around and
    // accept a file it will later slice out of bounds.
    let header = common::build_series_header_full(65_536, 65_536, 16, 0x8000_0000, 0.0, 0.0);
    let file = common::write_test_series(&header);
    assert!(matches!(
        SeriesReader::open(file.path()),
        Err(RadviewError::InvalidContainer(_))
    ));
}

#[test]
fn test_spacing_zero_means_unknown() {
    let data = common::build_series_with_frames(4, 4, &[vec![0u8; 16]]);
    let file = common::write_test_series(&data);
    let reader = SeriesReader::open(file.path()).unwrap();
    let info = reader.series_info(file.path());
    assert!(info.pixel_spacing_mm.is_none());
}

#[test]
fn test_spacing_survives_round_trip() {
    let mut data = common::build_series_header_full(4, 4, 8, 1, 0.5, 0.75);
    data.extend_from_slice(&[0u8; 16]);
    let file = common::write_test_series(&data);

    let reader = SeriesReader::open(file.path()).unwrap();
    let spacing = reader.series_info(file.path()).pixel_spacing_mm.unwrap();
    assert_relative_eq!(spacing.row, 0.5);
    assert_relative_eq!(spacing.col, 0.75);
}

#[test]
fn test_sixteen_bit_frames() {
    let mut data = common::build_series_header_full(2, 2, 16, 1, 0.0, 0.0);
    for v in [0u16, 1000, 40_000, 65_535] {
        data.extend_from_slice(&v.to_le_bytes());
    }
    let file = common::write_test_series(&data);

    let reader = SeriesReader::open(file.path()).unwrap();
    let frame = reader.read_frame(0).unwrap();
    assert_eq!(frame.bit_depth, 16);
    assert_relative_eq!(frame.data[[0, 1]], 1000.0);
    assert_relative_eq!(frame.data[[1, 1]], 65_535.0);
}

#[test]
fn test_write_then_read_back() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("out.rvs");

    let frames = vec![
        common::gray_frame(8, 6, 10.0),
        common::gray_frame(8, 6, 200.0),
    ];
    let spacing = Some(PixelSpacing { row: 0.25, col: 0.25 });
    write_series(&path, &frames, spacing, "CT", "phantom study").unwrap();

    let reader = SeriesReader::open(&path).unwrap();
    let info = reader.series_info(&path);
    assert_eq!(info.frame_count, 2);
    assert_eq!((info.width, info.height), (8, 6));
    assert_eq!(info.modality.as_deref(), Some("CT"));
    assert_eq!(info.description.as_deref(), Some("phantom study"));
    assert_relative_eq!(info.pixel_spacing_mm.unwrap().row, 0.25);

    let f1 = reader.read_frame(1).unwrap();
    assert_relative_eq!(f1.data[[3, 3]], 200.0);
}

#[test]
fn test_write_rejects_empty_series() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("out.rvs");
    assert!(matches!(
        write_series(&path, &[], None, "", ""),
        Err(RadviewError::EmptySeries)
    ));
}

#[test]
fn test_load_series_from_container() {
    let frames = vec![vec![7u8; 4 * 4]; 3];
    let data = common::build_series_with_frames(4, 4, &frames);
    let file = common::write_test_series(&data);

    let loaded = load_series(file.path()).unwrap();
    assert_eq!(loaded.frames.len(), 3);
    assert_eq!(loaded.info.frame_count, 3);
}

#[test]
fn test_load_series_from_png() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("single.png");
    let img = image::GrayImage::from_pixel(10, 12, image::Luma([128u8]));
    img.save(&path).unwrap();

    let loaded = load_series(&path).unwrap();
    assert_eq!(loaded.frames.len(), 1);
    assert_eq!((loaded.info.width, loaded.info.height), (10, 12));
    // Image files carry no spacing: physical measurement unavailable.
    assert!(loaded.info.pixel_spacing_mm.is_none());
    assert_relative_eq!(loaded.frames[0].data[[0, 0]], 128.0);
}
