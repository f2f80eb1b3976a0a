#[allow(dead_code)]
mod common;

use radview_core::frame::{PixelSpacing, SeriesInfo};
use radview_core::geometry::ImagePoint;
use radview_core::measure::MeasureState;
use radview_core::session::{ImageSeries, Mode, Status, ViewerSession};

fn info(frame_count: usize, spacing: Option<PixelSpacing>) -> SeriesInfo {
    SeriesInfo {
        filename: "scan.rvs".into(),
        frame_count,
        width: 64,
        height: 64,
        bit_depth: 8,
        pixel_spacing_mm: spacing,
        modality: None,
        description: None,
    }
}

#[test]
fn test_frame_id_addressing() {
    let mut series = ImageSeries::new("scan.rvs".into(), 5, None);
    assert_eq!(series.frame_id(), "scan.rvs");
    assert!(series.set_frame_index(3));
    assert_eq!(series.frame_id(), "scan.rvs#3");
    assert!(!series.set_frame_index(5));
    assert_eq!(series.frame_index, 3);
}

#[test]
fn test_new_file_load_resets_everything() {
    let mut session = ViewerSession::default();
    session.series_loaded("a.rvs".into(), &info(10, None));
    session.series.as_mut().unwrap().frame_index = 7;
    session.cine.playing = true;
    session.measure = MeasureState::Off.select(ImagePoint::new(1.0, 1.0), None);

    let must_stop_timer = session.begin_load("opening b.rvs");
    assert!(must_stop_timer);
    assert!(!session.cine.playing);
    assert_eq!(session.measure, MeasureState::Off);
    assert!(session.series.is_none());
    assert!(matches!(session.status, Status::Loading(_)));

    session.series_loaded("b.rvs".into(), &info(1, None));
    let series = session.series.as_ref().unwrap();
    assert_eq!(series.frame_index, 0);
    assert_eq!(series.frame_count, 1);
    assert_eq!(session.status, Status::Ready);
}

#[test]
fn test_load_failure_keeps_viewer_usable() {
    let mut session = ViewerSession::default();
    session.load_failed("unsupported transfer syntax");
    assert!(matches!(session.status, Status::Error(_)));

    // A subsequent file can still load.
    session.begin_load("opening next");
    session.series_loaded("next.rvs".into(), &info(2, None));
    assert_eq!(session.status, Status::Ready);
}

#[test]
fn test_select_point_uses_series_spacing() {
    let mut session = ViewerSession::default();
    let spacing = Some(PixelSpacing { row: 0.5, col: 0.5 });
    session.series_loaded("scan.rvs".into(), &info(1, spacing));

    session.select_point(ImagePoint::new(0.0, 0.0));
    session.select_point(ImagePoint::new(10.0, 0.0));
    match session.measure {
        MeasureState::TwoPoints { distance_mm, .. } => {
            assert_eq!(distance_mm, Some(5.0));
        }
        other => panic!("expected TwoPoints, got {other:?}"),
    }
}

#[test]
fn test_advance_frame_wraps() {
    let mut session = ViewerSession::default();
    session.series_loaded("scan.rvs".into(), &info(5, None));
    session.series.as_mut().unwrap().frame_index = 4;
    session.advance_frame();
    assert_eq!(session.series.as_ref().unwrap().frame_index, 0);
}

#[test]
fn test_can_play_requires_multiple_frames() {
    let mut session = ViewerSession::default();
    assert!(!session.can_play());

    session.series_loaded("one.rvs".into(), &info(1, None));
    assert!(!session.can_play());

    session.series_loaded("many.rvs".into(), &info(3, None));
    assert!(session.can_play());

    session.status = Status::Error("frame load failed".into());
    assert!(!session.can_play());
}

#[test]
fn test_mode_default_is_window_level() {
    assert_eq!(Mode::default(), Mode::WindowLevel);
}
