mod common;

use common::FakePipeline;
use radview_core::frame::PixelSpacing;
use radview_core::geometry::ImagePoint;
use radview_core::measure::MeasureState;
use radview_core::overlay::{build_scene, format_distance, OverlayShape};
use radview_core::session::Status;

#[test]
fn test_label_formatting() {
    assert_eq!(format_distance(100.0, None), "100.0 px");
    assert_eq!(format_distance(100.0, Some(50.0)), "100.0 px \u{2022} 50.0 mm");
    assert_eq!(format_distance(3.14159, Some(1.5708)), "3.1 px \u{2022} 1.6 mm");
}

#[test]
fn test_scene_empty_when_off() {
    let pipeline = FakePipeline::new(512, 512);
    let scene = build_scene(&MeasureState::Off, &Status::Ready, &pipeline);
    assert!(scene.is_empty());
}

#[test]
fn test_scene_empty_unless_ready() {
    let pipeline = FakePipeline::new(512, 512);
    let state = MeasureState::Off.select(ImagePoint::new(10.0, 10.0), None);

    for status in [
        Status::Idle,
        Status::Loading("opening".into()),
        Status::Error("decode failed".into()),
    ] {
        assert!(build_scene(&state, &status, &pipeline).is_empty());
    }
    assert_eq!(build_scene(&state, &Status::Ready, &pipeline).len(), 1);
}

#[test]
fn test_one_point_draws_single_marker() {
    let pipeline = FakePipeline::new(512, 512);
    let state = MeasureState::Off.select(ImagePoint::new(256.0, 256.0), None);
    let scene = build_scene(&state, &Status::Ready, &pipeline);

    match scene.as_slice() {
        [OverlayShape::Marker { at }] => {
            // Image center projects to panel center under the identity viewport.
            assert_eq!((at.x, at.y), (256.0, 256.0));
        }
        other => panic!("expected one marker, got {other:?}"),
    }
}

#[test]
fn test_two_points_draw_full_scene() {
    let pipeline = FakePipeline::new(512, 512);
    let spacing = Some(PixelSpacing { row: 1.0, col: 1.0 });
    let state = MeasureState::Off
        .select(ImagePoint::new(100.0, 100.0), spacing)
        .select(ImagePoint::new(100.0, 200.0), spacing);

    let scene = build_scene(&state, &Status::Ready, &pipeline);
    assert_eq!(scene.len(), 4);
    assert!(matches!(scene[0], OverlayShape::Marker { .. }));
    assert!(matches!(scene[1], OverlayShape::Marker { .. }));
    assert!(matches!(scene[2], OverlayShape::Segment { .. }));

    match &scene[3] {
        OverlayShape::Label { at, text } => {
            assert_eq!(text, "100.0 px \u{2022} 100.0 mm");
            // Midpoint of the two projected points.
            assert_eq!((at.x, at.y), (100.0, 150.0));
        }
        other => panic!("expected label, got {other:?}"),
    }
}

#[test]
fn test_scene_tracks_viewport_changes() {
    let mut pipeline = FakePipeline::new(512, 512);
    let state = MeasureState::Off.select(ImagePoint::new(256.0, 256.0), None);

    let before = build_scene(&state, &Status::Ready, &pipeline);

    let mut vp = pipeline.vp();
    vp.translation.x += 50.0;
    pipeline.viewport = Some(vp);
    let after = build_scene(&state, &Status::Ready, &pipeline);

    // Same image point, new projection: the stored state is unchanged
    // but the drawn marker moved with the pan.
    match (&before[0], &after[0]) {
        (OverlayShape::Marker { at: a }, OverlayShape::Marker { at: b }) => {
            assert_eq!(b.x - a.x, 50.0);
            assert_eq!(b.y, a.y);
        }
        other => panic!("expected markers, got {other:?}"),
    }
}

#[test]
fn test_scene_empty_when_projection_unavailable() {
    let pipeline = FakePipeline::uninitialized();
    let state = MeasureState::Off.select(ImagePoint::new(10.0, 10.0), None);
    assert!(build_scene(&state, &Status::Ready, &pipeline).is_empty());
}
