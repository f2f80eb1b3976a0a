#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use radview_core::frame::PixelSpacing;
use radview_core::geometry::{distance, ImagePoint};
use radview_core::measure::{physical_distance, MeasureState};

fn ip(x: f32, y: f32) -> ImagePoint {
    ImagePoint::new(x, y)
}

const HALF_MM: Option<PixelSpacing> = Some(PixelSpacing { row: 0.5, col: 0.5 });

#[test]
fn test_off_to_one_point() {
    let state = MeasureState::Off.select(ip(10.0, 20.0), None);
    assert_eq!(state, MeasureState::OnePoint { p1: ip(10.0, 20.0) });
}

#[test]
fn test_second_select_completes_measurement() {
    let state = MeasureState::Off
        .select(ip(0.0, 0.0), HALF_MM)
        .select(ip(6.0, 8.0), HALF_MM);

    match state {
        MeasureState::TwoPoints { p1, p2, distance_px, distance_mm } => {
            assert_eq!(p1, ip(0.0, 0.0));
            assert_eq!(p2, ip(6.0, 8.0));
            assert_relative_eq!(distance_px, 10.0);
            assert_relative_eq!(distance_mm.unwrap(), 5.0);
        }
        other => panic!("expected TwoPoints, got {other:?}"),
    }
}

#[test]
fn test_third_select_restarts_at_new_point() {
    // Selecting A, B, C leaves exactly OnePoint{C}; the prior segment
    // is discarded, not stacked.
    let state = MeasureState::Off
        .select(ip(1.0, 1.0), None)
        .select(ip(2.0, 2.0), None)
        .select(ip(9.0, 9.0), None);
    assert_eq!(state, MeasureState::OnePoint { p1: ip(9.0, 9.0) });
}

#[test]
fn test_clear_from_any_state() {
    assert_eq!(MeasureState::Off.clear(), MeasureState::Off);
    assert_eq!(
        MeasureState::Off.select(ip(1.0, 1.0), None).clear(),
        MeasureState::Off
    );
    assert_eq!(
        MeasureState::Off
            .select(ip(1.0, 1.0), None)
            .select(ip(2.0, 2.0), None)
            .clear(),
        MeasureState::Off
    );
}

#[test]
fn test_distance_is_symmetric() {
    let a = ip(12.5, -3.0);
    let b = ip(-7.0, 44.0);
    assert_relative_eq!(distance(a, b), distance(b, a));
}

#[test]
fn test_no_spacing_means_no_physical_distance() {
    let state = MeasureState::Off
        .select(ip(0.0, 0.0), None)
        .select(ip(10.0, 0.0), None);
    match state {
        MeasureState::TwoPoints { distance_px, distance_mm, .. } => {
            assert_relative_eq!(distance_px, 10.0);
            assert!(distance_mm.is_none());
        }
        other => panic!("expected TwoPoints, got {other:?}"),
    }
}

#[test]
fn test_zero_spacing_axis_disables_physical_distance() {
    let spacing = Some(PixelSpacing { row: 0.5, col: 0.0 });
    assert!(physical_distance(10.0, spacing).is_none());
}

#[test]
fn test_physical_distance_averages_axes() {
    // Isotropic approximation: mean of row/col spacing.
    let spacing = Some(PixelSpacing { row: 1.0, col: 0.5 });
    assert_relative_eq!(physical_distance(10.0, spacing).unwrap(), 7.5);
}

#[test]
fn test_half_millimetre_spacing_ten_pixels() {
    assert_relative_eq!(physical_distance(10.0, HALF_MM).unwrap(), 5.0);
}
