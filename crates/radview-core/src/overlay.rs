//! Measurement overlay scene.
//!
//! Builds a display-agnostic list of shapes from the current measurement
//! state; the GUI repaints it after every viewport mutation, frame
//! change, and panel resize, since any of those moves the surface-space
//! projection of the stored image-space points.

use crate::geometry::{midpoint, SurfacePoint};
use crate::measure::MeasureState;
use crate::pipeline::RenderPipeline;
use crate::session::Status;

/// One overlay draw primitive, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayShape {
    /// Filled point marker.
    Marker { at: SurfacePoint },
    /// Segment connecting the two measurement points.
    Segment { a: SurfacePoint, b: SurfacePoint },
    /// Distance label centered at the segment midpoint, drawn on an
    /// opaque backing plate sized to the measured text width.
    Label { at: SurfacePoint, text: String },
}

/// Format the distance readout with one decimal place per unit.
pub fn format_distance(distance_px: f32, distance_mm: Option<f32>) -> String {
    match distance_mm {
        Some(mm) => format!("{distance_px:.1} px \u{2022} {mm:.1} mm"),
        None => format!("{distance_px:.1} px"),
    }
}

/// Build the overlay scene. Empty unless the viewer is ready and a
/// measurement is active; points that currently project nowhere (surface
/// not ready) silently drop out, matching the fail-soft pipeline policy.
pub fn build_scene(
    measure: &MeasureState,
    status: &Status,
    pipeline: &dyn RenderPipeline,
) -> Vec<OverlayShape> {
    if !status.is_ready() {
        return Vec::new();
    }

    match *measure {
        MeasureState::Off => Vec::new(),
        MeasureState::OnePoint { p1 } => match pipeline.image_to_surface(p1) {
            Some(at) => vec![OverlayShape::Marker { at }],
            None => Vec::new(),
        },
        MeasureState::TwoPoints {
            p1,
            p2,
            distance_px,
            distance_mm,
        } => {
            let (Some(a), Some(b)) = (
                pipeline.image_to_surface(p1),
                pipeline.image_to_surface(p2),
            ) else {
                return Vec::new();
            };
            vec![
                OverlayShape::Marker { at: a },
                OverlayShape::Marker { at: b },
                OverlayShape::Segment { a, b },
                OverlayShape::Label {
                    at: midpoint(a, b),
                    text: format_distance(distance_px, distance_mm),
                },
            ]
        }
    }
}
