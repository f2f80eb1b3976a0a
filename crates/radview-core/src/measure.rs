//! Two-point linear distance measurement.

use crate::frame::PixelSpacing;
use crate::geometry::{distance, ImagePoint};

/// Measurement state machine: off -> one point -> two points.
///
/// Points live in image-pixel space so the measurement stays correct
/// across intervening pan/zoom/rotate changes. Distances are computed
/// once at the transition and cached, never per render.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MeasureState {
    #[default]
    Off,
    OnePoint {
        p1: ImagePoint,
    },
    TwoPoints {
        p1: ImagePoint,
        p2: ImagePoint,
        distance_px: f32,
        distance_mm: Option<f32>,
    },
}

impl MeasureState {
    /// Record a completed point selection.
    ///
    /// A third selection restarts the measurement at the new point; the
    /// prior segment is discarded, not stacked.
    pub fn select(self, p: ImagePoint, spacing: Option<PixelSpacing>) -> Self {
        match self {
            MeasureState::Off | MeasureState::TwoPoints { .. } => {
                MeasureState::OnePoint { p1: p }
            }
            MeasureState::OnePoint { p1 } => {
                let distance_px = distance(p1, p);
                MeasureState::TwoPoints {
                    p1,
                    p2: p,
                    distance_px,
                    distance_mm: physical_distance(distance_px, spacing),
                }
            }
        }
    }

    /// Explicit clear, and the transition taken on every new-file load.
    pub fn clear(self) -> Self {
        MeasureState::Off
    }

    pub fn is_off(&self) -> bool {
        matches!(self, MeasureState::Off)
    }
}

/// Physical distance from a pixel distance, when spacing is known.
///
/// Uses the mean of row/column spacing: an isotropic approximation that
/// is biased along the coarser axis for anisotropic images.
pub fn physical_distance(distance_px: f32, spacing: Option<PixelSpacing>) -> Option<f32> {
    let spacing = spacing?;
    if !spacing.is_valid() {
        return None;
    }
    Some(distance_px * (spacing.row + spacing.col) / 2.0)
}
