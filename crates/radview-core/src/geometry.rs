use serde::{Deserialize, Serialize};

/// A point in image-pixel coordinates.
///
/// Measurement points are stored in this space (not surface/screen space)
/// so they stay valid across pan/zoom/rotation changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: f32,
    pub y: f32,
}

impl ImagePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A point in surface (panel/overlay) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f32,
    pub y: f32,
}

impl SurfacePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two image points.
pub fn distance(a: ImagePoint, b: ImagePoint) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Midpoint of the segment between two surface points.
pub fn midpoint(a: SurfacePoint, b: SurfacePoint) -> SurfacePoint {
    SurfacePoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Distance between two surface points (used for pinch gestures).
pub fn surface_distance(a: SurfacePoint, b: SurfacePoint) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}
