use serde::{Deserialize, Serialize};

use crate::cine::CineState;
use crate::frame::{PixelSpacing, SeriesInfo};
use crate::measure::MeasureState;

/// Load status of the viewer. Governs whether interaction is permitted.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading(String),
    Ready,
    Error(String),
}

impl Status {
    pub fn is_ready(&self) -> bool {
        matches!(self, Status::Ready)
    }
}

/// Active drag tool. Exactly one at a time; orthogonal to `Status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    WindowLevel,
    Pan,
    Measure,
}

/// The currently loaded frame series.
#[derive(Clone, Debug)]
pub struct ImageSeries {
    /// Opaque handle for the series as furnished by the loader.
    pub base_id: String,
    pub frame_count: usize,
    pub frame_index: usize,
    /// Populated from container metadata; never mutated by the engine.
    pub pixel_spacing_mm: Option<PixelSpacing>,
}

impl ImageSeries {
    pub fn new(base_id: String, frame_count: usize, pixel_spacing_mm: Option<PixelSpacing>) -> Self {
        Self {
            base_id,
            frame_count: frame_count.max(1),
            frame_index: 0,
            pixel_spacing_mm,
        }
    }

    /// Identifier of the active frame: index 0 uses the bare id,
    /// later frames append a `#index` suffix.
    pub fn frame_id(&self) -> String {
        if self.frame_index == 0 {
            self.base_id.clone()
        } else {
            format!("{}#{}", self.base_id, self.frame_index)
        }
    }

    /// Clamp-free setter: out-of-range indices are rejected.
    pub fn set_frame_index(&mut self, index: usize) -> bool {
        if index < self.frame_count {
            self.frame_index = index;
            true
        } else {
            false
        }
    }

    pub fn has_multiple_frames(&self) -> bool {
        self.frame_count > 1
    }
}

/// Aggregate viewer state driven by the application shell.
///
/// Owns the transition logic that must run in lockstep on file swaps:
/// playback is forced off *before* any other reset, the measurement
/// never survives a file swap, and the frame index restarts at zero.
/// The cine timer handle itself and the viewport descriptor live with
/// the caller (single-owner resources tied to the UI), which stops the
/// timer and reinstalls the default viewport when told to.
#[derive(Debug, Default)]
pub struct ViewerSession {
    pub status: Status,
    pub mode: Mode,
    pub series: Option<ImageSeries>,
    pub measure: MeasureState,
    pub cine: CineState,
}

impl ViewerSession {
    /// A new file starts loading. Returns true when the caller must stop
    /// a running cine timer.
    pub fn begin_load(&mut self, message: impl Into<String>) -> bool {
        let was_playing = self.cine.playing;
        self.cine.playing = false;
        self.series = None;
        self.measure = MeasureState::Off;
        self.status = Status::Loading(message.into());
        was_playing
    }

    /// Metadata arrived: the series is displayable.
    pub fn series_loaded(&mut self, base_id: String, info: &SeriesInfo) {
        self.series = Some(ImageSeries::new(
            base_id,
            info.frame_count,
            info.pixel_spacing_mm,
        ));
        self.status = Status::Ready;
    }

    /// The load failed; the viewer stays usable for a subsequent file.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.series = None;
        self.cine.playing = false;
        self.status = Status::Error(message.into());
    }

    /// Record a completed point selection (already in image space).
    pub fn select_point(&mut self, p: crate::geometry::ImagePoint) {
        let spacing = self.series.as_ref().and_then(|s| s.pixel_spacing_mm);
        self.measure = self.measure.select(p, spacing);
    }

    /// Advance playback by one frame, wrapping. No-op without a series.
    pub fn advance_frame(&mut self) {
        if let Some(ref mut series) = self.series {
            series.frame_index = crate::cine::next_frame(series.frame_index, series.frame_count);
        }
    }

    /// Playback is only meaningful with at least two frames.
    pub fn can_play(&self) -> bool {
        self.series
            .as_ref()
            .is_some_and(|s| s.has_multiple_frames())
            && self.status.is_ready()
    }
}
