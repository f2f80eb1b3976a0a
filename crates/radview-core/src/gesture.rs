//! Per-modality input state machine.
//!
//! Turns raw pointer/touch events into [`GestureAction`] values that the
//! application applies to the viewport controller or the measurement
//! state machine. Mouse-drag deltas are coalesced and flushed at most
//! once per display-refresh tick; touch deltas apply per move event.

use std::time::{Duration, Instant};

use crate::consts::{DOUBLE_TAP_WINDOW_MS, WHEEL_TICK_POINTS, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::geometry::{midpoint, surface_distance, SurfacePoint};
use crate::session::Mode;

/// A recognized input effect, ready to apply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    /// Pan by a surface-space delta.
    Pan { dx: f32, dy: f32 },
    /// Adjust window width/center by a surface-space delta.
    WindowLevel { dx: f32, dy: f32 },
    /// Multiply the zoom factor.
    Zoom { factor: f32 },
    /// Double-tap: fit the image to the panel.
    FitToScreen,
    /// A completed point-selection input (click or tap).
    SelectPoint { at: SurfacePoint },
}

/// Touch-sequence state, discriminated by simultaneous-touch count.
#[derive(Clone, Copy, Debug, PartialEq)]
enum TouchState {
    None,
    OneFinger {
        last: SurfacePoint,
    },
    TwoFinger {
        last_dist: f32,
        last_center: SurfacePoint,
    },
}

/// Active mouse-drag session. A new press always replaces any stale
/// session, so overlapping sessions cannot occur.
#[derive(Clone, Copy, Debug)]
struct DragSession {
    last: SurfacePoint,
}

pub struct GestureRecognizer {
    drag: Option<DragSession>,
    /// Cumulative mouse delta awaiting the next flush.
    pending: (f32, f32),
    /// Scroll distance carried over until it amounts to a whole detent.
    scroll_accum: f32,
    touch: TouchState,
    last_tap_started: Option<Instant>,
    /// Set for the rest of the sequence after a double-tap fired.
    suppress_drag: bool,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self {
            drag: None,
            pending: (0.0, 0.0),
            scroll_accum: 0.0,
            touch: TouchState::None,
            last_tap_started: None,
            suppress_drag: false,
        }
    }

    /// One wheel detent maps to one fixed zoom factor, never a
    /// continuous accumulation, keeping zoom steps repeatable. Scroll
    /// deltas add up across events, so several detents arriving in one
    /// input batch emit one tick each, and smooth-scroll devices tick
    /// once per detent's worth of travel.
    pub fn wheel(&mut self, scroll_y: f32) -> Vec<GestureAction> {
        self.scroll_accum += scroll_y;
        let ticks = (self.scroll_accum / WHEEL_TICK_POINTS).trunc();
        if ticks == 0.0 {
            return Vec::new();
        }
        self.scroll_accum -= ticks * WHEEL_TICK_POINTS;
        let factor = if ticks > 0.0 { WHEEL_ZOOM_IN } else { WHEEL_ZOOM_OUT };
        vec![GestureAction::Zoom { factor }; ticks.abs() as usize]
    }

    /// Begin a fresh mouse-drag session at the press point.
    pub fn pointer_pressed(&mut self, at: SurfacePoint) {
        self.drag = Some(DragSession { last: at });
        self.pending = (0.0, 0.0);
    }

    /// Accumulate movement into the pending delta. Intra-frame bursts
    /// collapse into one delta; nothing is applied here.
    pub fn pointer_moved(&mut self, at: SurfacePoint) {
        if let Some(ref mut session) = self.drag {
            self.pending.0 += at.x - session.last.x;
            self.pending.1 += at.y - session.last.y;
            session.last = at;
        }
    }

    /// Flush the coalesced drag delta. Call once per display-refresh
    /// opportunity. In Measure mode movement is ignored.
    pub fn take_pending(&mut self, mode: Mode) -> Option<GestureAction> {
        if self.drag.is_none() {
            return None;
        }
        let (dx, dy) = std::mem::take(&mut self.pending);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        match mode {
            Mode::Pan => Some(GestureAction::Pan { dx, dy }),
            Mode::WindowLevel => Some(GestureAction::WindowLevel { dx, dy }),
            Mode::Measure => None,
        }
    }

    /// End the drag session. A release in Measure mode resolves to a
    /// point selection at the release position.
    pub fn pointer_released(&mut self, at: SurfacePoint, mode: Mode) -> Option<GestureAction> {
        let had_session = self.drag.take().is_some();
        self.pending = (0.0, 0.0);
        if had_session && mode == Mode::Measure {
            Some(GestureAction::SelectPoint { at })
        } else {
            None
        }
    }

    /// A touch-start re-evaluates the sequence from the full set of
    /// active touches. Returns `FitToScreen` on a double-tap.
    pub fn touch_started(
        &mut self,
        touches: &[SurfacePoint],
        now: Instant,
    ) -> Option<GestureAction> {
        match touches {
            [p] => {
                let window = Duration::from_millis(DOUBLE_TAP_WINDOW_MS);
                let is_double = self
                    .last_tap_started
                    .is_some_and(|prev| now.duration_since(prev) <= window);
                if is_double {
                    self.last_tap_started = None;
                    self.suppress_drag = true;
                    self.touch = TouchState::None;
                    return Some(GestureAction::FitToScreen);
                }
                self.last_tap_started = Some(now);
                self.touch = TouchState::OneFinger { last: *p };
                None
            }
            [a, b] => {
                self.touch = TouchState::TwoFinger {
                    last_dist: surface_distance(*a, *b),
                    last_center: midpoint(*a, *b),
                };
                None
            }
            _ => {
                // Three or more touches are ignored for this sequence.
                self.touch = TouchState::None;
                None
            }
        }
    }

    /// Touch movement. One finger drives the mode effect per move event;
    /// two fingers pinch-zoom and pan simultaneously.
    pub fn touch_moved(&mut self, touches: &[SurfacePoint], mode: Mode) -> Vec<GestureAction> {
        match (self.touch, touches) {
            (TouchState::OneFinger { last }, [p]) => {
                if self.suppress_drag {
                    return Vec::new();
                }
                let dx = p.x - last.x;
                let dy = p.y - last.y;
                self.touch = TouchState::OneFinger { last: *p };
                match mode {
                    Mode::Pan => vec![GestureAction::Pan { dx, dy }],
                    Mode::WindowLevel => vec![GestureAction::WindowLevel { dx, dy }],
                    // Measurement reacts only to the end-of-touch point.
                    Mode::Measure => Vec::new(),
                }
            }
            (TouchState::TwoFinger { last_dist, last_center }, [a, b]) => {
                let dist = surface_distance(*a, *b);
                let center = midpoint(*a, *b);
                let mut actions = Vec::with_capacity(2);
                if last_dist > 0.0 && dist > 0.0 {
                    actions.push(GestureAction::Zoom { factor: dist / last_dist });
                }
                let dx = center.x - last_center.x;
                let dy = center.y - last_center.y;
                if dx != 0.0 || dy != 0.0 {
                    actions.push(GestureAction::Pan { dx, dy });
                }
                self.touch = TouchState::TwoFinger {
                    last_dist: dist,
                    last_center: center,
                };
                actions
            }
            _ => Vec::new(),
        }
    }

    /// A touch lifted. `remaining` holds the touches still down.
    /// With exactly one ending touch in Measure mode the tap resolves to
    /// a measurement point, exactly as a mouse click would.
    pub fn touch_ended(
        &mut self,
        ended_at: SurfacePoint,
        remaining: &[SurfacePoint],
        mode: Mode,
    ) -> Option<GestureAction> {
        let was_single = matches!(self.touch, TouchState::OneFinger { .. });

        let action = if remaining.is_empty()
            && was_single
            && mode == Mode::Measure
            && !self.suppress_drag
        {
            Some(GestureAction::SelectPoint { at: ended_at })
        } else {
            None
        };

        match remaining {
            [] => {
                // End of the whole sequence: reset transient state.
                self.touch = TouchState::None;
                self.suppress_drag = false;
            }
            [p] => {
                self.touch = TouchState::OneFinger { last: *p };
            }
            [a, b] => {
                self.touch = TouchState::TwoFinger {
                    last_dist: surface_distance(*a, *b),
                    last_center: midpoint(*a, *b),
                };
            }
            _ => {
                self.touch = TouchState::None;
            }
        }

        action
    }

    /// True while a mouse-drag session is active.
    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }
}
