//! Cine (frame-sequence) playback scheduling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::consts::{MAX_CINE_FPS, MAX_CINE_INTERVAL_MS, MIN_CINE_FPS, MIN_CINE_INTERVAL_MS};

/// Playback flags. The timer handle itself lives in [`CineTimer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CineState {
    pub playing: bool,
    pub fps: u32,
}

impl Default for CineState {
    fn default() -> Self {
        Self { playing: false, fps: 10 }
    }
}

/// Tick interval for a requested frame rate:
/// `clamp(floor(1000 / clamp(fps, 1, 60)), 16, 1000)` milliseconds.
pub fn interval_ms(fps: u32) -> u64 {
    let fps = fps.clamp(MIN_CINE_FPS, MAX_CINE_FPS) as u64;
    (1000 / fps).clamp(MIN_CINE_INTERVAL_MS, MAX_CINE_INTERVAL_MS)
}

/// Next frame index, wrapping at the end of the series.
pub fn next_frame(index: usize, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    (index + 1) % frame_count
}

/// Single-owner handle for the periodic playback timer.
///
/// The thread runs a deadline-based loop so tick spacing does not drift
/// with callback latency. `stop()` is unconditional and idempotent;
/// dropping the handle stops the thread. Callers must stop (or drop)
/// the timer before any file swap so a stale timer can never tick
/// against a swapped-out series.
pub struct CineTimer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CineTimer {
    /// Start ticking at the (clamped) frame rate. `on_tick` runs on the
    /// timer thread; it should do no more than signal the UI loop.
    pub fn start(fps: u32, on_tick: impl Fn() + Send + 'static) -> Self {
        let interval = Duration::from_millis(interval_ms(fps));
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = std::thread::Builder::new()
            .name("radview-cine".into())
            .spawn(move || {
                let mut deadline = Instant::now() + interval;
                loop {
                    let now = Instant::now();
                    if deadline > now {
                        std::thread::sleep(deadline - now);
                    }
                    if stop_flag.load(Ordering::Relaxed) {
                        break;
                    }
                    on_tick();
                    deadline += interval;
                    // Fell badly behind (suspend, debugger): skip ahead
                    // instead of firing a burst of catch-up ticks.
                    let now = Instant::now();
                    if deadline < now {
                        deadline = now + interval;
                    }
                }
            })
            .ok();

        if handle.is_none() {
            tracing::warn!("failed to spawn cine timer thread");
        }

        Self { stop, handle }
    }

    /// Cancel the timer. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CineTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
