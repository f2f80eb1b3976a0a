#[allow(dead_code)]
mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use radview_core::cine::{interval_ms, next_frame, CineState, CineTimer};

#[test]
fn test_interval_for_nominal_rates() {
    assert_eq!(interval_ms(10), 100);
    assert_eq!(interval_ms(1), 1000);
    assert_eq!(interval_ms(30), 33);
}

#[test]
fn test_interval_clamps_out_of_range_fps() {
    // fps clamps to 60 first, then the floor division hits the 16 ms floor.
    assert_eq!(interval_ms(1000), 16);
    assert_eq!(interval_ms(60), 16);
    assert_eq!(interval_ms(0), 1000);
}

#[test]
fn test_frame_index_wraps() {
    assert_eq!(next_frame(4, 5), 0);
    assert_eq!(next_frame(0, 5), 1);
    assert_eq!(next_frame(0, 1), 0);
    assert_eq!(next_frame(0, 0), 0);
}

#[test]
fn test_default_cine_state() {
    let state = CineState::default();
    assert!(!state.playing);
    assert_eq!(state.fps, 10);
}

#[test]
fn test_timer_ticks_and_stops() {
    let count = Arc::new(AtomicUsize::new(0));
    let tick_count = count.clone();
    let mut timer = CineTimer::start(60, move || {
        tick_count.fetch_add(1, Ordering::SeqCst);
    });

    std::thread::sleep(Duration::from_millis(200));
    timer.stop();
    let at_stop = count.load(Ordering::SeqCst);
    assert!(at_stop >= 2, "expected ticks while running, got {at_stop}");

    // No ticks arrive after stop.
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(count.load(Ordering::SeqCst), at_stop);
}

#[test]
fn test_stop_is_idempotent() {
    let mut timer = CineTimer::start(30, || {});
    timer.stop();
    timer.stop();
    timer.stop();
}

#[test]
fn test_drop_stops_the_timer() {
    let count = Arc::new(AtomicUsize::new(0));
    let tick_count = count.clone();
    {
        let _timer = CineTimer::start(60, move || {
            tick_count.fetch_add(1, Ordering::SeqCst);
        });
        std::thread::sleep(Duration::from_millis(60));
    }
    let at_drop = count.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(count.load(Ordering::SeqCst), at_drop);
}
