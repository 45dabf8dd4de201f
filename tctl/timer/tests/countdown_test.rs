//! Countdown tests for tctl-timer

use std::sync::atomic::{AtomicU32, Ordering};

use tctl_posix::SimClock;
use tctl_timer::{IntervalTimer, TimerConfig};

fn stopped() -> (SimClock, IntervalTimer<SimClock>) {
    let clock = SimClock::new();
    let timer = IntervalTimer::with_config(clock.clone(), TimerConfig::stopped());
    (clock, timer)
}

#[test]
fn test_countdown_reaches_zero_once() {
    static FINISHED: AtomicU32 = AtomicU32::new(0);

    fn on_zero() {
        FINISHED.fetch_add(1, Ordering::SeqCst);
    }

    let (clock, mut timer) = stopped();
    assert_eq!(timer.countdown(500, Some(on_zero)), 500);
    assert!(timer.is_running());

    let mut seen = Vec::new();
    for _ in 0..5 {
        clock.advance_millis(100);
        seen.push(timer.countdown(500, Some(on_zero)));
    }
    assert_eq!(seen, vec![400, 300, 200, 100, 0]);
    assert_eq!(FINISHED.load(Ordering::SeqCst), 1);
    assert!(!timer.is_running());
    assert!(timer.countdown_finished());

    for _ in 0..3 {
        clock.advance_millis(100);
        assert_eq!(timer.countdown(500, Some(on_zero)), 0);
    }
    assert_eq!(FINISHED.load(Ordering::SeqCst), 1);
}

#[test]
fn test_countdown_rearm() {
    static FINISHED: AtomicU32 = AtomicU32::new(0);

    fn on_zero() {
        FINISHED.fetch_add(1, Ordering::SeqCst);
    }

    let (clock, mut timer) = stopped();
    timer.countdown(100, Some(on_zero));
    clock.advance_millis(100);
    assert_eq!(timer.countdown(100, Some(on_zero)), 0);

    timer.reset_countdown();
    assert!(!timer.countdown_finished());
    assert_eq!(timer.countdown(200, Some(on_zero)), 200);
    clock.advance_millis(150);
    assert_eq!(timer.countdown(200, Some(on_zero)), 50);
    clock.advance_millis(50);
    assert_eq!(timer.countdown(200, Some(on_zero)), 0);
    assert_eq!(FINISHED.load(Ordering::SeqCst), 2);
}

#[test]
fn test_countdown_leaves_statistics_alone() {
    let (clock, mut timer) = stopped();
    timer.countdown(50, None);
    clock.advance_millis(60);
    assert_eq!(timer.countdown(50, None), 0);

    assert_eq!(timer.trigger_count(), 0);
    assert_eq!(timer.last_elapsed(), 0);
    assert!(timer.samples().is_empty());
}

#[test]
fn test_countdown_on_running_timer_keeps_interval() {
    let clock = SimClock::new();
    let mut timer = IntervalTimer::new(clock.clone(), 1_000);
    clock.advance_millis(100);
    assert_eq!(timer.countdown(50, None), 900);
    assert_eq!(timer.interval(), 1_000);
}

#[test]
fn test_restart_rearms_with_current_interval() {
    let (clock, mut timer) = stopped();
    timer.countdown(300, None);
    clock.advance_millis(300);
    assert_eq!(timer.countdown(300, None), 0);

    timer.restart();
    assert!(timer.is_running());
    assert_eq!(timer.countdown(300, None), 300);
    clock.advance_millis(120);
    assert_eq!(timer.countdown(300, None), 180);
}

#[test]
fn test_resume_does_not_rearm_finished_countdown() {
    let (clock, mut timer) = stopped();

    timer.countdown(100, None);
    clock.advance_millis(100);
    assert_eq!(timer.countdown(100, None), 0);

    timer.resume();
    clock.advance_millis(10);
    assert_eq!(timer.countdown(100, None), 0);
    timer.run_once();
    assert_eq!(timer.countdown(100, None), 0);
    assert!(timer.countdown_finished());

    timer.reset_countdown();
    assert_eq!(timer.countdown(100, None), 100);
}
