//! Host demo: a polled blink timer, a repeat-limited sampler and a countdown
//! sharing one control loop, plus a software "button" interrupt.

use std::sync::atomic::{AtomicU32, Ordering};

use tctl_posix::{SimInterruptLine, StdClock};
use tctl_timer::{IntervalTimer, SharedTimer, TimerConfig, TriggerMode};

static PRESSES: AtomicU32 = AtomicU32::new(0);
static BUTTON: SharedTimer<StdClock> = SharedTimer::new();

fn toggle_led() {
    println!("led toggled");
}

fn log_sample(duration: u32) {
    println!("sample after {duration}ms");
}

fn on_press() {
    PRESSES.fetch_add(1, Ordering::SeqCst);
}

fn launch() {
    println!("countdown finished");
}

fn main() {
    let clock = StdClock::new();

    let mut blink = IntervalTimer::new(clock, 250);
    blink.set_callback(toggle_led);

    let mut sampler = IntervalTimer::with_config(clock, TimerConfig::new(100).with_repeat(5));
    sampler.set_elapsed_callback(log_sample);

    let mut countdown = IntervalTimer::with_config(clock, TimerConfig::stopped());

    let mut button = IntervalTimer::new(clock, 0);
    button.set_callback(on_press);
    if let Err(err) = BUTTON.install(button) {
        eprintln!("install failed: {err}");
        return;
    }
    let mut line = SimInterruptLine::new(4);
    let mut presser = IntervalTimer::new(clock, 400);
    if let Err(err) = BUTTON.attach_interrupt(&mut line, 2, TriggerMode::Falling) {
        eprintln!("attach failed: {err}");
        return;
    }

    loop {
        blink.elapsed();
        sampler.elapsed();

        presser.elapsed_exec(|| {
            line.fire(2);
        });

        if countdown.countdown(1_500, Some(launch)) == 0 {
            break;
        }
        std::hint::spin_loop();
    }

    println!(
        "blink {} times (avg {}ms), {} samples, {} button presses, up {}",
        blink.trigger_count(),
        blink.average_elapsed(10),
        sampler.trigger_count(),
        PRESSES.load(Ordering::SeqCst),
        blink.run_time()
    );
}
