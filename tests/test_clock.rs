use console_invaders::clock::*;

#[test]
fn system_clock_first_tick_is_baseline() {
    let mut clock = SystemClock::new();
    assert_eq!(clock.tick(), 0.0);
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert!(clock.tick() > 0.0);
}

#[test]
fn fixed_clock_repeats_its_step() {
    let mut clock = FixedClock::new(0.25);
    assert_eq!(clock.tick(), 0.25);
    assert_eq!(clock.tick(), 0.25);
    assert_eq!(FixedClock::new(-1.0).tick(), 0.0);
}

#[test]
fn fps_tolerates_zero_elapsed() {
    assert_eq!(frames_per_second(0.0), 0.0);
    assert_eq!(frames_per_second(0.5), 2.0);
}
