/// Frame timing.

use std::time::Instant;

/// Source of per-frame elapsed time.
pub trait Clock {
    /// Seconds since the previous call. Never negative.
    fn tick(&mut self) -> f32;
}

/// Wall clock backed by [`Instant`].
///
/// The first `tick` only records the baseline and reports `0.0`.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = match self.last {
            Some(prev) => now.duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        elapsed
    }
}

/// Clock that advances by the same step every frame (headless runs, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step: step.max(0.0) }
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> f32 {
        self.step
    }
}

/// Frames per second for the status line; `0.0` when no time has elapsed.
pub fn frames_per_second(elapsed: f32) -> f32 {
    if elapsed > 0.0 {
        1.0 / elapsed
    } else {
        0.0
    }
}
