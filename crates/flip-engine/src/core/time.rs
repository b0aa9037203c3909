/// Frame clock fed by the host's per-frame delta.
/// Sanitises the delta so a stalled tab or a bogus timestamp cannot make
/// running animations jump straight to their end.
pub struct FrameClock {
    /// Largest delta handed to the simulation in one frame.
    max_dt: f32,
    /// Total simulated time in seconds.
    elapsed: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Record one frame. Returns the delta to simulate.
    pub fn tick(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() && frame_dt > 0.0 {
            frame_dt.min(self.max_dt)
        } else {
            0.0
        };
        self.elapsed += f64::from(dt);
        self.frames += 1;
        dt
    }

    /// Total simulated time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}
