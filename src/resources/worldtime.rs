//! Fixed-step simulation time.
//!
//! The engine never looks at a wall clock. An external driver calls the
//! scheduler once per frame at [`TARGET_FRAME_RATE`], and every duration that
//! comes from settings in seconds is converted to ticks with the same
//! constant so that timers, samplers and thresholds agree.

/// Simulation ticks per simulated second.
pub const TARGET_FRAME_RATE: u32 = 30;

/// Convert a duration in seconds to a (possibly fractional) tick count.
pub fn seconds_to_ticks(seconds: f32) -> f32 {
    seconds * TARGET_FRAME_RATE as f32
}

/// Frame counter shared with every tick listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldTime {
    /// Number of frames fully completed so far.
    pub frame_count: u64,
}

impl WorldTime {
    /// Simulated seconds elapsed after `frame_count` frames.
    pub fn elapsed_seconds(&self) -> f32 {
        self.frame_count as f32 / TARGET_FRAME_RATE as f32
    }

    /// Seconds covered by one tick.
    pub fn delta(&self) -> f32 {
        1.0 / TARGET_FRAME_RATE as f32
    }
}
