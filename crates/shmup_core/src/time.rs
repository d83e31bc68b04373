//! Variable-delta frame clock.
//!
//! Each frame the loop asks the clock how much time passed since the previous
//! frame. Time is sampled as whole milliseconds since the clock was created, so the
//! per-frame deltas always sum to the total elapsed time with no sub-millisecond
//! drift. The very first sample only establishes the baseline and yields a zero
//! delta.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;
const DEFAULT_LONG_FRAME_WARN_MS: u64 = 250;

pub struct FrameClock {
    origin: Instant,
    last_update_ms: Option<u64>,
    pub delta_s: f32,
    pub frame_count: u64,
    pub long_frame_warn_ms: u64,

    fps_samples: [f32; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f32,
    pub smoothed_frame_time_ms: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last_update_ms: None,
            delta_s: 0.0,
            frame_count: 0,
            long_frame_warn_ms: DEFAULT_LONG_FRAME_WARN_MS,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    pub fn with_long_frame_warning(mut self, warn_ms: u64) -> Self {
        self.long_frame_warn_ms = warn_ms;
        self
    }

    /// Sample the wall clock and return seconds elapsed since the previous frame.
    pub fn begin_frame(&mut self) -> f32 {
        let now_ms = self.origin.elapsed().as_millis() as u64;
        self.advance_to(now_ms)
    }

    /// Advance to an explicit timestamp (milliseconds on the clock's own timeline).
    /// Timestamps that go backwards produce a zero delta.
    pub fn advance_to(&mut self, now_ms: u64) -> f32 {
        let last_ms = *self.last_update_ms.get_or_insert(now_ms);
        let elapsed_ms = now_ms.saturating_sub(last_ms);
        self.last_update_ms = Some(now_ms);
        self.delta_s = elapsed_ms as f32 / 1000.0;
        self.frame_count += 1;

        if elapsed_ms > self.long_frame_warn_ms {
            log::warn!(
                "Frame took {}ms (warning threshold {}ms)",
                elapsed_ms,
                self.long_frame_warn_ms
            );
        }

        self.fps_samples[self.fps_sample_index] = self.delta_s;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f32 = self.fps_samples.iter().sum::<f32>() / FPS_SAMPLE_COUNT as f32;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        self.delta_s
    }

    pub fn is_initialized(&self) -> bool {
        self.last_update_ms.is_some()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
