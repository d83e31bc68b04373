//! Tick-driven sprite animation counters.
//!
//! Animation is counted in update steps, not wall-clock time: every `tick()` is one
//! step, and once `ticks_per_frame` steps have elapsed the cycle moves to the next
//! animation frame, wrapping modulo `frame_count`. Frame delta time never enters the
//! calculation, so the cycle is fully deterministic regardless of frame pacing.

/// Modular frame cycle shared by every animated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCycle {
    pub frame_count: usize,
    pub current_frame: usize,
    pub ticks_per_frame: usize,
    pub tick_counter: usize,
}

impl FrameCycle {
    /// A cycle starting on frame 0. Zero counts are bumped to 1 so the cycle can
    /// always make progress.
    pub fn new(frame_count: usize, ticks_per_frame: usize) -> Self {
        Self {
            frame_count: frame_count.max(1),
            current_frame: 0,
            ticks_per_frame: ticks_per_frame.max(1),
            tick_counter: 0,
        }
    }

    /// Advance by one update step. Returns the (possibly new) current frame.
    pub fn tick(&mut self) -> usize {
        self.tick_counter += 1;
        if self.tick_counter >= self.ticks_per_frame {
            self.tick_counter = 0;
            self.current_frame = (self.current_frame + 1) % self.frame_count;
        }
        self.current_frame
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.tick_counter = 0;
    }
}
