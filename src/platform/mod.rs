//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (elapsed-time hint and FPS)
//! - The browser entry: canvas, render loop and DOM events (wasm32)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Frames in the rolling FPS window
const FPS_WINDOW: usize = 60;

/// Per-frame timing from sampled timestamps (milliseconds)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame at `now`; returns milliseconds since the previous one
    ///
    /// The first frame reports 0. Clocks that step backwards also report 0.
    pub fn tick(&mut self, now: f64) -> f64 {
        let dt = match self.last_time {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now);

        // The slot about to be overwritten holds the oldest frame in the window
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;

        if self.frames_seen > FPS_WINDOW {
            let elapsed = now - oldest;
            if elapsed > 0.0 {
                self.fps = (FPS_WINDOW as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        dt
    }

    /// Rolling frames per second (0 until the window fills)
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
