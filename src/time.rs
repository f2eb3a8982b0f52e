//! Frame clock for driving a shower.
//!
//! The physics advance one step per frame no matter how long the frame took.
//! Time only matters to the spawner, which staggers coins in milliseconds.
//! [`Time`] counts frames and tracks elapsed time since activation, either
//! from the wall clock or by a fixed delta for headless and test runs.
//!
//! ```ignore
//! let mut time = Time::new();
//!
//! // Once per frame:
//! let elapsed = time.update();
//! shower.step(elapsed, viewport, &mut surface);
//! ```

use std::time::{Duration, Instant};

/// Elapsed time and frame counting for one shower run.
#[derive(Debug)]
pub struct Time {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Time since last frame.
    delta: Duration,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Elapsed time at last FPS calculation.
    fps_update_elapsed: Duration,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Fixed step replacing the wall clock.
    fixed_delta: Option<Duration>,
    /// While paused, wall-clock time is not counted.
    paused: bool,
}

impl Time {
    /// Start a wall-clock driven timer now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_elapsed: Duration::ZERO,
            fps_update_interval: Duration::from_millis(500),
            fixed_delta: None,
            paused: false,
        }
    }

    /// Start a timer that advances by `delta` every frame.
    pub fn fixed(delta: Duration) -> Self {
        let mut time = Self::new();
        time.fixed_delta = Some(delta);
        time
    }

    /// Advance one frame. Returns elapsed time since start.
    ///
    /// A paused clock does not move; the frame is not counted.
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        if self.paused {
            self.last_frame = now;
            self.delta = Duration::ZERO;
            return self.elapsed;
        }

        self.delta = match self.fixed_delta {
            Some(delta) => delta,
            None => now.duration_since(self.last_frame),
        };
        self.last_frame = now;
        self.elapsed += self.delta;
        self.frame_count += 1;

        // Update FPS periodically
        let since_fps = self.elapsed - self.fps_update_elapsed;
        if since_fps >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_elapsed = self.elapsed;
        }

        self.elapsed
    }

    /// Total elapsed time since start.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in milliseconds, the unit the spawner works in.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Time since last frame.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Stop counting time, e.g. while the window is hidden.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue counting from now. The paused gap is skipped.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_frame = Instant::now();
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Restart from zero, keeping the fixed delta if one is set.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.elapsed = Duration::ZERO;
        self.delta = Duration::ZERO;
        self.frame_count = 0;
        self.fps = 0.0;
        self.fps_frame_count = 0;
        self.fps_update_elapsed = Duration::ZERO;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
