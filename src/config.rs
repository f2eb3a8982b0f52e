//! Tunables for the coin shower.
//!
//! [`ShowerConfig`] is read once when a [`CoinShower`](crate::CoinShower) is
//! built and never changes afterwards. The defaults are the values the effect
//! was designed around.
//!
//! ```ignore
//! let config = ShowerConfig::default()
//!     .with_coin_count(40)
//!     .with_gravity(0.3);
//! ```

use crate::error::ConfigError;

/// Named numeric tunables for spawning and physics.
///
/// Speeds are in pixels per frame, sizes in logical pixels and timings in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowerConfig {
    /// Number of coins spawned over the whole effect.
    pub coin_count: u32,
    /// Lower bound of the initial downward speed.
    pub min_speed: f32,
    /// Upper bound of the initial downward speed.
    pub max_speed: f32,
    /// Smallest coin edge length.
    pub min_size: f32,
    /// Largest coin edge length.
    pub max_size: f32,
    /// Added to the downward velocity every frame.
    pub gravity: f32,
    /// Velocity damping factor applied every frame.
    pub friction: f32,
    /// Fraction of speed kept after any bounce.
    pub bounce_reduction: f32,
    /// Spread of the random sideways nudge on a floor bounce.
    pub horizontal_boost: f32,
    /// Minimum vertical speed needed for a floor bounce.
    pub bottom_bounce_threshold: f32,
    /// Shortest wait between two spawns.
    pub spawn_interval_ms: f32,
    /// Wait after the final spawn; the spawn cadence slows toward this.
    pub max_spawn_delay_ms: f32,
}

impl ShowerConfig {
    /// Set the number of coins.
    pub fn with_coin_count(mut self, count: u32) -> Self {
        self.coin_count = count;
        self
    }

    /// Set the initial downward speed range.
    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    /// Set the coin size range.
    pub fn with_size_range(mut self, min: f32, max: f32) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    /// Set the per-frame gravity.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the per-frame friction factor.
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set the fraction of speed kept after a bounce.
    pub fn with_bounce_reduction(mut self, reduction: f32) -> Self {
        self.bounce_reduction = reduction;
        self
    }

    /// Set the spread of the sideways nudge on floor bounces.
    pub fn with_horizontal_boost(mut self, boost: f32) -> Self {
        self.horizontal_boost = boost;
        self
    }

    /// Set the minimum vertical speed for a floor bounce.
    pub fn with_bottom_bounce_threshold(mut self, threshold: f32) -> Self {
        self.bottom_bounce_threshold = threshold;
        self
    }

    /// Set the spawn timing (shortest wait, final wait) in milliseconds.
    pub fn with_spawn_timing(mut self, interval_ms: f32, max_delay_ms: f32) -> Self {
        self.spawn_interval_ms = interval_ms;
        self.max_spawn_delay_ms = max_delay_ms;
        self
    }

    /// Check for contradictory values.
    ///
    /// The simulation never panics on a bad config, but the results are
    /// meaningless; the window host refuses to start with one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size <= 0.0 {
            return Err(ConfigError::NonPositiveSize(self.min_size));
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::SizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.min_speed > self.max_speed {
            return Err(ConfigError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if self.spawn_interval_ms < 0.0 || self.spawn_interval_ms > self.max_spawn_delay_ms {
            return Err(ConfigError::SpawnTiming {
                interval_ms: self.spawn_interval_ms,
                max_delay_ms: self.max_spawn_delay_ms,
            });
        }
        Ok(())
    }
}

impl Default for ShowerConfig {
    fn default() -> Self {
        Self {
            coin_count: 20,
            min_speed: 4.0,
            max_speed: 5.0,
            min_size: 64.0,
            max_size: 120.0,
            gravity: 0.2,
            friction: 0.99,
            bounce_reduction: 0.95,
            horizontal_boost: 1.5,
            bottom_bounce_threshold: 0.5,
            spawn_interval_ms: 200.0,
            max_spawn_delay_ms: 3000.0,
        }
    }
}
