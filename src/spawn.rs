//! Staggered coin creation.
//!
//! Coins arrive in a burst that thins out into a long tail. The first coin
//! appears as soon as the shower is activated; after the n-th coin the
//! spawner waits
//!
//! ```text
//! spawn_interval + (n / coin_count)^2 * (max_spawn_delay - spawn_interval)
//! ```
//!
//! before creating the next one.

use crate::coin::Coin;
use crate::config::ShowerConfig;
use crate::projection::Viewport;
use glam::Vec2;
use rand::Rng;

/// Height coins start at, above the visible area.
pub const SPAWN_HEIGHT: f32 = -50.0;

/// Full width of the initial horizontal speed range, centered on zero.
const INITIAL_VX_SPREAD: f32 = 3.0;

/// Full width of the spin range in degrees per frame, centered on zero.
const ROTATION_SPEED_SPREAD: f32 = 8.0;

const MIN_FADE_IN_DISTANCE: f32 = 100.0;
const FADE_IN_DISTANCE_SPREAD: f32 = 200.0;

const MIN_MAX_BOUNCES: u32 = 2;
/// Number of distinct bounce budgets: 2, 3 or 4.
const MAX_BOUNCES_CHOICES: u32 = 3;

/// Decides when coins are due.
///
/// Driven by elapsed time since activation; it does not create coins itself,
/// it only says how many should exist by now.
#[derive(Debug, Clone)]
pub struct Spawner {
    total: u32,
    created: u32,
    interval_ms: f32,
    max_delay_ms: f32,
    /// Elapsed time at which the next coin is due.
    next_due_ms: f64,
}

impl Spawner {
    pub fn new(config: &ShowerConfig) -> Self {
        Self {
            total: config.coin_count,
            created: 0,
            interval_ms: config.spawn_interval_ms,
            max_delay_ms: config.max_spawn_delay_ms,
            next_due_ms: 0.0,
        }
    }

    /// Wait in milliseconds that follows the `n`-th creation (1-based).
    pub fn delay_after(&self, n: u32) -> f32 {
        if self.total == 0 {
            return self.max_delay_ms;
        }
        let progress = n as f32 / self.total as f32;
        self.interval_ms + progress * progress * (self.max_delay_ms - self.interval_ms)
    }

    /// Number of coins due at `elapsed_ms` since activation.
    ///
    /// Advances the schedule: each due coin is counted as created. A long
    /// frame can make several coins due at once.
    pub fn due(&mut self, elapsed_ms: f64) -> u32 {
        let mut count = 0;
        while self.created < self.total && elapsed_ms >= self.next_due_ms {
            self.created += 1;
            count += 1;
            self.next_due_ms += f64::from(self.delay_after(self.created));
        }
        count
    }

    /// Elapsed time at which the next coin is due, if any remain.
    pub fn next_due_ms(&self) -> Option<f64> {
        (!self.is_exhausted()).then_some(self.next_due_ms)
    }

    #[inline]
    pub fn created(&self) -> u32 {
        self.created
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.total - self.created
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.created >= self.total
    }
}

/// Build a coin with randomized parameters just above the viewport.
///
/// Ranges are sampled as `min + u * (max - min)` so an empty range yields
/// `min` instead of panicking.
pub fn spawn_coin<R: Rng>(config: &ShowerConfig, viewport: Viewport, rng: &mut R) -> Coin {
    let size = lerp(config.min_size, config.max_size, rng.gen());
    let x = rng.gen::<f32>() * viewport.width;
    let rotation = rng.gen::<f32>() * 360.0;
    let vx = (rng.gen::<f32>() - 0.5) * INITIAL_VX_SPREAD;
    let vy = lerp(config.min_speed, config.max_speed, rng.gen());
    let rotation_speed = (rng.gen::<f32>() - 0.5) * ROTATION_SPEED_SPREAD;
    let fade_in_distance = MIN_FADE_IN_DISTANCE + rng.gen::<f32>() * FADE_IN_DISTANCE_SPREAD;
    let max_bounces = MIN_MAX_BOUNCES + rng.gen_range(0..MAX_BOUNCES_CHOICES);

    Coin::new(Vec2::new(x, SPAWN_HEIGHT), Vec2::new(vx, vy), size)
        .with_rotation(rotation, rotation_speed)
        .with_fade_in_distance(fade_in_distance)
        .with_max_bounces(max_bounces)
}

#[inline]
fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + t * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_delay_curve_endpoints() {
        let spawner = Spawner::new(&ShowerConfig::default());
        assert!((spawner.delay_after(1) - 207.0).abs() < 1e-3);
        assert!((spawner.delay_after(20) - 3000.0).abs() < 1e-3);
    }

    #[test]
    fn test_delays_grow() {
        let spawner = Spawner::new(&ShowerConfig::default());
        for n in 1..20 {
            assert!(spawner.delay_after(n + 1) > spawner.delay_after(n));
        }
    }

    #[test]
    fn test_first_coin_due_immediately() {
        let mut spawner = Spawner::new(&ShowerConfig::default());
        assert_eq!(spawner.due(0.0), 1);
        assert_eq!(spawner.due(0.0), 0);
        // Second coin after 207ms
        assert_eq!(spawner.due(206.0), 0);
        assert_eq!(spawner.due(207.5), 1);
        assert_eq!(spawner.created(), 2);
        assert_eq!(spawner.remaining(), 18);
    }

    #[test]
    fn test_long_frame_releases_several() {
        let mut spawner = Spawner::new(&ShowerConfig::default());
        // 0, 207, 207 + 228 = 435
        assert_eq!(spawner.due(500.0), 3);
    }

    #[test]
    fn test_never_exceeds_count() {
        let config = ShowerConfig::default().with_coin_count(5);
        let mut spawner = Spawner::new(&config);
        assert_eq!(spawner.due(1.0e9), 5);
        assert_eq!(spawner.due(2.0e9), 0);
        assert!(spawner.is_exhausted());
        assert_eq!(spawner.next_due_ms(), None);
    }

    #[test]
    fn test_zero_coins_is_exhausted() {
        let mut spawner = Spawner::new(&ShowerConfig::default().with_coin_count(0));
        assert!(spawner.is_exhausted());
        assert_eq!(spawner.due(0.0), 0);
    }

    #[test]
    fn test_spawned_coin_ranges() {
        let config = ShowerConfig::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let coin = spawn_coin(&config, viewport, &mut rng);
            assert!(coin.position.x >= 0.0 && coin.position.x < 800.0);
            assert_eq!(coin.position.y, SPAWN_HEIGHT);
            assert!(coin.size >= 64.0 && coin.size <= 120.0);
            assert!(coin.velocity.x.abs() <= 1.5);
            assert!(coin.velocity.y >= 4.0 && coin.velocity.y <= 5.0);
            assert!(coin.rotation >= 0.0 && coin.rotation < 360.0);
            assert!(coin.rotation_speed.abs() <= 4.0);
            assert!(coin.fade_in_distance >= 100.0 && coin.fade_in_distance <= 300.0);
            assert!((2..=4).contains(&coin.max_bounces));
            assert_eq!(coin.opacity, 0.0);
            assert_eq!(coin.bounce_count, 0);
        }
    }

    #[test]
    fn test_degenerate_ranges_do_not_panic() {
        let config = ShowerConfig::default()
            .with_size_range(50.0, 50.0)
            .with_speed_range(3.0, 3.0);
        let mut rng = StdRng::seed_from_u64(1);
        let coin = spawn_coin(&config, Viewport::new(0.0, 0.0), &mut rng);
        assert_eq!(coin.size, 50.0);
        assert_eq!(coin.velocity.y, 3.0);
        assert_eq!(coin.position.x, 0.0);
    }

    #[test]
    fn test_same_seed_same_coin() {
        let config = ShowerConfig::default();
        let viewport = Viewport::new(1024.0, 768.0);
        let a = spawn_coin(&config, viewport, &mut StdRng::seed_from_u64(42));
        let b = spawn_coin(&config, viewport, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
