//! Per-coin kinematics.
//!
//! One call to [`advance_coin`] is one frame for one coin. The steps run in
//! a fixed order:
//!
//! 1. gravity
//! 2. friction
//! 3. explicit Euler integration
//! 4. fade-in
//! 5. rotation
//! 6. left/right wall bounce
//! 7. floor bounce or fade-out
//!
//! Nothing here is scaled by elapsed time. A coin moves one step per frame,
//! so the effect runs faster on faster displays.

use crate::coin::Coin;
use crate::config::ShowerConfig;
use crate::projection::Viewport;
use rand::Rng;

/// Share of post-bounce horizontal speed turned into an upward kick at a wall.
pub const WALL_LIFT: f32 = 0.3;

/// Spin multiplier on a wall bounce.
pub const WALL_SPIN_BOOST: f32 = 1.2;

/// Spin multiplier on a floor bounce.
pub const FLOOR_SPIN_BOOST: f32 = 1.1;

/// The floor line sits this fraction of a coin's size above the bottom edge.
pub const FLOOR_INSET: f32 = 0.2;

/// Opacity lost per frame while fading out.
pub const FADE_OUT_STEP: f32 = 0.03;

/// What happened to a coin during one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoinEvents {
    pub wall_bounce: bool,
    pub floor_bounce: bool,
    /// The coin lost opacity below the floor line.
    pub fading: bool,
    /// The coin was removed this frame.
    pub removed: bool,
}

/// Advance a coin by one frame.
///
/// Removed coins are left untouched.
pub fn advance_coin<R: Rng>(
    coin: &mut Coin,
    config: &ShowerConfig,
    viewport: Viewport,
    rng: &mut R,
) -> CoinEvents {
    let mut events = CoinEvents::default();
    if coin.is_removed() {
        return events;
    }

    apply_gravity(coin, config);
    apply_friction(coin, config);
    integrate(coin);
    fade_in(coin);
    coin.rotation += coin.rotation_speed;

    events.wall_bounce = bounce_off_walls(coin, config, viewport, rng);

    let floor = floor_line(coin, viewport);
    if coin.position.y > floor {
        if coin.has_bounces_left() && coin.velocity.y.abs() > config.bottom_bounce_threshold {
            coin.position.y = floor;
            coin.velocity.y = -coin.velocity.y * config.bounce_reduction;
            coin.velocity.x += (rng.gen::<f32>() - 0.5) * config.horizontal_boost;
            coin.rotation_speed *= FLOOR_SPIN_BOOST;
            coin.bounce_count = coin.bounce_count.saturating_add(1);
            events.floor_bounce = true;
        } else {
            events.fading = true;
            events.removed = fade_out(coin);
        }
    }

    events
}

#[inline]
pub fn apply_gravity(coin: &mut Coin, config: &ShowerConfig) {
    coin.velocity.y += config.gravity;
}

#[inline]
pub fn apply_friction(coin: &mut Coin, config: &ShowerConfig) {
    coin.velocity *= config.friction;
}

#[inline]
pub fn integrate(coin: &mut Coin) {
    coin.position += coin.velocity;
}

/// Accumulate downward travel and ramp opacity toward 1.
///
/// Stops touching opacity once the fade-in distance has been covered.
pub fn fade_in(coin: &mut Coin) {
    if coin.fade_in_progress < coin.fade_in_distance {
        coin.fade_in_progress += coin.velocity.y;
        coin.opacity = (coin.fade_in_progress / coin.fade_in_distance).min(1.0);
    }
}

/// Reflect off the left or right edge. Returns whether a bounce happened.
///
/// The coin is clamped to the edge, loses speed, gets an upward kick and a
/// faster spin in a random direction. Wall bounces count toward the bounce
/// budget.
pub fn bounce_off_walls<R: Rng>(
    coin: &mut Coin,
    config: &ShowerConfig,
    viewport: Viewport,
    rng: &mut R,
) -> bool {
    let right_edge = viewport.width - coin.size;
    let edge = if coin.position.x < 0.0 {
        0.0
    } else if coin.position.x > right_edge {
        right_edge
    } else {
        return false;
    };

    coin.position.x = edge;
    coin.velocity.x = -coin.velocity.x * config.bounce_reduction;
    coin.velocity.y -= coin.velocity.x.abs() * WALL_LIFT;
    let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    coin.rotation_speed = coin.rotation_speed.abs() * direction * WALL_SPIN_BOOST;
    coin.bounce_count = coin.bounce_count.saturating_add(1);
    true
}

/// Lose one step of opacity. Returns `true` if the coin was removed.
pub fn fade_out(coin: &mut Coin) -> bool {
    coin.begin_fade_out();
    coin.opacity -= FADE_OUT_STEP;
    if coin.opacity <= 0.0 {
        coin.mark_removed();
        return true;
    }
    false
}

/// Y coordinate past which a coin is considered on the floor.
#[inline]
pub fn floor_line(coin: &Coin, viewport: Viewport) -> f32 {
    viewport.height - coin.size * FLOOR_INSET
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::CoinPhase;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_gravity_before_friction_before_integration() {
        let config = ShowerConfig::default();
        let mut coin = Coin::new(Vec2::new(100.0, -50.0), Vec2::new(0.0, 4.0), 64.0);

        apply_gravity(&mut coin, &config);
        assert!(approx(coin.velocity.y, 4.2));

        let mut coin = Coin::new(Vec2::new(100.0, -50.0), Vec2::new(0.0, 4.0), 64.0);
        advance_coin(&mut coin, &config, viewport(), &mut rng());
        // (4 + 0.2) * 0.99, then moved by the damped velocity
        assert!(approx(coin.velocity.y, 4.158));
        assert!(approx(coin.position.y, -50.0 + 4.158));
    }

    #[test]
    fn test_wall_bounce_left() {
        let config = ShowerConfig::default();
        let mut coin = Coin::new(Vec2::new(-5.0, 100.0), Vec2::new(-2.0, 3.0), 64.0)
            .with_rotation(0.0, 2.0);

        assert!(bounce_off_walls(&mut coin, &config, viewport(), &mut rng()));
        assert_eq!(coin.position.x, 0.0);
        assert!(approx(coin.velocity.x, 1.9));
        // Upward kick of 0.3 * 1.9
        assert!(approx(coin.velocity.y, 3.0 - 0.57));
        assert!(approx(coin.rotation_speed.abs(), 2.4));
        assert_eq!(coin.bounce_count, 1);
    }

    #[test]
    fn test_wall_bounce_right_clamps_to_edge() {
        let config = ShowerConfig::default();
        let mut coin = Coin::new(Vec2::new(790.0, 100.0), Vec2::new(4.0, 0.0), 64.0);

        assert!(bounce_off_walls(&mut coin, &config, viewport(), &mut rng()));
        assert_eq!(coin.position.x, 800.0 - 64.0);
        assert!(approx(coin.velocity.x, -3.8));
    }

    #[test]
    fn test_no_wall_bounce_inside() {
        let config = ShowerConfig::default();
        let mut coin = Coin::new(Vec2::new(300.0, 100.0), Vec2::new(4.0, 0.0), 64.0);
        assert!(!bounce_off_walls(&mut coin, &config, viewport(), &mut rng()));
        assert_eq!(coin.bounce_count, 0);
    }

    #[test]
    fn test_floor_bounce_reflects() {
        let config = ShowerConfig::default();
        let floor = 600.0 - 64.0 * FLOOR_INSET;
        let mut coin = Coin::new(Vec2::new(300.0, floor - 1.0), Vec2::new(0.0, 6.0), 64.0)
            .with_rotation(0.0, 2.0);
        coin.fade_in_progress = coin.fade_in_distance;
        coin.opacity = 1.0;

        let events = advance_coin(&mut coin, &config, viewport(), &mut rng());
        assert!(events.floor_bounce);
        assert_eq!(coin.position.y, floor);
        assert!(coin.velocity.y < 0.0);
        assert!(approx(coin.velocity.y, -(6.2 * 0.99) * 0.95));
        assert!(approx(coin.rotation_speed, 2.2));
        assert_eq!(coin.bounce_count, 1);
        assert_eq!(coin.opacity, 1.0);
    }

    #[test]
    fn test_floor_bounce_nudge_is_bounded() {
        let config = ShowerConfig::default();
        let floor = 600.0 - 64.0 * FLOOR_INSET;
        for seed in 0..64 {
            let mut coin = Coin::new(Vec2::new(300.0, floor - 1.0), Vec2::new(1.0, 6.0), 64.0);
            let mut rng = StdRng::seed_from_u64(seed);

            let events = advance_coin(&mut coin, &config, viewport(), &mut rng);
            assert!(events.floor_bounce);
            // Friction first, then at most half the boost either way
            let nudge = coin.velocity.x - 1.0 * config.friction;
            assert!(nudge.abs() <= config.horizontal_boost / 2.0 + 1e-6, "seed {seed}: nudge {nudge}");
        }
    }

    #[test]
    fn test_exhausted_budget_fades_regardless_of_speed() {
        let config = ShowerConfig::default();
        let floor = 600.0 - 64.0 * FLOOR_INSET;
        let mut coin = Coin::new(Vec2::new(300.0, floor - 1.0), Vec2::new(0.0, 40.0), 64.0)
            .with_max_bounces(2);
        coin.bounce_count = 2;
        coin.fade_in_progress = coin.fade_in_distance;
        coin.opacity = 1.0;

        let events = advance_coin(&mut coin, &config, viewport(), &mut rng());
        assert!(!events.floor_bounce);
        assert!(events.fading);
        assert_eq!(coin.bounce_count, 2);
        assert!(approx(coin.opacity, 1.0 - FADE_OUT_STEP));
        assert_eq!(coin.phase(), CoinPhase::FadingOut);
    }

    #[test]
    fn test_slow_coin_fades_instead_of_bouncing() {
        let config = ShowerConfig::default().with_gravity(0.0);
        let floor = 600.0 - 64.0 * FLOOR_INSET;
        let mut coin = Coin::new(Vec2::new(300.0, floor), Vec2::new(0.0, 0.3), 64.0);
        coin.fade_in_progress = coin.fade_in_distance;
        coin.opacity = 1.0;

        let events = advance_coin(&mut coin, &config, viewport(), &mut rng());
        assert!(events.fading);
        assert_eq!(coin.bounce_count, 0);
    }

    #[test]
    fn test_fade_out_removes_at_zero() {
        let mut coin = Coin::new(Vec2::ZERO, Vec2::ZERO, 64.0);
        coin.opacity = 0.05;
        assert!(!fade_out(&mut coin));
        assert!(fade_out(&mut coin));
        assert!(coin.is_removed());
        assert!(coin.opacity <= 0.0);
    }

    #[test]
    fn test_fade_in_is_capped() {
        let mut coin = Coin::new(Vec2::ZERO, Vec2::new(0.0, 80.0), 64.0).with_fade_in_distance(100.0);
        fade_in(&mut coin);
        assert!(approx(coin.opacity, 0.8));
        fade_in(&mut coin);
        assert_eq!(coin.opacity, 1.0);
        // Past the distance, opacity is no longer written
        coin.opacity = 0.5;
        fade_in(&mut coin);
        assert_eq!(coin.opacity, 0.5);
    }

    #[test]
    fn test_removed_coin_is_inert() {
        let config = ShowerConfig::default();
        let mut coin = Coin::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0), 64.0);
        coin.mark_removed();
        let before = coin.clone();

        let events = advance_coin(&mut coin, &config, viewport(), &mut rng());
        assert_eq!(events, CoinEvents::default());
        assert_eq!(coin, before);
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let config = ShowerConfig::default();
        let mut coin = Coin::new(Vec2::new(0.0, -50.0), Vec2::new(1.0, 4.0), 64.0);
        let tiny = Viewport::new(10.0, 10.0);
        let mut rng = rng();
        for _ in 0..1000 {
            advance_coin(&mut coin, &config, tiny, &mut rng);
            if coin.is_removed() {
                break;
            }
        }
        assert!(coin.is_removed());
    }
}
