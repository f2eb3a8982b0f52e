//! The coin particle record.

use crate::projection::CoinTransform;
use glam::Vec2;

/// Stable handle to a coin inside a [`CoinShower`](crate::CoinShower).
///
/// Coins are never taken out of the shower's collection, only flagged as
/// removed, so an id stays valid for the lifetime of the shower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(pub usize);

impl CoinId {
    /// Index into the shower's coin collection.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where a coin is in its life.
///
/// Fade-in overlaps with falling and wall bounces, so this reports the most
/// specific phase that currently applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinPhase {
    /// Still travelling its fade-in distance.
    FadingIn,
    /// Fully visible, no bounce yet.
    Falling,
    /// Has bounced at least once and has not started fading out.
    Bouncing,
    /// Resting below the floor line and losing opacity.
    FadingOut,
    /// Gone. Terminal.
    Removed,
}

/// One falling coin.
///
/// Position is the top-left corner of the coin's box in logical pixels with
/// y growing downward. Velocities are in pixels per frame and rotation is in
/// degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Edge length of the coin's box.
    pub size: f32,
    pub rotation: f32,
    /// Degrees added to `rotation` each frame.
    pub rotation_speed: f32,
    /// 0 = invisible, 1 = opaque. Dips below 0 on the frame it is removed.
    pub opacity: f32,
    /// Downward travel needed to reach full opacity.
    pub fade_in_distance: f32,
    /// Downward travel accumulated so far.
    pub fade_in_progress: f32,
    pub bounce_count: u32,
    /// Floor bounces allowed before the coin settles and fades out.
    pub max_bounces: u32,
    fading_out: bool,
    removed: bool,
}

impl Coin {
    /// A coin at rest in its fade-in phase with a two-bounce budget.
    pub fn new(position: Vec2, velocity: Vec2, size: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            rotation: 0.0,
            rotation_speed: 0.0,
            opacity: 0.0,
            fade_in_distance: 100.0,
            fade_in_progress: 0.0,
            bounce_count: 0,
            max_bounces: 2,
            fading_out: false,
            removed: false,
        }
    }

    /// Set the initial rotation and spin.
    pub fn with_rotation(mut self, rotation: f32, rotation_speed: f32) -> Self {
        self.rotation = rotation;
        self.rotation_speed = rotation_speed;
        self
    }

    /// Set the distance over which the coin fades in.
    pub fn with_fade_in_distance(mut self, distance: f32) -> Self {
        self.fade_in_distance = distance;
        self
    }

    /// Set the floor bounce budget.
    pub fn with_max_bounces(mut self, max_bounces: u32) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    /// Whether the coin has been removed. Once true, stays true.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Whether the coin still has floor bounces left.
    #[inline]
    pub fn has_bounces_left(&self) -> bool {
        self.bounce_count < self.max_bounces
    }

    /// Current phase of the coin's life.
    pub fn phase(&self) -> CoinPhase {
        if self.removed {
            CoinPhase::Removed
        } else if self.fading_out {
            CoinPhase::FadingOut
        } else if self.fade_in_progress < self.fade_in_distance {
            CoinPhase::FadingIn
        } else if self.bounce_count > 0 {
            CoinPhase::Bouncing
        } else {
            CoinPhase::Falling
        }
    }

    /// Center of the coin's box.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size * 0.5)
    }

    /// Projection of the coin's current state onto its visual.
    pub fn transform(&self) -> CoinTransform {
        CoinTransform {
            translate: self.position,
            rotation_deg: self.rotation,
            opacity: self.opacity,
        }
    }

    pub(crate) fn begin_fade_out(&mut self) {
        self.fading_out = true;
    }

    pub(crate) fn mark_removed(&mut self) {
        self.removed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_coin_is_fading_in() {
        let coin = Coin::new(Vec2::new(10.0, -50.0), Vec2::new(0.0, 4.0), 64.0);
        assert_eq!(coin.phase(), CoinPhase::FadingIn);
        assert_eq!(coin.opacity, 0.0);
        assert!(!coin.is_removed());
        assert!(coin.has_bounces_left());
    }

    #[test]
    fn test_phase_progression() {
        let mut coin = Coin::new(Vec2::ZERO, Vec2::ZERO, 64.0).with_fade_in_distance(100.0);
        coin.fade_in_progress = 150.0;
        assert_eq!(coin.phase(), CoinPhase::Falling);

        coin.bounce_count = 1;
        assert_eq!(coin.phase(), CoinPhase::Bouncing);

        coin.begin_fade_out();
        assert_eq!(coin.phase(), CoinPhase::FadingOut);

        coin.mark_removed();
        assert_eq!(coin.phase(), CoinPhase::Removed);
    }

    #[test]
    fn test_center_and_transform() {
        let coin = Coin::new(Vec2::new(100.0, 200.0), Vec2::ZERO, 80.0).with_rotation(45.0, 2.0);
        assert_eq!(coin.center(), Vec2::new(140.0, 240.0));

        let t = coin.transform();
        assert_eq!(t.translate, Vec2::new(100.0, 200.0));
        assert_eq!(t.rotation_deg, 45.0);
        assert_eq!(t.opacity, 0.0);
    }
}
