//! Mirroring coin state onto whatever draws it.
//!
//! The shower never draws anything itself. Every frame it hands each live
//! coin's [`CoinTransform`] to a [`CoinSurface`], which owns the visuals.
//! Nothing flows back from the surface into the simulation.

use crate::coin::CoinId;
use glam::Vec2;
use std::fmt;

/// Size of the area coins fall through, in logical pixels.
///
/// Read fresh every frame so the shower follows window resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// No visible area, e.g. a minimized window.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl From<winit::dpi::LogicalSize<f64>> for Viewport {
    fn from(size: winit::dpi::LogicalSize<f64>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}

/// A coin's on-screen transform for one frame.
///
/// `Display` renders it in CSS transform syntax:
///
/// ```
/// use coinfall::CoinTransform;
/// use glam::Vec2;
///
/// let t = CoinTransform { translate: Vec2::new(12.5, 40.0), rotation_deg: 90.0, opacity: 1.0 };
/// assert_eq!(t.to_string(), "translate(12.5px, 40px) rotate(90deg)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinTransform {
    /// Top-left corner of the coin's box.
    pub translate: Vec2,
    /// Rotation about the box center, in degrees. Unbounded.
    pub rotation_deg: f32,
    pub opacity: f32,
}

impl fmt::Display for CoinTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) rotate({}deg)",
            self.translate.x, self.translate.y, self.rotation_deg
        )
    }
}

/// Something that can show coins.
///
/// The shower calls [`spawn`](Self::spawn) once when a coin is created,
/// [`project`](Self::project) every frame while it lives and
/// [`discard`](Self::discard) exactly once when it is removed.
pub trait CoinSurface {
    /// Create the visual for a new coin.
    fn spawn(&mut self, id: CoinId, size: f32, initial: &CoinTransform);

    /// Write this frame's transform and opacity.
    fn project(&mut self, id: CoinId, transform: &CoinTransform);

    /// Drop the visual for a removed coin.
    fn discard(&mut self, id: CoinId);
}

/// A surface that shows nothing. Used for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl CoinSurface for NullSurface {
    fn spawn(&mut self, _id: CoinId, _size: f32, _initial: &CoinTransform) {}

    fn project(&mut self, _id: CoinId, _transform: &CoinTransform) {}

    fn discard(&mut self, _id: CoinId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_display_negative_and_fractional() {
        let t = CoinTransform {
            translate: Vec2::new(-3.25, -50.0),
            rotation_deg: -721.5,
            opacity: 0.0,
        };
        assert_eq!(t.to_string(), "translate(-3.25px, -50px) rotate(-721.5deg)");
    }

    #[test]
    fn test_viewport_from_logical_size() {
        let vp = Viewport::from(winit::dpi::LogicalSize::new(1280.0, 720.0));
        assert_eq!(vp, Viewport::new(1280.0, 720.0));
    }
}
