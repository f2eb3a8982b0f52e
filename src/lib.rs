//! # coinfall - falling coin particle shower
//!
//! A decorative, once-per-launch animation: coins spawn above the top of the
//! viewport, fall under simple gravity, bounce off the side walls and the
//! floor a few times, fade in while falling and fade out before they are
//! removed. When the last coin is gone the effect stops for good.
//!
//! ## Quick Start
//!
//! ```ignore
//! use coinfall::prelude::*;
//!
//! fn main() -> Result<(), ShowerError> {
//!     Coinfall::new()
//!         .with_config(ShowerConfig::default().with_coin_count(30))
//!         .exit_when_finished(true)
//!         .run()
//! }
//! ```
//!
//! ## Headless
//!
//! The simulation does not need a window. Drive a [`CoinShower`] yourself
//! and project coins onto any [`CoinSurface`]:
//!
//! ```
//! use coinfall::{CoinShower, NullSurface, ShowerConfig, Viewport};
//! use std::time::Duration;
//!
//! let mut shower = CoinShower::seeded(ShowerConfig::default(), 42);
//! let frames = shower.run_to_completion(
//!     Duration::from_millis(16),
//!     Viewport::new(1280.0, 720.0),
//!     &mut NullSurface,
//!     100_000,
//! );
//! assert!(frames.is_some());
//! ```
//!
//! ## Core Concepts
//!
//! ### Frames, not seconds
//!
//! Physics advance one fixed step per frame. Elapsed time only staggers the
//! spawns. A faster display plays the effect faster, just like a browser
//! animation frame loop.
//!
//! ### Determinism
//!
//! All randomness comes from the injected [`rand::Rng`]. The same seed, the
//! same viewport sequence and the same frame times give the same run.
//!
//! ### Per-coin lifecycle
//!
//! | Phase | Meaning |
//! |-------|---------|
//! | [`CoinPhase::FadingIn`] | opacity ramps up with downward travel |
//! | [`CoinPhase::Falling`] | fully visible |
//! | [`CoinPhase::Bouncing`] | has hit a wall or the floor |
//! | [`CoinPhase::FadingOut`] | out of bounces, losing opacity below the floor |
//! | [`CoinPhase::Removed`] | gone for good |

pub mod coin;
pub mod config;
pub mod error;
mod gpu;
pub mod physics;
pub mod projection;
mod shader;
pub mod shower;
mod simulation;
pub mod spawn;
pub mod sprite;
pub mod time;

pub use coin::{Coin, CoinId, CoinPhase};
pub use config::ShowerConfig;
pub use error::{ConfigError, GpuError, ShowerError, TextureError};
pub use glam::Vec2;
pub use gpu::InstanceSurface;
pub use projection::{CoinSurface, CoinTransform, NullSurface, Viewport};
pub use shader::CoinInstance;
pub use shower::{CoinShower, FrameReport, ShowerState, ShowerStats, StepOutcome};
pub use simulation::Coinfall;
pub use spawn::Spawner;
pub use sprite::CoinSprite;
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use coinfall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::coin::{Coin, CoinId, CoinPhase};
    pub use crate::config::ShowerConfig;
    pub use crate::error::ShowerError;
    pub use crate::projection::{CoinSurface, CoinTransform, NullSurface, Viewport};
    pub use crate::shower::{CoinShower, ShowerState, StepOutcome};
    pub use crate::simulation::Coinfall;
    pub use crate::sprite::CoinSprite;
    pub use crate::time::Time;
    pub use crate::Vec2;
}
