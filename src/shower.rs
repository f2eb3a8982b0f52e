//! The shower controller.
//!
//! [`CoinShower`] owns everything the effect needs: config, random source,
//! spawner and the coin collection. A driver (the window host, or
//! [`CoinShower::run_to_completion`] for headless runs) calls
//! [`step`](CoinShower::step) once per frame until it reports
//! [`StepOutcome::Finished`].
//!
//! ```ignore
//! let mut shower = CoinShower::seeded(ShowerConfig::default(), 42);
//! shower.activate();
//!
//! let mut time = Time::new();
//! loop {
//!     let elapsed = time.update();
//!     if shower.step(elapsed, viewport, &mut surface) == StepOutcome::Finished {
//!         break;
//!     }
//! }
//! ```

use crate::coin::{Coin, CoinId};
use crate::config::ShowerConfig;
use crate::physics::advance_coin;
use crate::projection::{CoinSurface, Viewport};
use crate::spawn::{spawn_coin, Spawner};
use crate::time::Time;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Lifecycle of the whole effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowerState {
    /// Built but not activated.
    Idle,
    /// Spawning and/or animating.
    Running,
    /// Every coin spawned and removed. Terminal.
    Finished,
}

/// Result of one [`CoinShower::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not activated yet; nothing happened.
    Idle,
    /// Schedule another frame.
    Continue,
    /// Stop scheduling frames.
    Finished,
}

/// What happened during one update pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Coins created this frame.
    pub spawned: u32,
    pub wall_bounces: u32,
    pub floor_bounces: u32,
    /// Coins removed this frame.
    pub removed: u32,
    /// Coins still alive after the pass.
    pub live: usize,
}

/// Running totals over the life of a shower.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShowerStats {
    pub frames: u64,
    pub spawned: u32,
    pub wall_bounces: u32,
    pub floor_bounces: u32,
    pub removed: u32,
}

impl ShowerStats {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.spawned += report.spawned;
        self.wall_bounces += report.wall_bounces;
        self.floor_bounces += report.floor_bounces;
        self.removed += report.removed;
    }
}

/// A single run of the falling coin effect.
pub struct CoinShower<R = StdRng> {
    config: ShowerConfig,
    rng: R,
    spawner: Spawner,
    coins: Vec<Coin>,
    state: ShowerState,
    stats: ShowerStats,
}

impl CoinShower<StdRng> {
    /// Shower with a deterministic random source.
    pub fn seeded(config: ShowerConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Shower seeded from the operating system.
    pub fn from_entropy(config: ShowerConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> CoinShower<R> {
    /// Build an idle shower. The config is fixed from here on.
    pub fn new(config: ShowerConfig, rng: R) -> Self {
        Self {
            spawner: Spawner::new(&config),
            coins: Vec::with_capacity(config.coin_count as usize),
            config,
            rng,
            state: ShowerState::Idle,
            stats: ShowerStats::default(),
        }
    }

    /// Start the effect. Only the first call does anything.
    ///
    /// Returns whether this call started the shower.
    pub fn activate(&mut self) -> bool {
        if self.state != ShowerState::Idle {
            log::warn!("Coin shower already activated ({:?}), ignoring", self.state);
            return false;
        }
        log::info!("Coin shower activated with {} coins", self.config.coin_count);
        self.state = ShowerState::Running;
        true
    }

    /// Run one frame: create due coins, then advance every live coin.
    ///
    /// `elapsed` is the time since activation and only drives spawning.
    /// A running shower does nothing on an empty viewport: coins would all
    /// land on a floor at y = 0 and fade out unseen.
    pub fn step<S: CoinSurface + ?Sized>(
        &mut self,
        elapsed: Duration,
        viewport: Viewport,
        surface: &mut S,
    ) -> StepOutcome {
        match self.state {
            ShowerState::Idle => return StepOutcome::Idle,
            ShowerState::Finished => return StepOutcome::Finished,
            ShowerState::Running => {}
        }
        if viewport.is_empty() {
            return StepOutcome::Continue;
        }

        let spawned = self.spawn_due(elapsed, viewport, surface);
        let mut report = self.update(viewport, surface);
        report.spawned = spawned;
        self.stats.record(&report);

        if self.state == ShowerState::Finished {
            StepOutcome::Finished
        } else {
            StepOutcome::Continue
        }
    }

    /// Create every coin the spawner says is due.
    fn spawn_due<S: CoinSurface + ?Sized>(
        &mut self,
        elapsed: Duration,
        viewport: Viewport,
        surface: &mut S,
    ) -> u32 {
        let due = self.spawner.due(elapsed.as_secs_f64() * 1000.0);
        for _ in 0..due {
            let coin = spawn_coin(&self.config, viewport, &mut self.rng);
            let id = CoinId(self.coins.len());
            log::debug!(
                "Spawned coin {} at x={:.1} size={:.1} max_bounces={}",
                id.0,
                coin.position.x,
                coin.size,
                coin.max_bounces
            );
            surface.spawn(id, coin.size, &coin.transform());
            self.coins.push(coin);
        }
        due
    }

    /// One pass over all coins, projecting each onto `surface`.
    ///
    /// Also detects the end of the effect: once the spawner is exhausted and
    /// every coin is removed, a running shower becomes finished.
    pub fn update<S: CoinSurface + ?Sized>(&mut self, viewport: Viewport, surface: &mut S) -> FrameReport {
        let mut report = FrameReport::default();

        for (index, coin) in self.coins.iter_mut().enumerate() {
            if coin.is_removed() {
                continue;
            }

            let events = advance_coin(coin, &self.config, viewport, &mut self.rng);
            let id = CoinId(index);

            if events.wall_bounce {
                report.wall_bounces += 1;
            }
            if events.floor_bounce {
                report.floor_bounces += 1;
                log::debug!("Coin {} bounced off the floor ({}/{})", index, coin.bounce_count, coin.max_bounces);
            }

            if events.removed {
                report.removed += 1;
                log::debug!("Coin {} faded out", index);
                surface.discard(id);
            } else {
                report.live += 1;
                surface.project(id, &coin.transform());
            }
        }

        if self.state == ShowerState::Running && report.live == 0 && self.spawner.is_exhausted() {
            self.state = ShowerState::Finished;
            log::info!(
                "Coin shower finished after {} frames ({} wall bounces, {} floor bounces)",
                self.stats.frames + 1,
                self.stats.wall_bounces + report.wall_bounces,
                self.stats.floor_bounces + report.floor_bounces
            );
        }

        report
    }

    /// Drive the shower headlessly with a fixed frame step.
    ///
    /// Activates the shower if needed. Returns the number of frames it took
    /// to finish, or `None` if `max_frames` ran out first.
    pub fn run_to_completion<S: CoinSurface + ?Sized>(
        &mut self,
        frame_delta: Duration,
        viewport: Viewport,
        surface: &mut S,
        max_frames: u64,
    ) -> Option<u64> {
        if self.state == ShowerState::Idle {
            self.activate();
        }

        let mut time = Time::fixed(frame_delta);
        while time.frame() < max_frames {
            let elapsed = time.elapsed();
            time.update();
            if self.step(elapsed, viewport, surface) == StepOutcome::Finished {
                return Some(time.frame());
            }
        }

        log::warn!("Coin shower still running after {} frames", max_frames);
        None
    }

    /// All coins ever created, removed ones included, in creation order.
    #[inline]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    #[inline]
    pub fn coin(&self, id: CoinId) -> Option<&Coin> {
        self.coins.get(id.index())
    }

    /// Coins that have not been removed.
    pub fn live_count(&self) -> usize {
        self.coins.iter().filter(|c| !c.is_removed()).count()
    }

    #[inline]
    pub fn state(&self) -> ShowerState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> ShowerStats {
        self.stats
    }

    #[inline]
    pub fn config(&self) -> &ShowerConfig {
        &self.config
    }

    #[inline]
    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }
}
