//! Incubation driver
//!
//! [`Incubator`] is the session context. It owns the countdown, the
//! collection, the compositor and the display surface; collaborators are
//! handed to it at construction and nothing is read from ambient state.
//!
//! A scheduler calls [`Incubator::tick`] as often as it likes. Each tick
//! re-derives the remaining time, so an irregular cadence is harmless.
//!
//! ```text
//! Idle --start--> Incubating --expire--> Hatching --reveal_at--> Idle
//!                     |
//!                     +--cancel--> Idle
//! ```

mod display;
mod session;

pub use display::{format_countdown, led_lit, wobble_degrees, Countdown};
pub use session::{DurationError, IncubationDuration, IncubationSession, Phase};

use std::time::Duration;

use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::assets::{AssetKey, AssetLoader, DirectoryAssets};
use crate::clock::{Clock, SystemClock};
use crate::compositor::{Compositor, RenderError};
use crate::config::IncubatorConfig;
use crate::generator::generate;
use crate::models::CreatureDescriptor;
use crate::store::{Collection, CollectionStore, FileBackend};
use crate::surface::DisplaySurface;

/// Default pause between the egg cracking and the creature appearing
pub const DEFAULT_HATCH_DELAY: Duration = Duration::from_millis(1000);

/// Rejected incubator commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IncubatorError {
    /// Duration changes require an idle incubator
    #[error("incubation duration can only change while idle")]
    NotIdle,
    /// The previous egg has not finished hatching
    #[error("cannot start while a creature is hatching")]
    HatchInProgress,
}

/// Announcement for the reveal modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HatchEvent {
    pub creature: CreatureDescriptor,
    pub title: String,
    pub message: String,
}

impl HatchEvent {
    pub fn new(creature: CreatureDescriptor) -> Self {
        let message = format!("You discovered a {}!", creature.headline());
        Self { creature, title: "HATCHED!".to_string(), message }
    }
}

/// Receives user-facing events. The incubator never draws dialogs itself.
pub trait HatchNotifier {
    /// A creature was revealed and added to the collection.
    fn hatched(&mut self, event: &HatchEvent);

    /// Something could not be drawn. Logical state is unaffected.
    fn display_unavailable(&mut self, error: &RenderError) {
        let _ = error;
    }
}

/// Notifier that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl HatchNotifier for SilentNotifier {
    fn hatched(&mut self, _event: &HatchEvent) {}
}

/// Result of one scheduling pulse.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Idle,
    Incubating(Countdown),
    /// Egg cracked, reveal pending
    Hatching,
    /// Creature revealed on this tick; the incubator is idle again
    Hatched(CreatureDescriptor),
}

/// The incubator session context.
pub struct Incubator<L, S> {
    session: IncubationSession,
    store: CollectionStore,
    compositor: Compositor<L>,
    surface: S,
    notifier: Box<dyn HatchNotifier>,
    clock: Box<dyn Clock>,
    rng: StdRng,
    hatch_delay_ms: i64,
}

impl<L: AssetLoader, S: DisplaySurface> Incubator<L, S> {
    /// An idle incubator on the system clock with an OS-seeded generator.
    pub fn new(compositor: Compositor<L>, surface: S, store: CollectionStore) -> Self {
        Self {
            session: IncubationSession::default(),
            store,
            compositor,
            surface,
            notifier: Box::new(SilentNotifier),
            clock: Box::new(SystemClock),
            rng: StdRng::from_os_rng(),
            hatch_delay_ms: DEFAULT_HATCH_DELAY.as_millis() as i64,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl HatchNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Deterministic creature generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_hatch_delay(mut self, delay: Duration) -> Self {
        self.hatch_delay_ms = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
        self
    }

    pub fn session(&self) -> &IncubationSession {
        &self.session
    }

    pub fn collection(&self) -> &Collection {
        self.store.collection()
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Time left on the countdown, if one is running.
    pub fn remaining_ms(&self) -> Option<i64> {
        self.session.remaining_ms(self.clock.now_ms())
    }

    /// Change the configured duration. Rejected unless idle, so a running
    /// countdown is never replaced behind the caller's back.
    pub fn set_duration(&mut self, duration: IncubationDuration) -> Result<(), IncubatorError> {
        self.session.set_duration(duration)
    }

    /// Draw the untinted egg, e.g. right after construction.
    pub async fn show_egg(&mut self) {
        let shown = self.compositor.show_sprite(AssetKey::Egg, &mut self.surface).await;
        self.report(shown);
    }

    /// Start incubating for `duration`. A running countdown is cancelled
    /// first; a pending hatch is not interrupted.
    pub async fn start(&mut self, duration: IncubationDuration) -> Result<(), IncubatorError> {
        if self.session.is_hatching() {
            return Err(IncubatorError::HatchInProgress);
        }
        if self.session.cancel() {
            info!("restarting incubation, previous countdown discarded");
        }
        self.session.set_duration(duration)?;

        let now = self.clock.now_ms();
        self.session.start(now)?;
        info!(minutes = duration.minutes(), started_at = now, "incubation started");

        self.show_egg().await;
        Ok(())
    }

    /// Cancel a running countdown. Returns false if nothing was running.
    pub async fn cancel(&mut self) -> bool {
        if !self.session.cancel() {
            return false;
        }
        info!("incubation cancelled");
        self.show_egg().await;
        true
    }

    /// Advance the state machine to the current time.
    pub async fn tick(&mut self) -> Tick {
        let now = self.clock.now_ms();

        if let Some(remaining) = self.session.remaining_ms(now) {
            if remaining > 0 {
                return Tick::Incubating(Countdown::at(remaining, now));
            }

            let creature = generate(&mut self.rng, now);
            info!(id = creature.id, species = %creature.species, overdue_ms = -remaining, "egg is hatching");
            self.session.expire(creature, now.saturating_add(self.hatch_delay_ms));

            let shown = self.compositor.show_sprite(AssetKey::CrackedEgg, &mut self.surface).await;
            self.report(shown);
        }

        match self.session.take_reveal(now) {
            Some(creature) => {
                self.reveal(&creature).await;
                Tick::Hatched(creature)
            }
            None if self.session.is_hatching() => Tick::Hatching,
            None => Tick::Idle,
        }
    }

    /// Render every collected creature for a collection view, newest first.
    pub async fn thumbnails(&self) -> Vec<Result<RgbaImage, RenderError>> {
        let mut thumbs = Vec::with_capacity(self.collection().len());
        for creature in self.collection() {
            thumbs.push(self.compositor.thumbnail(creature).await);
        }
        thumbs
    }

    async fn reveal(&mut self, creature: &CreatureDescriptor) {
        let rendered = self.compositor.render(creature, &mut self.surface).await;
        self.report(rendered);

        if let Err(e) = self.store.append(creature.clone()) {
            warn!(error = %e, "hatched creature kept in memory only");
        }
        debug!(count = self.collection().len(), "collection updated");

        self.notifier.hatched(&HatchEvent::new(creature.clone()));
    }

    fn report(&mut self, result: Result<(), RenderError>) {
        if let Err(e) = result {
            warn!(error = %e, "display unavailable");
            self.notifier.display_unavailable(&e);
        }
    }
}

impl<S: DisplaySurface> Incubator<DirectoryAssets, S> {
    /// Build an incubator from configuration: PNG assets from
    /// `assets.dir`, collection persisted to `storage.path`.
    pub fn from_config(config: &IncubatorConfig, surface: S) -> Result<Self, DurationError> {
        let compositor = Compositor::new(DirectoryAssets::new(&config.assets.dir))
            .with_retries(config.assets.retries);
        let store = CollectionStore::open(FileBackend::new(&config.storage.path));

        let mut incubator = Self::new(compositor, surface, store)
            .with_hatch_delay(Duration::from_millis(config.timer.hatch_delay_ms));
        incubator.session = IncubationSession::new(config.timer.duration()?);
        Ok(incubator)
    }
}
