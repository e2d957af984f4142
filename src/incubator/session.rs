//! Incubation session state
//!
//! Pure bookkeeping, no I/O. The start time only exists inside
//! [`Phase::Incubating`], and remaining time is always derived from it.

use thiserror::Error;

use super::IncubatorError;
use crate::models::CreatureDescriptor;

const MS_PER_MINUTE: i64 = 60 * 1000;

/// Invalid incubation length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("incubation duration must be at least 1 minute, got {0}")]
pub struct DurationError(pub u32);

/// A validated incubation length of at least one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IncubationDuration(u32);

impl IncubationDuration {
    pub const DEFAULT_MINUTES: u32 = 25;

    pub fn from_minutes(minutes: u32) -> Result<Self, DurationError> {
        if minutes == 0 {
            return Err(DurationError(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_millis(&self) -> i64 {
        i64::from(self.0) * MS_PER_MINUTE
    }
}

impl Default for IncubationDuration {
    fn default() -> Self {
        Self(Self::DEFAULT_MINUTES)
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No egg in the incubator
    Idle,
    /// Countdown running since `started_at`
    Incubating { started_at: i64 },
    /// Countdown expired; `creature` is revealed at `reveal_at`
    Hatching { creature: CreatureDescriptor, reveal_at: i64 },
}

/// The single incubation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncubationSession {
    phase: Phase,
    duration: IncubationDuration,
}

impl IncubationSession {
    pub fn new(duration: IncubationDuration) -> Self {
        Self { phase: Phase::Idle, duration }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn duration(&self) -> IncubationDuration {
        self.duration
    }

    /// True while the countdown is running.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Incubating { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_hatching(&self) -> bool {
        matches!(self.phase, Phase::Hatching { .. })
    }

    /// Change the duration. Only allowed while idle.
    pub fn set_duration(&mut self, duration: IncubationDuration) -> Result<(), IncubatorError> {
        if !self.is_idle() {
            return Err(IncubatorError::NotIdle);
        }
        self.duration = duration;
        Ok(())
    }

    /// Start counting from `now`. A running countdown is discarded first, so
    /// two countdowns can never overlap. Returns true if one was discarded.
    pub fn start(&mut self, now: i64) -> Result<bool, IncubatorError> {
        let restarted = match self.phase {
            Phase::Idle => false,
            Phase::Incubating { .. } => true,
            Phase::Hatching { .. } => return Err(IncubatorError::HatchInProgress),
        };
        self.phase = Phase::Incubating { started_at: now };
        Ok(restarted)
    }

    /// Drop a running countdown with no partial credit. Returns true if one
    /// was running.
    pub fn cancel(&mut self) -> bool {
        if self.is_active() {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// `duration - (now - started_at)` while incubating.
    pub fn remaining_ms(&self, now: i64) -> Option<i64> {
        match self.phase {
            Phase::Incubating { started_at } => Some(self.duration.as_millis() - (now - started_at)),
            _ => None,
        }
    }

    /// Move an expired countdown into hatching. No-op unless incubating.
    pub fn expire(&mut self, creature: CreatureDescriptor, reveal_at: i64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.phase = Phase::Hatching { creature, reveal_at };
        true
    }

    /// Finish hatching once `now` reaches the reveal deadline.
    pub fn take_reveal(&mut self, now: i64) -> Option<CreatureDescriptor> {
        let due = matches!(self.phase, Phase::Hatching { reveal_at, .. } if now >= reveal_at);
        if !due {
            return None;
        }
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Hatching { creature, .. } => Some(creature),
            _ => None,
        }
    }
}

impl Default for IncubationSession {
    fn default() -> Self {
        Self::new(IncubationDuration::default())
    }
}
