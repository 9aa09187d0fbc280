//! Particle animation loop.
//!
//! Owns the live particle set and the timers that feed and drain it.
//! State machine: Inactive -> Active -> Inactive.
//!
//! - `activate(now)` emits a batch immediately and arms a periodic spawn.
//! - Each particle gets a one-shot removal at `spawn + lifetime + buffer`.
//! - A full set evicts its oldest particle (and cancels its removal).
//! - `deactivate()` cancels every timer, then clears the set.
//!
//! Every particle therefore leaves the set exactly once: by expiry, by
//! eviction, or by deactivation.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ParticleConfig;
use crate::scheduler::{Scheduler, TimerId};
use crate::trajectory;
use crate::types::{Millis, Particle, ParticleId};

/// Work the loop schedules for itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopTask {
    Spawn,
    Remove(ParticleId),
}

/// A particle plus the loop's bookkeeping for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveParticle {
    pub particle: Particle,
    pub spawned_at: Millis,
    /// When the removal timer fires.
    pub expires_at: Millis,
    removal: TimerId,
}

impl ActiveParticle {
    /// Displacement in px at `now`.
    pub fn offset_at(&self, now: Millis) -> (f32, f32) {
        self.particle.offset_at(now.saturating_sub(self.spawned_at))
    }
}

/// Lifetime counters, mostly for previews and logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    pub spawned: u64,
    /// Removed by their own timer.
    pub expired: u64,
    /// Dropped to make room at capacity.
    pub evicted: u64,
    /// Dropped by deactivation.
    pub cleared: u64,
}

impl LoopStats {
    /// Particles that have left the set by any path.
    pub fn removed(&self) -> u64 {
        self.expired + self.evicted + self.cleared
    }
}

/// The loop itself. One per card.
#[derive(Debug)]
pub struct ParticleLoop {
    config: ParticleConfig,
    rng: fastrand::Rng,
    scheduler: Scheduler<LoopTask>,
    /// Oldest first.
    active: VecDeque<ActiveParticle>,
    spawn_timer: Option<TimerId>,
    next_seq: u64,
    stats: LoopStats,
}

impl ParticleLoop {
    /// Build an inactive loop. Seeds from `config.seed` when set.
    pub fn new(config: ParticleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        ParticleLoop {
            config,
            rng,
            scheduler: Scheduler::new(),
            active: VecDeque::new(),
            spawn_timer: None,
            next_seq: 0,
            stats: LoopStats::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.spawn_timer.is_some()
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> impl Iterator<Item = &ActiveParticle> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Timers not yet fired (spawn tick plus one removal per live particle).
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Earliest time `advance` has something to do.
    pub fn next_due(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Start spawning. No-op when already active.
    pub fn activate(&mut self, now: Millis) {
        if self.is_active() {
            return;
        }
        debug!(
            per_tick = self.config.per_tick,
            rate_ms = self.config.rate_ms,
            max = self.config.max_particles,
            trajectory = %self.config.trajectory,
            "particle loop activated"
        );
        let period = self.config.rate_ms.max(1);
        self.spawn_timer = Some(self.scheduler.every(now, period, LoopTask::Spawn));
        self.spawn_batch(now);
    }

    /// Stop spawning and drop everything. Safe to call at any time.
    pub fn deactivate(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        let cleared = self.active.len();
        self.active.clear();
        self.spawn_timer = None;
        self.stats.cleared += cleared as u64;
        if cancelled > 0 || cleared > 0 {
            debug!(cancelled, cleared, "particle loop deactivated");
        }
    }

    /// Fire every task due at or before `now`, in due order.
    ///
    /// Spawns are timestamped with their due time, so a late call catches
    /// up exactly as if every tick had been on time.
    pub fn advance(&mut self, now: Millis) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            match fired.task {
                LoopTask::Spawn => self.spawn_batch(fired.due),
                LoopTask::Remove(id) => self.expire(&id),
            }
        }
    }

    fn spawn_batch(&mut self, at: Millis) {
        for _ in 0..self.config.per_tick {
            self.spawn_one(at);
        }
    }

    fn spawn_one(&mut self, at: Millis) {
        while self.active.len() >= self.config.max_particles {
            match self.active.pop_front() {
                Some(oldest) => {
                    self.scheduler.cancel(oldest.removal);
                    self.stats.evicted += 1;
                    trace!(id = %oldest.particle.id, "particle evicted");
                }
                None => break,
            }
        }

        let id = ParticleId::from_seq(self.next_seq);
        self.next_seq += 1;
        let particle = trajectory::sample(self.config.trajectory, id.clone(), &mut self.rng);
        let buffer = self.config.buffer_ms;
        let lifetime = particle.lifetime_ms().saturating_add(buffer);
        let removal = self.scheduler.after(at, lifetime, LoopTask::Remove(id));
        let expires_at = at.saturating_add(lifetime);

        trace!(id = %particle.id, glyph = particle.glyph, expires_at, "particle spawned");
        self.active.push_back(ActiveParticle {
            particle,
            spawned_at: at,
            expires_at,
            removal,
        });
        self.stats.spawned += 1;
    }

    fn expire(&mut self, id: &ParticleId) {
        if let Some(pos) = self.active.iter().position(|p| &p.particle.id == id) {
            self.active.remove(pos);
            self.stats.expired += 1;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
