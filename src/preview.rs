//! Headless run of the card on a virtual clock.
//!
//! Scripts a user who declines some number of times, says yes, watches
//! the celebration for a while, then hits replay. Nothing is drawn; the
//! result is a [`PreviewReport`] describing what the loop did.

use serde::Serialize;
use tracing::info;

use crate::clock::{Clock, ManualClock};
use crate::config::ParticleConfig;
use crate::interaction::{InteractionState, LoopSignal};
use crate::particles::{ActiveParticle, LoopStats, ParticleLoop};
use crate::types::{Millis, TrajectoryModel};

/// How many particles to keep in the report sample.
const SAMPLE_SIZE: usize = 5;

/// Script for a preview run.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Declines before the yes.
    pub declines: u32,
    /// How long the celebration runs before replay.
    pub duration_ms: Millis,
    /// Virtual frame length.
    pub step_ms: Millis,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            declines: 0,
            duration_ms: 5_000,
            step_ms: 16,
        }
    }
}

/// A particle as seen in the first frame.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleSample {
    pub id: String,
    pub glyph: &'static str,
    pub origin: (f32, f32),
    pub travel: (f32, f32),
    pub duration: f32,
    pub delay: f32,
    pub spawned_at: Millis,
    pub expires_at: Millis,
}

impl From<&ActiveParticle> for ParticleSample {
    fn from(p: &ActiveParticle) -> Self {
        ParticleSample {
            id: p.particle.id.to_string(),
            glyph: p.particle.glyph,
            origin: p.particle.origin,
            travel: p.particle.travel,
            duration: p.particle.duration,
            delay: p.particle.delay,
            spawned_at: p.spawned_at,
            expires_at: p.expires_at,
        }
    }
}

/// Outcome of a preview run.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    pub trajectory: TrajectoryModel,
    pub per_tick: usize,
    pub rate_ms: u64,
    pub max_particles: usize,
    pub declines: u32,
    pub positive_scale: f64,
    pub negative_scale: f64,
    pub decline_enabled: bool,
    pub duration_ms: Millis,
    pub frames: u64,
    pub peak_active: usize,
    /// Live particles right before replay.
    pub active_before_stop: usize,
    /// Live particles right after replay. Always zero.
    pub active_after_stop: usize,
    /// Timers left after replay. Always zero.
    pub pending_after_stop: usize,
    pub stats: LoopStats,
    pub sample: Vec<ParticleSample>,
}

/// Run the script against a fresh controller and loop.
pub fn run_preview(config: &ParticleConfig, options: &PreviewOptions) -> PreviewReport {
    let clock = ManualClock::new(0);
    let mut card = InteractionState::new();
    let mut particles = ParticleLoop::new(config.clone());

    for _ in 0..options.declines {
        card.register_decline();
    }
    let positive_scale = card.positive_scale();
    let negative_scale = card.negative_scale();
    let decline_enabled = card.decline_enabled();

    if card.activate_affirmative() == LoopSignal::Activate {
        particles.activate(clock.now());
    }
    let sample = particles.particles().take(SAMPLE_SIZE).map(ParticleSample::from).collect();

    let step = options.step_ms.max(1);
    let mut frames = 0;
    let mut peak_active = particles.len();
    while clock.now() < options.duration_ms {
        let now = clock.advance(step.min(options.duration_ms - clock.now()));
        particles.advance(now);
        peak_active = peak_active.max(particles.len());
        frames += 1;
    }

    let active_before_stop = particles.len();
    if card.reset() == LoopSignal::Deactivate {
        particles.deactivate();
    }

    let stats = particles.stats();
    info!(
        frames,
        peak_active,
        spawned = stats.spawned,
        evicted = stats.evicted,
        "preview finished"
    );

    PreviewReport {
        trajectory: config.trajectory,
        per_tick: config.per_tick,
        rate_ms: config.rate_ms,
        max_particles: config.max_particles,
        declines: options.declines,
        positive_scale,
        negative_scale,
        decline_enabled,
        duration_ms: options.duration_ms,
        frames,
        peak_active,
        active_before_stop,
        active_after_stop: particles.len(),
        pending_after_stop: particles.pending_timers(),
        stats,
        sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ParticleConfig {
        ParticleConfig {
            seed: Some(99),
            ..ParticleConfig::default()
        }
    }

    #[test]
    fn preview_never_exceeds_capacity() {
        let config = ParticleConfig {
            max_particles: 12,
            ..seeded()
        };
        let report = run_preview(&config, &PreviewOptions::default());
        assert!(report.peak_active <= 12);
        assert_eq!(report.peak_active, 12);
        assert!(report.stats.evicted > 0);
    }

    #[test]
    fn replay_leaves_nothing_behind() {
        let report = run_preview(&seeded(), &PreviewOptions::default());
        assert!(report.active_before_stop > 0);
        assert_eq!(report.active_after_stop, 0);
        assert_eq!(report.pending_after_stop, 0);
        assert_eq!(report.stats.spawned, report.stats.removed());
    }

    #[test]
    fn frames_cover_the_duration() {
        let options = PreviewOptions {
            duration_ms: 1_000,
            step_ms: 100,
            ..PreviewOptions::default()
        };
        let report = run_preview(&seeded(), &options);
        assert_eq!(report.frames, 10);
    }

    #[test]
    fn uneven_step_stops_exactly_at_duration() {
        let options = PreviewOptions {
            duration_ms: 1_000,
            step_ms: 300,
            ..PreviewOptions::default()
        };
        let report = run_preview(&seeded(), &options);
        assert_eq!(report.frames, 4);
    }

    #[test]
    fn declines_show_up_in_scales() {
        let options = PreviewOptions {
            declines: 7,
            ..PreviewOptions::default()
        };
        let report = run_preview(&seeded(), &options);
        assert!((report.negative_scale - 0.25).abs() < 1e-9);
        assert!(!report.decline_enabled);
    }

    #[test]
    fn sample_is_the_initial_batch() {
        let report = run_preview(&seeded(), &PreviewOptions::default());
        assert_eq!(report.sample.len(), 2);
        assert!(report.sample.iter().all(|p| p.spawned_at == 0));
    }

    #[test]
    fn seeded_previews_are_reproducible() {
        let a = run_preview(&seeded(), &PreviewOptions::default());
        let b = run_preview(&seeded(), &PreviewOptions::default());
        assert_eq!(a.stats, b.stats);
        assert_eq!(
            serde_json::to_string(&a.sample).unwrap(),
            serde_json::to_string(&b.sample).unwrap()
        );
    }
}
