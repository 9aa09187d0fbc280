//! Randomized particle shapes.
//!
//! Pure functions of a `fastrand::Rng`; seed the rng and the same
//! particles come out every time.

use std::f32::consts::TAU;
use std::ops::Range;

use crate::types::{GLYPHS, Particle, ParticleId, TrajectoryModel};

/// Uniform sampling ranges for one trajectory model.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranges {
    pub origin_x: Range<f32>,
    pub origin_y: Range<f32>,
    pub rotation: Range<f32>,
    pub size: Range<f32>,
    pub duration: Range<f32>,
    pub delay: Range<f32>,
    pub motion: Motion,
}

/// How the travel vector is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// Independent horizontal and vertical offsets, in px.
    Linear { dx: Range<f32>, dy: Range<f32> },
    /// Uniform angle in radians and radius in px.
    Radial { angle: Range<f32>, radius: Range<f32> },
}

impl Ranges {
    pub fn for_model(model: TrajectoryModel) -> Self {
        match model {
            TrajectoryModel::Drift => Ranges {
                origin_x: 0.0..100.0,
                origin_y: 0.0..100.0,
                rotation: -30.0..30.0,
                size: 18.0..42.0,
                duration: 2.4..4.2,
                delay: 0.0..0.6,
                motion: Motion::Linear {
                    dx: -40.0..40.0,
                    dy: -260.0..-120.0,
                },
            },
            TrajectoryModel::Burst => Ranges {
                origin_x: 50.0..50.0,
                origin_y: 50.0..50.0,
                rotation: -180.0..180.0,
                size: 16.0..34.0,
                duration: 1.1..2.0,
                delay: 0.0..0.2,
                motion: Motion::Radial {
                    angle: 0.0..TAU,
                    radius: 90.0..260.0,
                },
            },
        }
    }
}

/// Draw one particle.
pub fn sample(model: TrajectoryModel, id: ParticleId, rng: &mut fastrand::Rng) -> Particle {
    let r = Ranges::for_model(model);
    let glyph = GLYPHS[rng.usize(..GLYPHS.len())];
    let origin = (uniform(rng, &r.origin_x), uniform(rng, &r.origin_y));
    let travel = match &r.motion {
        Motion::Linear { dx, dy } => (uniform(rng, dx), uniform(rng, dy)),
        Motion::Radial { angle, radius } => {
            let a = uniform(rng, angle);
            let d = uniform(rng, radius);
            (d * a.cos(), d * a.sin())
        }
    };

    Particle {
        id,
        glyph,
        origin,
        travel,
        rotation: uniform(rng, &r.rotation),
        size: uniform(rng, &r.size),
        duration: uniform(rng, &r.duration),
        delay: uniform(rng, &r.delay),
    }
}

/// Uniform draw from `[start, end)`; a degenerate range yields `start`.
fn uniform(rng: &mut fastrand::Rng, range: &Range<f32>) -> f32 {
    range.start + rng.f32() * (range.end - range.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(model: TrajectoryModel, seed: u64, n: u64) -> Vec<Particle> {
        let mut rng = fastrand::Rng::with_seed(seed);
        (0..n)
            .map(|i| sample(model, ParticleId::from_seq(i), &mut rng))
            .collect()
    }

    fn within(v: f32, r: &Range<f32>) -> bool {
        if r.start == r.end {
            v == r.start
        } else {
            v >= r.start && v <= r.end
        }
    }

    #[test]
    fn same_seed_same_particles() {
        assert_eq!(draw(TrajectoryModel::Drift, 42, 20), draw(TrajectoryModel::Drift, 42, 20));
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(draw(TrajectoryModel::Burst, 1, 20), draw(TrajectoryModel::Burst, 2, 20));
    }

    #[test]
    fn drift_samples_stay_in_range_and_go_up() {
        let r = Ranges::for_model(TrajectoryModel::Drift);
        for p in draw(TrajectoryModel::Drift, 7, 500) {
            assert!(within(p.origin.0, &r.origin_x));
            assert!(within(p.origin.1, &r.origin_y));
            assert!(within(p.rotation, &r.rotation));
            assert!(within(p.size, &r.size));
            assert!(within(p.duration, &r.duration));
            assert!(within(p.delay, &r.delay));
            assert!(p.travel.1 < 0.0, "drift must bias upward");
            assert!(GLYPHS.contains(&p.glyph));
        }
    }

    #[test]
    fn drift_spawns_across_the_whole_viewport() {
        let ps = draw(TrajectoryModel::Drift, 11, 2_000);
        let upper = ps.iter().filter(|p| p.origin.1 < 40.0).count();
        let lower = ps.iter().filter(|p| p.origin.1 >= 60.0).count();
        assert!(upper > 500, "only {} of 2000 in the upper 40%", upper);
        assert!(lower > 500, "only {} of 2000 in the lower 40%", lower);
    }

    #[test]
    fn burst_samples_start_at_center_within_radius() {
        for p in draw(TrajectoryModel::Burst, 9, 500) {
            assert_eq!(p.origin, (50.0, 50.0));
            let dist = (p.travel.0 * p.travel.0 + p.travel.1 * p.travel.1).sqrt();
            assert!(dist >= 89.9 && dist <= 260.1, "radius {} out of range", dist);
            assert!(p.duration >= 1.1 && p.duration <= 2.0);
        }
    }

    #[test]
    fn ids_are_carried_through() {
        let ps = draw(TrajectoryModel::Drift, 3, 3);
        let ids: Vec<_> = ps.iter().map(|p| p.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["p-0", "p-1", "p-2"]);
    }
}
