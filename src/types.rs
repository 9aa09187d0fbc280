//! Domain types for heartcard.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Milliseconds on whatever clock drives the card (wall or virtual).
pub type Millis = u64;

/// Unique identifier of a particle, also the key of its removal timer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(String);

impl ParticleId {
    /// Build the id for the `seq`-th particle ever spawned by a loop.
    pub fn from_seq(seq: u64) -> Self {
        ParticleId(format!("p-{}", seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The glyphs a particle can be drawn as.
pub const GLYPHS: [&str; 8] = ["💖", "💕", "💘", "💗", "💓", "💝", "✨", "🌸"];

// ============================================================================
// ENUMS
// ============================================================================

/// The user's answer so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice {
    #[default]
    Undecided,
    Affirmed,
}

/// The two answer buttons on the question screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Button {
    #[default]
    Yes,
    No,
}

impl Button {
    /// The other button.
    pub fn toggled(self) -> Self {
        match self {
            Button::Yes => Button::No,
            Button::No => Button::Yes,
        }
    }
}

/// How particles are placed and where they travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryModel {
    /// Spawn anywhere in the viewport, drift upward.
    #[default]
    Drift,
    /// Spawn at the viewport center, fly outward in every direction.
    Burst,
}

impl fmt::Display for TrajectoryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryModel::Drift => f.write_str("drift"),
            TrajectoryModel::Burst => f.write_str("burst"),
        }
    }
}

// ============================================================================
// STRUCTS
// ============================================================================

/// A single transient glyph. Immutable once spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub glyph: &'static str,
    /// Spawn position in percent of the viewport, (0,0) top-left.
    pub origin: (f32, f32),
    /// Total displacement over the particle's flight, in px.
    pub travel: (f32, f32),
    /// Degrees.
    pub rotation: f32,
    /// Glyph size in px.
    pub size: f32,
    /// Flight time in seconds.
    pub duration: f32,
    /// Time in seconds before the particle starts moving.
    pub delay: f32,
}

impl Particle {
    /// Flight time plus start delay, in seconds.
    pub fn lifetime_secs(&self) -> f64 {
        f64::from(self.duration) + f64::from(self.delay)
    }

    /// [`lifetime_secs`](Self::lifetime_secs) in whole milliseconds, rounded
    /// down so a removal scheduled from it never lands past the exact deadline.
    pub fn lifetime_ms(&self) -> Millis {
        (self.lifetime_secs() * 1000.0).floor().max(0.0) as Millis
    }

    /// Displacement from the origin, in px, `elapsed_ms` after spawn.
    ///
    /// Held at the origin during `delay`, then eased out over `duration`.
    pub fn offset_at(&self, elapsed_ms: Millis) -> (f32, f32) {
        let t = elapsed_ms as f32 / 1000.0 - self.delay;
        if t <= 0.0 || self.duration <= 0.0 {
            return (0.0, 0.0);
        }
        let p = (t / self.duration).min(1.0);
        let eased = 1.0 - (1.0 - p) * (1.0 - p);
        (self.travel.0 * eased, self.travel.1 * eased)
    }
}

/// Ordered photo assets shown after the yes: `<root>/1.jpg .. <root>/N.jpg`.
///
/// Paths are not checked for existence; a missing photo renders like any other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoStrip {
    paths: Vec<PathBuf>,
}

impl PhotoStrip {
    pub fn new(root: &Path, count: usize) -> Self {
        let paths = (1..=count).map(|i| root.join(format!("{}.jpg", i))).collect();
        PhotoStrip { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for previews and config dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(duration: f32, delay: f32) -> Particle {
        Particle {
            id: ParticleId::from_seq(0),
            glyph: GLYPHS[0],
            origin: (50.0, 50.0),
            travel: (100.0, -200.0),
            rotation: 0.0,
            size: 24.0,
            duration,
            delay,
        }
    }

    #[test]
    fn particle_ids_are_prefixed_sequence_numbers() {
        assert_eq!(ParticleId::from_seq(7).as_str(), "p-7");
        assert_ne!(ParticleId::from_seq(1), ParticleId::from_seq(2));
    }

    #[test]
    fn lifetime_rounds_down_to_whole_millis() {
        assert_eq!(particle(1.0, 0.5).lifetime_ms(), 1500);
        assert_eq!(particle(1.0004, 0.0).lifetime_ms(), 1000);
    }

    #[test]
    fn offset_holds_still_during_delay() {
        let p = particle(2.0, 0.5);
        assert_eq!(p.offset_at(0), (0.0, 0.0));
        assert_eq!(p.offset_at(500), (0.0, 0.0));
    }

    #[test]
    fn offset_reaches_full_travel_and_stays() {
        let p = particle(2.0, 0.5);
        assert_eq!(p.offset_at(2500), (100.0, -200.0));
        assert_eq!(p.offset_at(9000), (100.0, -200.0));
    }

    #[test]
    fn offset_is_eased_out() {
        let p = particle(2.0, 0.0);
        let (dx, _) = p.offset_at(1000);
        // halfway in time is three quarters of the way in space
        assert!((dx - 75.0).abs() < 0.01);
    }

    #[test]
    fn photo_strip_is_ordered_from_one() {
        let strip = PhotoStrip::new(Path::new("/"), 3);
        let names: Vec<_> = strip.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(names, vec!["/1.jpg", "/2.jpg", "/3.jpg"]);
        assert_eq!(strip.len(), 3);
    }

    #[test]
    fn empty_photo_strip() {
        let strip = PhotoStrip::new(Path::new("photos"), 0);
        assert!(strip.is_empty());
    }

    #[test]
    fn button_toggle_round_trips() {
        assert_eq!(Button::Yes.toggled(), Button::No);
        assert_eq!(Button::No.toggled().toggled(), Button::No);
    }

    #[test]
    fn trajectory_model_serializes_snake_case() {
        let json = serde_json::to_string(&TrajectoryModel::Burst).unwrap();
        assert_eq!(json, "\"burst\"");
    }
}
