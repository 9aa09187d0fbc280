//! Interaction state controller: the answer so far and how hard the user
//! has tried to say no.
//!
//! Every operation is total. The controller never touches the particle
//! loop directly; it returns a [`LoopSignal`] and the caller wires it up.

use tracing::debug;

use crate::types::Choice;

/// Growth of the Yes button (and shrink of the No button) per decline.
pub const SCALE_STEP: f64 = 0.12;
/// Largest the Yes button gets.
pub const POSITIVE_MAX: f64 = 2.2;
/// Smallest the No button gets.
pub const NEGATIVE_MIN: f64 = 0.25;
/// At or below this No-button scale the button stops responding.
pub const DECLINE_DISABLED_AT: f64 = 0.26;

/// Labels the No button cycles through as the user keeps declining.
const DECLINE_LABELS: [&str; 8] = [
    "No",
    "Are you sure?",
    "Really sure?",
    "Think again!",
    "Last chance!",
    "Surely not?",
    "You might regret this!",
    "Have a heart!",
];

/// What the particle loop should do after a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    Activate,
    Deactivate,
    Unchanged,
}

/// The answer and decline count. Lives for one run; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    choice: Choice,
    decline_count: u32,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choice(&self) -> Choice {
        self.choice
    }

    pub fn decline_count(&self) -> u32 {
        self.decline_count
    }

    pub fn is_affirmed(&self) -> bool {
        self.choice == Choice::Affirmed
    }

    /// Record a yes. Only the first call activates the particle loop.
    pub fn activate_affirmative(&mut self) -> LoopSignal {
        if self.is_affirmed() {
            return LoopSignal::Unchanged;
        }
        self.choice = Choice::Affirmed;
        debug!(declines = self.decline_count, "answer affirmed");
        LoopSignal::Activate
    }

    /// Record a no. Ignored once the answer is yes.
    pub fn register_decline(&mut self) -> LoopSignal {
        if !self.is_affirmed() {
            self.decline_count = self.decline_count.saturating_add(1);
            debug!(declines = self.decline_count, "decline registered");
        }
        LoopSignal::Unchanged
    }

    /// Back to the question with a clean slate.
    pub fn reset(&mut self) -> LoopSignal {
        let was_affirmed = self.is_affirmed();
        *self = Self::default();
        if was_affirmed {
            debug!("replay requested");
            LoopSignal::Deactivate
        } else {
            LoopSignal::Unchanged
        }
    }

    /// Scale factor for the Yes button, in `[1, 2.2]`.
    pub fn positive_scale(&self) -> f64 {
        positive_scale(self.decline_count)
    }

    /// Scale factor for the No button, in `[0.25, 1]`.
    pub fn negative_scale(&self) -> f64 {
        negative_scale(self.decline_count)
    }

    /// Whether the No button still responds.
    pub fn decline_enabled(&self) -> bool {
        !self.is_affirmed() && self.negative_scale() > DECLINE_DISABLED_AT
    }

    /// Current No-button label.
    pub fn decline_label(&self) -> &'static str {
        let i = (self.decline_count as usize).min(DECLINE_LABELS.len() - 1);
        DECLINE_LABELS[i]
    }
}

/// `clamp(1 + n * 0.12, 1, 2.2)`
pub fn positive_scale(decline_count: u32) -> f64 {
    (1.0 + decline_count as f64 * SCALE_STEP).clamp(1.0, POSITIVE_MAX)
}

/// `clamp(1 - n * 0.12, 0.25, 1)`
pub fn negative_scale(decline_count: u32) -> f64 {
    (1.0 - decline_count as f64 * SCALE_STEP).clamp(NEGATIVE_MIN, 1.0)
}

// ============================================================================
// TESTS
// ============================================================================
