//! TUI state algebra: pure types, zero effects.
//!
//! Screen variants carry only per-screen transient state (button focus,
//! photo cursor). Shared data (the answer, the particle loop, the config)
//! lives in App.

use crossterm::event::KeyEvent;

use crate::config::CardConfig;
use crate::interaction::InteractionState;
use crate::particles::ParticleLoop;
use crate::types::{Button, Millis, PhotoStrip};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized; a redraw picks up the new size.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Current screen.
    pub screen: Screen,

    /// The answer so far.
    pub card: InteractionState,

    /// Floating hearts. Only active after the yes.
    pub particles: ParticleLoop,

    /// Ordered photos for the celebration screen.
    pub photos: PhotoStrip,

    /// Copy for both screens.
    pub question: String,
    pub celebration: String,

    /// Time the last frame was drawn at, on the run loop's clock.
    pub now: Millis,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The question with its two buttons.
    Question {
        /// Button that Enter/Space would press.
        focus: Button,
    },

    /// After the yes: message, hearts, photos.
    Celebration {
        /// Highlighted photo index.
        photo: usize,
    },
}

/// Default screen is the question with Yes focused.
impl Default for Screen {
    fn default() -> Self {
        Screen::question()
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move focus / photo cursor left.
    Left,
    /// Move focus / photo cursor right.
    Right,
    /// Swap focus between the buttons.
    ToggleFocus,
    /// Press whichever button has focus.
    Activate,
    /// Press Yes directly.
    Yes,
    /// Press No directly.
    No,
    /// Back to the question.
    Replay,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Change the shared state. The effects layer applies it and picks
    /// the next screen.
    Effect(Effect),
}

/// Shared-state change requested by a pure transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The user pressed No.
    Decline,
    /// The user pressed Yes.
    Affirm,
    /// The user asked to start over.
    Replay,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Fresh card on the question screen, loop inactive.
    pub fn new(config: &CardConfig) -> Self {
        App {
            screen: Screen::question(),
            card: InteractionState::new(),
            particles: ParticleLoop::new(config.particles.clone()),
            photos: PhotoStrip::new(&config.asset_root, config.photo_count),
            question: config.question.clone(),
            celebration: config.celebration.clone(),
            now: 0,
            should_quit: false,
        }
    }
}

impl Screen {
    /// Question with Yes focused.
    pub fn question() -> Self {
        Screen::Question { focus: Button::Yes }
    }

    /// Celebration starting at the first photo.
    pub fn celebration() -> Self {
        Screen::Celebration { photo: 0 }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn app_starts_on_question_with_idle_loop() {
        let app = App::new(&CardConfig::default());
        assert_eq!(app.screen, Screen::Question { focus: Button::Yes });
        assert!(!app.particles.is_active());
        assert_eq!(app.card.decline_count(), 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn app_builds_photo_strip_from_config() {
        let config = CardConfig {
            photo_count: 2,
            asset_root: "/pics".into(),
            ..CardConfig::default()
        };
        let app = App::new(&config);
        assert_eq!(app.photos.len(), 2);
        assert_eq!(app.photos.iter().nth(1), Some(Path::new("/pics/2.jpg")));
    }

    #[test]
    fn screen_default_is_question() {
        assert_eq!(Screen::default(), Screen::question());
    }

    #[test]
    fn celebration_starts_at_first_photo() {
        assert_eq!(Screen::celebration(), Screen::Celebration { photo: 0 });
    }

    #[test]
    fn transition_variants_are_distinguishable() {
        let t1 = Transition::Screen(Screen::question());
        let t2 = Transition::Quit;
        let t3 = Transition::Effect(Effect::Affirm);

        assert_ne!(t1, t2);
        assert_ne!(t2, t3);
        assert_ne!(Transition::Effect(Effect::Decline), t3);
    }
}
