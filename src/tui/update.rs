//! State transitions.
//!
//! `update` is pure: (Screen, Action, answer) -> Transition. Fully
//! testable without a terminal. Unhandled actions return the current
//! screen unchanged.
//!
//! `apply_effect` is the one place the shared state changes: it runs the
//! controller operation, forwards the resulting signal to the particle
//! loop, and picks the next screen.

use crate::interaction::{InteractionState, LoopSignal};
use crate::types::{Button, Millis};

use super::state::{Action, App, Effect, Screen, Transition};

/// Pure state transition function.
pub fn update(
    screen: Screen,
    action: &Action,
    card: &InteractionState,
    photo_count: usize,
) -> Transition {
    match screen {
        Screen::Question { focus } => update_question(focus, action, card),
        Screen::Celebration { photo } => update_celebration(photo, action, photo_count),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Question: move focus, press buttons. A disabled No swallows presses.
fn update_question(focus: Button, action: &Action, card: &InteractionState) -> Transition {
    let stay = |focus: Button| Transition::Screen(Screen::Question { focus });
    let press = |button: Button| match button {
        Button::Yes => Transition::Effect(Effect::Affirm),
        Button::No if card.decline_enabled() => Transition::Effect(Effect::Decline),
        Button::No => stay(focus),
    };

    match action {
        Action::Left => stay(Button::Yes),
        Action::Right => stay(Button::No),
        Action::ToggleFocus => stay(focus.toggled()),
        Action::Activate => press(focus),
        Action::Yes => press(Button::Yes),
        Action::No => press(Button::No),
        Action::Quit => Transition::Quit,
        Action::Replay => stay(focus),
    }
}

/// Celebration: browse photos, replay, quit.
fn update_celebration(photo: usize, action: &Action, photo_count: usize) -> Transition {
    match action {
        Action::Left => Transition::Screen(Screen::Celebration {
            photo: photo.saturating_sub(1),
        }),
        Action::Right => {
            let photo = if photo_count == 0 {
                0
            } else {
                (photo + 1).min(photo_count - 1)
            };
            Transition::Screen(Screen::Celebration { photo })
        }
        Action::Replay => Transition::Effect(Effect::Replay),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Celebration { photo }),
    }
}

// ============================================================================
// EFFECTS
// ============================================================================

/// Apply a shared-state change at time `now` and move to the next screen.
pub fn apply_effect(app: &mut App, effect: Effect, now: Millis) {
    let signal = match effect {
        Effect::Decline => app.card.register_decline(),
        Effect::Affirm => app.card.activate_affirmative(),
        Effect::Replay => app.card.reset(),
    };

    match signal {
        LoopSignal::Activate => app.particles.activate(now),
        LoopSignal::Deactivate => app.particles.deactivate(),
        LoopSignal::Unchanged => {}
    }

    app.screen = if app.card.is_affirmed() {
        match app.screen {
            Screen::Celebration { photo } => Screen::Celebration { photo },
            Screen::Question { .. } => Screen::celebration(),
        }
    } else if app.card.decline_enabled() && effect == Effect::Decline {
        Screen::Question { focus: Button::No }
    } else {
        Screen::question()
    };
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CardConfig, ParticleConfig};

    fn card_with_declines(n: u32) -> InteractionState {
        let mut card = InteractionState::new();
        for _ in 0..n {
            card.register_decline();
        }
        card
    }

    fn seeded_app() -> App {
        let config = CardConfig {
            particles: ParticleConfig {
                seed: Some(3),
                ..ParticleConfig::default()
            },
            ..CardConfig::default()
        };
        App::new(&config)
    }

    // -- Question --

    #[test]
    fn question_quit() {
        let card = InteractionState::new();
        assert_eq!(update(Screen::question(), &Action::Quit, &card, 4), Transition::Quit);
    }

    #[test]
    fn question_right_focuses_no() {
        let card = InteractionState::new();
        let result = update(Screen::question(), &Action::Right, &card, 4);
        assert_eq!(result, Transition::Screen(Screen::Question { focus: Button::No }));
    }

    #[test]
    fn question_toggle_swaps_focus() {
        let card = InteractionState::new();
        let screen = Screen::Question { focus: Button::No };
        let result = update(screen, &Action::ToggleFocus, &card, 4);
        assert_eq!(result, Transition::Screen(Screen::Question { focus: Button::Yes }));
    }

    #[test]
    fn question_activate_on_yes_affirms() {
        let card = InteractionState::new();
        let result = update(Screen::question(), &Action::Activate, &card, 4);
        assert_eq!(result, Transition::Effect(Effect::Affirm));
    }

    #[test]
    fn question_activate_on_no_declines() {
        let card = InteractionState::new();
        let screen = Screen::Question { focus: Button::No };
        let result = update(screen, &Action::Activate, &card, 4);
        assert_eq!(result, Transition::Effect(Effect::Decline));
    }

    #[test]
    fn question_no_is_swallowed_once_disabled() {
        let card = card_with_declines(7);
        let screen = Screen::Question { focus: Button::No };
        let result = update(screen.clone(), &Action::No, &card, 4);
        assert_eq!(result, Transition::Screen(screen));
    }

    #[test]
    fn question_yes_still_works_when_no_disabled() {
        let card = card_with_declines(20);
        let result = update(Screen::question(), &Action::Yes, &card, 4);
        assert_eq!(result, Transition::Effect(Effect::Affirm));
    }

    #[test]
    fn question_ignores_replay() {
        let card = InteractionState::new();
        let result = update(Screen::question(), &Action::Replay, &card, 4);
        assert_eq!(result, Transition::Screen(Screen::question()));
    }

    // -- Celebration --

    #[test]
    fn celebration_right_clamps_at_last_photo() {
        let card = InteractionState::new();
        let result = update(Screen::Celebration { photo: 3 }, &Action::Right, &card, 4);
        assert_eq!(result, Transition::Screen(Screen::Celebration { photo: 3 }));
    }

    #[test]
    fn celebration_left_at_first_stays() {
        let card = InteractionState::new();
        let result = update(Screen::celebration(), &Action::Left, &card, 4);
        assert_eq!(result, Transition::Screen(Screen::celebration()));
    }

    #[test]
    fn celebration_without_photos_stays_at_zero() {
        let card = InteractionState::new();
        let result = update(Screen::celebration(), &Action::Right, &card, 0);
        assert_eq!(result, Transition::Screen(Screen::celebration()));
    }

    #[test]
    fn celebration_replay_emits_effect() {
        let card = InteractionState::new();
        let result = update(Screen::Celebration { photo: 2 }, &Action::Replay, &card, 4);
        assert_eq!(result, Transition::Effect(Effect::Replay));
    }

    #[test]
    fn celebration_ignores_answer_keys() {
        let card = InteractionState::new();
        let result = update(Screen::celebration(), &Action::No, &card, 4);
        assert_eq!(result, Transition::Screen(Screen::celebration()));
    }

    // -- Effects --

    #[test]
    fn decline_effect_grows_count_and_keeps_focus_on_no() {
        let mut app = seeded_app();
        apply_effect(&mut app, Effect::Decline, 0);
        assert_eq!(app.card.decline_count(), 1);
        assert_eq!(app.screen, Screen::Question { focus: Button::No });
        assert!(!app.particles.is_active());
    }

    #[test]
    fn last_decline_moves_focus_back_to_yes() {
        let mut app = seeded_app();
        for _ in 0..7 {
            apply_effect(&mut app, Effect::Decline, 0);
        }
        assert!(!app.card.decline_enabled());
        assert_eq!(app.screen, Screen::question());
    }

    #[test]
    fn affirm_effect_starts_hearts_and_celebrates() {
        let mut app = seeded_app();
        apply_effect(&mut app, Effect::Affirm, 1_000);
        assert!(app.card.is_affirmed());
        assert!(app.particles.is_active());
        assert_eq!(app.particles.len(), 2);
        assert_eq!(app.screen, Screen::celebration());
    }

    #[test]
    fn replay_effect_clears_hearts_and_resets() {
        let mut app = seeded_app();
        apply_effect(&mut app, Effect::Decline, 0);
        apply_effect(&mut app, Effect::Affirm, 0);
        app.particles.advance(2_000);
        apply_effect(&mut app, Effect::Replay, 2_000);
        assert!(!app.particles.is_active());
        assert_eq!(app.particles.len(), 0);
        assert_eq!(app.particles.pending_timers(), 0);
        assert_eq!(app.card.decline_count(), 0);
        assert_eq!(app.screen, Screen::question());
    }
}
