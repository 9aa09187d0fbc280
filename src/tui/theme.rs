//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Magenta: the Yes button, hearts, the headline
//! - Red: the No button while it still works
//! - Cyan: keybinding hints, focused photo
//! - Dim: a No button that has given up, help text

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Yes button, hearts, headlines: magenta.
pub const STYLE_LOVE: Style = Style::new().fg(Color::Magenta);

/// Working No button: red.
pub const STYLE_DECLINE: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized text: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// The question and the celebration headline.
pub const STYLE_HEADLINE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

/// Button with keyboard focus.
pub const STYLE_FOCUSED: Style = Style::new().add_modifier(Modifier::REVERSED);

/// No button once it stops responding.
pub const STYLE_DISABLED: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::CROSSED_OUT);

/// Large particles.
pub const STYLE_PARTICLE_LARGE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_styles_have_expected_colors() {
        assert_eq!(STYLE_LOVE.fg, Some(Color::Magenta));
        assert_eq!(STYLE_DECLINE.fg, Some(Color::Red));
        assert_eq!(STYLE_INTERACTIVE.fg, Some(Color::Cyan));
        assert_eq!(STYLE_DIM.fg, Some(Color::DarkGray));
    }

    #[test]
    fn focused_style_is_reversed() {
        assert!(STYLE_FOCUSED.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn disabled_style_is_crossed_out() {
        assert!(STYLE_DISABLED.add_modifier.contains(Modifier::CROSSED_OUT));
    }
}
