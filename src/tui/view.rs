//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. Particles are painted
//! straight into the frame buffer after the widgets, so they float on top.
//! Rotation has no terminal equivalent and is not drawn; size only picks
//! between a plain and a bold style.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::interaction::InteractionState;
use crate::particles::{ActiveParticle, ParticleLoop};
use crate::types::{Button, Millis, PhotoStrip};

use super::state::{App, Screen};
use super::theme;

/// Width in cells of a button at scale 1.
const BASE_BUTTON_WIDTH: f64 = 16.0;
/// Height in rows of a button at scale 1 (borders plus one label row).
const BASE_BUTTON_HEIGHT: f64 = 3.0;
/// Terminal cell size used to turn px travel into cells.
const CELL_WIDTH_PX: f32 = 8.0;
const CELL_HEIGHT_PX: f32 = 16.0;
/// Particles at least this many px draw bold.
const LARGE_PARTICLE_PX: f32 = 30.0;
/// Rows used by the photo strip.
const PHOTO_STRIP_HEIGHT: u16 = 4;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(&app.screen), chunks[0]);
    frame.render_widget(render_help(&app.screen), chunks[2]);

    let content_area = chunks[1];

    match &app.screen {
        Screen::Question { focus } => {
            render_question(&app.question, &app.card, *focus, frame, content_area);
        }
        Screen::Celebration { photo } => {
            render_celebration(app, *photo, frame, content_area);
            render_particles(&app.particles, app.now, frame, content_area);
        }
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(screen: &Screen) -> Paragraph<'static> {
    let title_text = match screen {
        Screen::Question { .. } => "heartcard",
        Screen::Celebration { .. } => "heartcard ♥",
    };

    Paragraph::new(Line::from(vec![Span::styled(title_text, theme::STYLE_TITLE)]))
}

fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Question { .. } => "[←/→] focus  [Enter] choose  [y] yes  [n] no  [q] quit",
        Screen::Celebration { .. } => "[←/→] photos  [r] replay  [q] quit",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// SCREEN: QUESTION
// ============================================================================

/// Button width in cells for a scale factor.
pub fn button_width(scale: f64) -> u16 {
    (BASE_BUTTON_WIDTH * scale).round().max(1.0) as u16
}

/// Button height in rows for a scale factor. Never below 3 (border + label).
pub fn button_height(scale: f64) -> u16 {
    (BASE_BUTTON_HEIGHT * scale).round().max(BASE_BUTTON_HEIGHT) as u16
}

fn render_question(
    question: &str,
    card: &InteractionState,
    focus: Button,
    frame: &mut Frame,
    area: Rect,
) {
    let yes_scale = card.positive_scale();
    let no_scale = card.negative_scale();
    let row_height = button_height(yes_scale);

    let rows = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(2),          // question
        Constraint::Length(1),          // gap
        Constraint::Length(row_height), // buttons
        Constraint::Length(1),          // hint
        Constraint::Min(0),
    ])
    .split(area);

    let headline = Paragraph::new(Line::from(Span::styled(
        question.to_string(),
        theme::STYLE_HEADLINE,
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(headline, rows[1]);

    let buttons = Layout::horizontal([
        Constraint::Length(button_width(yes_scale)),
        Constraint::Length(2),
        Constraint::Length(button_width(no_scale)),
    ])
    .flex(Flex::Center)
    .split(rows[3]);

    let yes = button("Yes", theme::STYLE_LOVE, focus == Button::Yes);
    frame.render_widget(yes, buttons[0]);

    let no_area = Rect {
        height: button_height(no_scale).min(buttons[2].height),
        ..buttons[2]
    };
    let no = if card.decline_enabled() {
        button(card.decline_label(), theme::STYLE_DECLINE, focus == Button::No)
    } else {
        button(card.decline_label(), theme::STYLE_DISABLED, false)
    };
    frame.render_widget(no, no_area);

    if !card.decline_enabled() {
        let hint = Paragraph::new(Span::styled("(the No button gave up)", theme::STYLE_DIM))
            .alignment(Alignment::Center);
        frame.render_widget(hint, rows[4]);
    }
}

fn button(label: &str, style: Style, focused: bool) -> Paragraph<'static> {
    let style = if focused {
        style.patch(theme::STYLE_FOCUSED)
    } else {
        style
    };
    Paragraph::new(Line::from(label.to_string()))
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::bordered().border_style(style))
}

// ============================================================================
// SCREEN: CELEBRATION
// ============================================================================

fn render_celebration(app: &App, photo: usize, frame: &mut Frame, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2), // headline
        Constraint::Length(1), // tally
        Constraint::Min(0),    // open sky for hearts
        Constraint::Length(PHOTO_STRIP_HEIGHT),
    ])
    .split(area);

    let headline = Paragraph::new(Line::from(Span::styled(
        app.celebration.clone(),
        theme::STYLE_HEADLINE,
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(headline, rows[1]);

    let tally = match app.card.decline_count() {
        0 => "Yes on the first try!".to_string(),
        1 => "Only one no along the way.".to_string(),
        n => format!("Only {} no's along the way.", n),
    };
    let tally = Paragraph::new(Span::styled(tally, theme::STYLE_DIM)).alignment(Alignment::Center);
    frame.render_widget(tally, rows[2]);

    render_photo_strip(&app.photos, photo, frame, rows[4]);
}

fn render_photo_strip(photos: &PhotoStrip, focused: usize, frame: &mut Frame, area: Rect) {
    if photos.is_empty() {
        return;
    }

    let n = photos.len() as u32;
    let tiles = Layout::horizontal((0..n).map(|_| Constraint::Ratio(1, n))).split(area);

    for (i, (path, tile)) in photos.iter().zip(tiles.iter()).enumerate() {
        let style = if i == focused {
            theme::STYLE_INTERACTIVE
        } else {
            theme::STYLE_DIM
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let block = Block::bordered()
            .title(format!(" {} ", i + 1))
            .border_style(style);
        let paragraph = Paragraph::new(Line::from(name))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, *tile);
    }
}

// ============================================================================
// PARTICLES
// ============================================================================

/// Terminal cell a particle occupies at `now`, if it is on screen.
///
/// Origins are viewport percentages; travel is px, scaled by a nominal
/// cell size. Glyphs are two cells wide, so the last column is off limits.
pub fn particle_cell(p: &ActiveParticle, now: Millis, area: Rect) -> Option<(u16, u16)> {
    let (dx, dy) = p.offset_at(now);
    let x = p.particle.origin.0 / 100.0 * area.width as f32 + dx / CELL_WIDTH_PX;
    let y = p.particle.origin.1 / 100.0 * area.height as f32 + dy / CELL_HEIGHT_PX;
    if x < 0.0 || y < 0.0 {
        return None;
    }

    let (x, y) = (x.floor() as u16, y.floor() as u16);
    if x >= area.width.saturating_sub(1) || y >= area.height {
        return None;
    }
    Some((area.x + x, area.y + y))
}

fn render_particles(particles: &ParticleLoop, now: Millis, frame: &mut Frame, area: Rect) {
    let buffer = frame.buffer_mut();
    for p in particles.particles() {
        if let Some((x, y)) = particle_cell(p, now, area) {
            let style = if p.particle.size >= LARGE_PARTICLE_PX {
                theme::STYLE_PARTICLE_LARGE
            } else {
                theme::STYLE_LOVE
            };
            buffer.set_string(x, y, p.particle.glyph, style);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
