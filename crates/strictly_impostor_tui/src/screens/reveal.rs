//! Private reveal for one player.
//!
//! Renders only the [`RevealView`]; while hidden it has nothing secret to
//! draw. There is no way back from here except a confirmed new game.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_impostor::{RevealContent, RevealView, SessionController};
use tracing::instrument;

use super::{frame_chunks, render_help, render_title};
use crate::screen::{Screen, ScreenTransition};

/// Reveal screen; all state lives in the controller's reveal gate.
#[derive(Debug, Default)]
pub struct RevealScreen;

impl RevealScreen {
    /// Creates the reveal screen.
    pub fn new() -> Self {
        Self
    }
}

/// The view to draw: hidden again while a new game awaits confirmation,
/// since the overlay does not cover the card.
fn visible_view(controller: &SessionController) -> Option<RevealView> {
    let view = controller.reveal_view()?;
    if controller.confirm_pending() {
        return Some(RevealView::Hidden {
            ordinal: view.ordinal(),
        });
    }
    Some(view)
}

fn content_lines(view: &RevealView, controller: &SessionController) -> Vec<Line<'static>> {
    let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
    match view {
        RevealView::Hidden { ordinal } => vec![
            Line::from(""),
            Line::from(format!("Player {}, take the device.", ordinal)),
            Line::from(""),
            Line::from(Span::styled("[ press Space to reveal ]", bold(Color::Yellow))),
        ],
        RevealView::Showing {
            content, category, ..
        } => {
            let mut lines = vec![Line::from("")];
            match content {
                RevealContent::Civilian { secret_word } => {
                    lines.push(Line::from("The secret word is"));
                    lines.push(Line::from(Span::styled(secret_word.clone(), bold(Color::Green))));
                }
                RevealContent::Impostor { hint } => {
                    lines.push(Line::from(Span::styled("You are the IMPOSTOR", bold(Color::Red))));
                    if let Some(hint) = hint {
                        lines.push(Line::from(""));
                        lines.push(Line::from(format!("Hint: {}", hint)));
                    }
                }
            }
            if let Some(category) = category {
                lines.push(Line::from(""));
                lines.push(Line::from(format!(
                    "Category: {}",
                    controller.bank().display_name(category)
                )));
            }
            lines
        }
    }
}

impl Screen for RevealScreen {
    #[instrument(skip(self, frame, controller))]
    fn render(&self, frame: &mut Frame, controller: &SessionController) {
        let (title, body, help) = frame_chunks(frame);
        let Some(view) = visible_view(controller) else {
            return;
        };
        render_title(frame, title, &format!("Player {}", view.ordinal()));

        let card = Paragraph::new(content_lines(&view, controller))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(card, body);

        let help_text = if view.can_acknowledge() {
            "Enter: Got it | Esc: New game"
        } else {
            "Space: Reveal | Esc: New game"
        };
        render_help(frame, help, help_text);
    }

    #[instrument(skip(self, key, controller))]
    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut SessionController,
    ) -> ScreenTransition {
        // Uncovering and "Got it" never share a key.
        match key.code {
            KeyCode::Char(' ') => {
                controller.tap_reveal();
            }
            KeyCode::Enter => {
                controller.acknowledge();
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                controller.request_new_game();
            }
            _ => {}
        }
        ScreenTransition::Stay
    }
}
