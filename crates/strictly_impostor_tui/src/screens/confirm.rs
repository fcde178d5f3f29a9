//! New-game confirmation overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strictly_impostor::SessionController;
use tracing::{info, instrument};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Draws the overlay on top of the current screen.
#[instrument(skip(frame))]
pub fn render(frame: &mut Frame) {
    let area = centered(frame.area(), 44, 7);
    let dialog = Paragraph::new("\nDiscard this game and start over?\n\ny: Yes | n: No")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("New game"));
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// Confirms or cancels the pending request; other keys are swallowed.
#[instrument(skip(key, controller))]
pub fn handle_key(key: KeyEvent, controller: &mut SessionController) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            info!("New game confirmed");
            controller.confirm_new_game();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            controller.cancel_new_game();
        }
        _ => {}
    }
}
