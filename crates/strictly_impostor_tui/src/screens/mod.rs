//! Screen implementations for the shell.

mod categories;
pub mod confirm;
mod config;
mod counts;
mod players;
mod reveal;
mod voting;

pub use categories::CategoriesScreen;
pub use config::ConfigScreen;
pub use counts::{ImpostorCountScreen, PlayerCountScreen};
pub use players::PlayersScreen;
pub use reveal::RevealScreen;
pub use voting::{ResultsScreen, VotingScreen};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

/// Splits the frame into title, body and help bar.
fn frame_chunks(frame: &Frame) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());
    (chunks[0], chunks[1], chunks[2])
}

fn render_title(frame: &mut Frame, area: Rect, text: &str) {
    let title = Paragraph::new(text.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_help(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

/// Moves a list cursor one step, wrapping at both ends.
fn wrap_step(current: Option<usize>, count: usize, forward: bool) -> usize {
    if count == 0 {
        return 0;
    }
    match (current, forward) {
        (Some(i), true) => (i + 1) % count,
        (Some(i), false) if i > 0 => i - 1,
        (_, false) => count - 1,
        (None, true) => 0,
    }
}
