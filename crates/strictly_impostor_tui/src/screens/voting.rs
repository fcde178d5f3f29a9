//! Voting and results screens.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strictly_impostor::SessionController;
use tracing::instrument;

use super::{frame_chunks, render_help, render_title};
use crate::screen::{Screen, ScreenTransition};

/// Step-by-step guide for the discussion; `starter` is a 1-based ordinal.
fn guide_lines(starter: usize) -> Vec<Line<'static>> {
    let heading = |text: &'static str, color: Color| {
        Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    };
    let bullet = |text: String| Line::from(format!("  • {}", text));
    vec![
        heading("1. Starting player", Color::Blue),
        bullet(format!("Player {} begins the round.", starter)),
        bullet("Speaking order runs on from there.".to_string()),
        Line::from(""),
        heading("2. Group discussion", Color::Magenta),
        bullet("Take turns clockwise discussing clues.".to_string()),
        bullet("Look for answers that do not fit the secret word.".to_string()),
        Line::from(""),
        heading("3. Clue rounds", Color::Yellow),
        bullet("Each player says one word related to the secret.".to_string()),
        bullet("Repeat two or three times to gather more context.".to_string()),
        Line::from(""),
        heading("4. Vote", Color::Red),
        bullet("Everyone votes for who they think the impostor is.".to_string()),
        bullet("Once all votes are in, press Enter to reveal the impostors.".to_string()),
    ]
}

/// Discussion phase; the app only names who speaks first.
#[derive(Debug, Default)]
pub struct VotingScreen;

impl VotingScreen {
    /// Creates the voting screen.
    pub fn new() -> Self {
        Self
    }
}

impl Screen for VotingScreen {
    #[instrument(skip(self, frame, controller))]
    fn render(&self, frame: &mut Frame, controller: &SessionController) {
        let (title, body, help) = frame_chunks(frame);
        render_title(frame, title, "Discuss and vote");

        let Some(starter) = controller.starting_player() else {
            return;
        };
        let card = Paragraph::new(guide_lines(starter))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Time to discuss and vote"),
            );
        frame.render_widget(card, body);

        render_help(frame, help, "Enter: Reveal impostors | n: New game");
    }

    #[instrument(skip(self, key, controller))]
    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut SessionController,
    ) -> ScreenTransition {
        match key.code {
            KeyCode::Enter => {
                controller.reveal_results();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                controller.request_new_game();
            }
            _ => {}
        }
        ScreenTransition::Stay
    }
}

/// Results: which seats were the impostors.
#[derive(Debug, Default)]
pub struct ResultsScreen;

impl ResultsScreen {
    /// Creates the results screen.
    pub fn new() -> Self {
        Self
    }
}

impl Screen for ResultsScreen {
    #[instrument(skip(self, frame, controller))]
    fn render(&self, frame: &mut Frame, controller: &SessionController) {
        let (title, body, help) = frame_chunks(frame);
        render_title(frame, title, "Results");

        let ordinals = controller.impostor_ordinals().unwrap_or_default();
        let names = ordinals
            .iter()
            .map(|o| format!("Player {}", o))
            .collect::<Vec<_>>()
            .join(", ");
        let heading = if ordinals.len() == 1 {
            "The impostor was"
        } else {
            "The impostors were"
        };
        let card = Paragraph::new(format!("\n{}\n\n{}", heading, names))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(card, body);

        render_help(frame, help, "Enter/n: New game");
    }

    #[instrument(skip(self, key, controller))]
    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut SessionController,
    ) -> ScreenTransition {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc
        ) {
            controller.request_new_game();
        }
        ScreenTransition::Stay
    }
}
