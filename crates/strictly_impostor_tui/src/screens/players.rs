//! Player selection: who looks at the device next.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use strictly_impostor::SessionController;
use tracing::{debug, instrument};

use super::{frame_chunks, render_help, render_title, wrap_step};
use crate::screen::{Screen, ScreenTransition};

/// State for the player selection screen.
#[derive(Debug)]
pub struct PlayersScreen {
    list_state: ListState,
}

impl PlayersScreen {
    /// Places the cursor on the first seat still waiting for a reveal.
    #[instrument(skip(controller))]
    pub fn new(controller: &SessionController) -> Self {
        let first_open = controller.players().iter().position(|p| !p.revealed);
        debug!(?first_open, "Initializing PlayersScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(first_open.unwrap_or(0)));
        Self { list_state }
    }
}

impl Screen for PlayersScreen {
    #[instrument(skip(self, frame, controller))]
    fn render(&self, frame: &mut Frame, controller: &SessionController) {
        let (title, body, help) = frame_chunks(frame);
        render_title(frame, title, "Pass the device");

        let slots = controller.players();
        let items: Vec<ListItem> = slots
            .iter()
            .map(|slot| {
                if slot.revealed {
                    ListItem::new(format!("Player {}  ✓", slot.ordinal))
                        .style(Style::default().fg(Color::DarkGray))
                } else {
                    ListItem::new(format!("Player {}", slot.ordinal))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Revealed {} of {}",
                controller.revealed_count(),
                slots.len()
            )))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, body, &mut list_state);

        render_help(frame, help, "↑↓: Navigate | Enter: Reveal | n: New game");
    }

    #[instrument(skip(self, key, controller))]
    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut SessionController,
    ) -> ScreenTransition {
        let count = controller.players().len();
        match key.code {
            KeyCode::Up => {
                let i = wrap_step(self.list_state.selected(), count, false);
                self.list_state.select(Some(i));
            }
            KeyCode::Down => {
                let i = wrap_step(self.list_state.selected(), count, true);
                self.list_state.select(Some(i));
            }
            KeyCode::Enter => {
                let index = self.list_state.selected().unwrap_or(0);
                controller.pick_player(index);
            }
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                // Seats 1-9 by number.
                if let Some(ordinal) = c.to_digit(10) {
                    controller.pick_player(ordinal as usize - 1);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                controller.request_new_game();
            }
            _ => {}
        }
        ScreenTransition::Stay
    }
}
