//! Number pickers for the player and impostor counts.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use strictly_impostor::{MAX_PLAYERS, MIN_PLAYERS, SessionController};
use tracing::instrument;

use super::{frame_chunks, render_help, render_title};
use crate::screen::{Screen, ScreenTransition};

const HELP: &str = "←↓: Fewer | →↑: More | Enter/Esc: Done";

/// Step for a picker key, if it is one.
fn key_delta(code: KeyCode) -> Option<i32> {
    match code {
        KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => Some(-1),
        KeyCode::Right | KeyCode::Up | KeyCode::Char('+') => Some(1),
        _ => None,
    }
}

fn render_picker(frame: &mut Frame, title: &str, value: usize, range: String) {
    let (title_area, body, help) = frame_chunks(frame);
    render_title(frame, title_area, title);

    let text = format!("\n◀  {}  ▶\n\n{}", value, range);
    let picker = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(picker, body);

    render_help(frame, help, HELP);
}

/// Picker for the number of players.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerCountScreen;

impl Screen for PlayerCountScreen {
    #[instrument(skip(self, frame, controller))]
    fn render(&self, frame: &mut Frame, controller: &SessionController) {
        render_picker(
            frame,
            "How many players?",
            *controller.settings().player_count(),
            format!("{} to {} players", MIN_PLAYERS, MAX_PLAYERS),
        );
    }

    #[instrument(skip(self, key, controller))]
    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut SessionController,
    ) -> ScreenTransition {
        if let Some(delta) = key_delta(key.code) {
            controller.step_player_count(delta);
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc => ScreenTransition::GoToConfig,
            _ => ScreenTransition::Stay,
        }
    }
}

/// Picker for the number of impostors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpostorCountScreen;

impl Screen for ImpostorCountScreen {
    #[instrument(skip(self, frame, controller))]
    fn render(&self, frame: &mut Frame, controller: &SessionController) {
        let players = *controller.settings().player_count();
        render_picker(
            frame,
            "How many impostors?",
            *controller.settings().impostor_count(),
            format!(
                "1 to {} with {} players",
                players.saturating_sub(1).max(1),
                players
            ),
        );
    }

    #[instrument(skip(self, key, controller))]
    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut SessionController,
    ) -> ScreenTransition {
        if let Some(delta) = key_delta(key.code) {
            controller.step_impostor_count(delta);
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc => ScreenTransition::GoToConfig,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use strictly_impostor::{MemoryStore, WordBank};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_player_picker_steps_controller() {
        let mut ctl = SessionController::with_seed(WordBank::builtin(), MemoryStore::new(), 1);
        let mut screen = PlayerCountScreen;
        screen.handle_key(press(KeyCode::Right), &mut ctl);
        screen.handle_key(press(KeyCode::Up), &mut ctl);
        assert_eq!(*ctl.settings().player_count(), 5);
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut ctl),
            ScreenTransition::GoToConfig
        );
    }

    #[test]
    fn test_impostor_picker_respects_bounds() {
        let mut ctl = SessionController::with_seed(WordBank::builtin(), MemoryStore::new(), 1);
        let mut screen = ImpostorCountScreen;
        screen.handle_key(press(KeyCode::Right), &mut ctl);
        screen.handle_key(press(KeyCode::Right), &mut ctl);
        assert_eq!(*ctl.settings().impostor_count(), 2);
    }
}
