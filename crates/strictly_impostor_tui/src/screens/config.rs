//! Configuration menu, the hub of the config phase.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use strictly_impostor::{SessionController, ValidationError};
use tracing::{debug, info, instrument, warn};

use super::{frame_chunks, render_help, render_title, wrap_step};
use crate::screen::{Screen, ScreenTransition};

/// Menu rows of the configuration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigOption {
    Players,
    Impostors,
    Categories,
    ShowCategory,
    ShowHint,
    Start,
    Quit,
}

impl ConfigOption {
    fn all() -> &'static [ConfigOption] {
        &[
            Self::Players,
            Self::Impostors,
            Self::Categories,
            Self::ShowCategory,
            Self::ShowHint,
            Self::Start,
            Self::Quit,
        ]
    }

    fn label(self, controller: &SessionController) -> String {
        let settings = controller.settings();
        let on_off = |b: bool| if b { "on" } else { "off" };
        match self {
            Self::Players => format!("Players            [ {} ]", settings.player_count()),
            Self::Impostors => format!("Impostors          [ {} ]", settings.impostor_count()),
            Self::Categories => format!(
                "Categories         [ {} of {} ]",
                settings.enabled_categories().len(),
                controller.bank().categories().len()
            ),
            Self::ShowCategory => format!(
                "Show category      [ {} ]",
                on_off(*settings.display_category())
            ),
            Self::ShowHint => format!(
                "Show impostor hint [ {} ]",
                on_off(*settings.display_impostor_hint())
            ),
            Self::Start => "Start game".to_string(),
            Self::Quit => "Quit".to_string(),
        }
    }
}

/// State for the configuration screen.
#[derive(Debug)]
pub struct ConfigScreen {
    list_state: ListState,
    error: Option<ValidationError>,
}

impl ConfigScreen {
    /// Creates the menu with the cursor on the first row.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing ConfigScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            list_state,
            error: None,
        }
    }

    fn selected_option(&self) -> ConfigOption {
        let options = ConfigOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }

    /// Handles Left/Right on a row; counts step in place.
    fn adjust(&mut self, controller: &mut SessionController, delta: i32) {
        match self.selected_option() {
            ConfigOption::Players => {
                controller.step_player_count(delta);
            }
            ConfigOption::Impostors => {
                controller.step_impostor_count(delta);
            }
            ConfigOption::ShowCategory => {
                let current = *controller.settings().display_category();
                controller.set_display_category(!current);
            }
            ConfigOption::ShowHint => {
                let current = *controller.settings().display_impostor_hint();
                controller.set_display_impostor_hint(!current);
            }
            _ => {}
        }
    }

    #[instrument(skip(self, controller))]
    fn start(&mut self, controller: &mut SessionController) {
        match controller.start_game() {
            Ok(outcome) => {
                info!(?outcome, "Start requested");
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Configuration rejected");
                self.error = Some(e);
            }
        }
    }
}

impl Default for ConfigScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ConfigScreen {
    #[instrument(skip(self, frame, controller))]
    fn render(&self, frame: &mut Frame, controller: &SessionController) {
        let (title, body, help) = frame_chunks(frame);
        render_title(frame, title, "Strictly Impostor");

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(body);

        let items: Vec<ListItem> = ConfigOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label(controller)))
            .collect();
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("New game"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, sections[0], &mut list_state);

        let status = match &self.error {
            Some(e) => Paragraph::new(e.to_string()).style(Style::default().fg(Color::Red)),
            None => Paragraph::new("Pass the device around once the game starts.")
                .style(Style::default().fg(Color::Green)),
        };
        frame.render_widget(
            status
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            sections[1],
        );

        render_help(
            frame,
            help,
            "↑↓: Navigate | ←→: Adjust | Enter: Select | q: Quit",
        );
    }

    #[instrument(skip(self, key, controller))]
    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut SessionController,
    ) -> ScreenTransition {
        let count = ConfigOption::all().len();
        match key.code {
            KeyCode::Up => {
                let i = wrap_step(self.list_state.selected(), count, false);
                self.list_state.select(Some(i));
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                let i = wrap_step(self.list_state.selected(), count, true);
                self.list_state.select(Some(i));
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.adjust(controller, -1);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.adjust(controller, 1);
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                debug!(?option, "Config option selected");
                match option {
                    ConfigOption::Players => ScreenTransition::GoToPlayerCount,
                    ConfigOption::Impostors => ScreenTransition::GoToImpostorCount,
                    ConfigOption::Categories => ScreenTransition::GoToCategories,
                    ConfigOption::ShowCategory | ConfigOption::ShowHint => {
                        self.adjust(controller, 0);
                        ScreenTransition::Stay
                    }
                    ConfigOption::Start => {
                        self.start(controller);
                        ScreenTransition::Stay
                    }
                    ConfigOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.start(controller);
                ScreenTransition::Stay
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
